mod bot;
mod commands;

pub use bot::{Data, create_framework};
