mod about;
mod check;
mod set_default;

pub use about::{info, show_period};
pub use check::check;
pub use set_default::set_default;
