use std::fmt;
use std::str::FromStr;

use poise::ChoiceParameter;

use crate::error::AppError;

/// Platform routing values (Summoner-v4, League-v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ChoiceParameter)]
pub enum Platform {
    #[name = "BR - Brazil"]
    BR1,
    #[name = "EUNE - EU Nordic & East"]
    EUN1,
    #[name = "EUW - EU West"]
    EUW1,
    #[name = "JP - Japan"]
    JP1,
    #[name = "KR - Korea"]
    KR,
    #[name = "LAN - Latin America North"]
    LA1,
    #[name = "LAS - Latin America South"]
    LA2,
    #[name = "NA - North America"]
    NA1,
    #[name = "OCE - Oceania"]
    OC1,
    #[name = "TR - Turkey"]
    TR1,
    #[name = "RU - Russia"]
    RU,
    #[name = "PH - Philippines"]
    PH2,
    #[name = "SG - Singapore"]
    SG2,
    #[name = "TH - Thailand"]
    TH2,
    #[name = "TW - Taiwan"]
    TW2,
    #[name = "VN - Vietnam"]
    VN2,
}

/// Host prefix, regional cluster and display name of a platform.
struct PlatformInfo {
    host: &'static str,
    region: Region,
    name: &'static str,
}

impl Platform {
    fn info(self) -> PlatformInfo {
        let (host, region, name) = match self {
            Self::BR1 => ("br1", Region::Americas, "Brazil"),
            Self::LA1 => ("la1", Region::Americas, "Latin America North"),
            Self::LA2 => ("la2", Region::Americas, "Latin America South"),
            Self::NA1 => ("na1", Region::Americas, "North America"),
            Self::JP1 => ("jp1", Region::Asia, "Japan"),
            Self::KR => ("kr", Region::Asia, "Korea"),
            Self::EUN1 => ("eun1", Region::Europe, "EU Nordic & East"),
            Self::EUW1 => ("euw1", Region::Europe, "EU West"),
            Self::TR1 => ("tr1", Region::Europe, "Turkey"),
            Self::RU => ("ru", Region::Europe, "Russia"),
            Self::OC1 => ("oc1", Region::Sea, "Oceania"),
            Self::PH2 => ("ph2", Region::Sea, "Philippines"),
            Self::SG2 => ("sg2", Region::Sea, "Singapore"),
            Self::TH2 => ("th2", Region::Sea, "Thailand"),
            Self::TW2 => ("tw2", Region::Sea, "Taiwan"),
            Self::VN2 => ("vn2", Region::Sea, "Vietnam"),
        };
        PlatformInfo { host, region, name }
    }

    pub fn base_url(self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(self) -> &'static str {
        self.info().host
    }

    /// Regional cluster serving Account-v1 and Match-v5 for this platform.
    pub fn to_region(self) -> Region {
        self.info().region
    }

    pub fn display_name(self) -> &'static str {
        self.info().name
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BR" | "BR1" => Ok(Self::BR1),
            "EUNE" | "EUN" | "EUN1" => Ok(Self::EUN1),
            "EUW" | "EUW1" => Ok(Self::EUW1),
            "JP" | "JP1" => Ok(Self::JP1),
            "KR" => Ok(Self::KR),
            "LAN" | "LA1" => Ok(Self::LA1),
            "LAS" | "LA2" => Ok(Self::LA2),
            "NA" | "NA1" => Ok(Self::NA1),
            "OCE" | "OC" | "OC1" => Ok(Self::OC1),
            "TR" | "TR1" => Ok(Self::TR1),
            "RU" => Ok(Self::RU),
            "PH" | "PH2" => Ok(Self::PH2),
            "SG" | "SG2" => Ok(Self::SG2),
            "TH" | "TH2" => Ok(Self::TH2),
            "TW" | "TW2" => Ok(Self::TW2),
            "VN" | "VN2" => Ok(Self::VN2),
            _ => Err(AppError::InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regional routing values (Account-v1, Match-v5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    pub fn base_url(self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
