use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Interpark,
    Ticketlink,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Interpark => "interpark",
            Vendor::Ticketlink => "ticketlink",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "interpark" => Ok(Vendor::Interpark),
            "ticketlink" => Ok(Vendor::Ticketlink),
            other => Err(format!("unknown vendor '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_display_and_parse() {
        assert_eq!(Vendor::Interpark.to_string(), "interpark");
        assert_eq!("TicketLink".parse::<Vendor>().unwrap(), Vendor::Ticketlink);
        assert!("melon".parse::<Vendor>().is_err());
    }
}
