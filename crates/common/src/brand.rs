//! Card issuer networks recognised by the service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The issuing network of a card number, as determined from its prefix and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardBrand {
    Visa,
    MasterCard,
    #[serde(rename = "American Express")]
    AmericanExpress,
    Discover,
    /// Purely numeric, but no issuer rule matched.
    Unknown,
    /// The input contained something other than digits.
    Invalid,
}

impl CardBrand {
    /// Display name used in API responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::MasterCard => "MasterCard",
            CardBrand::AmericanExpress => "American Express",
            CardBrand::Discover => "Discover",
            CardBrand::Unknown => "Unknown",
            CardBrand::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_to_display_name() {
        let json = serde_json::to_string(&CardBrand::AmericanExpress).unwrap();
        assert_eq!(json, "\"American Express\"");
        let json = serde_json::to_string(&CardBrand::MasterCard).unwrap();
        assert_eq!(json, "\"MasterCard\"");
    }

    #[test]
    fn display_matches_serde_name() {
        for brand in [
            CardBrand::Visa,
            CardBrand::MasterCard,
            CardBrand::AmericanExpress,
            CardBrand::Discover,
            CardBrand::Unknown,
            CardBrand::Invalid,
        ] {
            let json = serde_json::to_string(&brand).unwrap();
            assert_eq!(json, format!("\"{brand}\""));
        }
    }
}
