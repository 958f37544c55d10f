//! Brand classification by issuer prefix and total length.

use common::CardBrand;

use super::luhn::is_numeric;

/// Prefix and length rule for one issuer network.
struct IssuerRule {
    brand: CardBrand,
    prefixes: &'static [&'static str],
    lengths: &'static [usize],
}

impl IssuerRule {
    fn matches(&self, digits: &str) -> bool {
        self.lengths.contains(&digits.len())
            && self.prefixes.iter().any(|p| digits.starts_with(*p))
    }
}

/// Checked in order; the first matching rule wins.
const RULES: [IssuerRule; 4] = [
    IssuerRule {
        brand: CardBrand::Visa,
        prefixes: &["4"],
        lengths: &[13, 16],
    },
    IssuerRule {
        brand: CardBrand::MasterCard,
        prefixes: &["51", "52", "53", "54", "55"],
        lengths: &[16],
    },
    IssuerRule {
        brand: CardBrand::AmericanExpress,
        prefixes: &["34", "37"],
        lengths: &[15],
    },
    IssuerRule {
        brand: CardBrand::Discover,
        prefixes: &["6011", "65"],
        lengths: &[16],
    },
];

/// Determine the issuing network of `number`.
///
/// The input is taken as-is: separators are not stripped here, so a grouped
/// number such as `"4111 1111 1111 1111"` is [`CardBrand::Invalid`]. Use
/// [`super::normalize`] first when the caller may send grouped digits.
///
/// Classification does not look at the checksum; a number that fails
/// [`super::validate`] can still carry a brand.
pub fn classify(number: &str) -> CardBrand {
    if !is_numeric(number) {
        return CardBrand::Invalid;
    }
    RULES
        .iter()
        .find(|rule| rule.matches(number))
        .map_or(CardBrand::Unknown, |rule| rule.brand)
}
