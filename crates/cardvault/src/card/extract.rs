//! Locate a printed card number in OCR output.
//!
//! Each brand is matched by its own pattern describing the digit grouping
//! embossed on the physical card, with exactly one ASCII whitespace character
//! (space, tab, line feed, form feed or carriage return) between groups.
//! Unicode spaces, variable spacing and unseparated digit runs are not matched.

use std::ops::Range;

use common::CardBrand;
use once_cell::sync::Lazy;
use regex::Regex;

/// Printed layouts, listed in the order that breaks ties at the same offset.
static LAYOUTS: Lazy<[(CardBrand, Regex); 4]> = Lazy::new(|| {
    [
        // 4-6-5
        (
            CardBrand::AmericanExpress,
            layout(r"3[47][0-9]{2}_[0-9]{6}_[0-9]{5}"),
        ),
        // 4-4-4-4
        (
            CardBrand::Visa,
            layout(r"4[0-9]{3}_[0-9]{4}_[0-9]{4}_[0-9]{4}"),
        ),
        (
            CardBrand::MasterCard,
            layout(r"5[1-5]{3}_[0-9]{4}_[0-9]{4}_[0-9]{4}"),
        ),
        (
            CardBrand::Discover,
            layout(r"6(?:011|5[0-9]{2})_[0-9]{4}_[0-9]{4}_[0-9]{4}"),
        ),
    ]
});

/// Group separator. `_` in a layout stands for one of these.
const SEPARATOR: &str = r"[\t\n\f\r ]";

fn layout(pattern: &str) -> Regex {
    Regex::new(&pattern.replace('_', SEPARATOR)).expect("card layout pattern must compile")
}

/// A card number found in recognised text, still in its printed grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNumberCandidate<'a> {
    brand: CardBrand,
    span: Range<usize>,
    text: &'a str,
}

impl<'a> CardNumberCandidate<'a> {
    /// Brand whose layout matched.
    pub fn brand(&self) -> CardBrand {
        self.brand
    }

    /// Byte range of the match within the source text.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The matched text, grouping whitespace included.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// The matched digits with group separators removed.
    ///
    /// OCR may separate groups with tabs or line breaks, so every separator is
    /// dropped here, not only the spaces [`super::normalize`] handles.
    pub fn digits(&self) -> String {
        self.as_str().chars().filter(char::is_ascii_digit).collect()
    }
}

/// Find the first card number in `text`.
///
/// The match starting earliest in the text wins. Brands cannot share a
/// starting digit, but should two layouts ever match at the same offset the
/// order of [`LAYOUTS`] decides. Returns `None` when nothing matches; the
/// checksum is not consulted.
pub fn extract(text: &str) -> Option<CardNumberCandidate<'_>> {
    LAYOUTS
        .iter()
        .filter_map(|(brand, re)| re.find(text).map(|m| (*brand, m)))
        .min_by_key(|(_, m)| m.start())
        .map(|(brand, m)| CardNumberCandidate {
            brand,
            span: m.range(),
            text: m.as_str(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_visa_in_noisy_text() {
        let text = "total: visa 4111 1111 1111 1111 thanks";
        let c = extract(text).expect("visa number should match");
        assert_eq!(c.as_str(), "4111 1111 1111 1111");
        assert_eq!(c.brand(), CardBrand::Visa);
        assert_eq!(&text[c.span()], "4111 1111 1111 1111");
        assert_eq!(c.digits(), "4111111111111111");
    }

    #[test]
    fn no_match_is_none() {
        assert!(extract("").is_none());
        assert!(extract("no card here, just 1234 5678").is_none());
        assert!(extract("4111111111111111").is_none());
    }

    #[test]
    fn finds_amex_grouping() {
        let c = extract("AMEX\n3782 822463 10005\nVALID THRU 12/30").unwrap();
        assert_eq!(c.brand(), CardBrand::AmericanExpress);
        assert_eq!(c.digits(), "378282246310005");
    }

    #[test]
    fn finds_mastercard_with_restricted_digits() {
        let c = extract("5555 5555 5555 4444").unwrap();
        assert_eq!(c.brand(), CardBrand::MasterCard);
    }

    #[test]
    fn mastercard_layout_rejects_zero_in_leading_group() {
        // Each digit after the leading 5 must be 1-5 in the first group.
        assert!(extract("5105 1051 0510 5100").is_none());
    }

    #[test]
    fn finds_both_discover_prefixes() {
        let c = extract("card 6011 0000 0000 0004").unwrap();
        assert_eq!(c.brand(), CardBrand::Discover);
        let c = extract("card 6500 0000 0000 0002").unwrap();
        assert_eq!(c.brand(), CardBrand::Discover);
    }

    #[test]
    fn leftmost_match_wins_across_brands() {
        let text = "6011 0000 0000 0004 then 4111 1111 1111 1111";
        let c = extract(text).unwrap();
        assert_eq!(c.brand(), CardBrand::Discover);
        assert_eq!(c.span(), 0..19);
    }

    #[test]
    fn later_brand_in_priority_order_can_still_win_by_position() {
        let text = "4111 1111 1111 1111 / 3782 822463 10005";
        assert_eq!(extract(text).unwrap().brand(), CardBrand::Visa);
    }

    #[test]
    fn double_space_between_groups_is_not_matched() {
        assert!(extract("4111  1111 1111 1111").is_none());
    }

    #[test]
    fn line_break_counts_as_group_separator() {
        let c = extract("4111 1111\n1111 1111").unwrap();
        assert_eq!(c.as_str(), "4111 1111\n1111 1111");
        assert_eq!(c.digits(), "4111111111111111");
    }

    #[test]
    fn checksum_is_not_consulted() {
        let c = extract("4111 1111 1111 1112").unwrap();
        assert_eq!(c.digits(), "4111111111111112");
    }

    #[test]
    fn unicode_spaces_are_not_group_separators() {
        assert!(extract("4111\u{00A0}1111 1111 1111").is_none());
        assert!(extract("4111\u{00A0}1111\u{3000}1111\u{2028}1111").is_none());
        assert!(extract("3782\u{2003}822463 10005").is_none());
    }

    #[test]
    fn vertical_tab_is_not_a_group_separator() {
        assert!(extract("4111\u{000B}1111 1111 1111").is_none());
        assert!(extract("4111\t1111\r1111\u{000C}1111").is_some());
    }
}
