//! Luhn (mod 10) checksum validation.

/// Strip the separators people and OCR engines put between digit groups.
///
/// Only ASCII spaces and dashes are removed; anything else is left in place so
/// that [`validate`] and [`super::classify`] can reject it.
pub fn normalize(number: &str) -> String {
    number.chars().filter(|c| !matches!(c, ' ' | '-')).collect()
}

/// Returns `true` when `s` is non-empty and made only of ASCII digits.
pub(crate) fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Check a card number against the Luhn checksum.
///
/// Spaces and dashes are stripped first. Input that is empty or contains any
/// other non-digit character is reported as invalid rather than as an error.
pub fn validate(number: &str) -> bool {
    let digits = normalize(number);
    if !is_numeric(&digits) {
        return false;
    }
    luhn_sum(&digits) % 10 == 0
}

/// Sum of the digits with every second digit (from the right) doubled and
/// reduced by 9 when it exceeds 9. `digits` must be ASCII digits only.
fn luhn_sum(digits: &str) -> u64 {
    digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u64::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum()
}
