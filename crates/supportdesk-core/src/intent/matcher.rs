//! Maps a free-text model reply onto the closed category set.

use super::category::Category;
use super::normalize::normalize;

/// Extracts the best-matching category from a raw model reply.
///
/// 1. The reply's first non-blank line, normalized, is compared against the
///    allowed labels for an exact hit.
/// 2. Otherwise the allowed labels are scanned in order and the first one that
///    occurs anywhere in the normalized reply wins.
/// 3. Otherwise `fallback`.
///
/// The first line is cut from the raw reply before whitespace is collapsed,
/// so `"country support\nBecause you mentioned a card arrival..."` resolves
/// to `country support` rather than to whichever label comes first in
/// `allowed`.
pub fn match_category(raw: &str, allowed: &[Category], fallback: Category) -> Category {
    let first_line = raw
        .trim_start()
        .lines()
        .next()
        .map(normalize)
        .unwrap_or_default();

    if let Some(category) = allowed.iter().find(|c| c.label() == first_line) {
        return *category;
    }

    let normalized = normalize(raw);
    allowed
        .iter()
        .copied()
        .find(|c| normalized.contains(c.label()))
        .unwrap_or(fallback)
}

/// A matcher bound to an allowed list and a fallback.
#[derive(Debug, Clone)]
pub struct CategoryMatcher {
    allowed: Vec<Category>,
    fallback: Category,
}

impl CategoryMatcher {
    pub fn new(allowed: Vec<Category>, fallback: Category) -> Self {
        Self { allowed, fallback }
    }

    pub fn allowed(&self) -> &[Category] {
        &self.allowed
    }

    pub fn fallback(&self) -> Category {
        self.fallback
    }

    pub fn match_response(&self, raw: &str) -> Category {
        match_category(raw, &self.allowed, self.fallback)
    }
}

impl Default for CategoryMatcher {
    fn default() -> Self {
        Self::new(Category::ALL.to_vec(), Category::FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> CategoryMatcher {
        CategoryMatcher::default()
    }

    #[test]
    fn test_exact_first_line() {
        assert_eq!(matcher().match_response("country support"), Category::CountrySupport);
        assert_eq!(matcher().match_response("  Change PIN  "), Category::ChangePin);
    }

    #[test]
    fn test_first_line_wins_over_trailing_text() {
        let raw = "country support\nThe customer might also be asking about card arrival.";
        assert_eq!(matcher().match_response(raw), Category::CountrySupport);
    }

    #[test]
    fn test_crlf_first_line_is_an_exact_hit() {
        let raw = "Country Support\r\nAlso mentions card arrival.\r\n";
        assert_eq!(matcher().match_response(raw), Category::CountrySupport);
        assert_eq!(
            matcher().match_response("\r\n\r\nchange pin\r\n"),
            Category::ChangePin
        );
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        assert_eq!(
            matcher().match_response("\n\n  cancel transfer\n"),
            Category::CancelTransfer
        );
    }

    #[test]
    fn test_substring_search() {
        assert_eq!(
            matcher().match_response("Category: Exchange Rate."),
            Category::ExchangeRate
        );
        assert_eq!(
            matcher().match_response("I think this is a **charge dispute** case"),
            Category::ChargeDispute
        );
    }

    #[test]
    fn test_substring_spanning_collapsed_whitespace() {
        assert_eq!(
            matcher().match_response("Label:\ncard\n   arrival"),
            Category::CardArrival
        );
    }

    #[test]
    fn test_earliest_listed_wins_ties() {
        let raw = "Either charge dispute or change pin.";
        assert_eq!(matcher().match_response(raw), Category::ChangePin);

        let reordered = CategoryMatcher::new(
            vec![Category::ChargeDispute, Category::ChangePin],
            Category::CustomerService,
        );
        assert_eq!(reordered.match_response(raw), Category::ChargeDispute);
    }

    #[test]
    fn test_no_match_returns_fallback() {
        assert_eq!(
            matcher().match_response("mortgage refinancing"),
            Category::CustomerService
        );
        assert_eq!(matcher().match_response(""), Category::CustomerService);
        assert_eq!(
            match_category("change pin", &[], Category::CardArrival),
            Category::CardArrival
        );
    }

    #[test]
    fn test_label_outside_allowed_is_ignored() {
        let narrow = CategoryMatcher::new(vec![Category::CardArrival], Category::CustomerService);
        assert_eq!(narrow.match_response("change pin"), Category::CustomerService);
    }
}
