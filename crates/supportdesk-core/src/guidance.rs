//! Fixed advisory text per category.
//!
//! The mapping is an exhaustive `match`, so every [`Category`] has exactly one
//! entry and the table cannot change at runtime.

use crate::intent::Category;
use crate::intent::normalize;

/// Returns the advisory text for `category`.
pub fn lookup(category: Category) -> &'static str {
    match category {
        Category::CardArrival => {
            "Track delivery in Cards > Track delivery. Request replacement if overdue."
        }
        Category::ChangePin => "Go to Cards > Manage card > Change PIN.",
        Category::ExchangeRate => {
            "Exchange rate depends on network rate plus bank fee. Tell me the currencies."
        }
        Category::CountrySupport => "Most countries are supported. Tell me your destination.",
        Category::CancelTransfer => "If pending, cancel in Transfers > Activity.",
        Category::ChargeDispute => {
            "Open transaction > Dispute charge. Provide date, merchant, and reason."
        }
        Category::CustomerService => "Tell me your issue and I will guide you.",
    }
}

/// Resolves a free-form label; unknown labels get the fallback category's text.
pub fn lookup_label(label: &str) -> &'static str {
    let category = Category::from_label(&normalize(label)).unwrap_or(Category::FALLBACK);
    lookup(category)
}
