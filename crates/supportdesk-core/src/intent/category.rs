//! The closed set of supported inquiry categories.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// One label from the fixed set of supported inquiry types.
///
/// Variant order is the matcher's priority order: when several labels occur
/// in a model reply, the earliest-declared one wins.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Category {
    #[serde(rename = "card arrival")]
    #[strum(serialize = "card arrival")]
    CardArrival,
    #[serde(rename = "change pin")]
    #[strum(serialize = "change pin")]
    ChangePin,
    #[serde(rename = "exchange rate")]
    #[strum(serialize = "exchange rate")]
    ExchangeRate,
    #[serde(rename = "country support")]
    #[strum(serialize = "country support")]
    CountrySupport,
    #[serde(rename = "cancel transfer")]
    #[strum(serialize = "cancel transfer")]
    CancelTransfer,
    #[serde(rename = "charge dispute")]
    #[strum(serialize = "charge dispute")]
    ChargeDispute,
    #[serde(rename = "customer service")]
    #[strum(serialize = "customer service")]
    CustomerService,
}

impl Category {
    /// All categories in priority order.
    pub const ALL: [Category; 7] = [
        Category::CardArrival,
        Category::ChangePin,
        Category::ExchangeRate,
        Category::CountrySupport,
        Category::CancelTransfer,
        Category::ChargeDispute,
        Category::CustomerService,
    ];

    /// Used whenever classification is inconclusive or fails.
    pub const FALLBACK: Category = Category::CustomerService;

    /// The lower-case label, e.g. `"card arrival"`.
    pub fn label(self) -> &'static str {
        self.into()
    }

    pub fn is_fallback(self) -> bool {
        self == Self::FALLBACK
    }

    /// Resolves an exact (already normalized) label.
    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::FALLBACK
    }
}
