//! Canned inquiries offered to the user as one-key shortcuts.

pub const QUICK_EXAMPLES: &[&str] = &[
    "My card didn't arrive. What should I do?",
    "I want to change my PIN.",
    "Does your card work in Germany?",
    "I need to cancel a transfer I just made.",
    "I was charged twice by a merchant.",
    "What exchange rate will I get for EUR to QAR?",
];

/// 1-based lookup, as shown to the user.
pub fn quick_example(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|index| QUICK_EXAMPLES.get(index).copied())
}
