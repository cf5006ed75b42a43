//! Intent routing: normalization, category set, reply matching and the
//! heuristic-plus-model classifier.

mod category;
mod classifier;
mod matcher;
mod normalize;

pub use category::Category;
pub use classifier::{
    Classification, ClassificationSource, GREETINGS, IntentClassifier, TRIVIAL_TOKEN_LIMIT,
};
pub use matcher::{CategoryMatcher, match_category};
pub use normalize::{normalize, token_count};
