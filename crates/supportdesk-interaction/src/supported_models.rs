//! Known Mistral chat model IDs.
//!
//! | Model ID | Tier | Notes |
//! |----------|------|-------|
//! | `mistral-small-latest` | Small | Default; cheap enough for per-message classification |
//! | `mistral-medium-latest` | Medium | |
//! | `mistral-large-latest` | Flagship | Best answer quality |
//! | `open-mistral-nemo` | Open weights | |
//! | `ministral-8b-latest` | Edge | Lowest latency |
//!
//! Reference: <https://docs.mistral.ai/getting-started/models/>
//!
//! Unknown IDs are still sent as-is; the list only drives a startup warning.

pub const SUPPORTED_MODELS: &[&str] = &[
    "mistral-small-latest",
    "mistral-medium-latest",
    "mistral-large-latest",
    "open-mistral-nemo",
    "ministral-8b-latest",
];

pub fn is_known_model(model: &str) -> bool {
    SUPPORTED_MODELS.contains(&model)
}
