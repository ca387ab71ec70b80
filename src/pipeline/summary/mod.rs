pub mod classify;
pub mod extract;
pub mod prompt;

pub use classify::{classify_module, classify_mood};
pub use extract::extract_summary;
