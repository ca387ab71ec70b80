pub mod prompt;
pub mod similarity;
pub mod tips;

pub use similarity::{SimilarityConfig, SimilarityFilter};
pub use tips::{TipConfig, TipSynthesizer};
