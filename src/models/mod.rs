pub mod case;
pub mod enums;

pub use case::*;
pub use enums::{Module, Mood};
