/// External classifier strategy
pub mod classifier;
/// Source-code diversion strategy
pub mod code;
/// Language-model generation strategy
pub mod generation;
/// Pattern-matching strategy
pub mod pattern;

pub use classifier::{ClassifierStrategy, ModelSlot};
pub use code::CodeAnalysisStrategy;
pub use generation::GenerationStrategy;
pub use pattern::PatternMatchStrategy;
