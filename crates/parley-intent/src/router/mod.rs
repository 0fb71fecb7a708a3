//! Ranked dispatch of a turn to response strategies.

/// Priority-ordered router
pub mod ranked;
/// Built-in strategies
pub mod strategies;
/// Strategy trait
pub mod strategy;

pub use ranked::StrategyRouter;
pub use strategies::{
    ClassifierStrategy, CodeAnalysisStrategy, GenerationStrategy, ModelSlot, PatternMatchStrategy,
};
pub use strategy::ResponseStrategy;
