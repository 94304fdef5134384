//! Signal synthesis: trend classification, breakout analysis, decision.

pub mod breakout;
pub mod engine;
pub mod trend;

pub use engine::{EngineError, StrategyEngine};
