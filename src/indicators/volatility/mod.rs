//! Volatility measures

pub mod atr;

pub use atr::{atr, true_range};
