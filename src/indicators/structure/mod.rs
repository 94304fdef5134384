//! Price structure detection

pub mod pivots;

pub use pivots::pivot_levels;
