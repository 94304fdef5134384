//! Dukatrix: breakout/retest strategy analysis over Dukascopy price bars.
//!
//! The strategy engine (`signals`) is a pure, synchronous function of a
//! bounded candle series; everything else is plumbing around it.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
