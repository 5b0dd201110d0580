//! Signal generation core: indicators, trend, ordered decision rules and the
//! trade plan. Synchronous and free of I/O.

pub mod config;
pub mod decider;
pub mod fvg;
pub mod indicators;
pub mod pipeline;
pub mod round;
pub mod trade_plan;
pub mod trend;
pub mod validator;

pub use config::{RsiSmoothing, SignalParams};
pub use pipeline::{generate_signal, SignalEngine};
