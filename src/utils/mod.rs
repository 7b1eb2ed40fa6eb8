//! Utility functions

pub mod crypto;
pub mod time;
pub mod url;

pub use time::{Clock, FixedClock, SystemClock};
