pub mod browser;
pub mod calculators;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod scenario;
pub mod utils;

pub use error::{HarnessError, Result};
