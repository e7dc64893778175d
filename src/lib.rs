pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Result, RewardsError};
pub use services::aggregation::{aggregate, build_report};
