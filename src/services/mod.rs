pub mod aggregation;
pub mod export;
pub mod report;
pub mod share_resolver;
pub mod units;
