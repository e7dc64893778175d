pub mod amount_serde;
mod price;
mod request;
mod reward;
mod schedule;

pub use price::{PriceEntry, PriceIndex, PriceSeries};
pub use request::{AggregationRequest, DateRange, Denomination};
pub use reward::{
    NodeRewardEntry, RewardEntry, RewardsResponse, ValidatorRewardRecord, ValidatorRewards,
};
pub use schedule::{BondForDate, FeeForDate, OperatorSchedule, ScheduleEntry, ScheduleKind};
