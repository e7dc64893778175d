use chrono::NaiveDate;
use std::str::FromStr;

use crate::services::units::UnitLadder;

/// Integer unit the consensus-layer series (rewards and withdrawals) use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Denomination {
    Wei,
    #[default]
    Gwei,
}

impl Denomination {
    pub fn ladder(self) -> UnitLadder {
        match self {
            Denomination::Wei => UnitLadder::WEI,
            Denomination::Gwei => UnitLadder::GWEI,
        }
    }
}

impl FromStr for Denomination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wei" => Ok(Denomination::Wei),
            "gwei" => Ok(Denomination::Gwei),
            other => Err(format!("unknown denomination {other:?}, expected wei or gwei")),
        }
    }
}

/// Inclusive range of dates to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRequest {
    pub group_by_date: bool,
    /// Read consensus income from withdrawals instead of the consensus
    /// series. The two are never summed.
    pub account_for_withdrawals_as_consensus_income: bool,
    pub include_pooled_staking_columns: bool,
    pub include_withdrawals_column: bool,
    pub consensus_denomination: Denomination,
    pub validator_filter: Option<u64>,
    pub date_range: Option<DateRange>,
    pub delimiter: String,
}

impl Default for AggregationRequest {
    fn default() -> Self {
        Self {
            group_by_date: false,
            account_for_withdrawals_as_consensus_income: false,
            include_pooled_staking_columns: false,
            include_withdrawals_column: false,
            consensus_denomination: Denomination::default(),
            validator_filter: None,
            date_range: None,
            delimiter: ";".to_string(),
        }
    }
}
