use chrono::NaiveDate;
use num_bigint::BigUint;
use serde::Deserialize;
use std::fmt;

use super::amount_serde::deserialize_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    Bond,
    Fee,
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleKind::Bond => f.write_str("bond"),
            ScheduleKind::Fee => f.write_str("fee"),
        }
    }
}

/// A bond or fee value taking effect after `effective_date`, scaled by 10^18.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub effective_date: NaiveDate,
    pub value: BigUint,
}

impl ScheduleEntry {
    pub fn new(effective_date: NaiveDate, value: impl Into<BigUint>) -> Self {
        Self {
            effective_date,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorSchedule {
    pub bonds: Vec<ScheduleEntry>,
    pub fees: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BondForDate {
    pub date: NaiveDate,
    #[serde(deserialize_with = "deserialize_amount")]
    pub bond_value_wei: BigUint,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeeForDate {
    pub date: NaiveDate,
    #[serde(deserialize_with = "deserialize_amount")]
    pub fee_value_wei: BigUint,
}

impl From<BondForDate> for ScheduleEntry {
    fn from(bond: BondForDate) -> Self {
        Self::new(bond.date, bond.bond_value_wei)
    }
}

impl From<FeeForDate> for ScheduleEntry {
    fn from(fee: FeeForDate) -> Self {
        Self::new(fee.date, fee.fee_value_wei)
    }
}
