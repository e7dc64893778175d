use chrono::NaiveDate;
use num_bigint::BigUint;

use crate::error::{Result, RewardsError};
use crate::models::{OperatorSchedule, RewardEntry, ScheduleEntry, ScheduleKind};
use crate::services::units::wei_per_eth;

/// Full stake of one validator, in ETH.
pub const VALIDATOR_STAKE_ETH: u32 = 32;

/// Entry in effect on `date`: the latest one strictly before it. A
/// single-entry schedule applies to every date.
fn entry_for_date(
    schedule: &[ScheduleEntry],
    kind: ScheduleKind,
    date: NaiveDate,
) -> Result<&ScheduleEntry> {
    if let [only] = schedule {
        return Ok(only);
    }
    schedule
        .iter()
        .filter(|entry| entry.effective_date < date)
        .max_by_key(|entry| entry.effective_date)
        .ok_or(RewardsError::ScheduleLookup { kind, date })
}

pub fn value_for_date(
    schedule: &[ScheduleEntry],
    kind: ScheduleKind,
    date: NaiveDate,
) -> Result<&BigUint> {
    entry_for_date(schedule, kind, date).map(|entry| &entry.value)
}

/// Like [`value_for_date`], but the value may not exceed `max`.
fn bounded_value_for_date<'a>(
    schedule: &'a [ScheduleEntry],
    kind: ScheduleKind,
    date: NaiveDate,
    max: &BigUint,
) -> Result<&'a BigUint> {
    let entry = entry_for_date(schedule, kind, date)?;
    if &entry.value > max {
        return Err(RewardsError::ScheduleValueOutOfRange {
            kind,
            effective_date: entry.effective_date,
            value: entry.value.clone(),
        });
    }
    Ok(&entry.value)
}

/// Operator (node runner) share of a pooled reward: the bond's proportional
/// part plus the commission on the remainder. Each division truncates.
/// Bonds above the full stake and fees above 100% are rejected.
pub fn resolve_operator_share(
    schedule: &OperatorSchedule,
    entry: &RewardEntry,
) -> Result<RewardEntry> {
    let unit_base = wei_per_eth();
    let full_stake = BigUint::from(VALIDATOR_STAKE_ETH) * &unit_base;

    let bond =
        bounded_value_for_date(&schedule.bonds, ScheduleKind::Bond, entry.date, &full_stake)?;
    let bond_portion = (&entry.amount * bond) / &full_stake;

    let fee =
        bounded_value_for_date(&schedule.fees, ScheduleKind::Fee, entry.date, &unit_base)?;
    let remainder = &entry.amount - &bond_portion;
    let fee_portion = (remainder * fee) / &unit_base;

    Ok(RewardEntry {
        date: entry.date,
        amount: bond_portion + fee_portion,
    })
}
