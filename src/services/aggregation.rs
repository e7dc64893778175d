use chrono::NaiveDate;
use log::{debug, info, warn};
use num_bigint::BigUint;
use num_traits::Zero;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, RewardsError};
use crate::models::{
    AggregationRequest, NodeRewardEntry, OperatorSchedule, PriceIndex, PriceSeries, RewardEntry,
    ScheduleKind, ValidatorRewardRecord,
};
use crate::services::report::{Column, Report, ReportRow};
use crate::services::share_resolver::resolve_operator_share;

type DailyAmounts = BTreeMap<NaiveDate, BigUint>;

/// Per-date amounts of one validator after picking the consensus source and
/// applying the operator share.
struct ResolvedValidator {
    validator_index: u64,
    consensus: DailyAmounts,
    execution: DailyAmounts,
    withdrawals: DailyAmounts,
}

fn amount_on(amounts: &DailyAmounts, date: NaiveDate) -> BigUint {
    amounts.get(&date).cloned().unwrap_or_else(BigUint::zero)
}

fn daily_amounts(
    entries: &[RewardEntry],
    schedule: Option<&OperatorSchedule>,
) -> Result<DailyAmounts> {
    let mut amounts = DailyAmounts::new();
    for entry in entries {
        let amount = match schedule {
            Some(schedule) => resolve_operator_share(schedule, entry)?.amount,
            None => entry.amount.clone(),
        };
        *amounts.entry(entry.date).or_insert_with(BigUint::zero) += amount;
    }
    Ok(amounts)
}

fn validate_request(
    request: &AggregationRequest,
    rpl_prices: Option<&PriceSeries>,
) -> Result<()> {
    if request.delimiter.is_empty() || request.delimiter.contains(['\n', '\r']) {
        return Err(RewardsError::ConfigurationConflict(format!(
            "delimiter {:?} cannot separate fields",
            request.delimiter
        )));
    }
    if let Some(range) = request.date_range {
        if range.end < range.start {
            return Err(RewardsError::ConfigurationConflict(format!(
                "end date {} is before start date {}",
                range.end, range.start
            )));
        }
    }
    if request.include_pooled_staking_columns && rpl_prices.is_none() {
        return Err(RewardsError::ConfigurationConflict(
            "rocket pool columns need an RPL price series".to_string(),
        ));
    }
    Ok(())
}

fn resolve_validator(
    record: &ValidatorRewardRecord,
    request: &AggregationRequest,
) -> Result<ResolvedValidator> {
    let rewards = record.rewards();
    let schedule = if request.include_pooled_staking_columns {
        record.schedule()
    } else {
        None
    };

    let consensus_source = if request.account_for_withdrawals_as_consensus_income {
        &rewards.withdrawals
    } else {
        rewards.consensus.as_ref().ok_or_else(|| {
            RewardsError::ConfigurationConflict(format!(
                "validator {} has no consensus layer series, use withdrawals as consensus income",
                rewards.validator_index
            ))
        })?
    };

    Ok(ResolvedValidator {
        validator_index: rewards.validator_index,
        consensus: daily_amounts(consensus_source, schedule)?,
        execution: daily_amounts(&rewards.execution, schedule)?,
        withdrawals: daily_amounts(&rewards.withdrawals, schedule)?,
    })
}

/// Rocket Pool validators must carry both schedules before any row is built.
fn check_schedules(validators: &[&ValidatorRewardRecord]) -> Result<()> {
    for record in validators {
        if let Some(schedule) = record.schedule() {
            let missing = if schedule.bonds.is_empty() {
                Some(ScheduleKind::Bond)
            } else if schedule.fees.is_empty() {
                Some(ScheduleKind::Fee)
            } else {
                None
            };
            if let Some(kind) = missing {
                return Err(RewardsError::MissingSchedule {
                    validator_index: record.validator_index(),
                    kind,
                });
            }
        }
    }
    Ok(())
}

fn date_universe(
    validators: &[&ValidatorRewardRecord],
    node_rewards: &[NodeRewardEntry],
    request: &AggregationRequest,
) -> BTreeSet<NaiveDate> {
    validators
        .iter()
        .flat_map(|record| record.rewards().dates())
        .chain(node_rewards.iter().map(|reward| reward.date))
        .filter(|date| request.date_range.map_or(true, |range| range.contains(*date)))
        .collect()
}

fn flat_rows(
    date: NaiveDate,
    validators: &[ResolvedValidator],
    node_rewards: &[NodeRewardEntry],
    eth_prices: &PriceIndex<'_>,
    rpl_prices: Option<&PriceIndex<'_>>,
    request: &AggregationRequest,
    rows: &mut Vec<ReportRow>,
) -> Result<()> {
    for validator in validators {
        let consensus = amount_on(&validator.consensus, date);
        let execution = amount_on(&validator.execution, date);
        let withdrawals = amount_on(&validator.withdrawals, date);

        let shows_withdrawals = request.include_withdrawals_column && !withdrawals.is_zero();
        if consensus.is_zero() && execution.is_zero() && !shows_withdrawals {
            continue;
        }

        let mut row = ReportRow::new(date, eth_prices.price_for(date)?);
        row.validator_index = Some(validator.validator_index);
        row.consensus = Some(consensus);
        row.execution = Some(execution);
        if request.include_withdrawals_column {
            row.withdrawals = Some(withdrawals);
        }
        rows.push(row);
    }

    if let Some(rpl_prices) = rpl_prices {
        for reward in node_rewards.iter().filter(|reward| reward.date == date) {
            let mut row = ReportRow::new(date, eth_prices.price_for(date)?);
            row.node_address = Some(reward.node_address.clone());
            row.smoothing_pool = Some(reward.amount_wei.clone());
            row.rpl = Some(reward.amount_rpl.clone());
            row.rpl_price = Some(rpl_prices.price_for(date)?);
            rows.push(row);
        }
    }
    Ok(())
}

fn grouped_row(
    date: NaiveDate,
    validators: &[ResolvedValidator],
    node_rewards: &[NodeRewardEntry],
    eth_prices: &PriceIndex<'_>,
    rpl_prices: Option<&PriceIndex<'_>>,
    request: &AggregationRequest,
) -> Result<Option<ReportRow>> {
    let mut consensus = BigUint::zero();
    let mut execution = BigUint::zero();
    let mut withdrawals = BigUint::zero();
    for validator in validators {
        consensus += amount_on(&validator.consensus, date);
        execution += amount_on(&validator.execution, date);
        withdrawals += amount_on(&validator.withdrawals, date);
    }

    let mut smoothing_pool = BigUint::zero();
    let mut rpl = BigUint::zero();
    if rpl_prices.is_some() {
        for reward in node_rewards.iter().filter(|reward| reward.date == date) {
            smoothing_pool += &reward.amount_wei;
            rpl += &reward.amount_rpl;
        }
    }

    let nothing_to_show = consensus.is_zero()
        && execution.is_zero()
        && (!request.include_withdrawals_column || withdrawals.is_zero())
        && smoothing_pool.is_zero()
        && rpl.is_zero();
    if nothing_to_show {
        debug!("Skipping {} - no income for any validator", date);
        return Ok(None);
    }

    let mut row = ReportRow::new(date, eth_prices.price_for(date)?);
    row.consensus = Some(consensus);
    row.execution = Some(execution);
    if request.include_withdrawals_column {
        row.withdrawals = Some(withdrawals);
    }
    if let Some(rpl_prices) = rpl_prices {
        row.smoothing_pool = Some(smoothing_pool);
        row.rpl = Some(rpl);
        row.rpl_price = Some(rpl_prices.price_for(date)?);
    }
    Ok(Some(row))
}

/// Builds the rows of a rewards report. Fails on the first missing price or
/// schedule; no partial report is returned.
pub fn aggregate(
    validators: &[ValidatorRewardRecord],
    node_rewards: &[NodeRewardEntry],
    eth_prices: &PriceSeries,
    rpl_prices: Option<&PriceSeries>,
    request: &AggregationRequest,
) -> Result<Report> {
    validate_request(request, rpl_prices)?;

    let selected: Vec<&ValidatorRewardRecord> = validators
        .iter()
        .filter(|record| {
            request
                .validator_filter
                .map_or(true, |index| record.validator_index() == index)
        })
        .collect();
    if let Some(index) = request.validator_filter {
        if selected.is_empty() {
            warn!("Validator {} is not part of the rewards data", index);
        }
    }

    if request.include_pooled_staking_columns {
        check_schedules(&selected)?;
    }
    let resolved = selected
        .iter()
        .map(|record| resolve_validator(record, request))
        .collect::<Result<Vec<_>>>()?;

    let eth_index = eth_prices.index()?;
    let rpl_index = match rpl_prices {
        Some(series) if request.include_pooled_staking_columns => Some(series.index()?),
        _ => None,
    };

    let dates = date_universe(&selected, node_rewards, request);
    info!(
        "Aggregating rewards for {} validators across {} dates (grouped by date: {})",
        resolved.len(),
        dates.len(),
        request.group_by_date
    );

    let mut rows = Vec::new();
    for date in dates {
        if request.group_by_date {
            if let Some(row) = grouped_row(
                date,
                &resolved,
                node_rewards,
                &eth_index,
                rpl_index.as_ref(),
                request,
            )? {
                rows.push(row);
            }
        } else {
            flat_rows(
                date,
                &resolved,
                node_rewards,
                &eth_index,
                rpl_index.as_ref(),
                request,
                &mut rows,
            )?;
        }
    }
    info!("Built {} report rows", rows.len());

    Ok(Report {
        columns: Column::active(request),
        eth_currency: eth_prices.currency.clone(),
        rpl_currency: rpl_prices
            .map(|series| series.currency.clone())
            .unwrap_or_default(),
        consensus_ladder: request.consensus_denomination.ladder(),
        rows,
    })
}

/// Aggregates and serialises in one pass, returning the delimited text.
pub fn build_report(
    validators: &[ValidatorRewardRecord],
    node_rewards: &[NodeRewardEntry],
    eth_prices: &PriceSeries,
    rpl_prices: Option<&PriceSeries>,
    request: &AggregationRequest,
) -> Result<String> {
    let report = aggregate(validators, node_rewards, eth_prices, rpl_prices, request)?;
    Ok(report.to_delimited(&request.delimiter))
}
