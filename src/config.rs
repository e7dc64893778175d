use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, RewardsError};
use crate::models::{AggregationRequest, DateRange, Denomination};

pub struct Config {
    pub rewards_file: PathBuf,
    pub eth_prices_file: PathBuf,
    pub rpl_prices_file: Option<PathBuf>,
    pub output_file: PathBuf,
    pub request: AggregationRequest,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so it can be driven without
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let required = |key: &'static str| {
            var(key).ok_or(RewardsError::Config {
                key,
                reason: "must be set".to_string(),
            })
        };

        let or_default =
            |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let flag = |key: &'static str| -> Result<bool> {
            match or_default(key, "false").trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" => Ok(false),
                other => Err(RewardsError::Config {
                    key,
                    reason: format!("expected a boolean, got {other:?}"),
                }),
            }
        };

        let date = |key: &'static str| -> Result<Option<NaiveDate>> {
            var(key)
                .map(|value| {
                    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
                        RewardsError::Config {
                            key,
                            reason: e.to_string(),
                        }
                    })
                })
                .transpose()
        };

        let validator_filter = var("VALIDATOR_INDEX")
            .map(|value| {
                u64::from_str(value.trim()).map_err(|e| RewardsError::Config {
                    key: "VALIDATOR_INDEX",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let date_range = match (date("START_DATE")?, date("END_DATE")?) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            (None, None) => None,
            _ => {
                return Err(RewardsError::Config {
                    key: "START_DATE",
                    reason: "START_DATE and END_DATE must be set together".to_string(),
                })
            }
        };

        let consensus_denomination =
            Denomination::from_str(&or_default("CONSENSUS_DENOMINATION", "gwei")).map_err(
                |reason| RewardsError::Config {
                    key: "CONSENSUS_DENOMINATION",
                    reason,
                },
            )?;

        let request = AggregationRequest {
            group_by_date: flag("GROUP_BY_DATE")?,
            account_for_withdrawals_as_consensus_income: flag(
                "USE_WITHDRAWALS_AS_CONSENSUS_INCOME",
            )?,
            include_pooled_staking_columns: flag("INCLUDE_ROCKET_POOL_COLUMNS")?,
            include_withdrawals_column: flag("INCLUDE_WITHDRAWALS_COLUMN")?,
            consensus_denomination,
            validator_filter,
            date_range,
            // Not trimmed: a tab or space is a legitimate delimiter.
            delimiter: lookup("CSV_DELIMITER")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| ";".to_string()),
        };

        let default_output = match validator_filter {
            Some(index) => format!("rewards_{index}.csv"),
            None => "rewards_data.csv".to_string(),
        };

        Ok(Self {
            rewards_file: PathBuf::from(required("REWARDS_FILE")?),
            eth_prices_file: PathBuf::from(required("ETH_PRICES_FILE")?),
            rpl_prices_file: var("RPL_PRICES_FILE").map(PathBuf::from),
            output_file: PathBuf::from(or_default("OUTPUT_FILE", &default_output)),
            request,
        })
    }
}
