use chrono::NaiveDate;
use num_bigint::BigUint;
use serde::Deserialize;

use super::amount_serde::deserialize_amount;
use super::schedule::{BondForDate, FeeForDate, OperatorSchedule};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewardEntry {
    pub date: NaiveDate,
    #[serde(rename = "amount_wei", deserialize_with = "deserialize_amount")]
    pub amount: BigUint,
}

impl RewardEntry {
    pub fn new(date: NaiveDate, amount: impl Into<BigUint>) -> Self {
        Self {
            date,
            amount: amount.into(),
        }
    }
}

/// Node-level Rocket Pool income: smoothing pool ETH plus RPL rewards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeRewardEntry {
    pub date: NaiveDate,
    pub node_address: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount_wei: BigUint,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount_rpl: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorRewards {
    pub validator_index: u64,
    /// `None` for Rocket Pool minipools, whose consensus income is only
    /// known through withdrawals.
    pub consensus: Option<Vec<RewardEntry>>,
    pub execution: Vec<RewardEntry>,
    pub withdrawals: Vec<RewardEntry>,
}

impl ValidatorRewards {
    pub fn new(validator_index: u64) -> Self {
        Self {
            validator_index,
            consensus: Some(Vec::new()),
            execution: Vec::new(),
            withdrawals: Vec::new(),
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.consensus
            .iter()
            .flatten()
            .chain(self.execution.iter())
            .chain(self.withdrawals.iter())
            .map(|entry| entry.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ValidatorRewardsWire")]
pub enum ValidatorRewardRecord {
    Plain(ValidatorRewards),
    /// Raw amounts are the whole pool's reward; the operator's cut is
    /// derived from the bond and fee schedule.
    PooledStaking {
        rewards: ValidatorRewards,
        schedule: OperatorSchedule,
    },
}

impl ValidatorRewardRecord {
    pub fn rewards(&self) -> &ValidatorRewards {
        match self {
            Self::Plain(rewards) => rewards,
            Self::PooledStaking { rewards, .. } => rewards,
        }
    }

    pub fn validator_index(&self) -> u64 {
        self.rewards().validator_index
    }

    pub fn schedule(&self) -> Option<&OperatorSchedule> {
        match self {
            Self::Plain(_) => None,
            Self::PooledStaking { schedule, .. } => Some(schedule),
        }
    }
}

#[derive(Deserialize)]
struct ValidatorRewardsWire {
    validator_index: u64,
    #[serde(default)]
    consensus_layer_rewards: Option<Vec<RewardEntry>>,
    #[serde(default)]
    execution_layer_rewards: Vec<RewardEntry>,
    #[serde(default)]
    withdrawals: Vec<RewardEntry>,
    #[serde(default)]
    bonds: Option<Vec<BondForDate>>,
    #[serde(default)]
    fees: Option<Vec<FeeForDate>>,
}

impl From<ValidatorRewardsWire> for ValidatorRewardRecord {
    fn from(wire: ValidatorRewardsWire) -> Self {
        let rewards = ValidatorRewards {
            validator_index: wire.validator_index,
            consensus: wire.consensus_layer_rewards,
            execution: wire.execution_layer_rewards,
            withdrawals: wire.withdrawals,
        };
        if wire.bonds.is_none() && wire.fees.is_none() {
            return Self::Plain(rewards);
        }
        Self::PooledStaking {
            rewards,
            schedule: OperatorSchedule {
                bonds: wire.bonds.unwrap_or_default().into_iter().map(Into::into).collect(),
                fees: wire.fees.unwrap_or_default().into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// Body of the rewards API response.
#[derive(Debug, Clone, Deserialize)]
pub struct RewardsResponse {
    pub validator_rewards: Vec<ValidatorRewardRecord>,
    #[serde(default)]
    pub rocket_pool_node_rewards: Vec<NodeRewardEntry>,
}
