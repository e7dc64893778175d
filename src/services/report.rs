use chrono::NaiveDate;
use num_bigint::BigUint;

use crate::models::AggregationRequest;
use crate::services::units::UnitLadder;

/// Output columns, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    ValidatorIndex,
    EthPrice,
    ConsensusIncome,
    ExecutionIncome,
    Withdrawals,
    NodeAddress,
    SmoothingPoolIncome,
    RplIncome,
    RplPrice,
}

impl Column {
    pub fn active(request: &AggregationRequest) -> Vec<Column> {
        let mut columns = vec![Column::Date];
        if !request.group_by_date {
            columns.push(Column::ValidatorIndex);
        }
        columns.extend([
            Column::EthPrice,
            Column::ConsensusIncome,
            Column::ExecutionIncome,
        ]);
        if request.include_withdrawals_column {
            columns.push(Column::Withdrawals);
        }
        if request.include_pooled_staking_columns {
            if !request.group_by_date {
                columns.push(Column::NodeAddress);
            }
            columns.extend([
                Column::SmoothingPoolIncome,
                Column::RplIncome,
                Column::RplPrice,
            ]);
        }
        columns
    }

    pub fn label(&self, eth_currency: &str, rpl_currency: &str) -> String {
        match self {
            Column::Date => "Date".to_string(),
            Column::ValidatorIndex => "Validator Index".to_string(),
            Column::EthPrice => format!("Price [{eth_currency}/ETH]"),
            Column::ConsensusIncome => "Consensus Layer Income [ETH]".to_string(),
            Column::ExecutionIncome => "Execution Layer Income [ETH]".to_string(),
            Column::Withdrawals => "Withdrawals [ETH]".to_string(),
            Column::NodeAddress => "Node Address".to_string(),
            Column::SmoothingPoolIncome => "Smoothing Pool Income [ETH]".to_string(),
            Column::RplIncome => "Rocket Pool Node Income [RPL]".to_string(),
            Column::RplPrice => format!("Price [{rpl_currency}/RPL]"),
        }
    }

    fn render(&self, row: &ReportRow, consensus_ladder: UnitLadder) -> String {
        let amount = |value: &Option<BigUint>, ladder: UnitLadder| {
            value
                .as_ref()
                .map(|v| ladder.to_display(v).to_string())
                .unwrap_or_default()
        };
        match self {
            Column::Date => row.date.format("%Y-%m-%d").to_string(),
            Column::ValidatorIndex => row
                .validator_index
                .map(|index| index.to_string())
                .unwrap_or_default(),
            Column::EthPrice => row.eth_price.to_string(),
            Column::ConsensusIncome => amount(&row.consensus, consensus_ladder),
            Column::ExecutionIncome => amount(&row.execution, UnitLadder::WEI),
            Column::Withdrawals => amount(&row.withdrawals, consensus_ladder),
            Column::NodeAddress => row.node_address.clone().unwrap_or_default(),
            Column::SmoothingPoolIncome => amount(&row.smoothing_pool, UnitLadder::WEI),
            Column::RplIncome => amount(&row.rpl, UnitLadder::WEI),
            Column::RplPrice => row
                .rpl_price
                .map(|price| price.to_string())
                .unwrap_or_default(),
        }
    }
}

/// One output line. Amounts stay integers until rendering; `None` renders
/// as an empty field.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub validator_index: Option<u64>,
    pub eth_price: f64,
    pub consensus: Option<BigUint>,
    pub execution: Option<BigUint>,
    pub withdrawals: Option<BigUint>,
    pub node_address: Option<String>,
    pub smoothing_pool: Option<BigUint>,
    pub rpl: Option<BigUint>,
    pub rpl_price: Option<f64>,
}

impl ReportRow {
    pub(crate) fn new(date: NaiveDate, eth_price: f64) -> Self {
        Self {
            date,
            validator_index: None,
            eth_price,
            consensus: None,
            execution: None,
            withdrawals: None,
            node_address: None,
            smoothing_pool: None,
            rpl: None,
            rpl_price: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub columns: Vec<Column>,
    pub eth_currency: String,
    pub rpl_currency: String,
    pub consensus_ladder: UnitLadder,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn header(&self, delimiter: &str) -> String {
        self.columns
            .iter()
            .map(|column| column.label(&self.eth_currency, &self.rpl_currency))
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    /// Header line first, then one line per row. Fields are not quoted.
    pub fn to_delimited(&self, delimiter: &str) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.header(delimiter));
        for row in &self.rows {
            lines.push(
                self.columns
                    .iter()
                    .map(|column| column.render(row, self.consensus_ladder))
                    .collect::<Vec<_>>()
                    .join(delimiter),
            );
        }
        lines.join("\n")
    }
}
