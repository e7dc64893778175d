use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{Result, RewardsError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceEntry {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceSeries {
    pub currency: String,
    pub prices: Vec<PriceEntry>,
}

impl PriceSeries {
    pub fn index(&self) -> Result<PriceIndex<'_>> {
        let mut by_date = HashMap::with_capacity(self.prices.len());
        for entry in &self.prices {
            if by_date.insert(entry.date, entry.price).is_some() {
                return Err(RewardsError::DuplicatePrice {
                    currency: self.currency.clone(),
                    date: entry.date,
                });
            }
        }
        Ok(PriceIndex {
            currency: &self.currency,
            by_date,
        })
    }
}

/// Date-keyed view over a [`PriceSeries`].
#[derive(Debug)]
pub struct PriceIndex<'a> {
    currency: &'a str,
    by_date: HashMap<NaiveDate, f64>,
}

impl PriceIndex<'_> {
    pub fn currency(&self) -> &str {
        self.currency
    }

    pub fn price_for(&self, date: NaiveDate) -> Result<f64> {
        self.by_date
            .get(&date)
            .copied()
            .ok_or_else(|| RewardsError::PriceNotFound {
                currency: self.currency.to_string(),
                date,
            })
    }
}
