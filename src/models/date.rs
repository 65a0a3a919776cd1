use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A calendar day on which emergency childcare is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CareDate {
    pub id: i64,
    pub date: NaiveDate,
    pub label: Option<String>,
}

/// Body for inserting a new date (admin tooling only, no HTTP write path).
#[derive(Debug, Clone, Deserialize)]
pub struct NewCareDate {
    pub date: NaiveDate,
    pub label: Option<String>,
}

impl NewCareDate {
    /// Parse `YYYY-MM-DD` or `YYYY-MM-DD=label`, as used by `SEED_DATES`.
    pub fn parse_seed(entry: &str) -> anyhow::Result<Self> {
        let (date, label) = match entry.split_once('=') {
            Some((d, l)) => (d.trim(), Some(l.trim().to_string()).filter(|l| !l.is_empty())),
            None => (entry.trim(), None),
        };
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid seed date {date:?}: {e}"))?;
        Ok(Self { date, label })
    }
}
