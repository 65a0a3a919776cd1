use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OfferError, OfferResult};

/// Care group an offered slot belongs to. Closed set; anything else is rejected
/// before it reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
    C,
    D,
}

impl Group {
    pub const ALL: [Group; 4] = [Group::A, Group::B, Group::C, Group::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::A => "A",
            Group::B => "B",
            Group::C => "C",
            Group::D => "D",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Group {
    type Err = anyhow::Error;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Group::A),
            "B" => Ok(Group::B),
            "C" => Ok(Group::C),
            "D" => Ok(Group::D),
            _ => Err(anyhow::anyhow!("Unknown group: {s}")),
        }
    }
}

/// A posted slot give-away for one date.
///
/// `taken_by_name` and `taken_at` are written together by the claim and are
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub date_id: i64,
    pub child_name: String,
    pub group: Group,
    pub taken_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub taken_at: Option<DateTime<Utc>>,
}

impl Offer {
    pub fn is_taken(&self) -> bool {
        self.taken_by_name.is_some()
    }

    /// Rejects rows where only one half of the taken pair is set.
    pub fn check_invariant(&self) -> OfferResult<()> {
        if self.taken_by_name.is_some() != self.taken_at.is_some() {
            return Err(OfferError::Internal(format!(
                "offer {} has taken_by_name={:?} but taken_at={:?}",
                self.id, self.taken_by_name, self.taken_at
            )));
        }
        if self.child_name.trim().is_empty() {
            return Err(OfferError::Internal(format!(
                "offer {} has an empty child_name",
                self.id
            )));
        }
        Ok(())
    }
}

/// Validated input for creating an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOfferRequest {
    pub date_id: i64,
    pub child_name: String,
    pub group: Group,
}

impl CreateOfferRequest {
    /// Validate raw fields as they arrive from a form or JSON body.
    pub fn parse(
        date_id: Option<&str>,
        child_name: Option<&str>,
        group: Option<&str>,
    ) -> OfferResult<Self> {
        let invalid = || OfferError::invalid("Invalid payload: date_id, child_name, group required");

        let date_id = date_id.and_then(parse_positive_id).ok_or_else(invalid)?;
        let child_name = child_name.and_then(non_blank).ok_or_else(invalid)?;
        let group = group
            .and_then(|g| g.parse::<Group>().ok())
            .ok_or_else(invalid)?;

        Ok(Self { date_id, child_name, group })
    }
}

/// Validated input for claiming an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOfferRequest {
    pub taker_name: String,
}

impl ClaimOfferRequest {
    pub fn parse(taker_name: Option<&str>) -> OfferResult<Self> {
        taker_name
            .and_then(non_blank)
            .map(|taker_name| Self { taker_name })
            .ok_or_else(|| OfferError::invalid("taker_name required"))
    }
}

/// Trimmed copy of `raw`, or `None` if nothing is left.
pub fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Strictly positive integer id.
pub fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}
