use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, ScoringError};

/// Sum a committed category set must reach, in percent.
pub const FULL_WEIGHT: u32 = 100;

/// One named category with its weight as a whole percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeightedCategory {
    pub name: String,
    pub weight: u32,
}

impl WeightedCategory {
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// An ordered set of uniquely named categories weighted in whole percentages.
///
/// Names are non-empty and unique (case-sensitive) and every weight lies in
/// 0-100. The set may be incomplete while it is being edited; only a set
/// whose weights sum to exactly 100 can be committed, see
/// [`WeightCollection::ensure_complete`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeightCollection {
    members: Vec<WeightedCategory>,
}

impl WeightCollection {
    pub fn new(members: Vec<WeightedCategory>) -> Result<Self> {
        let mut seen = HashSet::new();
        for member in &members {
            if member.name.trim().is_empty() {
                return Err(ScoringError::Validation(
                    "Category name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(member.name.as_str()) {
                return Err(ScoringError::Validation(format!(
                    "Duplicate category name: '{}'",
                    member.name
                )));
            }
            if member.weight > FULL_WEIGHT {
                return Err(ScoringError::Validation(format!(
                    "Category '{}' has invalid weight {}. Weight must be between 0 and 100",
                    member.name, member.weight
                )));
            }
        }

        Ok(Self { members })
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, weight)| WeightedCategory::new(name, weight))
                .collect(),
        )
    }

    pub fn members(&self) -> &[WeightedCategory] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn weights(&self) -> Vec<u32> {
        self.members.iter().map(|m| m.weight).collect()
    }

    pub fn total(&self) -> u32 {
        self.members.iter().map(|m| m.weight).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.total() == FULL_WEIGHT
    }

    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(ScoringError::InvalidWeightSet {
                total: self.total(),
            })
        }
    }

    /// Reassigns weights so every member gets an equal share, keeping names
    /// and order. The remainder goes to the leading members.
    pub fn distribute_evenly(&self) -> Self {
        let members = self
            .members
            .iter()
            .zip(even_split(self.members.len()))
            .map(|(member, weight)| WeightedCategory::new(member.name.clone(), weight))
            .collect();

        Self { members }
    }

    /// Fractional weights (0-1) in member order, as used for scoring.
    pub fn to_fractions(&self) -> Vec<(String, Decimal)> {
        self.members
            .iter()
            .map(|m| (m.name.clone(), percent_to_fraction(m.weight)))
            .collect()
    }
}

/// Splits 100 into `n` whole shares: `100 / n` each, plus one for the first
/// `100 % n` positions.
///
/// ```
/// use scoring::models::weights::even_split;
///
/// assert_eq!(even_split(3), vec![34, 33, 33]);
/// assert_eq!(even_split(7), vec![15, 15, 14, 14, 14, 14, 14]);
/// ```
pub fn even_split(n: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }

    let n_u32 = u32::try_from(n).unwrap_or(u32::MAX);
    let base = FULL_WEIGHT / n_u32;
    let remainder = (FULL_WEIGHT % n_u32) as usize;

    (0..n)
        .map(|position| if position < remainder { base + 1 } else { base })
        .collect()
}

pub fn percent_to_fraction(percent: u32) -> Decimal {
    Decimal::from(percent) / Decimal::ONE_HUNDRED
}
