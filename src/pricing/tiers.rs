// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Volume-indexed step tables (markup factors, packaging prices)

use serde::{Deserialize, Serialize};

/// One step of a [`TierTable`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Smallest volume (ml) the step applies to
    pub threshold_ml: f64,
    pub value: f64,
}

impl Tier {
    pub fn new(threshold_ml: f64, value: f64) -> Self {
        Self {
            threshold_ml,
            value,
        }
    }
}

/// Right-continuous step function over volume.
///
/// Tiers are kept sorted by threshold from construction on, including when
/// deserialized, so lookups can binary search. With repeated thresholds
/// the tier listed last wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    pub fn new(mut tiers: Vec<Tier>) -> Self {
        tiers.sort_by(|a, b| a.threshold_ml.total_cmp(&b.threshold_ml));
        Self { tiers }
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(threshold_ml, value)| Tier::new(threshold_ml, value))
                .collect(),
        )
    }

    /// Value of the highest tier whose threshold is at most `volume_ml`,
    /// or `default` below the first tier.
    pub fn lookup(&self, volume_ml: f64, default: f64) -> f64 {
        let above = self.tiers.partition_point(|tier| tier.threshold_ml <= volume_ml);
        match above.checked_sub(1) {
            Some(index) => self.tiers[index].value,
            None => default,
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl From<Vec<Tier>> for TierTable {
    fn from(tiers: Vec<Tier>) -> Self {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<Tier> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}
