// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Pricing configuration loaded once at startup

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::catalog::{duplicate_names, find_by_name, Material, TypePiece, Typology};
use super::tiers::TierTable;
use crate::quote::Selection;

/// Environment variable naming the pricing file
pub const PRICING_FILE_ENV: &str = "PRICING_FILE";

/// Pricing file looked up in the working directory
pub const DEFAULT_PRICING_FILE: &str = "pricing.toml";

/// `DEFAULT_PRINT_SPEED` is read in tenths of mm/s
const TENTHS_PER_MM: f64 = 10.0;

/// How machine time is estimated when a part's largest dimension is known
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeEstimate {
    /// Travel distance over print speed; volume rate without a dimension
    #[default]
    Dimension,
    /// Always the per-millilitre deposition rate
    Volume,
}

/// Catalogs, tier tables and rates used by every quote.
///
/// Immutable once loaded; share it by reference or `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Machine cost per hour of printing
    pub machine_hour_rate: f64,
    /// Hours of printing per millilitre, used by the volume estimate
    pub machine_time_per_ml: f64,
    /// Post-processing, as a fraction of the base cost
    pub post_rate: f64,
    /// Finishing, as a fraction of the base cost
    pub finish_rate: f64,
    /// VAT as a fraction of the pre-tax total
    pub vat_rate: f64,
    pub pickup_shipping: f64,
    pub delivery_shipping: f64,
    /// Multiplier on the travel distance in the dimension estimate
    pub time_factor: f64,
    pub time_estimate: TimeEstimate,
    /// Support percentage for materials that do not set one
    pub default_support_percent: f64,
    /// Print speed (mm/s) for materials that do not set one
    pub default_print_speed: f64,
    pub materials: Vec<Material>,
    pub type_pieces: Vec<TypePiece>,
    pub typologies: Vec<Typology>,
    /// Markup factor by ordered volume
    pub markup: TierTable,
    /// Packaging price by ordered volume
    pub packaging: TierTable,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            machine_hour_rate: 7.0,
            machine_time_per_ml: 0.0687,
            post_rate: 0.0,
            finish_rate: 0.0,
            vat_rate: 0.0,
            pickup_shipping: 0.0,
            delivery_shipping: 12.0,
            time_factor: 1.0,
            time_estimate: TimeEstimate::Dimension,
            default_support_percent: 0.0,
            default_print_speed: 1.0,
            materials: Vec::new(),
            type_pieces: Vec::new(),
            typologies: Vec::new(),
            markup: TierTable::default(),
            packaging: TierTable::default(),
        }
    }
}

impl PricingConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse pricing configuration")
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read pricing file: {:?}", path.as_ref()))?;
        let config: PricingConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse pricing file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// The file is `path` if given, else `$PRICING_FILE`, else
    /// `pricing.toml` when it exists, else the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Path::new("."), |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with the environment read through `lookup`
    /// and `pricing.toml` searched in `working_dir`
    pub fn load_with<F>(path: Option<&Path>, working_dir: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match Self::resolve_source(path, working_dir, &lookup) {
            Some(path) => {
                debug!(path = %path.display(), "loading pricing file");
                Self::from_file(&path)?
            }
            None => {
                warn!("no pricing file found, using built-in defaults");
                Self::default()
            }
        };

        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Pricing file to read, or `None` for the built-in defaults
    pub fn resolve_source<F>(
        path: Option<&Path>,
        working_dir: &Path,
        lookup: F,
    ) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = path {
            return Some(path.to_path_buf());
        }
        if let Some(file) = lookup(PRICING_FILE_ENV).filter(|file| !file.is_empty()) {
            return Some(PathBuf::from(file));
        }
        let fallback = working_dir.join(DEFAULT_PRICING_FILE);
        fallback.exists().then_some(fallback)
    }

    /// Apply `DEFAULT_SUPPORT_PERCENT`, `DEFAULT_PRINT_SPEED` and
    /// `TIME_FACTOR` from `lookup`. Unparsable values are ignored.
    ///
    /// `DEFAULT_PRINT_SPEED` is given in tenths of mm/s (`10` is 1 mm/s),
    /// unlike `default_print_speed` in the pricing file.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut f64, f64); 3] = [
            ("DEFAULT_SUPPORT_PERCENT", &mut self.default_support_percent, 1.0),
            ("DEFAULT_PRINT_SPEED", &mut self.default_print_speed, TENTHS_PER_MM),
            ("TIME_FACTOR", &mut self.time_factor, 1.0),
        ];

        for (key, target, divisor) in targets {
            let Some(raw) = lookup(key) else {
                continue;
            };
            match raw.trim().parse::<f64>() {
                Ok(value) => *target = value / divisor,
                Err(err) => warn!(key, value = %raw, error = %err, "ignoring invalid override"),
            }
        }
    }

    /// Log catalog keys that are listed twice; lookups use the first one
    pub fn check(&self) {
        let catalogs = [
            ("material", duplicate_names(&self.materials)),
            ("type piece", duplicate_names(&self.type_pieces)),
            ("typology", duplicate_names(&self.typologies)),
        ];
        for (kind, names) in catalogs {
            for name in names {
                warn!(kind, name, "duplicate catalog entry, keeping the first");
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize pricing")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write pricing file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        find_by_name(&self.materials, name)
    }

    pub fn type_piece(&self, name: &str) -> Option<&TypePiece> {
        find_by_name(&self.type_pieces, name)
    }

    pub fn typology(&self, name: &str) -> Option<&Typology> {
        find_by_name(&self.typologies, name)
    }

    /// Selection for the given keys; an omitted key takes the first entry
    /// of its catalog. Fails only when no material is given and none is
    /// configured.
    pub fn default_selection(
        &self,
        material: Option<String>,
        type_piece: Option<String>,
        typology: Option<String>,
    ) -> Result<Selection> {
        let material = match material {
            Some(material) => material,
            None => self
                .materials
                .first()
                .map(|m| m.name.clone())
                .context("No material given and the pricing file lists none")?,
        };
        let type_piece = type_piece
            .or_else(|| self.type_pieces.first().map(|p| p.name.clone()))
            .unwrap_or_default();
        let typology = typology
            .or_else(|| self.typologies.first().map(|t| t.name.clone()))
            .unwrap_or_default();

        debug!(%material, %type_piece, %typology, "resolved selection");
        Ok(Selection::new(material)
            .type_piece(type_piece)
            .typology(typology))
    }

    /// Support percentage of `material`, or the configured default
    pub fn support_percent(&self, material: &Material) -> f64 {
        material
            .support_percent
            .unwrap_or(self.default_support_percent)
    }

    /// Print speed (mm/s) of `material`, or the configured default
    pub fn print_speed(&self, material: &Material) -> f64 {
        material.print_speed.unwrap_or(self.default_print_speed)
    }
}
