// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Pricing module - catalogs, tier tables and rates

mod catalog;
mod config;
mod tiers;

pub use catalog::{Material, Named, TypePiece, Typology};
pub use config::{PricingConfig, TimeEstimate, DEFAULT_PRICING_FILE, PRICING_FILE_ENV};
pub use tiers::{Tier, TierTable};
