// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Quote computation errors

use thiserror::Error;

pub type QuoteResult<T> = Result<T, QuoteError>;

/// Conditions that make a quote impossible.
///
/// Unknown part categories and typologies are not errors; they price as
/// neutral defaults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("unknown material: {name}")]
    UnknownMaterial { name: String },
}
