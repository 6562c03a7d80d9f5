// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Quote module - from part volume to an itemized price

mod engine;
mod error;
mod request;

pub use engine::{QuoteBreakdown, QuoteEngine};
pub use error::{QuoteError, QuoteResult};
pub use request::{QuoteRequest, Selection, ShippingMethod};
