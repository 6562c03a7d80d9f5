// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! CLI subsystem for the quote tool

pub mod reporter;

pub use reporter::Reporter;
