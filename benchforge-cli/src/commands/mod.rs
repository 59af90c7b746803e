// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the benchforge CLI.

pub mod analyze;
pub mod package;
pub mod report;
pub mod run;
pub mod validate;
