// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Loading of historical return tables for the [`tailrisk-analysis`](tailrisk_analysis) crate.
//!
//! The `tailrisk-persistence` crate turns tabular files of periodic returns into
//! [`ReturnTable`](tailrisk_analysis::ReturnTable) values:
//!
//! - [`ReturnsSource`](loader::ReturnsSource): anything able to produce a return table.
//! - [`CsvReturnsLoader`](loader::CsvReturnsLoader): reads a CSV file whose first column is the
//!   period and whose remaining columns are returns, driven by a [`CsvReturnsConfig`].
//!
//! Presets are provided for the Fama-French market-cap decile portfolios and the EDHEC hedge
//! fund indices, which are both published in percent with a monthly period column.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod loader;

// Re-exports
pub use crate::{
    config::{CsvReturnsConfig, IndexPeriod},
    error::LoadError,
    loader::{CsvReturnsLoader, ReturnsSource, load_returns_from_reader},
};
