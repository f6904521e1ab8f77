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

//! Risk statistics for historical return series.
//!
//! The `tailrisk-analysis` crate provides a small, stateless toolkit of risk measurements applied
//! uniformly to a single return series or to a table of named series:
//!
//! - Drawdown tables (wealth index, previous peaks, drawdowns) and maximum drawdown.
//! - Semi-deviation, skewness and kurtosis.
//! - The Jarque-Bera normality test.
//! - Historic, Gaussian and Cornish-Fisher modified Value at Risk, and historic CVaR.
//! - A `RiskAnalyzer` computing a configurable set of statistics in one pass.
//!
//! Every scalar statistic accepts [`ReturnData`]: a series yields a single value and a table
//! yields one value per column. Missing observations (`NaN`) are skipped by moment-based
//! statistics and propagated by percentile-based ones; statistics that are undefined for the
//! given data evaluate to `NaN` rather than failing.
//!
//! # Feature flags
//!
//! - `stubs`: Enables `rstest` fixtures of return series and tables for downstream tests.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod returns;
pub mod statistic;
pub mod statistics;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

// Re-exports
pub use crate::{
    analyzer::RiskAnalyzer,
    config::RiskAnalyzerConfig,
    error::AnalysisError,
    returns::{ReturnData, ReturnSeries, ReturnTable, TimeIndex},
    statistic::{RiskStatistic, StatValue},
    statistics::{
        cvar_historic::cvar_historic,
        drawdown::{DrawdownTable, drawdowns, drawdowns_with_base},
        jarque_bera::{JarqueBera, is_normal, jarque_bera},
        kurtosis::{KurtosisMethod, kurtosis},
        semideviation::semideviation,
        skewness::skewness,
        var_cornish_fisher::var_cornishfisher,
        var_gaussian::var_gaussian,
        var_historic::var_historic,
    },
};
