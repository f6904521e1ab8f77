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

//! Errors raised while loading return tables.

use std::path::PathBuf;

use tailrisk_analysis::AnalysisError;

/// Errors produced when reading a returns source.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid date '{value}' at row {row}, expected format '{format}'")]
    ParseDate {
        value: String,
        row: usize,
        format: String,
    },
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    ParseValue {
        value: String,
        column: String,
        row: usize,
    },
    #[error("Column '{0}' not found")]
    MissingColumn(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
