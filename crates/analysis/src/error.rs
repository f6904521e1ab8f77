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

//! Errors raised when untyped or structurally invalid data enters the analysis layer.

/// Errors produced by the risk statistics library.
///
/// Numeric edge cases (zero deviation, empty tails, missing values) are never errors; they
/// surface as `NaN` in the computed statistic.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid input type: expected a return series or return table, {0}")]
    InvalidInputType(String),
}

impl AnalysisError {
    pub(crate) fn invalid_input(reason: impl std::fmt::Display) -> Self {
        Self::InvalidInputType(reason.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_display() {
        let err = AnalysisError::invalid_input("was a scalar");
        assert_eq!(
            err.to_string(),
            "Invalid input type: expected a return series or return table, was a scalar"
        );
    }
}
