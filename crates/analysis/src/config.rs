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

//! Provides a configuration for `RiskAnalyzer` instances.

use serde::{Deserialize, Serialize};
use tailrisk_core::correctness::{check_in_range_exclusive_f64, check_in_range_inclusive_f64};

use crate::statistics::{
    jarque_bera::DEFAULT_NORMALITY_LEVEL, kurtosis::KurtosisMethod,
    var_historic::DEFAULT_VAR_LEVEL,
};

/// Configuration for `RiskAnalyzer` instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskAnalyzerConfig {
    /// The VaR / CVaR level in percent.
    pub var_level: f64,
    /// The significance level of the Jarque-Bera normality test.
    pub normality_level: f64,
    /// If the parametric VaR applies the Cornish-Fisher modification.
    pub modified_var: bool,
    /// The kurtosis formula used for reporting and by the Cornish-Fisher expansion.
    pub kurtosis_method: KurtosisMethod,
}

impl Default for RiskAnalyzerConfig {
    /// Creates a new default [`RiskAnalyzerConfig`] instance.
    fn default() -> Self {
        Self {
            var_level: DEFAULT_VAR_LEVEL,
            normality_level: DEFAULT_NORMALITY_LEVEL,
            modified_var: true,
            kurtosis_method: KurtosisMethod::default(),
        }
    }
}

impl RiskAnalyzerConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `var_level` is not within (0, 100) or `normality_level` is not
    /// within [0, 1].
    pub fn validate(&self) -> anyhow::Result<()> {
        check_in_range_exclusive_f64(self.var_level, 0.0, 100.0, "var_level")?;
        check_in_range_inclusive_f64(self.normality_level, 0.0, 1.0, "normality_level")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_is_valid() {
        let config = RiskAnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.var_level, 5.0);
        assert_eq!(config.normality_level, 0.01);
        assert!(config.modified_var);
        assert_eq!(config.kurtosis_method, KurtosisMethod::Pearson);
    }

    #[rstest]
    fn test_deserialize_partial_uses_defaults() {
        let config: RiskAnalyzerConfig =
            serde_json::from_str(r#"{"var_level": 1.0, "kurtosis_method": "THIRD_MOMENT"}"#)
                .unwrap();
        assert_eq!(config.var_level, 1.0);
        assert_eq!(config.normality_level, 0.01);
        assert_eq!(config.kurtosis_method, KurtosisMethod::ThirdMoment);
    }

    #[rstest]
    fn test_deserialize_rejects_unknown_fields() {
        let result = serde_json::from_str::<RiskAnalyzerConfig>(r#"{"confidence": 0.95}"#);
        assert!(result.is_err());
    }

    #[rstest]
    #[case(0.0, 0.01)]
    #[case(100.0, 0.01)]
    #[case(5.0, 1.5)]
    fn test_validate_rejects_invalid_levels(#[case] var_level: f64, #[case] normality_level: f64) {
        let config = RiskAnalyzerConfig {
            var_level,
            normality_level,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
