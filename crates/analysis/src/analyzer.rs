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

use std::{fmt::Debug, sync::Arc};

use indexmap::IndexMap;

use crate::{
    config::RiskAnalyzerConfig,
    returns::ReturnData,
    statistic::{RiskStatistic, StatValue},
    statistics::{
        cvar_historic::HistoricCVaR, drawdown::MaxDrawdown, jarque_bera::JarqueBeraPValue,
        jarque_bera::NormalityTest, kurtosis::Kurtosis, semideviation::SemiDeviation,
        skewness::Skewness, var_cornish_fisher::CornishFisherVaR, var_gaussian::GaussianVaR,
        var_historic::HistoricVaR,
    },
};

pub type Statistic = Arc<dyn RiskStatistic<Item = f64> + Send + Sync>;

/// Computes a set of registered risk statistics over return data.
///
/// Statistics are keyed by name and reported in registration order.
#[derive(Debug)]
pub struct RiskAnalyzer {
    statistics: IndexMap<String, Statistic>,
    normality: NormalityTest,
}

impl Default for RiskAnalyzer {
    /// Creates a new default [`RiskAnalyzer`] instance with every standard statistic registered.
    fn default() -> Self {
        let mut analyzer = Self::new();
        analyzer.register_defaults(&RiskAnalyzerConfig::default());
        analyzer
    }
}

impl RiskAnalyzer {
    /// Creates a new [`RiskAnalyzer`] instance.
    ///
    /// Starts with no registered statistics.
    #[must_use]
    pub fn new() -> Self {
        Self {
            statistics: IndexMap::new(),
            normality: NormalityTest::default(),
        }
    }

    /// Creates a new [`RiskAnalyzer`] with the standard statistics configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn from_config(config: &RiskAnalyzerConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let mut analyzer = Self::new();
        analyzer.normality = NormalityTest::new_checked(Some(config.normality_level))?;
        analyzer.register_defaults(config);
        Ok(analyzer)
    }

    fn register_defaults(&mut self, config: &RiskAnalyzerConfig) {
        let level = Some(config.var_level);
        let kurtosis_method = Some(config.kurtosis_method);

        self.register_statistic(Arc::new(SemiDeviation::default()));
        self.register_statistic(Arc::new(Skewness::default()));
        self.register_statistic(Arc::new(Kurtosis::new(kurtosis_method)));
        self.register_statistic(Arc::new(JarqueBeraPValue::default()));
        self.register_statistic(Arc::new(HistoricVaR::new(level)));
        self.register_statistic(Arc::new(GaussianVaR::new(level)));
        if config.modified_var {
            self.register_statistic(Arc::new(CornishFisherVaR::new(
                level,
                true,
                kurtosis_method,
            )));
        }
        self.register_statistic(Arc::new(HistoricCVaR::new(level)));
        self.register_statistic(Arc::new(MaxDrawdown::default()));
    }

    /// Registers a new statistic for calculation (replacing any statistic of the same name).
    pub fn register_statistic(&mut self, statistic: Statistic) {
        let name = statistic.name();
        log::debug!("Registered statistic {name}");
        self.statistics.insert(name, statistic);
    }

    /// Removes the statistic named `name` from calculation.
    pub fn deregister_statistic(&mut self, name: &str) {
        if self.statistics.shift_remove(name).is_none() {
            log::warn!("Cannot deregister statistic {name}: not registered");
        }
    }

    /// Removes all registered statistics.
    pub fn deregister_statistics(&mut self) {
        self.statistics.clear();
    }

    /// Retrieves a specific statistic by name.
    #[must_use]
    pub fn statistic(&self, name: &str) -> Option<&Statistic> {
        self.statistics.get(name)
    }

    pub fn statistic_names(&self) -> impl Iterator<Item = &str> {
        self.statistics.keys().map(String::as_str)
    }

    /// Calculates every registered statistic, keyed by statistic name.
    #[must_use]
    pub fn calculate_statistics(&self, data: &ReturnData) -> IndexMap<String, StatValue<f64>> {
        self.statistics
            .iter()
            .map(|(name, stat)| (name.clone(), stat.calculate(data)))
            .collect()
    }

    /// Applies the configured normality test.
    #[must_use]
    pub fn is_normal(&self, data: &ReturnData) -> StatValue<bool> {
        self.normality.calculate(data)
    }

    /// Calculates every registered statistic arranged by column: a single statistic map for a
    /// series, or one statistic map per column for a table.
    #[must_use]
    pub fn summary(&self, data: &ReturnData) -> StatValue<IndexMap<String, f64>> {
        let stats_for = |values: &[f64]| -> IndexMap<String, f64> {
            self.statistics
                .iter()
                .map(|(name, stat)| (name.clone(), stat.calculate_from_values(values)))
                .collect()
        };
        data.map_columns(stats_for)
    }

    /// Calculates the maximum length of statistic names for formatting.
    fn get_max_length_name(&self) -> usize {
        self.statistics.keys().map(String::len).max().unwrap_or(0)
    }

    /// Gets formatted statistics as strings, one line per statistic.
    ///
    /// Table results list each column as `name=value`.
    #[must_use]
    pub fn get_stats_formatted(&self, data: &ReturnData) -> Vec<String> {
        let max_length = self.get_max_length_name();
        let stats = self.calculate_statistics(data);

        let mut output = Vec::with_capacity(stats.len());
        for (k, v) in stats {
            let padding = max_length - k.len() + 1;
            let value = match v {
                StatValue::Scalar(value) => format!("{value:.4}"),
                StatValue::PerColumn(values) => values
                    .iter()
                    .map(|(column, value)| format!("{column}={value:.4}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            };
            output.push(format!("{}: {}{}", k, " ".repeat(padding), value));
        }

        output
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
