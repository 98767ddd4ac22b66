// shared/src/options.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum GroupBy {
    Driver,
    #[default]
    DriverYear,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ColorMode {
    Category,
    #[default]
    DriverYear,
}

/// Knobs shared by every chart component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Draw the baseline series (zero line, fastest driver-year) instead of hiding it.
    pub show_baseline: bool,
    pub group_by: GroupBy,
    pub color_mode: ColorMode,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            show_baseline: true,
            group_by: GroupBy::DriverYear,
            color_mode: ColorMode::DriverYear,
        }
    }
}

impl ChartOptions {
    pub fn with_baseline(mut self, show: bool) -> Self {
        self.show_baseline = show;
        self
    }

    pub fn grouped_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn colored_by(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    /// Series key under this grouping. `Driver` folds every year of a driver together.
    pub fn group_key(&self, code: &str, year: &str) -> String {
        match self.group_by {
            GroupBy::Driver => code.to_string(),
            GroupBy::DriverYear => crate::driver::driver_year_key(code, year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_controls_series_keys() {
        let opts = ChartOptions::default();
        assert_eq!(opts.group_key("VER", "2023"), "VER_2023");
        assert_eq!(opts.grouped_by(GroupBy::Driver).group_key("VER", "2023"), "VER");
    }

    #[test]
    fn options_serialize_camel_case() {
        let opts = ChartOptions::default().colored_by(ColorMode::Category);
        let json = serde_json::to_string(&opts).unwrap();
        assert_eq!(
            json,
            r#"{"showBaseline":true,"groupBy":"driverYear","colorMode":"category"}"#
        );
    }
}
