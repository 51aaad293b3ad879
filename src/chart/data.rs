use super::pattern::HatchPattern;
use super::{Rgba, SERIES_BORDER, SERIES_FILL};
use crate::models::{DailyUsage, MonthlyUsage, ViewState};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Fill {
    Solid { color: Rgba },
    Hatch { pattern: HatchPattern },
}

/// The single dataset handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub fill: Fill,
    pub border_color: Rgba,
    pub border_width: u16,
    pub min_bar_length: Option<u16>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn build_chart_data(
    state: &ViewState,
    monthly: &[MonthlyUsage],
    daily: &[DailyUsage],
) -> ChartData {
    if state.drilldown {
        ChartData {
            label: "Daily Data Usage".into(),
            labels: daily.iter().map(|d| d.day.clone()).collect(),
            values: daily.iter().map(|d| d.usage).collect(),
            fill: Fill::Hatch {
                pattern: HatchPattern::diagonal(SERIES_FILL),
            },
            border_color: SERIES_BORDER,
            border_width: 1,
            min_bar_length: Some(4),
        }
    } else {
        ChartData {
            label: "Monthly Data Usage".into(),
            labels: monthly.iter().map(|m| m.month.clone()).collect(),
            values: monthly.iter().map(|m| m.usage).collect(),
            fill: Fill::Solid { color: SERIES_FILL },
            border_color: SERIES_BORDER,
            border_width: 1,
            min_bar_length: None,
        }
    }
}
