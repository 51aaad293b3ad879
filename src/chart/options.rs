use super::annotation::Annotation;
use super::Rgba;
use crate::models::ViewState;
use serde::Serialize;

const DRILLDOWN_X_MAX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    X,
}

/// Colours one tick label differently from the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickColorRule {
    pub highlight_label: String,
    pub highlight_color: Rgba,
    pub default_color: Rgba,
}

impl Default for TickColorRule {
    fn default() -> Self {
        Self {
            highlight_label: "Jan 1".into(),
            highlight_color: Rgba::hex(0xF45834),
            default_color: Rgba::hex(0x000000),
        }
    }
}

impl TickColorRule {
    pub fn color_for(&self, label: &str) -> Rgba {
        if label.replace('#', "") == self.highlight_label {
            self.highlight_color
        } else {
            self.default_color
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    pub title: String,
    pub show_grid: bool,
    pub min: f64,
    pub max: f64,
    pub ticks: TickColorRule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub title: String,
    pub show_grid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanOptions {
    pub enabled: bool,
    pub mode: Direction,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomOptions {
    pub mode: Direction,
    pub speed: f64,
    pub limits: ZoomLimits,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub x: XAxis,
    pub y: YAxis,
    pub annotations: Vec<Annotation>,
    pub pan: PanOptions,
    pub zoom: ZoomOptions,
}

/// Megabytes below one gigabyte, gigabytes otherwise.
pub fn format_usage(value: f64) -> String {
    if value < 1.0 {
        format!("{:.2} MB", value * 1024.0)
    } else {
        format!("{:.2} GB", value)
    }
}

pub fn format_tooltip(value: f64) -> String {
    format_usage(value)
}

pub fn build_options(
    state: &ViewState,
    monthly_len: usize,
    annotations: Vec<Annotation>,
) -> ChartOptions {
    let x_max = if state.drilldown {
        DRILLDOWN_X_MAX
    } else {
        monthly_len.saturating_sub(1) as f64
    };

    ChartOptions {
        responsive: true,
        x: XAxis {
            title: if state.drilldown { "Day" } else { "Month" }.into(),
            show_grid: false,
            min: 0.0,
            max: x_max,
            ticks: TickColorRule::default(),
        },
        y: YAxis {
            title: "Usage (GB)".into(),
            show_grid: false,
        },
        annotations,
        pan: PanOptions {
            enabled: true,
            mode: Direction::X,
            threshold: 10.0,
        },
        zoom: ZoomOptions {
            mode: Direction::X,
            speed: 0.1,
            limits: ZoomLimits {
                min: 5.0,
                max: 10.0,
            },
        },
    }
}

/// Bar click handler. `elements` holds the indices of the bars under the
/// pointer; only the first one counts. Returns whether the view changed.
pub fn on_click(state: &mut ViewState, elements: &[usize]) -> bool {
    if state.drilldown {
        return false;
    }
    let Some(&month) = elements.first() else {
        return false;
    };
    state.enter_drilldown(month);
    true
}
