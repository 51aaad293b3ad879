use crate::models::{DailyUsage, MonthlyUsage, ViewState};
use annotation::build_annotations;
use data::{build_chart_data, ChartData};
use options::{build_options, ChartOptions};
use ratatui::style::Color;
use serde::{Serialize, Serializer};
use std::fmt;

pub mod annotation;
pub mod data;
pub mod options;
pub mod pattern;
pub mod viewport;

/// An RGBA colour. Opaque colours print as `#RRGGBB`, translucent ones as
/// `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub fn to_terminal(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const SERIES_FILL: Rgba = Rgba::rgba(75, 192, 192, 0.6);
pub const SERIES_BORDER: Rgba = Rgba::rgba(75, 192, 192, 1.0);

/// Everything the renderer needs for one view state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub view: ViewState,
    pub data: ChartData,
    pub options: ChartOptions,
}

pub fn derive_chart(
    view: &ViewState,
    monthly: &[MonthlyUsage],
    daily: &[DailyUsage],
    billing_day: u32,
) -> ChartSpec {
    let data = build_chart_data(view, monthly, daily);
    let annotations = build_annotations(view, daily, billing_day);
    let options = build_options(view, monthly.len(), annotations);
    ChartSpec {
        view: view.clone(),
        data,
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_prints_css_notation() {
        assert_eq!(SERIES_FILL.to_string(), "rgba(75, 192, 192, 0.6)");
        assert_eq!(SERIES_BORDER.to_string(), "#4BC0C0");
        assert_eq!(Rgba::hex(0xF27173).to_string(), "#F27173");
    }

    #[test]
    fn derived_chart_follows_view_mode() {
        let monthly = crate::dataset::monthly_usage();
        let daily = crate::dataset::daily_usage();

        let mut view = ViewState::default();
        let spec = derive_chart(&view, &monthly, &daily, 1);
        assert_eq!(spec.data.len(), 3);
        assert!(spec.options.annotations.is_empty());

        view.enter_drilldown(1);
        let spec = derive_chart(&view, &monthly, &daily, 1);
        assert_eq!(spec.data.len(), 25);
        assert_eq!(spec.options.annotations.len(), 1);
        assert_eq!(spec.options.x.title, "Day");
    }

    #[test]
    fn rgba_serializes_as_string() {
        let json = serde_json::to_string(&Rgba::hex(0xF45834)).expect("serialize colour");
        assert_eq!(json, "\"#F45834\"");
    }
}
