use super::Rgba;
use crate::models::{DailyUsage, ViewState};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const DEFAULT_BILLING_DAY: u32 = 1;

const MARKER_COLOR: Rgba = Rgba::hex(0xF27173);
const MARKER_BACKGROUND: Rgba = Rgba::rgba(0, 0, 0, 0.2);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationLabel {
    pub display: bool,
    pub content: String,
    pub position: LabelPosition,
    pub color: Rgba,
    pub font_size: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxAnnotation {
    pub index: usize,
    pub x_min: String,
    pub x_max: String,
    pub y_min: f64,
    pub y_max: f64,
    pub background_color: Rgba,
    pub border_color: Rgba,
    pub border_width: u16,
    pub label: AnnotationLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Annotation {
    Box(BoxAnnotation),
}

/// Day of month from a `"Mon D"` label such as `"Mar 31"`.
pub fn parse_day_of_month(label: &str) -> Option<u32> {
    // A leap year keeps "Feb 29" parseable.
    NaiveDate::parse_from_str(&format!("{} 2000", label.trim()), "%b %d %Y")
        .ok()
        .map(|date| date.day())
}

pub fn billing_day_index(daily: &[DailyUsage], billing_day: u32) -> Option<usize> {
    daily
        .iter()
        .position(|d| parse_day_of_month(&d.day) == Some(billing_day))
}

/// At most one box, placed on the first daily point that falls on the
/// billing day. The monthly view carries no marker.
pub fn build_annotations(
    state: &ViewState,
    daily: &[DailyUsage],
    billing_day: u32,
) -> Vec<Annotation> {
    if !state.drilldown {
        return vec![];
    }
    let Some(index) = billing_day_index(daily, billing_day) else {
        tracing::debug!(billing_day, "no daily point on billing day");
        return vec![];
    };
    let point = &daily[index];
    let (x, y) = (point.day.clone(), point.usage);

    vec![Annotation::Box(BoxAnnotation {
        index,
        x_min: x.clone(),
        x_max: x,
        y_min: y,
        y_max: y,
        background_color: MARKER_BACKGROUND,
        border_color: MARKER_COLOR,
        border_width: 1,
        label: AnnotationLabel {
            display: true,
            content: "✅".into(),
            position: LabelPosition::Center,
            color: MARKER_COLOR,
            font_size: 16,
        },
    })]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::daily_usage;

    fn day(label: &str, usage: f64) -> DailyUsage {
        DailyUsage {
            day: label.into(),
            usage,
        }
    }

    #[test]
    fn parse_day_of_month_reads_short_labels() {
        assert_eq!(parse_day_of_month("Jan 1"), Some(1));
        assert_eq!(parse_day_of_month("Mar 31"), Some(31));
        assert_eq!(parse_day_of_month("Feb 29"), Some(29));
        assert_eq!(parse_day_of_month("Feb 30"), None);
        assert_eq!(parse_day_of_month("someday"), None);
        assert_eq!(parse_day_of_month(""), None);
    }

    #[test]
    fn billing_day_index_picks_first_match() {
        let daily = daily_usage();
        assert_eq!(billing_day_index(&daily, 1), Some(0));
        assert_eq!(billing_day_index(&daily, 31), Some(4));
        assert_eq!(billing_day_index(&daily, 15), None);
    }

    #[test]
    fn drilldown_marks_single_billing_day_point() {
        let mut state = ViewState::default();
        state.enter_drilldown(0);
        let annotations = build_annotations(&state, &daily_usage(), 1);
        assert_eq!(annotations.len(), 1);

        let Annotation::Box(marker) = &annotations[0];
        assert_eq!(marker.index, 0);
        assert_eq!(marker.x_min, "Jan 1");
        assert_eq!(marker.x_max, "Jan 1");
        assert_eq!(marker.y_min, 0.5);
        assert_eq!(marker.y_max, 0.5);
        assert_eq!(marker.border_color, MARKER_COLOR);
        assert_eq!(marker.label.content, "✅");
        assert_eq!(marker.label.font_size, 16);
    }

    #[test]
    fn no_marker_without_matching_day() {
        let mut state = ViewState::default();
        state.enter_drilldown(0);
        let daily = vec![day("Jan 2", 1.0), day("garbage", 2.0)];
        assert!(build_annotations(&state, &daily, 1).is_empty());
    }

    #[test]
    fn monthly_view_has_no_marker() {
        let annotations = build_annotations(&ViewState::default(), &daily_usage(), 1);
        assert!(annotations.is_empty());
    }

    #[test]
    fn billing_day_is_configurable() {
        let mut state = ViewState::default();
        state.enter_drilldown(2);
        let annotations = build_annotations(&state, &daily_usage(), 3);
        let Annotation::Box(marker) = &annotations[0];
        assert_eq!(marker.x_min, "Jan 3");
        assert_eq!(marker.index, 2);
    }
}
