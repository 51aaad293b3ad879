use crate::chart::options::{format_tooltip, on_click};
use crate::chart::viewport::{ChartHandle, ChartKey};
use crate::chart::{derive_chart, ChartSpec};
use crate::config::AppConfig;
use crate::dataset::{daily_usage, monthly_usage};
use crate::models::{DailyUsage, MonthlyUsage, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chart,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// A mouse drag in progress. `panned_to` is the column the viewport was
/// last moved to; `None` until the drag clears the pan threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub origin: u16,
    pub panned_to: Option<u16>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub running: bool,
    pub screen: Screen,
    pub view: ViewState,
    pub chart: ChartSpec,
    pub handle: ChartHandle,
    pub cursor: usize,
    pub drag: Option<DragState>,
    pub status: String,
    pub billing_day: u32,
    pub pan_step_px: f64,
    monthly: Vec<MonthlyUsage>,
    daily: Vec<DailyUsage>,
    mounts: u64,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        let monthly = monthly_usage();
        let daily = daily_usage();
        let view = ViewState::default();
        let chart = derive_chart(&view, &monthly, &daily, cfg.billing_day);
        let handle = ChartHandle::mount(ChartKey(1), &chart.options, chart.data.len());

        Self {
            running: true,
            screen: Screen::Chart,
            view,
            chart,
            handle,
            cursor: 0,
            drag: None,
            status: "ready".into(),
            billing_day: cfg.billing_day,
            pan_step_px: cfg.pan_step_px,
            monthly,
            daily,
            mounts: 1,
        }
    }

    /// Rebuild the chart from the current view state under a new identity.
    /// Pan and zoom from the previous mount are dropped.
    fn remount(&mut self) {
        self.mounts += 1;
        self.chart = derive_chart(&self.view, &self.monthly, &self.daily, self.billing_day);
        self.handle = ChartHandle::mount(
            ChartKey(self.mounts),
            &self.chart.options,
            self.chart.data.len(),
        );
        self.cursor = *self.handle.visible().start();
        self.drag = None;
    }

    pub fn click(&mut self, elements: &[usize]) {
        if on_click(&mut self.view, elements) {
            self.remount();
            self.status = format!(
                "{} selected",
                self.month_name(self.view.selected_month).unwrap_or("unknown month")
            );
        }
    }

    pub fn click_cursor(&mut self) {
        let cursor = self.cursor;
        self.click(&[cursor]);
    }

    pub fn back(&mut self) {
        let was_drilldown = self.view.drilldown;
        self.view.exit_drilldown();
        if was_drilldown {
            self.remount();
            self.status = "monthly view".into();
        }
    }

    fn month_name(&self, index: Option<usize>) -> Option<&str> {
        index
            .and_then(|i| self.monthly.get(i))
            .map(|m| m.month.as_str())
    }

    pub fn scroll(&mut self, direction: ScrollDirection, px_per_category: f64) {
        let offset = match direction {
            ScrollDirection::Left => -self.pan_step_px,
            ScrollDirection::Right => self.pan_step_px,
        };
        self.handle.pan(offset, px_per_category);
        self.clamp_cursor();
    }

    pub fn zoom(&mut self, zoom_in: bool) {
        self.handle.zoom(zoom_in);
        self.clamp_cursor();
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let visible = self.handle.visible();
        self.cursor = if forward {
            (self.cursor + 1).min(*visible.end())
        } else {
            self.cursor.saturating_sub(1).max(*visible.start())
        };
    }

    pub fn clamp_cursor(&mut self) {
        let visible = self.handle.visible();
        self.cursor = self.cursor.clamp(*visible.start(), *visible.end());
    }

    pub fn tooltip(&self) -> Option<String> {
        let label = self.chart.data.labels.get(self.cursor)?;
        let value = self.chart.data.values.get(self.cursor)?;
        Some(format!("{label} · {}", format_tooltip(*value)))
    }
}
