use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    pub month: String,
    pub usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub day: String,
    pub usage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Monthly,
    Daily,
}

impl ViewMode {
    pub fn as_label(self) -> &'static str {
        match self {
            ViewMode::Monthly => "monthly",
            ViewMode::Daily => "daily",
        }
    }
}

/// Which series is on screen. Only user interaction mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub drilldown: bool,
    pub selected_month: Option<usize>,
}

impl ViewState {
    pub fn mode(&self) -> ViewMode {
        if self.drilldown {
            ViewMode::Daily
        } else {
            ViewMode::Monthly
        }
    }

    /// The index is stored as given. The daily series does not filter on it.
    pub fn enter_drilldown(&mut self, month_index: usize) {
        tracing::debug!(month_index, "entering drilldown");
        self.drilldown = true;
        self.selected_month = Some(month_index);
    }

    pub fn exit_drilldown(&mut self) {
        tracing::debug!(previous = ?self.selected_month, "leaving drilldown");
        self.drilldown = false;
        self.selected_month = None;
    }
}
