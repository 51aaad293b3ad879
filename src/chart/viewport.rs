use super::options::{ChartOptions, PanOptions, ZoomOptions};
use std::ops::RangeInclusive;

/// Identity of one mounted chart. A new key means pan and zoom start over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartKey(pub u64);

/// Visible window over category indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: f64,
    pub max: f64,
}

impl Viewport {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn centre(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct ChartHandle {
    key: ChartKey,
    viewport: Viewport,
    last_index: f64,
    pan: PanOptions,
    zoom: ZoomOptions,
}

impl ChartHandle {
    /// Axis bounds past the end of the series are pulled back to the last
    /// category.
    pub fn mount(key: ChartKey, options: &ChartOptions, len: usize) -> Self {
        let last_index = len.saturating_sub(1) as f64;
        let min = options.x.min.clamp(0.0, last_index);
        let max = options.x.max.clamp(min, last_index);
        tracing::debug!(key = key.0, min, max, len, "chart mounted");
        Self {
            key,
            viewport: Viewport { min, max },
            last_index,
            pan: options.pan.clone(),
            zoom: options.zoom.clone(),
        }
    }

    pub fn key(&self) -> ChartKey {
        self.key
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pan_threshold(&self) -> f64 {
        self.pan.threshold
    }

    pub fn visible(&self) -> RangeInclusive<usize> {
        let start = self.viewport.min.round().max(0.0) as usize;
        let end = self.viewport.max.round().max(0.0) as usize;
        start..=end
    }

    /// Positive offsets move toward later categories.
    pub fn pan(&mut self, offset_px: f64, px_per_category: f64) {
        if !self.pan.enabled || px_per_category <= 0.0 {
            return;
        }
        let wanted = offset_px / px_per_category;
        let delta = wanted.clamp(-self.viewport.min, self.last_index - self.viewport.max);
        self.viewport.min += delta;
        self.viewport.max += delta;
        tracing::trace!(key = self.key.0, delta, "panned");
    }

    /// One wheel step around the centre of the window.
    pub fn zoom(&mut self, zoom_in: bool) {
        let factor = if zoom_in {
            1.0 - self.zoom.speed
        } else {
            1.0 + self.zoom.speed
        };
        let floor = self.zoom.limits.min.min(self.last_index);
        let ceiling = self.zoom.limits.max.min(self.last_index);
        let span = (self.viewport.span() * factor).clamp(floor, ceiling.max(floor));

        let mut min = self.viewport.centre() - span / 2.0;
        min = min.clamp(0.0, (self.last_index - span).max(0.0));
        self.viewport = Viewport {
            min,
            max: min + span,
        };
        tracing::trace!(key = self.key.0, span, "zoomed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::options::build_options;
    use crate::models::ViewState;

    fn daily_handle() -> ChartHandle {
        let mut state = ViewState::default();
        state.enter_drilldown(0);
        ChartHandle::mount(ChartKey(1), &build_options(&state, 3, vec![]), 25)
    }

    #[test]
    fn mount_uses_axis_bounds() {
        let handle = daily_handle();
        assert_eq!(handle.key(), ChartKey(1));
        assert_eq!(handle.viewport(), Viewport { min: 0.0, max: 10.0 });
        assert_eq!(handle.visible(), 0..=10);
    }

    #[test]
    fn mount_clamps_window_to_short_series() {
        let mut state = ViewState::default();
        state.enter_drilldown(0);
        let handle = ChartHandle::mount(ChartKey(2), &build_options(&state, 3, vec![]), 4);
        assert_eq!(handle.viewport(), Viewport { min: 0.0, max: 3.0 });
    }

    #[test]
    fn pan_moves_window_and_stops_at_edges() {
        let mut handle = daily_handle();
        handle.pan(70.0, 35.0);
        assert_eq!(handle.viewport(), Viewport { min: 2.0, max: 12.0 });

        handle.pan(10_000.0, 35.0);
        assert_eq!(handle.viewport(), Viewport { min: 14.0, max: 24.0 });

        handle.pan(-10_000.0, 35.0);
        assert_eq!(handle.viewport(), Viewport { min: 0.0, max: 10.0 });
    }

    #[test]
    fn monthly_window_cannot_pan() {
        let handle_options = build_options(&ViewState::default(), 3, vec![]);
        let mut handle = ChartHandle::mount(ChartKey(3), &handle_options, 3);
        handle.pan(70.0, 10.0);
        assert_eq!(handle.viewport(), Viewport { min: 0.0, max: 2.0 });
    }

    #[test]
    fn zoom_respects_range_limits() {
        let mut handle = daily_handle();
        handle.zoom(false);
        assert_eq!(handle.viewport().span(), 10.0);

        for _ in 0..20 {
            handle.zoom(true);
        }
        assert!((handle.viewport().span() - 5.0).abs() < 1e-9);
        assert!(handle.viewport().min >= 0.0);
    }

    #[test]
    fn remount_resets_window() {
        let mut handle = daily_handle();
        handle.pan(70.0, 35.0);
        let options = {
            let mut state = ViewState::default();
            state.enter_drilldown(1);
            build_options(&state, 3, vec![])
        };
        let fresh = ChartHandle::mount(ChartKey(2), &options, 25);
        assert_ne!(fresh.key(), handle.key());
        assert_eq!(fresh.viewport(), Viewport { min: 0.0, max: 10.0 });
    }
}
