//! Dashboard View - Retained model of everything on screen
//!
//! Frontends only read this. Each region counts its own rewrites so callers
//! can tell exactly which parts of the screen changed.

use chrono::{DateTime, Local};
use serde::Serialize;

use super::connection::StatusIndicator;
use super::render::{DetectionListView, GuidanceView, LogTailView};

/// Wall clock view region
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClockView {
    text: String,
    renders: u64,
}

impl ClockView {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Show `now` as HH:MM:SS; true if the text changed
    pub fn refresh(&mut self, now: DateTime<Local>) -> bool {
        let text = now.format("%H:%M:%S").to_string();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.renders += 1;
        true
    }
}

/// Per-region render counters, used to detect what changed between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStamp {
    pub indicator: u64,
    pub detections: u64,
    pub guidance: u64,
    pub log_tail: u64,
    pub clock: u64,
}

impl RenderStamp {
    /// Names of the regions rewritten since `earlier`
    pub fn changed_since(&self, earlier: &RenderStamp) -> Vec<&'static str> {
        [
            ("indicator", self.indicator != earlier.indicator),
            ("detections", self.detections != earlier.detections),
            ("guidance", self.guidance != earlier.guidance),
            ("log_tail", self.log_tail != earlier.log_tail),
            ("clock", self.clock != earlier.clock),
        ]
        .into_iter()
        .filter_map(|(name, changed)| changed.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub indicator: StatusIndicator,
    pub detections: DetectionListView,
    pub guidance: GuidanceView,
    pub log_tail: LogTailView,
    pub clock: ClockView,
    /// False in the basic profile; frontends hide the region
    pub log_tail_enabled: bool,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            indicator: StatusIndicator::default(),
            detections: DetectionListView::default(),
            guidance: GuidanceView::default(),
            log_tail: LogTailView::default(),
            clock: ClockView::default(),
            log_tail_enabled: true,
        }
    }
}

impl DashboardView {
    pub fn stamp(&self) -> RenderStamp {
        RenderStamp {
            indicator: self.indicator.render_count(),
            detections: self.detections.render_count(),
            guidance: self.guidance.render_count(),
            log_tail: self.log_tail.render_count(),
            clock: self.clock.render_count(),
        }
    }

    /// Advance presentation animations by one frame
    pub fn advance_frame(&mut self) -> bool {
        self.detections.tick()
    }

    pub fn is_animating(&self) -> bool {
        self.detections.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_clock_refresh() {
        let mut clock = ClockView::default();
        let at = Local.with_ymd_and_hms(2026, 10, 16, 14, 3, 9).unwrap();

        assert!(clock.refresh(at));
        assert_eq!(clock.text(), "14:03:09");
        assert!(!clock.refresh(at));
        assert_eq!(clock.render_count(), 1);
    }

    #[test]
    fn test_stamp_reports_changed_regions() {
        let mut view = DashboardView::default();
        let before = view.stamp();

        view.clock.refresh(Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 1).unwrap());

        assert_eq!(view.stamp().changed_since(&before), ["clock"]);
        assert!(view.stamp().changed_since(&view.stamp()).is_empty());
    }
}
