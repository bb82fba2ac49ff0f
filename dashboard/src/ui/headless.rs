//! Headless Presenter - Logs region changes instead of drawing
//!
//! Used when no terminal is attached. Each rewritten region is logged once
//! as JSON; the clock only at debug level.

use serde::Serialize;

use crate::error::DashboardResult;
use crate::logic::engine::PollStats;
use crate::logic::poll_loop::Presenter;
use crate::logic::view::{DashboardView, RenderStamp};

#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    last: Option<RenderStamp>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions to report for this frame; everything on the first one
    fn changed(&mut self, view: &DashboardView) -> Vec<&'static str> {
        let stamp = view.stamp();
        let earlier = self.last.replace(stamp);
        match earlier {
            Some(earlier) => stamp.changed_since(&earlier),
            None => vec!["indicator", "detections", "guidance", "log_tail"],
        }
    }
}

fn to_json<T: Serialize>(region: &T) -> String {
    serde_json::to_string(region).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}

/// JSON of one named region, or None for the clock
pub fn region_json(view: &DashboardView, region: &str) -> Option<String> {
    match region {
        "indicator" => Some(to_json(&view.indicator)),
        "detections" => Some(to_json(&view.detections)),
        "guidance" => Some(to_json(&view.guidance)),
        "log_tail" if view.log_tail_enabled => Some(to_json(&view.log_tail)),
        _ => None,
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, view: &DashboardView, stats: &PollStats) -> DashboardResult<()> {
        for region in self.changed(view) {
            match region_json(view, region) {
                Some(json) => log::info!("[{}] {}", region, json),
                None if region == "clock" => log::debug!("[clock] {}", view.clock.text()),
                None => {}
            }
        }
        log::trace!("Poll stats: {}", to_json(stats));
        Ok(())
    }
}
