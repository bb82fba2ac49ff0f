//! Detection List Renderer

use serde::Serialize;

use crate::constants;
use crate::logic::payload::Detection;

/// Animated fill of a confidence bar.
///
/// The bar is inserted empty, held for two frames, then ramps to its
/// target. Ticking is presentation only; the row's data is final the
/// moment it is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarFill {
    target: u16,
    current: u16,
    frames: u32,
}

impl BarFill {
    const DEFER_FRAMES: u32 = 2;
    const RAMP_FRAMES: u32 = 8;

    pub fn new(target_percent: i64) -> Self {
        Self {
            target: target_percent.clamp(0, 100) as u16,
            current: 0,
            frames: 0,
        }
    }

    /// Current fill in percent
    pub fn percent(&self) -> u16 {
        self.current
    }

    #[cfg(test)]
    pub fn target(&self) -> u16 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target && self.frames > Self::DEFER_FRAMES
    }

    /// Advance one frame; returns true if the fill moved
    pub fn tick(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }
        self.frames += 1;
        if self.frames <= Self::DEFER_FRAMES {
            return false;
        }

        let step = (self.frames - Self::DEFER_FRAMES).min(Self::RAMP_FRAMES);
        let next = (u32::from(self.target) * step / Self::RAMP_FRAMES) as u16;
        let moved = next != self.current;
        self.current = next;
        moved
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionRow {
    pub label: String,
    pub dangerous: bool,
    /// "near · center" style hint, when the detector sent one
    pub hint: Option<String>,
    /// `round(confidence * 100)` followed by `%`
    pub confidence_text: String,
    pub bar: BarFill,
}

impl DetectionRow {
    fn from_detection(detection: &Detection) -> Self {
        let percent = detection.confidence_percent();
        let hint = [detection.distance.as_deref(), detection.position.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        Self {
            label: detection.label.clone(),
            dangerous: detection.is_dangerous,
            hint: (!hint.is_empty()).then(|| hint.join(" · ")),
            confidence_text: format!("{}%", percent),
            bar: BarFill::new(percent),
        }
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.dangerous.then_some(constants::DANGER_TAG)
    }
}

/// Detection list view region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionListView {
    count_text: String,
    rows: Vec<DetectionRow>,
    renders: u64,
}

impl Default for DetectionListView {
    fn default() -> Self {
        Self {
            count_text: count_label(0),
            rows: Vec::new(),
            renders: 0,
        }
    }
}

impl DetectionListView {
    pub fn count_text(&self) -> &str {
        &self.count_text
    }

    pub fn rows(&self) -> &[DetectionRow] {
        &self.rows
    }

    /// True when the "no objects detected" row is shown
    pub fn is_placeholder(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn placeholder_text(&self) -> &'static str {
        constants::DETECTIONS_PLACEHOLDER
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Advance every bar animation; true if anything moved
    pub fn tick(&mut self) -> bool {
        self.rows
            .iter_mut()
            .fold(false, |moved, row| row.bar.tick() || moved)
    }

    pub fn is_animating(&self) -> bool {
        self.rows.iter().any(|row| !row.bar.is_settled())
    }
}

/// "0 objects", "1 object", "3 objects"
pub fn count_label(count: usize) -> String {
    format!("{} object{}", count, if count == 1 { "" } else { "s" })
}

/// Replace the whole list with `detections`, in source order
pub fn render_detections(view: &mut DetectionListView, detections: &[Detection]) {
    view.count_text = count_label(detections.len());
    view.rows = detections.iter().map(DetectionRow::from_detection).collect();
    view.renders += 1;

    log::debug!("Rendered {}", view.count_text);
}
