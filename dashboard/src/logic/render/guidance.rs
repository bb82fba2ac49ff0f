//! Guidance Renderer
//!
//! Single block of advisory text. Identical text is never rewritten, and the
//! placeholder is restored whenever the service stops sending guidance.

use serde::Serialize;

use super::escape_markup;
use crate::constants;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GuidanceContent {
    Placeholder,
    Text {
        /// Text as received, used for the identity check
        source: String,
        /// Text as displayed
        escaped: String,
    },
}

/// Guidance view region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidanceView {
    content: GuidanceContent,
    renders: u64,
}

impl Default for GuidanceView {
    fn default() -> Self {
        Self {
            content: GuidanceContent::Placeholder,
            renders: 0,
        }
    }
}

impl GuidanceView {
    #[cfg(test)]
    pub fn content(&self) -> &GuidanceContent {
        &self.content
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, GuidanceContent::Placeholder)
    }

    /// What the region shows right now
    pub fn display_text(&self) -> &str {
        match &self.content {
            GuidanceContent::Placeholder => constants::GUIDANCE_PLACEHOLDER,
            GuidanceContent::Text { escaped, .. } => escaped,
        }
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }
}

/// Show `text`, or the placeholder when it is absent or empty.
///
/// Returns true if the region was rewritten.
pub fn render_guidance(view: &mut GuidanceView, text: Option<&str>) -> bool {
    match text.filter(|t| !t.is_empty()) {
        None => {
            if view.is_placeholder() {
                return false;
            }
            view.content = GuidanceContent::Placeholder;
        }
        Some(text) => {
            if let GuidanceContent::Text { source, .. } = &view.content {
                if source == text {
                    return false;
                }
            }
            view.content = GuidanceContent::Text {
                source: text.to_string(),
                escaped: escape_markup(text),
            };
        }
    }

    view.renders += 1;
    true
}
