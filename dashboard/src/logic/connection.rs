//! Connection State Tracker
//!
//! Reachability of the detection service and the status badge that shows it.

use serde::Serialize;

use crate::constants;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Badge style of the status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    /// No poll has completed yet
    Pending,
    Connected,
    Error,
}

/// Status indicator view region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusIndicator {
    text: String,
    badge: Badge,
    renders: u64,
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self {
            text: constants::STATUS_CONNECTING.to_string(),
            badge: Badge::Pending,
            renders: 0,
        }
    }
}

impl StatusIndicator {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn badge(&self) -> Badge {
        self.badge
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Returns false when the indicator already shows exactly this
    fn show(&mut self, text: &str, badge: Badge) -> bool {
        if self.text == text && self.badge == badge {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        self.badge = badge;
        self.renders += 1;
        true
    }
}

/// Tracks reachability. Every applied poll calls exactly one setter.
#[derive(Debug)]
pub struct ConnectionTracker {
    state: ConnectionState,
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Mark reachable; the indicator shows the service's own status text
    /// or "Connected" when it has none.
    pub fn set_connected(&mut self, status: Option<&str>, indicator: &mut StatusIndicator) {
        if self.state != ConnectionState::Connected {
            log::info!("Detection service reachable");
        }
        self.state = ConnectionState::Connected;

        let text = status
            .filter(|s| !s.is_empty())
            .unwrap_or(constants::STATUS_CONNECTED);
        indicator.show(text, Badge::Connected);
    }

    pub fn set_disconnected(&mut self, indicator: &mut StatusIndicator) {
        if self.state == ConnectionState::Connected {
            log::warn!("Detection service unreachable");
        }
        self.state = ConnectionState::Disconnected;
        indicator.show(constants::STATUS_DISCONNECTED, Badge::Error);
    }
}
