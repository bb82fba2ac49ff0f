//! Dashboard Engine - Reconciles fetched status into the view
//!
//! Owns the connection state, the rendered fingerprints and the poll
//! counters. All work here is synchronous; the poll loop calls `apply` once
//! per completed fetch, in completion order.

use serde::Serialize;

use super::change_detector::{ChangeDetector, Region};
use super::client::FetchError;
use super::config::{DashboardConfig, Profile};
use super::connection::{ConnectionState, ConnectionTracker};
use super::payload::StatusPayload;
use super::render::{render_detections, render_guidance, render_logs};
use super::view::DashboardView;

/// Result of one dispatched fetch, tagged with its dispatch order
#[derive(Debug)]
pub struct FetchCompletion {
    pub seq: u64,
    pub result: Result<StatusPayload, FetchError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Payload applied; gated regions may still have been skipped
    Applied,
    /// Fetch failed; only the indicator was touched
    Failed,
    /// Completion was older than one already applied and was dropped
    Discarded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PollStats {
    pub dispatched: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub discarded: u64,
}

#[derive(Debug)]
pub struct DashboardEngine {
    tracker: ConnectionTracker,
    detector: ChangeDetector,
    profile: Profile,
    discard_stale: bool,
    next_seq: u64,
    latest_applied: Option<u64>,
    stats: PollStats,
}

impl DashboardEngine {
    pub fn new(profile: Profile, discard_stale: bool) -> Self {
        let detector = if profile.change_detection() {
            ChangeDetector::new()
        } else {
            ChangeDetector::disabled()
        };

        Self {
            tracker: ConnectionTracker::new(),
            detector,
            profile,
            discard_stale,
            next_seq: 0,
            latest_applied: None,
            stats: PollStats::default(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.profile, config.discard_stale)
    }

    /// Empty view matching this engine's profile
    pub fn new_view(&self) -> DashboardView {
        DashboardView {
            log_tail_enabled: self.profile.log_tail(),
            ..Default::default()
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.tracker.state()
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    #[cfg(test)]
    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    /// Reserve the sequence number of a fetch about to be issued
    pub fn begin_fetch(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.stats.dispatched += 1;
        seq
    }

    /// Apply one completed fetch to the view
    pub fn apply(&mut self, completion: FetchCompletion, view: &mut DashboardView) -> ApplyOutcome {
        if self.is_stale(completion.seq) {
            self.stats.discarded += 1;
            log::debug!(
                "Discarding stale status #{} (newest applied #{:?})",
                completion.seq,
                self.latest_applied
            );
            return ApplyOutcome::Discarded;
        }
        let newest = self
            .latest_applied
            .map_or(completion.seq, |latest| latest.max(completion.seq));
        self.latest_applied = Some(newest);

        match completion.result {
            Ok(payload) => {
                self.stats.succeeded += 1;
                self.apply_payload(&payload, view);
                ApplyOutcome::Applied
            }
            Err(e) => {
                self.stats.failed += 1;
                log::warn!("Error fetching status (#{}): {}", completion.seq, e);
                self.tracker.set_disconnected(&mut view.indicator);
                ApplyOutcome::Failed
            }
        }
    }

    fn is_stale(&self, seq: u64) -> bool {
        self.discard_stale && self.latest_applied.is_some_and(|latest| seq < latest)
    }

    fn apply_payload(&mut self, payload: &StatusPayload, view: &mut DashboardView) {
        self.tracker
            .set_connected(payload.status.as_deref(), &mut view.indicator);

        if self
            .detector
            .should_render(Region::Detections, payload.detections_fragment())
        {
            render_detections(&mut view.detections, &payload.detections);
        }

        render_guidance(&mut view.guidance, payload.guidance.as_deref());

        if !self.profile.log_tail() {
            return;
        }
        if let Some(logs) = &payload.logs {
            if self.detector.should_render(Region::Logs, logs) {
                render_logs(&mut view.log_tail, logs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::connection::Badge;
    use crate::logic::payload::DecodeError;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> StatusPayload {
        StatusPayload::from_value(value).unwrap()
    }

    fn ok(engine: &mut DashboardEngine, value: serde_json::Value) -> FetchCompletion {
        FetchCompletion {
            seq: engine.begin_fetch(),
            result: Ok(payload(value)),
        }
    }

    fn network_error(engine: &mut DashboardEngine) -> FetchCompletion {
        FetchCompletion {
            seq: engine.begin_fetch(),
            result: Err(FetchError::Network("connection refused".to_string())),
        }
    }

    fn full_engine() -> (DashboardEngine, DashboardView) {
        let engine = DashboardEngine::new(Profile::Full, false);
        let view = engine.new_view();
        (engine, view)
    }

    #[test]
    fn test_empty_payload_scenario() {
        let (mut engine, mut view) = full_engine();

        let completion = ok(&mut engine, json!({"detections": [], "logs": [], "status": "OK"}));
        assert_eq!(engine.apply(completion, &mut view), ApplyOutcome::Applied);

        assert_eq!(engine.connection_state(), ConnectionState::Connected);
        assert_eq!(view.indicator.text(), "OK");
        assert_eq!(view.indicator.badge(), Badge::Connected);
        assert!(view.detections.is_placeholder());
        assert_eq!(view.detections.count_text(), "0 objects");
        assert_eq!(view.log_tail.texts(), ["No logs available."]);
        assert!(view.guidance.is_placeholder());
    }

    #[test]
    fn test_knife_scenario() {
        let (mut engine, mut view) = full_engine();

        let completion = ok(
            &mut engine,
            json!({"detections": [{"label": "knife", "confidence": 0.87, "is_dangerous": true}]}),
        );
        engine.apply(completion, &mut view);

        assert_eq!(view.indicator.text(), "Connected");
        assert_eq!(view.detections.rows().len(), 1);
        let row = &view.detections.rows()[0];
        assert_eq!(row.label, "knife");
        assert_eq!(row.tag(), Some("DANGER"));
        assert_eq!(row.confidence_text, "87%");
    }

    #[test]
    fn test_unchanged_detections_not_rerendered() {
        let (mut engine, mut view) = full_engine();
        let body = json!({"detections": [{"label": "cup", "confidence": 0.4, "is_dangerous": false}]});

        let first = ok(&mut engine, body.clone());
        engine.apply(first, &mut view);
        let after_first = view.detections.clone();

        let second = ok(&mut engine, body);
        engine.apply(second, &mut view);

        assert_eq!(view.detections, after_first);
        assert_eq!(view.detections.render_count(), 1);
    }

    #[test]
    fn test_identical_logs_render_once() {
        let (mut engine, mut view) = full_engine();
        let logs = json!(["a", "b", "c", "d", "e"]);

        let first = ok(&mut engine, json!({"logs": logs.clone()}));
        engine.apply(first, &mut view);
        let second = ok(&mut engine, json!({"logs": logs}));
        engine.apply(second, &mut view);

        assert_eq!(view.log_tail.render_count(), 1);
        assert_eq!(view.log_tail.rows().len(), 5);
        assert!(engine.detector().rendered_fingerprint(Region::Logs).is_some());
    }

    #[test]
    fn test_same_guidance_renders_once() {
        let (mut engine, mut view) = full_engine();

        let first = ok(&mut engine, json!({"llm_response": "X"}));
        engine.apply(first, &mut view);
        let second = ok(&mut engine, json!({"guidance": "X"}));
        engine.apply(second, &mut view);

        assert_eq!(view.guidance.render_count(), 1);
        assert_eq!(view.guidance.display_text(), "X");
    }

    #[test]
    fn test_failure_leaves_regions_untouched() {
        let (mut engine, mut view) = full_engine();

        let good = ok(
            &mut engine,
            json!({
                "status": "Running",
                "detections": [{"label": "car", "confidence": 0.91, "is_dangerous": true}],
                "llm_response": "Car ahead",
                "logs": ["one", "two"]
            }),
        );
        engine.apply(good, &mut view);
        let before = view.clone();

        let failure = network_error(&mut engine);
        assert_eq!(engine.apply(failure, &mut view), ApplyOutcome::Failed);

        assert_eq!(engine.connection_state(), ConnectionState::Disconnected);
        assert_eq!(view.indicator.text(), "Disconnected");
        assert_eq!(view.indicator.badge(), Badge::Error);
        assert_eq!(view.detections, before.detections);
        assert_eq!(view.guidance, before.guidance);
        assert_eq!(view.log_tail, before.log_tail);
    }

    #[test]
    fn test_every_failure_kind_disconnects() {
        let (mut engine, mut view) = full_engine();
        let errors = vec![
            FetchError::Network("timeout".to_string()),
            FetchError::Status(500),
            FetchError::Decode(DecodeError::NotAnObject("an array")),
        ];

        for error in errors {
            let ok_completion = ok(&mut engine, json!({}));
            engine.apply(ok_completion, &mut view);
            assert_eq!(engine.connection_state(), ConnectionState::Connected);

            let seq = engine.begin_fetch();
            engine.apply(FetchCompletion { seq, result: Err(error) }, &mut view);
            assert_eq!(engine.connection_state(), ConnectionState::Disconnected);
        }
        assert_eq!(engine.stats().failed, 3);
        assert_eq!(engine.stats().succeeded, 3);
    }

    #[test]
    fn test_malformed_optional_field_stays_connected() {
        let (mut engine, mut view) = full_engine();

        let completion = ok(
            &mut engine,
            json!({
                "status": "OK",
                "detections": [{"label": "knife", "confidence": 0.87, "is_dangerous": true}],
                "logs": "x"
            }),
        );
        assert_eq!(engine.apply(completion, &mut view), ApplyOutcome::Applied);

        assert_eq!(engine.connection_state(), ConnectionState::Connected);
        assert_eq!(view.indicator.text(), "OK");
        assert_eq!(view.detections.rows().len(), 1);
        assert_eq!(view.log_tail.render_count(), 0);

        let body = br#"{"status": "OK", "llm_response": 42}"#;
        let completion = FetchCompletion {
            seq: engine.begin_fetch(),
            result: StatusPayload::from_slice(body).map_err(FetchError::from),
        };
        assert_eq!(engine.apply(completion, &mut view), ApplyOutcome::Applied);
        assert_eq!(engine.connection_state(), ConnectionState::Connected);
        assert!(view.guidance.is_placeholder());
    }

    #[test]
    fn test_absent_logs_keep_tail() {
        let (mut engine, mut view) = full_engine();

        let with_logs = ok(&mut engine, json!({"logs": ["kept"]}));
        engine.apply(with_logs, &mut view);
        let without_logs = ok(&mut engine, json!({"status": "Running"}));
        engine.apply(without_logs, &mut view);

        assert_eq!(view.log_tail.texts(), ["kept"]);
        assert_eq!(view.log_tail.render_count(), 1);
    }

    #[test]
    fn test_last_write_wins_without_guard() {
        let (mut engine, mut view) = full_engine();

        let older = engine.begin_fetch();
        let newer = engine.begin_fetch();

        engine.apply(
            FetchCompletion { seq: newer, result: Ok(payload(json!({"status": "new"}))) },
            &mut view,
        );
        let outcome = engine.apply(
            FetchCompletion { seq: older, result: Ok(payload(json!({"status": "old"}))) },
            &mut view,
        );

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(view.indicator.text(), "old");
    }

    #[test]
    fn test_stale_guard_discards_older_completion() {
        let mut engine = DashboardEngine::new(Profile::Full, true);
        let mut view = engine.new_view();

        let older = engine.begin_fetch();
        let newer = engine.begin_fetch();

        engine.apply(
            FetchCompletion { seq: newer, result: Ok(payload(json!({"status": "new"}))) },
            &mut view,
        );
        let outcome = engine.apply(
            FetchCompletion {
                seq: older,
                result: Err(FetchError::Status(502)),
            },
            &mut view,
        );

        assert_eq!(outcome, ApplyOutcome::Discarded);
        assert_eq!(view.indicator.text(), "new");
        assert_eq!(engine.connection_state(), ConnectionState::Connected);
        assert_eq!(
            engine.stats(),
            PollStats { dispatched: 2, succeeded: 1, failed: 0, discarded: 1 }
        );
    }

    #[test]
    fn test_basic_profile_rerenders_and_ignores_logs() {
        let mut engine = DashboardEngine::new(Profile::Basic, false);
        let mut view = engine.new_view();
        assert!(!view.log_tail_enabled);

        let body = json!({"detections": [{"label": "cup", "confidence": 0.4}], "logs": ["x"]});
        let first = ok(&mut engine, body.clone());
        engine.apply(first, &mut view);
        let second = ok(&mut engine, body);
        engine.apply(second, &mut view);

        assert_eq!(view.detections.render_count(), 2);
        assert_eq!(view.log_tail.render_count(), 0);
        assert!(view.log_tail.rows().is_empty());
    }
}
