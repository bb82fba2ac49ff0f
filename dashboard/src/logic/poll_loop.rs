//! Poll Loop - Periodic status fetch and dispatch
//!
//! One cooperative event loop owns the engine and the view. Poll ticks
//! spawn fetches without waiting for earlier ones; completions come back
//! over a channel and are applied synchronously, in arrival order. The
//! clock and animation frames run on their own timers and touch only their
//! own regions.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{interval, MissedTickBehavior};

use super::client::StatusSource;
use super::config::DashboardConfig;
use super::engine::{DashboardEngine, FetchCompletion, PollStats};
use super::render::append_local;
use super::view::DashboardView;
use crate::constants;
use crate::error::DashboardResult;

/// Something that shows the view: a terminal, a log, a test recorder
pub trait Presenter {
    /// Called whenever the view or the poll counters may have changed
    fn present(&mut self, view: &DashboardView, stats: &PollStats) -> DashboardResult<()>;
}

pub struct PollLoop<S: StatusSource> {
    source: Arc<S>,
    engine: DashboardEngine,
    view: DashboardView,
    poll_interval: Duration,
    clock_interval: Duration,
    frame_interval: Duration,
    /// Wall clock source for the clock region and local log rows
    now: Box<dyn Fn() -> DateTime<Local>>,
}

impl<S: StatusSource> PollLoop<S> {
    pub fn new(source: S, config: &DashboardConfig) -> Self {
        let engine = DashboardEngine::from_config(config);
        let view = engine.new_view();

        Self {
            source: Arc::new(source),
            engine,
            view,
            poll_interval: config.poll_interval,
            clock_interval: config.clock_interval,
            frame_interval: Duration::from_millis(constants::FRAME_INTERVAL_MS),
            now: Box::new(Local::now),
        }
    }

    pub fn engine(&self) -> &DashboardEngine {
        &self.engine
    }

    #[cfg(test)]
    fn with_clock<C>(mut self, now: C) -> Self
    where
        C: Fn() -> DateTime<Local> + 'static,
    {
        self.now = Box::new(now);
        self
    }

    #[cfg(test)]
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Append a local, timestamped line to the log tail (startup banner)
    pub fn announce(&mut self, message: &str) {
        if self.view.log_tail_enabled {
            append_local(&mut self.view.log_tail, message, (self.now)());
        }
    }

    /// Run until `shutdown` resolves. Fetch failures never end the loop;
    /// only presenter errors do.
    pub async fn run_until<P, F>(&mut self, presenter: &mut P, shutdown: F) -> DashboardResult<()>
    where
        P: Presenter,
        F: Future<Output = ()>,
    {
        let (tx, mut completions) = mpsc::unbounded_channel::<FetchCompletion>();

        let mut poll_timer = interval(self.poll_interval);
        poll_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut clock_timer = interval(self.clock_interval);
        clock_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frame_timer = interval(self.frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);

        log::info!(
            "Polling every {}ms ({} profile)",
            self.poll_interval.as_millis(),
            self.engine.profile()
        );
        presenter.present(&self.view, &self.engine.stats())?;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,

                _ = poll_timer.tick() => self.dispatch(&tx),

                Some(completion) = completions.recv() => {
                    self.engine.apply(completion, &mut self.view);
                    presenter.present(&self.view, &self.engine.stats())?;
                }

                _ = clock_timer.tick() => {
                    if self.view.clock.refresh((self.now)()) {
                        presenter.present(&self.view, &self.engine.stats())?;
                    }
                }

                _ = frame_timer.tick(), if self.view.is_animating() => {
                    if self.view.advance_frame() {
                        presenter.present(&self.view, &self.engine.stats())?;
                    }
                }
            }
        }

        log::info!("Poll loop stopped after {} fetches", self.engine.stats().dispatched);
        Ok(())
    }

    /// Issue one fetch; its result is applied whenever it arrives
    fn dispatch(&mut self, tx: &UnboundedSender<FetchCompletion>) {
        let seq = self.engine.begin_fetch();
        let source = Arc::clone(&self.source);
        let tx = tx.clone();

        tokio::spawn(async move {
            let result = source.fetch().await;
            // the loop has stopped if the receiver is gone
            let _ = tx.send(FetchCompletion { seq, result });
        });
    }
}
