//! Periodic refresh loop with rate-limit backoff.
//!
//! The loop is a two-state machine:
//!
//! ```text
//!   start ──► Running { next_run } ──(429)──► Backoff { resume_at }
//!                  ▲        │                        │
//!                  └─(ok)───┘                        │
//!                  └────────────── resume ───────────┘
//! ```
//!
//! The first cycle runs immediately. After a 429 no cycle runs until the
//! backoff window ends; the regular cadence then restarts from the resume
//! point, so the first post-backoff refresh happens one interval later.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::time::{sleep_until, Instant};

use super::refresh::{RefreshEngine, RefreshOutcome};
use crate::lifecycle::ShutdownToken;

/// Where the refresh loop is and when it next wakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running { next_run: Instant },
    Backoff { resume_at: Instant },
}

impl SchedulerState {
    /// Initial state: run right away.
    pub fn start(now: Instant) -> Self {
        Self::Running { next_run: now }
    }

    pub fn wake_at(&self) -> Instant {
        match *self {
            Self::Running { next_run } => next_run,
            Self::Backoff { resume_at } => resume_at,
        }
    }

    /// Transition after a cycle that was scheduled for `scheduled` and
    /// finished at `now`.
    pub fn after_refresh(
        scheduled: Instant,
        now: Instant,
        outcome: &RefreshOutcome,
        interval: Duration,
        backoff: Duration,
    ) -> Self {
        if outcome.is_rate_limited() {
            return Self::Backoff {
                resume_at: now + backoff,
            };
        }
        // Fixed cadence; a cycle that overran the period is not replayed.
        let next_run = (scheduled + interval).max(now);
        Self::Running { next_run }
    }

    /// Leave backoff. The periodic trigger restarts at `resume_at`.
    pub fn resumed(resume_at: Instant, interval: Duration) -> Self {
        Self::Running {
            next_run: resume_at + interval,
        }
    }
}

/// Drives a [`RefreshEngine`] until shutdown.
pub struct RefreshScheduler {
    engine: Arc<RefreshEngine>,
    shutdown: ShutdownToken,
}

impl RefreshScheduler {
    pub fn new(engine: Arc<RefreshEngine>, shutdown: ShutdownToken) -> Self {
        Self { engine, shutdown }
    }

    /// Run until the shutdown token fires.
    ///
    /// A cycle already past its shutdown check finishes writing what it
    /// fetched; no new cycle starts afterwards.
    pub async fn run(self) {
        let interval = self.engine.config().interval;
        let backoff = self.engine.config().rate_limit_backoff;
        let mut state = SchedulerState::start(Instant::now());

        info!(
            "Price refresh scheduler started (interval {:?}, rate-limit backoff {:?})",
            interval, backoff
        );

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = sleep_until(state.wake_at()) => {}
            }

            state = match state {
                SchedulerState::Running { next_run } => {
                    let outcome = self.engine.refresh_once().await;
                    if outcome == RefreshOutcome::Skipped {
                        break;
                    }
                    let next = SchedulerState::after_refresh(
                        next_run,
                        Instant::now(),
                        &outcome,
                        interval,
                        backoff,
                    );
                    if let SchedulerState::Backoff { .. } = next {
                        warn!("Rate limited, pausing price refresh for {:?}", backoff);
                    }
                    next
                }
                SchedulerState::Backoff { resume_at } => {
                    info!("Rate-limit backoff over, resuming price refresh");
                    SchedulerState::resumed(resume_at, interval)
                }
            };
        }

        info!("Price refresh scheduler stopped");
    }
}
