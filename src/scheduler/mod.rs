//! Scheduler module
//!
//! In-process stand-in for the external cron trigger. The cadence comes from
//! `[scheduler]` in the config file; the job itself knows nothing about it.

pub mod schedule;
pub mod stretch;

pub use schedule::DailyWindow;
pub use stretch::run_stretch_reminder;

use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::logger;
use crate::server::signal::SignalHandler;
use crate::store::MissionStore;
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;

/// Validated timer settings
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    pub window: DailyWindow,
    pub utc: bool,
}

impl Timer {
    /// `Ok(None)` when the timer is disabled
    pub fn from_config(config: &SchedulerConfig) -> Result<Option<Self>, ScheduleError> {
        if !config.enabled {
            return Ok(None);
        }
        Ok(Some(Self {
            window: DailyWindow::from_config(config)?,
            utc: config.utc,
        }))
    }

    /// Next fire time strictly after `after`, evaluated in the configured zone
    pub fn next_fire(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.utc {
            self.window.next_fire_after(&after)
        } else {
            self.window
                .next_fire_after(&after.with_timezone(&Local))
                .map(|t| t.with_timezone(&Utc))
        }
    }

    pub fn describe(&self) -> String {
        let zone = if self.utc { "UTC" } else { "local time" };
        format!("{} ({zone})", self.window.describe())
    }
}

/// Run the timer until shutdown is requested.
///
/// Each fire runs the stretch reminder once. The next fire time is computed
/// from the later of "now" and the previous fire, so an early wake-up never
/// fires the same slot twice.
pub async fn run_scheduler(
    timer: Timer,
    store: Arc<dyn MissionStore>,
    signals: Arc<SignalHandler>,
) {
    logger::log_scheduler_start(&timer.describe());
    let mut last_fire: Option<DateTime<Utc>> = None;

    loop {
        let shutdown = signals.shutdown.notified();
        tokio::pin!(shutdown);
        shutdown.as_mut().enable();
        if signals.is_shutdown_requested() {
            break;
        }

        let now = Utc::now();
        let after = last_fire.map_or(now, |last| last.max(now));
        let Some(next) = timer.next_fire(after) else {
            logger::log_error("Scheduler could not compute the next trigger time, stopping");
            return;
        };
        logger::log_scheduler_next(&next.to_rfc3339());

        let wait = (next - Utc::now()).to_std().unwrap_or_default();
        tokio::select! {
            () = tokio::time::sleep(wait) => {
                run_stretch_reminder(store.as_ref()).await;
                last_fire = Some(next);
            }
            () = &mut shutdown => break,
        }
    }
}
