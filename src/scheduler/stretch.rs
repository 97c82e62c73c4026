//! Stretch reminder job
//!
//! One run inserts one reminder row. Failures are logged and swallowed: the
//! timer has no caller to report to and nothing is retried.

use crate::logger;
use crate::store::{epoch_seconds, Mission, MissionStore};
use chrono::Utc;

/// Name of the mission the timer inserts ("stretch a bit")
pub const STRETCH_REMINDER: &str = "伸个懒腰";

/// Insert one stretch reminder stamped with the current time.
///
/// Returns the inserted row, or `None` when the store failed.
pub async fn run_stretch_reminder(store: &dyn MissionStore) -> Option<Mission> {
    logger::log_scheduler_triggered(&Utc::now().to_rfc3339());

    let time = epoch_seconds();
    match store.insert_mission(STRETCH_REMINDER, time).await {
        Ok(id) => {
            logger::log_scheduler_inserted(id, time, &Utc::now().to_rfc3339());
            Some(Mission {
                id,
                name: STRETCH_REMINDER.to_string(),
                time,
            })
        }
        Err(e) => {
            logger::log_scheduler_error(&e.to_string());
            None
        }
    }
}
