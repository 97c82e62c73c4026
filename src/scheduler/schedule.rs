//! Trigger cadence
//!
//! A daily hour window with a fixed minute step, the same shape as the cron
//! entry `*/30 17-23 * * *`: fire at every minute divisible by the step in
//! every hour from `start_hour` to `end_hour` inclusive.

use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use chrono::{DateTime, Days, NaiveTime, TimeZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyWindow {
    start_hour: u32,
    end_hour: u32,
    interval_minutes: u32,
}

impl DailyWindow {
    pub fn new(start_hour: u32, end_hour: u32, interval_minutes: u32) -> Result<Self, ScheduleError> {
        for hour in [start_hour, end_hour] {
            if hour > 23 {
                return Err(ScheduleError::HourOutOfRange(hour));
            }
        }
        if start_hour > end_hour {
            return Err(ScheduleError::InvertedWindow {
                start: start_hour,
                end: end_hour,
            });
        }
        if interval_minutes == 0 || interval_minutes > 60 || 60 % interval_minutes != 0 {
            return Err(ScheduleError::BadInterval(interval_minutes));
        }

        Ok(Self {
            start_hour,
            end_hour,
            interval_minutes,
        })
    }

    pub fn from_config(config: &SchedulerConfig) -> Result<Self, ScheduleError> {
        Self::new(config.start_hour, config.end_hour, config.interval_minutes)
    }

    /// Fire times within one day, in order
    fn slots(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        (self.start_hour..=self.end_hour).flat_map(move |hour| {
            (0..60)
                .step_by(self.interval_minutes as usize)
                .filter_map(move |minute| NaiveTime::from_hms_opt(hour, minute, 0))
        })
    }

    /// First fire time strictly after `now`
    ///
    /// Looks at today and the next two days so a slot that does not exist
    /// locally (a DST gap) is skipped rather than returned.
    pub fn next_fire_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz = now.timezone();
        let today = now.date_naive();

        (0..3)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .flat_map(|day| self.slots().map(move |slot| day.and_time(slot)))
            .filter_map(|naive| tz.from_local_datetime(&naive).earliest())
            .find(|candidate| candidate > now)
    }

    /// Human-readable description for startup logs
    pub fn describe(&self) -> String {
        format!(
            "every {} min from {:02}:00 through {:02}:{:02}",
            self.interval_minutes,
            self.start_hour,
            self.end_hour,
            60 - self.interval_minutes
        )
    }
}
