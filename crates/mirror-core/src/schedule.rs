//! Repeated passes on a fixed interval

use std::time::Duration;

use crate::event::{PassPhase, ScheduleEvent};
use crate::log::LogSink;
use crate::sync::{SyncEngine, SyncReport};
use crate::Result;

/// How many passes to run and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub count: u64,
    pub interval: Duration,
}

impl Schedule {
    pub fn new(count: u64, interval: Duration) -> Self {
        Self { count, interval }
    }

    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

/// Run `schedule.count` passes, bracketing each with start/finish lines and
/// calling `sleep` between consecutive passes (never after the last).
///
/// Returns the counters of all completed passes summed together.
///
/// # Errors
///
/// The first fatal error ends the schedule; remaining passes are not run.
pub fn run_schedule<F>(
    engine: &SyncEngine,
    schedule: Schedule,
    sink: &mut dyn LogSink,
    mut sleep: F,
) -> Result<SyncReport>
where
    F: FnMut(Duration),
{
    let total = schedule.count;
    let mut total_report = SyncReport::default();

    for index in 1..=total {
        let bracket = |phase| ScheduleEvent {
            index,
            total,
            phase,
        };

        sink.append(&bracket(PassPhase::Started).to_string())?;
        let report = engine.run_pass(sink)?;
        sink.append(&bracket(PassPhase::Finished).to_string())?;

        tracing::info!(
            pass = index,
            total,
            mutations = report.mutations(),
            errors = report.errors,
            "synchronization pass finished"
        );
        total_report += report;

        if index != total {
            sleep(schedule.interval);
        }
    }

    Ok(total_report)
}
