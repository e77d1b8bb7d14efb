//! Owns one recurring refresh job per chart and the schedule state machine
//! around it. The registry is an injectable object; all shared state lives
//! behind its own locks, keyed by chart id.

use crate::{
    ChartId,
    error::{ExecutionError, SchedulerError},
    executor::{QueryExecutor, RunSummary},
};
use chrono::{DateTime, Utc};
use cron::Schedule;
use serde::Serialize;
use std::{
    collections::HashMap,
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Per-run outcome annotation. SUCCESS/FAILED never change whether the
/// schedule is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Scheduled,
    Success,
    Failed,
}

/// Snapshot of one chart's recurring refresh.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSchedule {
    pub chart_id: ChartId,
    pub cron_expr: String,
    pub enabled: bool,
    pub last_execution: Option<DateTime<Utc>>,
    pub next_execution: Option<DateTime<Utc>>,
    pub status: ScheduleStatus,
}

/// What a single trigger did.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunSummary),
    Failed(ExecutionError),
    /// A previous run for the same chart was still executing, or the chart
    /// is no longer registered.
    Skipped,
}

struct ChartEntry {
    schedule: ChartSchedule,
    /// Per-chart serialization guard: a trigger that finds it set skips
    /// instead of overlapping the in-flight run.
    running: Arc<AtomicBool>,
    timer: Option<TimerHandle>,
}

struct TimerHandle {
    cancel: CancellationToken,
}

impl TimerHandle {
    /// Non-interrupting cancel: the timer loop observes the token between
    /// runs, so an in-flight execution completes and still reports its
    /// outcome into the schedule record.
    fn cancel(&self) {
        self.cancel.cancel();
    }
}

#[derive(Clone)]
pub struct ScheduleRegistry {
    inner: Arc<Inner>,
}

struct Inner {
    executor: QueryExecutor,
    entries: Mutex<HashMap<ChartId, ChartEntry>>,
}

impl ScheduleRegistry {
    pub fn new(executor: QueryExecutor) -> Self {
        Self {
            inner: Arc::new(Inner {
                executor,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Registers a recurring refresh for `chart_id`. An existing schedule
    /// for the same chart is replaced.
    pub async fn schedule_query(
        &self,
        chart_id: ChartId,
        cron_expr: &str,
    ) -> Result<ChartSchedule, SchedulerError> {
        let schedule = parse_cron(cron_expr)?;

        let mut entries = self.inner.entries.lock().await;
        // Replacing a schedule keeps the chart's run guard, so an in-flight
        // run still serializes against the new timer's triggers.
        let running = match entries.get_mut(&chart_id) {
            Some(existing) => {
                if let Some(timer) = existing.timer.take() {
                    timer.cancel();
                }
                existing.running.clone()
            }
            None => Arc::new(AtomicBool::new(false)),
        };

        let record = ChartSchedule {
            chart_id,
            cron_expr: cron_expr.to_string(),
            enabled: true,
            last_execution: None,
            next_execution: next_fire(&schedule),
            status: ScheduleStatus::Scheduled,
        };
        entries.insert(
            chart_id,
            ChartEntry {
                schedule: record.clone(),
                running,
                timer: Some(self.spawn_timer(chart_id, schedule)),
            },
        );

        info!(chart_id, cron = cron_expr, "chart refresh scheduled");
        Ok(record)
    }

    /// Changes a chart's cadence. With no existing schedule this behaves
    /// exactly like `schedule_query`; otherwise the old timer is cancelled
    /// (in-flight runs finish), the cron and next-fire time are updated, and
    /// a fresh timer is registered.
    pub async fn update_schedule(
        &self,
        chart_id: ChartId,
        new_cron: &str,
    ) -> Result<ChartSchedule, SchedulerError> {
        let schedule = parse_cron(new_cron)?;

        let mut entries = self.inner.entries.lock().await;
        let Some(entry) = entries.get_mut(&chart_id) else {
            drop(entries);
            return self.schedule_query(chart_id, new_cron).await;
        };

        if let Some(timer) = entry.timer.take() {
            timer.cancel();
        }
        entry.schedule.cron_expr = new_cron.to_string();
        entry.schedule.next_execution = next_fire(&schedule);
        if entry.schedule.enabled {
            entry.timer = Some(self.spawn_timer(chart_id, schedule));
        }

        info!(chart_id, cron = new_cron, "chart schedule updated");
        Ok(entry.schedule.clone())
    }

    /// Stops future triggers without deleting the schedule record.
    pub async fn disable_schedule(&self, chart_id: ChartId) -> Result<(), SchedulerError> {
        let mut entries = self.inner.entries.lock().await;
        let entry = entries
            .get_mut(&chart_id)
            .ok_or(SchedulerError::UnknownChart(chart_id))?;

        if let Some(timer) = entry.timer.take() {
            timer.cancel();
        }
        entry.schedule.enabled = false;
        entry.schedule.next_execution = None;

        info!(chart_id, "chart schedule disabled");
        Ok(())
    }

    /// Re-registers the timer for a disabled schedule.
    pub async fn enable_schedule(&self, chart_id: ChartId) -> Result<(), SchedulerError> {
        let mut entries = self.inner.entries.lock().await;
        let entry = entries
            .get_mut(&chart_id)
            .ok_or(SchedulerError::UnknownChart(chart_id))?;
        if entry.schedule.enabled {
            return Ok(());
        }

        let schedule = parse_cron(&entry.schedule.cron_expr)?;
        entry.schedule.enabled = true;
        entry.schedule.next_execution = next_fire(&schedule);
        entry.timer = Some(self.spawn_timer(chart_id, schedule));

        info!(chart_id, "chart schedule enabled");
        Ok(())
    }

    /// Cancels the timer and drops the record entirely; the chart-deletion
    /// path.
    pub async fn remove_schedule(&self, chart_id: ChartId) -> Result<(), SchedulerError> {
        let mut entries = self.inner.entries.lock().await;
        let entry = entries
            .remove(&chart_id)
            .ok_or(SchedulerError::UnknownChart(chart_id))?;
        if let Some(timer) = entry.timer {
            timer.cancel();
        }

        info!(chart_id, "chart schedule removed");
        Ok(())
    }

    pub async fn get_schedule(&self, chart_id: ChartId) -> Option<ChartSchedule> {
        self.inner
            .entries
            .lock()
            .await
            .get(&chart_id)
            .map(|entry| entry.schedule.clone())
    }

    pub async fn all_active_schedules(&self) -> Vec<ChartSchedule> {
        self.inner
            .entries
            .lock()
            .await
            .values()
            .filter(|entry| entry.schedule.enabled)
            .map(|entry| entry.schedule.clone())
            .collect()
    }

    /// Executes one trigger for `chart_id`, serializing runs per chart: a
    /// trigger that fires while the previous run is still executing skips
    /// rather than overlapping writes to the same result table. The timer
    /// loop calls this on every fire; tests drive it directly.
    pub async fn run_once(&self, chart_id: ChartId) -> RunOutcome {
        let running = {
            let entries = self.inner.entries.lock().await;
            match entries.get(&chart_id) {
                Some(entry) => entry.running.clone(),
                None => return RunOutcome::Skipped,
            }
        };
        if running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!(chart_id, "previous refresh still running, skipping trigger");
            return RunOutcome::Skipped;
        }

        let result = self.inner.executor.execute_and_save(chart_id).await;
        running.store(false, Ordering::SeqCst);

        self.record_outcome(chart_id, &result).await;
        match result {
            Ok(summary) => RunOutcome::Completed(summary),
            Err(err) => {
                error!(chart_id, error = %err, "chart refresh failed");
                RunOutcome::Failed(err)
            }
        }
    }

    /// Annotates the schedule with the run's outcome and recomputes the next
    /// fire time from the cron expression.
    async fn record_outcome(&self, chart_id: ChartId, result: &Result<RunSummary, ExecutionError>) {
        let mut entries = self.inner.entries.lock().await;
        let Some(entry) = entries.get_mut(&chart_id) else {
            return;
        };
        entry.schedule.last_execution = Some(Utc::now());
        entry.schedule.next_execution = Schedule::from_str(&entry.schedule.cron_expr)
            .ok()
            .as_ref()
            .and_then(next_fire);
        entry.schedule.status = match result {
            Ok(_) => ScheduleStatus::Success,
            Err(_) => ScheduleStatus::Failed,
        };
    }

    fn spawn_timer(&self, chart_id: ChartId, schedule: Schedule) -> TimerHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let registry = self.clone();

        tokio::spawn(async move {
            loop {
                let Some(next) = next_fire(&schedule) else {
                    warn!(chart_id, "cron expression yields no further fire times");
                    break;
                };
                let wait = (next - Utc::now()).to_std().unwrap_or_default();
                // The run itself is outside the select: cancellation only
                // takes effect between runs.
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(wait) => {
                        registry.run_once(chart_id).await;
                    }
                }
            }
        });

        TimerHandle { cancel }
    }
}

fn parse_cron(expr: &str) -> Result<Schedule, SchedulerError> {
    Schedule::from_str(expr).map_err(|source| SchedulerError::InvalidCron {
        expr: expr.to_string(),
        source,
    })
}

fn next_fire(schedule: &Schedule) -> Option<DateTime<Utc>> {
    schedule.upcoming(Utc).next()
}
