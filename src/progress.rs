//! Simulated long-running task with progress reporting.
//!
//! The task is a fixed number of steps. Each step reports a
//! [`ProgressUpdate`] and then pauses. There is no cancellation and no error
//! path: the loop runs to completion or the page goes away.

use log::info;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// One step of a running task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// 1-based step number.
    pub iteration: u32,
    pub steps: u32,
}

impl ProgressUpdate {
    /// Completed fraction in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.steps == 0 {
            1.0
        } else {
            f64::from(self.iteration) / f64::from(self.steps)
        }
    }

    /// Completed percentage, rounded to the nearest whole number.
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0).round() as u32
    }

    pub fn label(&self) -> String {
        format!("Iteration {}", self.iteration)
    }

    pub fn is_last(&self) -> bool {
        self.iteration == self.steps
    }
}

/// Status line shown next to the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    NotStarted,
    Running,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NotStarted => write!(f, "Not started"),
            TaskStatus::Running => write!(f, "Starting a long computation..."),
            TaskStatus::Done => write!(f, "...and now we're done!"),
        }
    }
}

/// Run `steps` iterations, calling `on_step` with 1..=steps and sleeping
/// `interval` after each one. Blocks the calling thread.
///
/// Returns the number of steps reported.
pub fn run_with_progress(
    steps: u32,
    interval: Duration,
    mut on_step: impl FnMut(ProgressUpdate),
) -> u32 {
    info!("Starting task with {} steps", steps);
    for iteration in 1..=steps {
        on_step(ProgressUpdate { iteration, steps });
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
    info!("Task finished after {} steps", steps);
    steps
}

/// Same contract as [`run_with_progress`], but pauses by awaiting `sleep()`
/// so a browser event loop keeps running between steps.
pub async fn run_with_progress_async<S, Fut>(
    steps: u32,
    mut on_step: impl FnMut(ProgressUpdate),
    mut sleep: S,
) -> u32
where
    S: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    info!("Starting task with {} steps", steps);
    for iteration in 1..=steps {
        on_step(ProgressUpdate { iteration, steps });
        sleep().await;
    }
    info!("Task finished after {} steps", steps);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    #[case(100)]
    fn calls_back_once_per_step_in_order(#[case] steps: u32) {
        let mut seen = Vec::new();
        let reported = run_with_progress(steps, Duration::ZERO, |u| seen.push(u.iteration));
        assert_eq!(reported, steps);
        assert_eq!(seen, (1..=steps).collect::<Vec<_>>());
    }

    #[test]
    fn async_variant_sleeps_after_every_step() {
        let mut seen = Vec::new();
        let mut sleeps = 0;
        let reported = block_on(run_with_progress_async(
            5,
            |u| seen.push(u),
            || {
                sleeps += 1;
                futures::future::ready(())
            },
        ));
        assert_eq!(reported, 5);
        assert_eq!(sleeps, 5);
        assert_eq!(seen.iter().map(|u| u.iteration).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(seen.last().is_some_and(ProgressUpdate::is_last));
    }

    #[test]
    fn ratio_and_label() {
        let update = ProgressUpdate { iteration: 25, steps: 100 };
        assert_eq!(update.ratio(), 0.25);
        assert_eq!(update.percent(), 25);
        assert_eq!(update.label(), "Iteration 25");
        assert!(!update.is_last());

        let last = ProgressUpdate { iteration: 3, steps: 3 };
        assert_eq!(last.percent(), 100);
        assert!(last.is_last());
    }

    #[test]
    fn status_lines() {
        assert_eq!(TaskStatus::default().to_string(), "Not started");
        assert_eq!(TaskStatus::Running.to_string(), "Starting a long computation...");
        assert_eq!(TaskStatus::Done.to_string(), "...and now we're done!");
    }
}
