//! Simulated progress while a generation is in flight.
//!
//! The model gives no progress signal, so the indicator advances on a fixed
//! tick, slowing as it climbs, and never reaches 100 until the call resolves.

use std::future::Future;
use std::time::Duration;

/// Interval between progress steps.
pub const PROGRESS_TICK: Duration = Duration::from_millis(400);

/// One progress reading.
///
/// # Examples
///
/// ```
/// use reelscript_session::Progress;
///
/// let progress = Progress::start().advance();
/// assert_eq!(progress.percent(), 5);
/// assert_eq!(progress.message(), "Analyzing your request...");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Progress {
    percent: u8,
    message: &'static str,
}

impl Progress {
    /// Reading before the first tick.
    pub fn start() -> Self {
        Self {
            percent: 0,
            message: "Warming up the AI...",
        }
    }

    /// Reading once the generation resolved.
    pub fn done() -> Self {
        Self {
            percent: 100,
            message: "Done!",
        }
    }

    /// Reading after one more tick.
    pub fn advance(self) -> Self {
        let (percent, message) = match self.percent {
            p if p < 30 => (p + 5, "Analyzing your request..."),
            p if p < 70 => (p + 4, "Crafting script ideas..."),
            p if p < 95 => (p + 2, "Refining and polishing..."),
            p => ((p + 1).min(99), "Finalizing scripts..."),
        };
        Self { percent, message }
    }

    /// Percentage complete.
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Status line for the current stage.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Whether this is the final reading.
    pub fn is_done(&self) -> bool {
        self.percent == 100
    }
}

/// Drive `future` to completion, reporting progress every `period`.
///
/// Reports [`Progress::start`] first and [`Progress::done`] last.
pub async fn with_progress<F>(
    future: F,
    period: Duration,
    mut report: impl FnMut(Progress),
) -> F::Output
where
    F: Future,
{
    tokio::pin!(future);
    let mut progress = Progress::start();
    report(progress);

    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            output = &mut future => {
                report(Progress::done());
                return output;
            }
            _ = ticker.tick() => {
                progress = progress.advance();
                report(progress);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_boundaries() {
        let mut progress = Progress::start();
        let mut seen = Vec::new();
        for _ in 0..40 {
            progress = progress.advance();
            seen.push((progress.percent(), progress.message()));
        }

        assert_eq!(seen[0], (5, "Analyzing your request..."));
        assert_eq!(seen[5], (30, "Analyzing your request..."));
        assert_eq!(seen[6], (34, "Crafting script ideas..."));
        assert_eq!(seen[15], (70, "Crafting script ideas..."));
        assert_eq!(seen[16], (72, "Refining and polishing..."));
        assert_eq!(seen[28], (96, "Refining and polishing..."));
        assert_eq!(seen[29], (97, "Finalizing scripts..."));
        assert_eq!(seen[39], (99, "Finalizing scripts..."));
    }

    #[test]
    fn test_never_reaches_done_by_ticking() {
        let mut progress = Progress::start();
        for _ in 0..1000 {
            progress = progress.advance();
            assert!(!progress.is_done());
        }
        assert_eq!(progress.percent(), 99);
    }

    #[tokio::test]
    async fn test_ready_future_reports_start_and_done() {
        let mut reports = Vec::new();
        let value = with_progress(async { 7 }, PROGRESS_TICK, |p| reports.push(p)).await;

        assert_eq!(value, 7);
        assert_eq!(reports, vec![Progress::start(), Progress::done()]);
    }

    #[tokio::test]
    async fn test_slow_future_reports_ticks() {
        let mut reports = Vec::new();
        let slow = tokio::time::sleep(Duration::from_millis(60));
        with_progress(slow, Duration::from_millis(10), |p| reports.push(p)).await;

        assert!(reports.len() > 2);
        assert_eq!(reports.last(), Some(&Progress::done()));
        assert!(reports[1..reports.len() - 1].iter().all(|p| p.percent() < 100));
    }
}
