use std::fmt;
use std::time::Duration;

use crossbeam_channel::select;
use log::trace;

use crate::clock::Clock;
use crate::config::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use crate::error::{Result, VisualizerError};
use crate::generation::RunToken;
use crate::render::RenderPort;

/// Animation speed in `[MIN_SPEED, MAX_SPEED]`; the pace delay is its
/// inverse, `MAX_SPEED + 1 - speed` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed(u16);

impl Speed {
    pub fn new(speed: i64) -> Self {
        Speed(speed.clamp(MIN_SPEED as i64, MAX_SPEED as i64) as u16)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn delay(self) -> Duration {
        Duration::from_millis((MAX_SPEED + 1 - self.0) as u64)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(DEFAULT_SPEED)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}ms/step)", self.0, self.delay().as_millis())
    }
}

/// Cooperative pacing for one run. `pace` is the only place a runner ever
/// suspends.
pub struct StepScheduler<C: Clock> {
    clock: C,
    delay: Duration,
    token: RunToken,
    paces: u64,
}

impl<C: Clock> StepScheduler<C> {
    pub fn new(clock: C, speed: Speed, token: RunToken) -> Self {
        StepScheduler {
            clock,
            delay: speed.delay(),
            token,
            paces: 0,
        }
    }

    pub fn detached(clock: C, speed: Speed) -> Self {
        Self::new(clock, speed, RunToken::detached())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn paces(&self) -> u64 {
        self.paces
    }

    pub fn generation(&self) -> u64 {
        self.token.generation()
    }

    /// Fails with `Cancelled` once a newer run has started or this one was
    /// cancelled.
    pub fn check(&self) -> Result<()> {
        self.token.check()
    }

    /// Flushes pending rendering, then sleeps for the configured delay.
    /// Resumes once per call; a cancelled run wakes early with `Cancelled`.
    pub fn pace<R: RenderPort>(&mut self, render: &mut R) -> Result<()> {
        self.check()?;
        render.flush()?;

        let timer = self.clock.after(self.delay);
        let woke = select! {
            recv(timer) -> _ => true,
            recv(self.token.cancelled()) -> _ => false,
        };
        if !woke {
            return Err(VisualizerError::Cancelled { generation: self.token.generation() });
        }

        self.check()?;
        self.paces += 1;
        trace!("pace {} (run {})", self.paces, self.token.generation());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::clock::{InstantClock, SystemClock};
    use crate::generation::RunController;
    use crate::render::{NullRenderer, RecordingRenderer, RenderEvent};

    #[test]
    fn speed_clamps_and_inverts() {
        assert_eq!(Speed::new(0).get(), 1);
        assert_eq!(Speed::new(5000).get(), 1000);
        assert_eq!(Speed::new(-3).delay(), Duration::from_millis(1000));
        assert_eq!(Speed::new(1000).delay(), Duration::from_millis(1));
        assert!(Speed::new(800).delay() < Speed::new(200).delay());
    }

    #[test]
    fn pace_waits_at_least_delay() {
        let mut scheduler = StepScheduler::detached(SystemClock, Speed::new(991));
        let start = Instant::now();
        scheduler.pace(&mut NullRenderer).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(10));
        assert_eq!(scheduler.paces(), 1);
    }

    #[test]
    fn pace_resumes_once_per_call() {
        let clock = InstantClock::new();
        let mut scheduler = StepScheduler::detached(clock.clone(), Speed::new(996));
        for _ in 0..7 {
            scheduler.pace(&mut NullRenderer).unwrap();
        }
        assert_eq!(scheduler.paces(), 7);
        assert_eq!(clock.timers(), 7);
        assert_eq!(clock.elapsed(), Duration::from_millis(35));
    }

    #[test]
    fn pace_flushes_first() {
        let mut rec = RecordingRenderer::new();
        let mut scheduler = StepScheduler::detached(InstantClock::new(), Speed::default());
        scheduler.pace(&mut rec).unwrap();
        assert_eq!(rec.events, vec![RenderEvent::Flush]);
    }

    #[test]
    fn cancelled_pace_wakes_early() {
        let mut controller = RunController::new();
        let token = controller.begin().unwrap();
        let mut scheduler = StepScheduler::new(SystemClock, Speed::new(1), token);
        controller.cancel();
        let start = Instant::now();
        let err = scheduler.pace(&mut NullRenderer).unwrap_err();
        assert!(err.is_cancelled());
        assert!(start.elapsed() < Duration::from_millis(1000));
        assert_eq!(scheduler.paces(), 0);
    }
}
