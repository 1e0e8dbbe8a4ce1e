/*
 * Tick Clock Module
 *
 * Decides how many simulation ticks to run for each displayed frame.
 * By default the field ticks exactly once per frame, following the display
 * refresh. With a fixed rate the elapsed frame time is accumulated and
 * drained in whole steps, with a cap so a stalled window does not replay
 * seconds of motion at once.
 */

use std::time::Duration;

/// Upper bound on ticks run for a single frame in fixed-rate mode
pub const MAX_CATCH_UP: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickRate {
    Refresh,
    Fixed(f32),
}

impl TickRate {
    pub fn from_hz(hz: Option<f32>) -> Self {
        match hz {
            Some(hz) if hz.is_finite() && hz > 0.0 => Self::Fixed(hz),
            _ => Self::Refresh,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TickClock {
    rate: TickRate,
    accumulator: Duration,
    step: Duration,
}

impl TickClock {
    pub fn new(rate: TickRate) -> Self {
        let (rate, step) = match rate {
            TickRate::Refresh => (rate, Duration::ZERO),
            TickRate::Fixed(hz) => match Duration::try_from_secs_f32(1.0 / hz) {
                Ok(step) if !step.is_zero() => (rate, step),
                _ => {
                    log::warn!("unusable tick rate {hz} Hz, ticking once per frame instead");
                    (TickRate::Refresh, Duration::ZERO)
                }
            },
        };

        Self {
            rate,
            accumulator: Duration::ZERO,
            step,
        }
    }

    /// Number of ticks due after `since_last` of wall time
    pub fn ticks_due(&mut self, since_last: Duration) -> u32 {
        if self.rate == TickRate::Refresh {
            return 1;
        }

        self.accumulator += since_last;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_CATCH_UP {
            self.accumulator -= self.step;
            ticks += 1;
        }

        // Drop whatever could not be caught up
        if self.accumulator >= self.step {
            log::trace!("dropping {:?} of backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
