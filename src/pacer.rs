use std::{thread::sleep, time::{Duration, Instant}};

pub trait Pace {
    /// Waits out the rest of the current tick so ticks run `rate` times per second.
    fn pace(&mut self, rate: u32);
}

#[derive(Default)]
pub struct FramePacer {
    last_tick: Option<Instant>,
}

impl FramePacer {
    pub fn new() -> Self {
        FramePacer { last_tick: None }
    }

    fn remaining(&self, rate: u32, now: Instant) -> Duration {
        let period = Duration::from_secs(1) / rate.max(1);
        match self.last_tick {
            Some(last) => period.checked_sub(now.duration_since(last)).unwrap_or_default(),
            None => Duration::from_secs(0),
        }
    }
}

impl Pace for FramePacer {
    fn pace(&mut self, rate: u32) {
        let wait = self.remaining(rate, Instant::now());
        if wait > Duration::from_secs(0) {
            sleep(wait);
        }
        self.last_tick = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_does_not_wait() {
        let p = FramePacer::new();
        assert_eq!(p.remaining(10, Instant::now()), Duration::from_secs(0));
    }

    #[test]
    fn waits_for_the_rest_of_the_period() {
        let start = Instant::now();
        let p = FramePacer { last_tick: Some(start) };
        assert_eq!(p.remaining(10, start + Duration::from_millis(30)), Duration::from_millis(70));
        assert_eq!(p.remaining(10, start + Duration::from_millis(150)), Duration::from_secs(0));
    }

    #[test]
    fn faster_rate_shortens_the_period() {
        let start = Instant::now();
        let p = FramePacer { last_tick: Some(start) };
        assert_eq!(p.remaining(20, start), Duration::from_millis(50));
    }

    #[test]
    fn pace_sleeps_between_ticks() {
        let mut p = FramePacer::new();
        p.pace(50);
        let before = Instant::now();
        p.pace(50);
        assert!(before.elapsed() >= Duration::from_millis(15));
    }
}
