use std::time::{Duration, Instant};

/// Ticks per second when nothing else is configured.
pub const DEFAULT_TPS: u32 = 60;
/// Longest `dt` handed to the simulation, in seconds.
pub const DEFAULT_MAX_DT: f32 = 0.25;

/// Measures wall time between ticks and paces the loop toward a target rate.
///
/// `dt` is the real elapsed time, not `1 / tps`; the target rate only sets
/// how long [`SimulationClock::wait`] sleeps. The first tick has no previous
/// tick to measure from and uses one nominal period.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    tps: u32,
    max_dt: f32,
    last_tick: Option<Instant>,
    ticks: u64,
    fps: f32,
}

impl SimulationClock {
    pub fn new(tps: u32) -> Self {
        let tps = tps.max(1);
        Self {
            tps,
            max_dt: DEFAULT_MAX_DT,
            last_tick: None,
            ticks: 0,
            fps: tps as f32,
        }
    }

    /// Cap each `dt` at `max_dt` seconds so a stalled frame cannot teleport cars.
    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt.max(0.0);
        self
    }

    pub fn tps(&self) -> u32 {
        self.tps
    }

    /// Target duration of one tick.
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tps))
    }

    /// Ticks taken so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Rate implied by the last measured interval.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Mark a tick at `now` and return its `dt` in seconds.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let raw = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => self.period().as_secs_f32(),
        };
        if raw > 0.0 {
            self.fps = 1.0 / raw;
        }
        self.last_tick = Some(now);
        self.ticks += 1;
        raw.min(self.max_dt)
    }

    /// When the next tick is due, once a tick has happened.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.last_tick.map(|last| last + self.period())
    }

    /// Sleep until the next tick is due. Returns immediately when late.
    pub fn wait(&self) {
        if let Some(deadline) = self.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn first_tick_uses_nominal_period() {
        let mut clock = SimulationClock::new(60);
        let dt = clock.tick(Instant::now());
        assert!(approx(dt, 1.0 / 60.0));
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn dt_is_measured_wall_time() {
        let mut clock = SimulationClock::new(60);
        let start = Instant::now();
        clock.tick(start);
        assert!(approx(clock.tick(start + Duration::from_millis(20)), 0.020));
        assert!(approx(clock.tick(start + Duration::from_millis(30)), 0.010));
        assert!(approx(clock.fps(), 100.0));
    }

    #[test]
    fn dt_is_capped() {
        let mut clock = SimulationClock::new(60).with_max_dt(0.1);
        let start = Instant::now();
        clock.tick(start);
        assert!(approx(clock.tick(start + Duration::from_secs(3)), 0.1));
    }

    #[test]
    fn time_going_backwards_gives_zero_dt() {
        let mut clock = SimulationClock::new(60);
        let start = Instant::now() + Duration::from_secs(1);
        clock.tick(start);
        assert_eq!(clock.tick(start - Duration::from_millis(5)), 0.0);
    }

    #[test]
    fn deadline_follows_last_tick() {
        let mut clock = SimulationClock::new(50);
        assert!(clock.next_deadline().is_none());
        let start = Instant::now();
        clock.tick(start);
        assert_eq!(clock.next_deadline(), Some(start + Duration::from_millis(20)));
    }

    #[test]
    fn zero_tps_is_clamped() {
        let clock = SimulationClock::new(0);
        assert_eq!(clock.tps(), 1);
        assert_eq!(clock.period(), Duration::from_secs(1));
    }

    #[test]
    fn wait_returns_when_already_late() {
        let mut clock = SimulationClock::new(1000);
        clock.tick(Instant::now() - Duration::from_secs(1));
        let before = Instant::now();
        clock.wait();
        assert!(before.elapsed() < Duration::from_millis(500));
    }
}
