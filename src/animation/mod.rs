use std::time::Duration;

mod clock;
pub use clock::Clock;

/// Ease-out snap animation between two positions.
///
/// The curve is sampled once into a table with one entry per millisecond, so playback is a
/// plain lookup by elapsed time.
#[derive(Debug, Clone)]
pub struct EaseOut {
    from: f64,
    to: f64,
    frames: Box<[f64]>,
    start_time: Duration,
    finished: bool,
    clock: Clock,
}

impl EaseOut {
    pub fn new(clock: Clock, from: f64, to: f64, config: kinetic_config::Snap) -> Self {
        let _span = tracy_client::span!("EaseOut::new");

        let frames = plot(
            from,
            to,
            usize::from(config.duration_ms),
            usize::from(config.subdivisions),
        );

        Self {
            from,
            to,
            frames,
            start_time: clock.now(),
            finished: false,
            clock,
        }
    }

    /// Returns the position at `at` and whether the animation is over by then.
    pub fn value_at(&self, at: Duration) -> (f64, bool) {
        if self.clock.should_complete_instantly() {
            return (self.to, true);
        }

        // Times before the start count as the first frame.
        let frame = at.saturating_sub(self.start_time).as_millis();
        match usize::try_from(frame)
            .ok()
            .and_then(|idx| self.frames.get(idx))
        {
            Some(&value) => (value, false),
            None => (self.to, true),
        }
    }

    /// Moves the animation to the current clock time.
    pub fn advance(&mut self) -> (f64, bool) {
        let (value, finished) = self.value_at(self.clock.now());
        self.finished = finished;
        (value, finished)
    }

    pub fn is_done(&self) -> bool {
        self.finished
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.frames.len() as u64)
    }

    pub fn end_time(&self) -> Duration {
        self.start_time + self.duration()
    }

    pub fn frames(&self) -> &[f64] {
        &self.frames
    }
}

/// Samples the ease-out curve into `len` frames.
///
/// Time follows a smoothstep `3t² - 2t³` and the position factor follows `1.74t² - 0.74t³`.
/// Every sample holds its value over all frames up to the one it maps to.
fn plot(from: f64, to: f64, len: usize, subdivisions: usize) -> Box<[f64]> {
    let _span = tracy_client::span!("plot");

    let mut frames = vec![from; len].into_boxed_slice();
    let mut next_x = 0;

    for i in 0..subdivisions {
        let t = i as f64 / subdivisions as f64;
        let x = ((3. * t * t - 2. * t * t * t) * len as f64) as usize;
        if x < next_x {
            continue;
        }

        let prev_x = next_x;
        next_x = x.min(len);

        let y = 1.74 * t * t - 0.74 * t * t * t;
        frames[prev_x..next_x].fill(from + (to - from) * y);

        if next_x >= len {
            break;
        }
    }

    // Pad out any remaining frames.
    let last = if next_x == 0 {
        from
    } else {
        frames[next_x - 1]
    };
    frames[next_x..].fill(last);

    frames
}
