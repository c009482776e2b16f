use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Shareable frame clock driven by the host, with an adjustable rate.
///
/// The clock never reads system time by itself. The host stores the timestamp of every event
/// or frame tick with [`Clock::set_unadjusted`], and everything sharing the clock observes the
/// same, possibly rate-scaled, time.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    inner: Rc<RefCell<ScaledTime>>,
}

/// Host time and the rate-scaled time derived from it.
#[derive(Debug)]
struct ScaledTime {
    host: Duration,
    /// Host time at the last read of `scaled`.
    last_read: Duration,
    scaled: Duration,
    rate: f64,
    complete_instantly: bool,
}

impl Clock {
    /// Creates a new clock with the given time.
    pub fn with_time(time: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScaledTime::new(time))),
        }
    }

    /// Returns the current time, adjusted for rate changes.
    pub fn now(&self) -> Duration {
        self.inner.borrow_mut().read()
    }

    /// Returns the host time not adjusted for rate change.
    pub fn now_unadjusted(&self) -> Duration {
        self.inner.borrow().host
    }

    /// Sets the host time.
    pub fn set_unadjusted(&mut self, time: Duration) {
        self.inner.borrow_mut().host = time;
    }

    pub fn rate(&self) -> f64 {
        self.inner.borrow().rate
    }

    /// Sets how fast animation time runs relative to host time.
    pub fn set_rate(&mut self, rate: f64) {
        self.inner.borrow_mut().rate = rate.clamp(0., 1000.);
    }

    /// Returns whether animations should jump straight to their end.
    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&mut self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

impl ScaledTime {
    fn new(time: Duration) -> Self {
        Self {
            host: time,
            last_read: time,
            scaled: time,
            rate: 1.,
            complete_instantly: false,
        }
    }

    /// Catches the scaled time up with host time elapsed since the last read.
    fn read(&mut self) -> Duration {
        match self.host.checked_sub(self.last_read) {
            Some(elapsed) => {
                self.scaled = self.scaled.saturating_add(elapsed.mul_f64(self.rate));
            }
            // Host timestamps went backwards.
            None => {
                let rewind = self.last_read - self.host;
                self.scaled = self.scaled.saturating_sub(rewind.mul_f64(self.rate));
            }
        }

        self.last_read = self.host;
        self.scaled
    }
}

impl Default for ScaledTime {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
