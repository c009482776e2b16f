//! Physics of a single scroll dimension.

use std::rc::Rc;

use kinetic_config::Config;

use crate::animation::{Clock, EaseOut};
use crate::geometry::sanitize_zoom;

/// Which side of the page the viewport currently extends past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overscroll {
    None,
    /// Before the page start.
    Minus,
    /// Past the page end.
    Plus,
    /// Both ends; the viewport is longer than the page.
    Both,
}

/// Momentum phase of an axis.
#[derive(Debug)]
pub enum FlingState {
    /// Not moving on its own.
    Stopped,
    /// Coasting with the current velocity.
    Scrolling,
    /// Came to rest in overscroll, waiting for the controller to start the snap.
    WaitingToSnap,
    /// Animating back to the page boundary.
    Snapping(EaseOut),
}

#[derive(Debug)]
pub struct Axis {
    /// Last finger position along this axis, in screen pixels.
    touch_pos: f64,
    /// Displacement per frame, in page units.
    velocity: f64,
    viewport_offset: f64,
    viewport_length: f64,
    page_length: f64,
    fling: FlingState,
    scrollable: bool,
    clock: Clock,
    config: Rc<Config>,
}

impl Axis {
    pub fn new(clock: Clock, config: Rc<Config>) -> Self {
        Self {
            touch_pos: 0.,
            velocity: 0.,
            viewport_offset: 0.,
            viewport_length: 0.,
            page_length: 0.,
            fling: FlingState::Stopped,
            scrollable: true,
            clock,
            config,
        }
    }

    pub fn update_config(&mut self, config: Rc<Config>) {
        self.config = config;
    }

    pub fn set_geometry(&mut self, page_length: f64, viewport_length: f64) {
        self.page_length = page_length;
        self.viewport_length = viewport_length;
    }

    pub fn set_viewport_offset(&mut self, offset: f64) {
        self.viewport_offset = offset;
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = if self.scrollable { velocity } else { 0. };
    }

    /// Locks or unlocks the axis; a locked axis ignores finger movement.
    pub fn set_scrollable(&mut self, scrollable: bool) {
        self.scrollable = scrollable;
        if !scrollable {
            self.velocity = 0.;
        }
    }

    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    pub fn viewport_offset(&self) -> f64 {
        self.viewport_offset
    }

    pub fn viewport_length(&self) -> f64 {
        self.viewport_length
    }

    pub fn page_length(&self) -> f64 {
        self.page_length
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn touch_pos(&self) -> f64 {
        self.touch_pos
    }

    pub fn fling_state(&self) -> &FlingState {
        &self.fling
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.fling, FlingState::Stopped)
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self.fling, FlingState::Scrolling)
    }

    pub fn is_waiting_to_snap(&self) -> bool {
        matches!(self.fling, FlingState::WaitingToSnap)
    }

    pub fn is_snapping(&self) -> bool {
        matches!(self.fling, FlingState::Snapping(_))
    }

    fn viewport_end(&self) -> f64 {
        self.viewport_offset + self.viewport_length
    }

    pub fn overscroll(&self) -> Overscroll {
        // Nothing to measure against before the first layout.
        if self.viewport_length.is_nan() || self.viewport_length <= 0. {
            return Overscroll::None;
        }

        let minus = self.viewport_offset < 0.;
        let plus = self.viewport_end() > self.page_length;
        match (minus, plus) {
            (true, true) => Overscroll::Both,
            (true, false) => Overscroll::Minus,
            (false, true) => Overscroll::Plus,
            (false, false) => Overscroll::None,
        }
    }

    /// How far the viewport extends past the page boundary it overscrolls.
    ///
    /// Never more than the page has room to resist when the page is shorter than the viewport.
    pub fn excess(&self) -> f64 {
        match self.overscroll() {
            Overscroll::Minus => {
                f64::min(-self.viewport_offset, self.page_length - self.viewport_end())
            }
            Overscroll::Plus => {
                f64::min(self.viewport_offset, self.viewport_end() - self.page_length)
            }
            Overscroll::None | Overscroll::Both => 0.,
        }
    }

    /// Whether the axis is overscrolled in a way it would snap back from.
    pub fn is_overscrolled(&self) -> bool {
        !self.config.debug.disable_snap && self.excess() > 0.
    }

    pub fn record_touch(&mut self, pos: f64) {
        self.touch_pos = pos;
    }

    /// Follows the finger to `pos`, with `zoom` as the current screen pixels per page unit.
    pub fn track(&mut self, pos: f64, zoom: f64) {
        let velocity = (self.touch_pos - pos) / sanitize_zoom(zoom);
        self.touch_pos = pos;

        if !self.scrollable {
            self.velocity = 0.;
            return;
        }

        self.velocity = velocity;
        self.apply_edge_resistance();
        self.displace();
    }

    /// Slows the finger-driven velocity down past the page edge.
    ///
    /// The factor is `snap_limit - excess / viewport_length`, which turns negative once the
    /// excess exceeds `snap_limit` viewport lengths.
    pub fn apply_edge_resistance(&mut self) {
        let excess = self.excess();
        if excess > 0. {
            self.velocity *= self.config.physics.snap_limit - excess / self.viewport_length;
        }
    }

    pub fn displace(&mut self) {
        if self.scrollable {
            self.viewport_offset += self.velocity;
        }
    }

    /// Releases the axis after a pan.
    ///
    /// A fling keeps the velocity of the last tracked move.
    pub fn begin_fling(&mut self, stopped: bool) {
        if !stopped {
            self.fling = FlingState::Scrolling;
            return;
        }

        self.velocity = 0.;
        self.fling = if self.is_overscrolled() {
            FlingState::WaitingToSnap
        } else {
            FlingState::Stopped
        };
    }

    /// Cancels any fling or snap and drops the velocity.
    pub fn stop(&mut self) {
        self.velocity = 0.;
        self.fling = FlingState::Stopped;
    }

    /// Runs one frame of the fling.
    ///
    /// Only a snap moves the offset here; a scrolling axis still needs [`Axis::displace`].
    pub fn advance(&mut self) {
        match &mut self.fling {
            FlingState::Scrolling => (),
            // The controller decides when to snap, since it depends on both axes.
            FlingState::WaitingToSnap | FlingState::Stopped => return,
            FlingState::Snapping(anim) => {
                let (value, finished) = anim.advance();
                self.viewport_offset = value;
                if finished {
                    self.fling = FlingState::Stopped;
                }
                return;
            }
        }

        self.scroll();
    }

    fn scroll(&mut self) {
        let physics = self.config.physics;

        let excess = if self.is_overscrolled() {
            self.excess()
        } else {
            0.
        };

        if excess == 0. {
            self.velocity *= physics.friction;
            if self.velocity.abs() < physics.fling_stop_velocity {
                self.velocity = 0.;
                self.fling = FlingState::Stopped;
            }
            return;
        }

        let limit = self.viewport_length * physics.snap_limit;
        let elasticity = if limit > 0. { 1. - excess / limit } else { 0. };

        self.velocity = if self.overscroll() == Overscroll::Minus {
            f64::min((self.velocity + physics.overscroll_decel) * elasticity, 0.)
        } else {
            f64::max((self.velocity - physics.overscroll_decel) * elasticity, 0.)
        };

        if self.velocity.abs() < physics.snap_ready_velocity {
            self.velocity = 0.;
            self.fling = FlingState::WaitingToSnap;
        }
    }

    /// Starts animating back to the page boundary.
    ///
    /// Must only be called while overscrolled.
    pub fn start_snap(&mut self) {
        let excess = self.excess();
        let to = match self.overscroll() {
            Overscroll::Minus => self.viewport_offset + excess,
            Overscroll::Plus => self.viewport_offset - excess,
            overscroll @ (Overscroll::None | Overscroll::Both) => {
                debug_assert!(false, "start_snap() with {overscroll:?} overscroll");
                warn!("ignoring start_snap() with {overscroll:?} overscroll");
                return;
            }
        };

        trace!("snapping from {} to {to}", self.viewport_offset);

        self.velocity = 0.;
        let anim = EaseOut::new(
            self.clock.clone(),
            self.viewport_offset,
            to,
            self.config.snap,
        );
        self.fling = FlingState::Snapping(anim);
    }

    /// Brings the fling state back in line with geometry that changed under a running fling.
    pub fn reconcile_overscroll(&mut self) {
        match self.fling {
            FlingState::Stopped if self.is_overscrolled() => {
                self.fling = FlingState::WaitingToSnap;
            }
            FlingState::WaitingToSnap if !self.is_overscrolled() => {
                self.fling = FlingState::Stopped;
            }
            _ => (),
        }
    }
}
