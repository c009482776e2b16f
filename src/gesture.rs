//! Touch gesture handling: pans, flings and pinches over a [`ViewportHost`].

use std::rc::Rc;
use std::time::Duration;

use arrayvec::ArrayVec;
use kinetic_config::Config;

use crate::animation::Clock;
use crate::axis::{Axis, Overscroll};
use crate::geometry::{
    sanitize_zoom, screen_to_page, zoom_scale, PagePoint, PageRect, PageVector, ScreenPoint,
};
use crate::host::ViewportHost;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    /// No fingers down and nothing moving.
    Idle,
    /// A finger is down but has not moved past the pan threshold.
    Touching,
    /// A finger is dragging the page.
    Panning,
    /// A pinch just ended and the remaining finger holds the page.
    PanningHold,
    /// Two or more fingers are zooming the page.
    Pinching,
    /// Released with momentum; the host is delivering frame ticks.
    Flinging,
}

/// Input classified down to what decides a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    TouchDown,
    /// The finger moved; `past_threshold` is whether it left the pan threshold around the
    /// touch origin.
    TouchMove { past_threshold: bool },
    /// A finger lifted; `remaining` fingers are still down.
    TouchUp { remaining: usize },
    TouchCancel,
    ScaleBegin,
    ScaleUpdate,
    ScaleEnd,
}

/// Side effect of a state transition, applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Stop ticking and bring both axes to rest.
    CancelFling,
    /// Make the event position the new touch origin.
    RecordTouch,
    /// Move the viewport with the finger.
    Track,
    /// Release both axes into a fling and start ticking.
    BeginFling,
    /// Remember the pinch focus and span in page coordinates.
    BeginPinch,
    /// Apply the current pinch to the visible rectangle.
    UpdatePinch,
    /// Forget the pinch and drop any velocity.
    EndPinch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: InteractionState,
    pub effects: ArrayVec<Effect, 3>,
}

impl Transition {
    fn to(state: InteractionState) -> Self {
        Self {
            state,
            effects: ArrayVec::new(),
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Computes what `event` does in `state`.
///
/// Returns `None` when the event makes no sense in this state, such as a move with no finger
/// down. Such events must be dropped without changing anything.
pub fn transition(state: InteractionState, event: GestureEvent) -> Option<Transition> {
    use Effect::*;
    use GestureEvent::*;
    use InteractionState::*;

    let rv = match (state, event) {
        (Idle, TouchDown) => Transition::to(Touching).with(RecordTouch),
        (Flinging, TouchDown) => Transition::to(Touching)
            .with(CancelFling)
            .with(RecordTouch),
        // Another finger came down; the scale detector will follow up.
        (Touching | Panning | PanningHold | Pinching, TouchDown) => Transition::to(Pinching),

        (Touching, TouchMove { past_threshold: false }) => Transition::to(Touching),
        (Touching, TouchMove { past_threshold: true }) => Transition::to(Panning).with(Track),
        (Panning | PanningHold, TouchMove { .. }) => Transition::to(Panning).with(Track),
        // The scale detector owns movement while pinching.
        (Pinching, TouchMove { .. }) => Transition::to(Pinching),
        (Idle | Flinging, TouchMove { .. }) => return None,

        (Touching, TouchUp { .. }) => Transition::to(Idle),
        (Panning | PanningHold, TouchUp { .. }) => Transition::to(Flinging).with(BeginFling),
        (Pinching, TouchUp { remaining: 0 }) => Transition::to(Idle).with(EndPinch),
        (Pinching, TouchUp { remaining: 1 }) => {
            Transition::to(Touching).with(EndPinch).with(RecordTouch)
        }
        (Pinching, TouchUp { .. }) => Transition::to(Pinching),
        (Idle | Flinging, TouchUp { .. }) => return None,

        (_, TouchCancel) => Transition::to(Idle).with(CancelFling).with(EndPinch),

        (Flinging, ScaleBegin) => Transition::to(Pinching)
            .with(CancelFling)
            .with(BeginPinch),
        (_, ScaleBegin) => Transition::to(Pinching).with(BeginPinch),

        (Pinching, ScaleUpdate) => Transition::to(Pinching).with(UpdatePinch),
        (_, ScaleUpdate) => return None,

        (Pinching, ScaleEnd) => Transition::to(PanningHold)
            .with(EndPinch)
            .with(RecordTouch),
        (_, ScaleEnd) => return None,
    };

    Some(rv)
}

/// Pinch start, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchStart {
    focus: PagePoint,
    span: f64,
}

/// Position data that comes with an event.
#[derive(Debug, Clone, Copy)]
struct Input {
    pos: ScreenPoint,
    span: f64,
}

impl Input {
    fn at(pos: ScreenPoint) -> Self {
        Self { pos, span: 0. }
    }
}

/// Turns touch input and frame ticks into scroll offsets and visible rectangles for a host.
#[derive(Debug)]
pub struct GestureController<H> {
    host: H,
    state: InteractionState,
    x: Axis,
    y: Axis,
    /// Where the current touch started, in screen pixels.
    touch_origin: ScreenPoint,
    pinch: Option<PinchStart>,
    last_event_time: Duration,
    clock: Clock,
    config: Rc<Config>,
}

impl<H: ViewportHost> GestureController<H> {
    pub fn new(host: H, mut clock: Clock, config: &Config) -> Self {
        let config = Rc::new(*config);
        apply_clock_config(&mut clock, &config);

        let x = Axis::new(clock.clone(), config.clone());
        let y = Axis::new(clock.clone(), config.clone());

        let mut rv = Self {
            host,
            state: InteractionState::Idle,
            x,
            y,
            touch_origin: ScreenPoint::origin(),
            pinch: None,
            last_event_time: clock.now_unadjusted(),
            clock,
            config,
        };
        rv.refresh_geometry();
        rv
    }

    pub fn update_config(&mut self, config: &Config) {
        let config = Rc::new(*config);
        apply_clock_config(&mut self.clock, &config);
        self.x.update_config(config.clone());
        self.y.update_config(config.clone());
        self.config = config;
    }

    /// Lets flings coast past the page edges without snapping back.
    pub fn set_snap_disabled(&mut self, disabled: bool) {
        if self.config.debug.disable_snap == disabled {
            return;
        }

        let mut config = *self.config;
        config.debug.disable_snap = disabled;
        self.update_config(&config);
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn x(&self) -> &Axis {
        &self.x
    }

    pub fn y(&self) -> &Axis {
        &self.y
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Time of the last input event.
    pub fn last_event_time(&self) -> Duration {
        self.last_event_time
    }

    pub fn is_flinging(&self) -> bool {
        self.state == InteractionState::Flinging
    }

    /// Allows or forbids scrolling along each axis.
    pub fn set_scrollable(&mut self, horizontal: bool, vertical: bool) {
        self.x.set_scrollable(horizontal);
        self.y.set_scrollable(vertical);
    }

    pub fn touch_down(&mut self, pos: ScreenPoint, time: Duration) {
        self.set_event_time(time);
        self.handle(GestureEvent::TouchDown, Input::at(pos));
    }

    pub fn touch_move(&mut self, pos: ScreenPoint, time: Duration) {
        self.set_event_time(time);
        let distance = (pos - self.touch_origin).length();
        let past_threshold = distance >= self.config.gestures.pan_threshold;
        self.handle(GestureEvent::TouchMove { past_threshold }, Input::at(pos));
    }

    /// A finger lifted, leaving the `remaining` fingers down.
    pub fn touch_up(&mut self, remaining: &[ScreenPoint], time: Duration) {
        self.set_event_time(time);

        // After a pinch, the first remaining finger keeps the page.
        let pos = remaining.first().copied().unwrap_or(self.touch_origin);
        let event = GestureEvent::TouchUp {
            remaining: remaining.len(),
        };
        self.handle(event, Input::at(pos));
    }

    pub fn touch_cancel(&mut self, time: Duration) {
        self.set_event_time(time);
        self.handle(GestureEvent::TouchCancel, Input::at(self.touch_origin));
    }

    /// A pinch started with the fingers centered on `focus` and `span` pixels apart.
    pub fn scale_begin(&mut self, focus: ScreenPoint, span: f64, time: Duration) {
        self.set_event_time(time);
        self.handle(GestureEvent::ScaleBegin, Input { pos: focus, span });
    }

    pub fn scale_update(&mut self, focus: ScreenPoint, span: f64, time: Duration) {
        self.set_event_time(time);
        self.handle(GestureEvent::ScaleUpdate, Input { pos: focus, span });
    }

    pub fn scale_end(&mut self, focus: ScreenPoint, time: Duration) {
        self.set_event_time(time);
        self.handle(GestureEvent::ScaleEnd, Input::at(focus));
    }

    /// Flings the viewport with `velocity` in page units per frame, as if released from a pan.
    pub fn fling(&mut self, velocity: PageVector) {
        match self.state {
            InteractionState::Idle | InteractionState::Flinging => (),
            state => {
                warn!("ignoring fling while {state:?}");
                return;
            }
        }

        self.refresh_geometry();
        self.x.set_velocity(velocity.x);
        self.y.set_velocity(velocity.y);
        self.set_state(InteractionState::Flinging);
        self.begin_fling();
    }

    /// Runs one frame of the fling at `now`.
    ///
    /// Returns whether more frames are needed.
    pub fn advance_frame(&mut self, now: Duration) -> bool {
        let _span = tracy_client::span!("GestureController::advance_frame");

        self.clock.set_unadjusted(now);

        if self.state != InteractionState::Flinging {
            trace!("ignoring frame tick while {:?}", self.state);
            return false;
        }

        self.refresh_geometry();

        self.x.advance();
        self.y.advance();

        self.x.reconcile_overscroll();
        self.y.reconcile_overscroll();
        self.start_snaps();

        if self.x.is_scrolling() {
            self.x.displace();
        }
        if self.y.is_scrolling() {
            self.y.displace();
        }

        self.report_offset();

        if self.x.is_stopped() && self.y.is_stopped() {
            debug!("fling finished");
            self.set_state(InteractionState::Idle);
            self.host.stop_ticks();
            return false;
        }

        true
    }

    /// Starts snapping axes that are waiting for it.
    ///
    /// When both axes are overscrolled they snap together, so that the viewport moves back
    /// diagonally rather than one side at a time.
    fn start_snaps(&mut self) {
        let waiting_x = self.x.is_waiting_to_snap();
        let waiting_y = self.y.is_waiting_to_snap();

        if snaps_jointly(&self.x) && snaps_jointly(&self.y) {
            if waiting_x && waiting_y {
                self.x.start_snap();
                self.y.start_snap();
            }
            return;
        }

        if waiting_x {
            self.x.start_snap();
        }
        if waiting_y {
            self.y.start_snap();
        }
    }

    fn set_event_time(&mut self, time: Duration) {
        self.last_event_time = time;
        self.clock.set_unadjusted(time);
    }

    fn set_state(&mut self, state: InteractionState) {
        if self.state != state {
            debug!("{:?} -> {state:?}", self.state);
            self.state = state;
        }
    }

    fn handle(&mut self, event: GestureEvent, input: Input) {
        let _span = tracy_client::span!("GestureController::handle");

        let Some(transition) = transition(self.state, event) else {
            warn!("ignoring {event:?} while {:?}", self.state);
            return;
        };

        trace!("{event:?} at {:?}", input.pos);
        self.set_state(transition.state);

        for effect in transition.effects {
            self.apply(effect, input);
        }
    }

    fn apply(&mut self, effect: Effect, input: Input) {
        match effect {
            Effect::CancelFling => {
                self.host.stop_ticks();
                self.x.stop();
                self.y.stop();
            }
            Effect::RecordTouch => {
                self.refresh_geometry();
                self.x.record_touch(input.pos.x);
                self.y.record_touch(input.pos.y);
                self.touch_origin = input.pos;
            }
            Effect::Track => {
                self.refresh_geometry();
                let zoom = self.host.zoom_factor();
                self.x.track(input.pos.x, zoom);
                self.y.track(input.pos.y, zoom);
                self.report_offset();
            }
            Effect::BeginFling => {
                self.refresh_geometry();
                self.begin_fling();
            }
            Effect::BeginPinch => {
                let zoom = sanitize_zoom(self.host.zoom_factor());
                let origin = self.host.viewport_rect().origin;
                self.pinch = Some(PinchStart {
                    focus: screen_to_page(input.pos, origin, zoom),
                    span: input.span / zoom,
                });
            }
            Effect::UpdatePinch => self.update_pinch(input),
            Effect::EndPinch => {
                self.pinch = None;
                self.x.stop();
                self.y.stop();
            }
        }
    }

    fn begin_fling(&mut self) {
        let speed = self.x.velocity().hypot(self.y.velocity());
        let stopped = speed < self.config.physics.stop_velocity;
        debug!("beginning fling at {speed} per frame, stopped: {stopped}");

        self.x.begin_fling(stopped);
        self.y.begin_fling(stopped);
        self.host.start_ticks();
    }

    fn update_pinch(&mut self, input: Input) {
        let Some(start) = self.pinch else {
            return;
        };

        if !(input.span > 0. && start.span > 0.) {
            trace!("ignoring pinch with zero span");
            return;
        }

        let zoom = zoom_scale(input.span / start.span);
        let screen = self.host.screen_size();
        let rect = PageRect::new(start.focus - (input.pos / zoom).to_vector(), screen / zoom);

        self.host.set_visible_rect(rect);
        self.host.on_geometry_changed();
    }

    fn refresh_geometry(&mut self) {
        let page = self.host.page_size();
        let viewport = self.host.viewport_rect();

        self.x.set_geometry(page.width, viewport.size.width);
        self.x.set_viewport_offset(viewport.origin.x);
        self.y.set_geometry(page.height, viewport.size.height);
        self.y.set_viewport_offset(viewport.origin.y);
    }

    fn report_offset(&mut self) {
        let offset = PagePoint::new(self.x.viewport_offset(), self.y.viewport_offset());
        self.host.set_scroll_offset(offset);
        self.host.on_geometry_changed();
    }

    #[cfg(test)]
    pub fn verify_invariants(&self) {
        for axis in [&self.x, &self.y] {
            assert!(axis.viewport_offset().is_finite());
            assert!(axis.velocity().is_finite());

            if axis.is_waiting_to_snap() {
                assert_eq!(axis.velocity(), 0.);
            }

            if !axis.is_stopped() {
                assert_eq!(self.state, InteractionState::Flinging);
            }
        }

        if self.pinch.is_some() {
            assert_eq!(self.state, InteractionState::Pinching);
        }
    }
}

fn apply_clock_config(clock: &mut Clock, config: &Config) {
    clock.set_rate(1. / config.debug.animation_slowdown.max(0.001));
    clock.set_complete_instantly(config.snap.off);
}

fn snaps_jointly(axis: &Axis) -> bool {
    matches!(axis.overscroll(), Overscroll::Minus | Overscroll::Plus) && axis.is_overscrolled()
}
