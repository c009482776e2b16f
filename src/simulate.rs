//! Headless fling runs over a [`MemoryHost`].

use std::time::Duration;

use anyhow::{bail, ensure};
use kinetic_config::Config;
use serde::Serialize;

use crate::animation::{Clock, EaseOut};
use crate::axis::{Axis, FlingState};
use crate::geometry::{PagePoint, PageSize, PageVector, ScreenSize};
use crate::gesture::GestureController;
use crate::host::{MemoryHost, ViewportHost};

/// Frames after which a fling is considered stuck.
const MAX_FRAMES: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Simulation {
    pub page: PageSize,
    pub screen: ScreenSize,
    /// Viewport origin when the fling starts.
    pub offset: PagePoint,
    /// Release velocity, in page units per frame.
    pub velocity: PageVector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Stopped,
    Scrolling,
    WaitingToSnap,
    Snapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub time_ms: f64,
    pub offset: PagePoint,
    pub velocity: PageVector,
    pub x: Phase,
    pub y: Phase,
}

impl From<&FlingState> for Phase {
    fn from(value: &FlingState) -> Self {
        match value {
            FlingState::Stopped => Phase::Stopped,
            FlingState::Scrolling => Phase::Scrolling,
            FlingState::WaitingToSnap => Phase::WaitingToSnap,
            FlingState::Snapping(_) => Phase::Snapping,
        }
    }
}

fn phase(axis: &Axis) -> Phase {
    Phase::from(axis.fling_state())
}

/// Flings a viewport and records every frame until it comes to rest.
pub fn simulate(config: &Config, sim: &Simulation) -> anyhow::Result<Vec<Frame>> {
    let _span = tracy_client::span!("simulate");

    ensure!(
        sim.velocity.x.is_finite() && sim.velocity.y.is_finite(),
        "velocity must be finite"
    );

    let mut host = MemoryHost::new(sim.page, sim.screen);
    host.scroll_to(sim.offset);

    let mut ctl = GestureController::new(host, Clock::with_time(Duration::ZERO), config);
    ctl.fling(sim.velocity);

    let interval = config.gestures.frame_interval();
    let mut time = Duration::ZERO;
    let mut frames = Vec::new();

    for _ in 0..MAX_FRAMES {
        time += interval;
        let more = ctl.advance_frame(time);

        frames.push(Frame {
            time_ms: time.as_secs_f64() * 1000.,
            offset: ctl.host().viewport_rect().origin,
            velocity: PageVector::new(ctl.x().velocity(), ctl.y().velocity()),
            x: phase(ctl.x()),
            y: phase(ctl.y()),
        });

        if !more {
            debug!("fling settled after {} frames", frames.len());
            return Ok(frames);
        }
    }

    bail!("fling did not settle after {MAX_FRAMES} frames");
}

/// Returns the snap animation table from `from` to `to`.
pub fn snap_curve(config: &Config, from: f64, to: f64) -> Vec<f64> {
    let anim = EaseOut::new(Clock::default(), from, to, config.snap);
    anim.frames().to_vec()
}
