use crate::utils::MergeWith;
use crate::Number;

/// Constants of the fling and overscroll integration.
///
/// Velocities are in page units per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Velocity multiplier applied every frame while coasting inside the page.
    pub friction: f64,
    /// Release speed below which a pan ends without a fling.
    pub stop_velocity: f64,
    /// Fraction of the viewport length past which overscroll stops yielding.
    pub snap_limit: f64,
    /// Per-frame velocity decrement while coasting in overscroll.
    pub overscroll_decel: f64,
    /// Speed below which a friction fling comes to rest.
    pub fling_stop_velocity: f64,
    /// Speed below which an overscrolled fling is ready to snap back.
    pub snap_ready_velocity: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            friction: 0.97,
            stop_velocity: 4.,
            snap_limit: 0.75,
            overscroll_decel: 0.04,
            fling_stop_velocity: 0.1,
            snap_ready_velocity: 0.3,
        }
    }
}

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsPart {
    #[knuffel(child, unwrap(argument))]
    pub friction: Option<Number<0, 1, true>>,
    #[knuffel(child, unwrap(argument))]
    pub stop_velocity: Option<Number<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub snap_limit: Option<Number<0, 1, true>>,
    #[knuffel(child, unwrap(argument))]
    pub overscroll_decel: Option<Number<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub fling_stop_velocity: Option<Number<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub snap_ready_velocity: Option<Number<0, 65535>>,
}

impl MergeWith<PhysicsPart> for Physics {
    fn merge_with(&mut self, part: &PhysicsPart) {
        merge!(
            (self, part),
            friction,
            stop_velocity,
            snap_limit,
            overscroll_decel,
            fling_stop_velocity,
            snap_ready_velocity,
        );
    }
}
