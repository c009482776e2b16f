use std::time::Duration;

use crate::utils::MergeWith;
use crate::Number;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gestures {
    /// Distance in screen pixels a finger must travel before a touch becomes a pan.
    pub pan_threshold: f64,
    /// Rate in Hz at which the host is expected to deliver frame ticks.
    pub tick_rate: u16,
}

impl Default for Gestures {
    fn default() -> Self {
        Self {
            pan_threshold: 4.,
            tick_rate: 60,
        }
    }
}

impl Gestures {
    /// Time between two consecutive frame ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1. / f64::from(self.tick_rate.max(1)))
    }
}

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct GesturesPart {
    #[knuffel(child, unwrap(argument))]
    pub pan_threshold: Option<Number<0, 65535>>,
    #[knuffel(child, unwrap(argument))]
    pub tick_rate: Option<u16>,
}

impl MergeWith<GesturesPart> for Gestures {
    fn merge_with(&mut self, part: &GesturesPart) {
        merge!((self, part), pan_threshold, tick_rate);
    }
}
