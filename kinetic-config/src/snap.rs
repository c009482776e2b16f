use std::time::Duration;

use crate::utils::MergeWith;

/// Snap-back animation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    /// Snap back instantly instead of animating.
    pub off: bool,
    /// Length of the precomputed curve, one entry per millisecond.
    pub duration_ms: u16,
    /// Number of curve samples used to fill the table.
    pub subdivisions: u16,
}

impl Default for Snap {
    fn default() -> Self {
        Self {
            off: false,
            duration_ms: 150,
            subdivisions: 1000,
        }
    }
}

impl Snap {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }
}

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct SnapPart {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child)]
    pub on: bool,
    #[knuffel(child, unwrap(argument))]
    pub duration_ms: Option<u16>,
    #[knuffel(child, unwrap(argument))]
    pub subdivisions: Option<u16>,
}

impl MergeWith<SnapPart> for Snap {
    fn merge_with(&mut self, part: &SnapPart) {
        self.off |= part.off;
        if part.on {
            self.off = false;
        }

        merge!((self, part), duration_ms, subdivisions);
    }
}
