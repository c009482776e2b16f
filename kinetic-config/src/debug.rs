use crate::utils::{Flag, MergeWith};
use crate::Number;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debug {
    /// Slows down snap animations by this factor.
    pub animation_slowdown: f64,
    /// Never snap back from overscroll; flings coast under friction only.
    pub disable_snap: bool,
}

impl Default for Debug {
    fn default() -> Self {
        Self {
            animation_slowdown: 1.,
            disable_snap: false,
        }
    }
}

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct DebugPart {
    #[knuffel(child, unwrap(argument))]
    pub animation_slowdown: Option<Number<0, { i32::MAX }, true>>,
    #[knuffel(child)]
    pub disable_snap: Option<Flag>,
}

impl MergeWith<DebugPart> for Debug {
    fn merge_with(&mut self, part: &DebugPart) {
        merge!((self, part), animation_slowdown, disable_snap);
    }
}
