/// A resolved config section that a decoded `*Part` can be layered onto.
///
/// Plain values merge by replacement.
pub trait MergeWith<Part> {
    fn merge_with(&mut self, part: &Part);

    /// Resolves `part` over the built-in defaults.
    fn from_part(part: &Part) -> Self
    where
        Self: Default + Sized,
    {
        let mut rv = Self::default();
        rv.merge_with(part);
        rv
    }
}

impl<T: Copy> MergeWith<T> for T {
    fn merge_with(&mut self, part: &T) {
        *self = *part;
    }
}
