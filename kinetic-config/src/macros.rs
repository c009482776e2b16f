/// Layers every `Some` field of a `*Part` onto the same field of a resolved section.
macro_rules! merge {
    (($self:expr, $part:expr), $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$part.$field {
                $self.$field.merge_with(value);
            }
        )+
    };
}
