use knuffel::ast::Literal;
use knuffel::errors::DecodeError;

mod merge_with;
pub use merge_with::*;

/// A number written either as an integer or as a decimal, checked against `MIN` and `MAX`.
///
/// With `EXCLUSIVE`, the bounds themselves are rejected too.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Number<const MIN: i32, const MAX: i32, const EXCLUSIVE: bool = false>(pub f64);

/// Flag, with an optional explicit value.
///
/// Intended to be used as an `Option<Flag>` field, as a tri-state:
/// - (missing): unset, `None`
/// - just `field`: set, `Some(true)`
/// - explicitly `field true` or `field false`: set, `Some(true)` or `Some(false)`
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag(#[knuffel(argument, default = true)] pub bool);

impl<const MIN: i32, const MAX: i32, const EXCLUSIVE: bool> Number<MIN, MAX, EXCLUSIVE> {
    fn accepts(value: f64) -> bool {
        let (min, max) = (f64::from(MIN), f64::from(MAX));
        if EXCLUSIVE {
            min < value && value < max
        } else {
            (min..=max).contains(&value)
        }
    }

    fn range_error() -> String {
        if EXCLUSIVE {
            format!("value must be greater than {MIN} and less than {MAX}")
        } else {
            format!("value must be between {MIN} and {MAX}")
        }
    }
}

impl<const MIN: i32, const MAX: i32, const EXCLUSIVE: bool> MergeWith<Number<MIN, MAX, EXCLUSIVE>>
    for f64
{
    fn merge_with(&mut self, part: &Number<MIN, MAX, EXCLUSIVE>) {
        *self = part.0;
    }
}

impl MergeWith<Flag> for bool {
    fn merge_with(&mut self, part: &Flag) {
        *self = part.0;
    }
}

impl<S, const MIN: i32, const MAX: i32, const EXCLUSIVE: bool> knuffel::DecodeScalar<S>
    for Number<MIN, MAX, EXCLUSIVE>
where
    S: knuffel::traits::ErrorSpan,
{
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let parsed = match &**val {
            Literal::Int(value) => i32::try_from(value)
                .map(f64::from)
                .map_err(|err| err.to_string()),
            Literal::Decimal(value) => f64::try_from(value).map_err(|err| err.to_string()),
            _ => {
                ctx.emit_error(DecodeError::unsupported(val, "expected a number"));
                return Ok(Self::default());
            }
        };

        match parsed {
            Ok(value) if Self::accepts(value) => Ok(Self(value)),
            Ok(_) => {
                ctx.emit_error(DecodeError::conversion(val, Self::range_error()));
                Ok(Self::default())
            }
            Err(err) => {
                ctx.emit_error(DecodeError::conversion(val, err));
                Ok(Self::default())
            }
        }
    }
}
