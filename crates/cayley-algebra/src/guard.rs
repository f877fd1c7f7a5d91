//! Compatibility guard for binary operations.

use crate::algebra::Element;
use crate::AlgebraError;

/// Runs `op` on `(x, y)` only if both operands belong to the same algebra.
///
/// This is the single place where the "same algebra required" contract of
/// `add`, `sub`, `mul` and `div` is enforced, for every algebra level.
#[inline]
pub fn compatible<E, T>(x: &E, y: &E, op: impl FnOnce(&E, &E) -> T) -> Result<T, AlgebraError>
where
    E: Element,
{
    if x.tag() != y.tag() {
        return Err(AlgebraError::AlgebraMismatch {
            left: x.tag().clone(),
            right: y.tag().clone(),
        });
    }
    Ok(op(x, y))
}
