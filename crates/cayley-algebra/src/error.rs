use cayley_arith::{ArithError, ErrorKind};
use cayley_params::ParamsError;
use thiserror::Error;

use crate::AlgebraTag;

/// Errors raised while building algebra types or combining their elements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgebraError {
    #[error("current algebras are different: {left} versus {right}")]
    AlgebraMismatch { left: AlgebraTag, right: AlgebraTag },
    #[error("a component is from a different algebra: {found} (expected {expected})")]
    ComponentMismatch {
        found: AlgebraTag,
        expected: AlgebraTag,
    },
    #[error("base rings are different between base and structural: {base} versus {structural}")]
    BaseRingMismatch {
        base: AlgebraTag,
        structural: AlgebraTag,
    },
    #[error("first factor is not in the second factor's base ring: {scalar} versus {ring}")]
    ScalarMismatch { scalar: AlgebraTag, ring: AlgebraTag },
    #[error("cannot upcast an element of {from} into {into}")]
    Upcast { from: AlgebraTag, into: AlgebraTag },
    #[error("cannot downcast an element of {from} into {into}")]
    Downcast { from: AlgebraTag, into: AlgebraTag },
    #[error("modulus must be > 1 but is {0}")]
    InvalidModulus(i64),
    #[error("expected {expected} coordinates, got {got}")]
    Dimension { expected: usize, got: usize },
    #[error("{0} is not invertible")]
    NotInvertible(String),
    #[error(transparent)]
    Arith(#[from] ArithError),
    #[error(transparent)]
    Params(#[from] ParamsError),
}

impl AlgebraError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AlgebraError::AlgebraMismatch { .. }
            | AlgebraError::ComponentMismatch { .. }
            | AlgebraError::BaseRingMismatch { .. }
            | AlgebraError::ScalarMismatch { .. }
            | AlgebraError::Upcast { .. }
            | AlgebraError::Downcast { .. } => ErrorKind::Type,
            AlgebraError::InvalidModulus(_)
            | AlgebraError::Dimension { .. }
            | AlgebraError::Params(_) => ErrorKind::Value,
            AlgebraError::NotInvertible(_) => ErrorKind::ZeroDivision,
            AlgebraError::Arith(e) => e.kind(),
        }
    }
}
