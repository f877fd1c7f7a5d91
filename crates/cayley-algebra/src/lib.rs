#![forbid(unsafe_code)]

//! cayley-algebra: congruence rings Z/NZ and the Cayley–Dickson doubling
//! construction over them.
//!
//! Every level of a tower implements the same contract: [`Algebra`] for the
//! type descriptor and [`Element`] for its values. Binary operations between
//! elements of different algebras fail instead of coercing; moving an
//! element between levels is explicit through [`Algebra::upcast`] and
//! [`Algebra::downcast`].
//!
//! ```
//! use cayley_algebra::{congruence_ring, doubling, Element};
//!
//! let z5 = congruence_ring(5).unwrap();
//! let c = doubling(z5.clone(), z5.element(-1)).unwrap();
//! let p = c.pair(z5.element(2), z5.element(3)).unwrap();
//! assert_eq!(p.cayley_norm().downcast().unwrap(), z5.element(3));
//! ```

pub mod algebra;
pub mod congruence;
pub mod doubling;
mod error;
pub mod guard;
pub mod tower;

pub use algebra::{Algebra, AlgebraTag, Coercible, Element, Scalar};
pub use cayley_arith::ErrorKind;
pub use cayley_params::TowerParams;
pub use congruence::{CongruenceRing, Residue};
pub use doubling::{Doubled, Doubling};
pub use error::AlgebraError;

/// Z/NZ; fails for `cardinal <= 1`.
pub fn congruence_ring(cardinal: i64) -> Result<CongruenceRing, AlgebraError> {
    CongruenceRing::new(cardinal)
}

/// Doubles `base` with `structural`, a scalar of its base ring.
pub fn doubling<B: Algebra>(base: B, structural: Scalar<B>) -> Result<Doubling<B>, AlgebraError> {
    Doubling::new(base, structural)
}
