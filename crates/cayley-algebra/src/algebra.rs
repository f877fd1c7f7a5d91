//! Capability contract shared by every algebra level.
//!
//! An algebra *type* is a cheap-to-clone descriptor implementing [`Algebra`];
//! its values implement [`Element`]. Each descriptor carries an immutable
//! [`AlgebraTag`] identifying it, and resolves to the leaf ring its scalars
//! live in (`Algebra::Ring`).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::guard;
use crate::AlgebraError;

/// Leaf scalar type an algebra ultimately reduces to.
pub type Scalar<A> = <<A as Algebra>::Ring as Algebra>::Element;

/// Structural identity of an algebra type.
///
/// Two doubling levels are different algebras whenever their parents or
/// their structural constants differ, whatever their dimension.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AlgebraTag {
    /// Z/NZ.
    Congruence { cardinal: i64 },
    /// One doubling of `parent`; `structural` holds the constant's leaf coordinates.
    Doubling {
        parent: Arc<AlgebraTag>,
        structural: Box<[i64]>,
    },
}

impl AlgebraTag {
    /// Number of doubling levels between this tag and its leaf.
    pub fn depth(&self) -> usize {
        match self {
            AlgebraTag::Congruence { .. } => 0,
            AlgebraTag::Doubling { parent, .. } => 1 + parent.depth(),
        }
    }

    pub fn parent(&self) -> Option<&AlgebraTag> {
        match self {
            AlgebraTag::Congruence { .. } => None,
            AlgebraTag::Doubling { parent, .. } => Some(parent),
        }
    }

    /// The leaf tag at the bottom of the chain.
    pub fn leaf(&self) -> &AlgebraTag {
        let mut tag = self;
        while let Some(parent) = tag.parent() {
            tag = parent;
        }
        tag
    }
}

impl fmt::Display for AlgebraTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgebraTag::Congruence { cardinal } => write!(f, "congruence_ring({cardinal})"),
            AlgebraTag::Doubling { parent, structural } => {
                write!(f, "doubling({parent}, ")?;
                match &structural[..] {
                    [c] => write!(f, "{c}")?,
                    coords => write!(f, "{coords:?}")?,
                }
                write!(f, ")")
            }
        }
    }
}

/// A type-level descriptor for one algebra: a leaf ring or a doubling level.
pub trait Algebra: Clone + fmt::Debug + Send + Sync + 'static {
    type Element: Element<Algebra = Self>;
    /// The leaf ring every level of this tower reduces to.
    type Ring: Algebra<Ring = Self::Ring>;

    fn tag(&self) -> &AlgebraTag;

    fn base_ring(&self) -> &Self::Ring;

    fn base_ring_tag(&self) -> &AlgebraTag {
        self.base_ring().tag()
    }

    /// Number of leaf coordinates of an element.
    fn dimension(&self) -> usize;

    /// Default element (all coordinates zero).
    fn zero(&self) -> Self::Element;

    /// Lifts an integer into this type through every level.
    fn upcast_integer(&self, n: i64) -> Self::Element;

    /// Multiplicative identity.
    fn one(&self) -> Self::Element {
        self.upcast_integer(1)
    }

    /// Coerces an element of this type or of any ancestor level into this type.
    fn upcast(&self, x: &dyn Coercible) -> Result<Self::Element, AlgebraError>;

    /// Follows component 0 down to the leaf. Assumes `e` belongs to this type.
    fn project(&self, e: &Self::Element) -> Scalar<Self>;

    /// Unwraps `e` down to its leaf scalar.
    fn downcast(&self, e: &Self::Element) -> Result<Scalar<Self>, AlgebraError> {
        if e.tag() != self.tag() {
            return Err(AlgebraError::Downcast {
                from: e.tag().clone(),
                into: self.base_ring_tag().clone(),
            });
        }
        Ok(self.project(e))
    }

    /// Rebuilds an element from its flat leaf coordinates (see [`Element::dump`]).
    fn from_coordinates(&self, coords: &[i64]) -> Result<Self::Element, AlgebraError>;

    /// Structural constants from the leaf upward.
    fn structurals(&self) -> Vec<Scalar<Self>>;

    /// Uniformly random element.
    fn random(&self, rng: &mut impl Rng) -> Self::Element;
}

/// A value of some [`Algebra`]. Every operation returns a new element.
///
/// The `raw_*` methods are the per-type kernels: they assume both operands
/// belong to the same algebra. The public binary operations run them behind
/// the compatibility guard.
pub trait Element: Clone + fmt::Debug + fmt::Display + PartialEq + Send + Sync + 'static {
    type Algebra: Algebra<Element = Self>;

    fn algebra(&self) -> &Self::Algebra;

    fn tag(&self) -> &AlgebraTag {
        self.algebra().tag()
    }

    fn base_ring_tag(&self) -> &AlgebraTag {
        self.algebra().base_ring_tag()
    }

    fn raw_add(&self, rhs: &Self) -> Self;
    fn raw_sub(&self, rhs: &Self) -> Self;
    fn raw_mul(&self, rhs: &Self) -> Self;
    /// External product `s ⨯ self` by a leaf scalar.
    fn raw_scale(&self, s: &Scalar<Self::Algebra>) -> Self;

    fn neg(&self) -> Self;
    fn conjugate(&self) -> Self;
    fn is_invertible(&self) -> bool;
    /// Whether the Cayley norm is the multiplicative identity.
    fn is_unimodular(&self) -> bool;
    fn inverse(&self) -> Result<Self, AlgebraError>;

    /// Flat leaf coordinates as raw integers.
    fn dump(&self) -> Vec<i64>;
    /// Flat leaf coordinates as leaf scalars.
    fn flatten(&self) -> Vec<Scalar<Self::Algebra>>;

    fn is_zero(&self) -> bool {
        self.dump().iter().all(|&c| c == 0)
    }

    fn add(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        guard::compatible(self, rhs, Self::raw_add)
    }

    fn sub(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        guard::compatible(self, rhs, Self::raw_sub)
    }

    fn mul(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        guard::compatible(self, rhs, Self::raw_mul)
    }

    /// `self * rhs⁻¹`.
    fn div(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        guard::compatible(self, rhs, |a, b| b.inverse().map(|inv| a.raw_mul(&inv)))?
    }

    /// External product by a scalar of this type's base ring.
    fn scale(&self, s: &Scalar<Self::Algebra>) -> Result<Self, AlgebraError> {
        if s.tag() != self.base_ring_tag() {
            return Err(AlgebraError::ScalarMismatch {
                scalar: s.tag().clone(),
                ring: self.base_ring_tag().clone(),
            });
        }
        Ok(self.raw_scale(s))
    }

    /// Binary exponentiation. Negative powers go through [`Element::inverse`].
    fn pow(&self, k: i64) -> Result<Self, AlgebraError> {
        let one = self.algebra().one();
        if k < 0 {
            let inv = self.inverse()?;
            return Ok(square_and_multiply(one, &inv, k.unsigned_abs(), Self::raw_mul));
        }
        Ok(square_and_multiply(one, self, k as u64, Self::raw_mul))
    }

    /// `self + conj(self)`.
    fn cayley_trace(&self) -> Self {
        self.raw_add(&self.conjugate())
    }

    /// `self * conj(self)`; a leaf scalar embedded in this type.
    fn cayley_norm(&self) -> Self {
        self.raw_mul(&self.conjugate())
    }

    fn downcast(&self) -> Result<Scalar<Self::Algebra>, AlgebraError> {
        self.algebra().downcast(self)
    }
}

/// Type-erased view of an element, used to coerce across tower levels.
pub trait Coercible: Any + fmt::Debug {
    fn algebra_tag(&self) -> &AlgebraTag;

    fn as_any(&self) -> &dyn Any;

    /// Equality against an element of possibly another static type;
    /// false whenever types or tags differ.
    fn eq_dyn(&self, other: &dyn Coercible) -> bool;
}

impl<E: Element> Coercible for E {
    fn algebra_tag(&self) -> &AlgebraTag {
        self.tag()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_dyn(&self, other: &dyn Coercible) -> bool {
        other
            .as_any()
            .downcast_ref::<E>()
            .is_some_and(|other| self == other)
    }
}

/// Scans the bits of `k` from low to high, squaring a running power and
/// folding it into the accumulator on every set bit.
pub(crate) fn square_and_multiply<T: Clone>(
    one: T,
    base: &T,
    mut k: u64,
    mul: impl Fn(&T, &T) -> T,
) -> T {
    let mut acc = one;
    let mut running = base.clone();
    while k > 0 {
        if k & 1 == 1 {
            acc = mul(&acc, &running);
        }
        k >>= 1;
        if k > 0 {
            running = mul(&running, &running);
        }
    }
    acc
}
