//! Leaf algebra: the congruence ring Z/NZ.

use std::fmt;
use std::sync::Arc;

use cayley_arith::{extended_euclid, gcd, jacobi};
use rand::Rng;
use tracing::{debug, instrument, trace};

use crate::algebra::{Algebra, AlgebraTag, Coercible, Element};
use crate::AlgebraError;

#[derive(Debug)]
struct RingInner {
    cardinal: i64,
    tag: AlgebraTag,
}

/// Descriptor of Z/NZ for a fixed cardinal N > 1.
#[derive(Clone, Debug)]
pub struct CongruenceRing(Arc<RingInner>);

impl CongruenceRing {
    #[instrument(level = "debug", skip_all, fields(cardinal = cardinal))]
    pub fn new(cardinal: i64) -> Result<Self, AlgebraError> {
        if cardinal <= 1 {
            return Err(AlgebraError::InvalidModulus(cardinal));
        }
        let tag = AlgebraTag::Congruence { cardinal };
        debug!(%tag, "built congruence ring");
        Ok(Self(Arc::new(RingInner { cardinal, tag })))
    }

    #[inline]
    pub fn cardinal(&self) -> i64 {
        self.0.cardinal
    }

    /// The class of `n`, reduced into `[0, N)`.
    pub fn element(&self, n: i64) -> Residue {
        Residue {
            ring: self.clone(),
            value: n.rem_euclid(self.cardinal()),
        }
    }

    fn reduce(&self, n: i128) -> Residue {
        // |n| < N² and the remainder is < N, so it fits in i64.
        let value = n.rem_euclid(self.cardinal() as i128) as i64;
        Residue {
            ring: self.clone(),
            value,
        }
    }
}

impl Algebra for CongruenceRing {
    type Element = Residue;
    type Ring = CongruenceRing;

    fn tag(&self) -> &AlgebraTag {
        &self.0.tag
    }

    fn base_ring(&self) -> &CongruenceRing {
        self
    }

    fn dimension(&self) -> usize {
        1
    }

    fn zero(&self) -> Residue {
        self.element(0)
    }

    fn upcast_integer(&self, n: i64) -> Residue {
        self.element(n)
    }

    fn upcast(&self, x: &dyn Coercible) -> Result<Residue, AlgebraError> {
        match x.as_any().downcast_ref::<Residue>() {
            Some(r) if r.tag() == self.tag() => Ok(r.clone()),
            _ => Err(AlgebraError::Upcast {
                from: x.algebra_tag().clone(),
                into: self.tag().clone(),
            }),
        }
    }

    fn project(&self, e: &Residue) -> Residue {
        e.clone()
    }

    fn from_coordinates(&self, coords: &[i64]) -> Result<Residue, AlgebraError> {
        match coords {
            [n] => Ok(self.element(*n)),
            _ => Err(AlgebraError::Dimension {
                expected: 1,
                got: coords.len(),
            }),
        }
    }

    fn structurals(&self) -> Vec<Residue> {
        Vec::new()
    }

    fn random(&self, rng: &mut impl Rng) -> Residue {
        self.element(rng.random_range(0..self.cardinal()))
    }
}

/// An element of Z/NZ, stored as its canonical representative in `[0, N)`.
#[derive(Clone, Debug)]
pub struct Residue {
    ring: CongruenceRing,
    value: i64,
}

impl Residue {
    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    pub fn cardinal(&self) -> i64 {
        self.ring.cardinal()
    }

    /// Product with another residue of the same ring; `None` when the rings differ.
    ///
    /// Unlike [`Element::scale`], a mismatch is reported as "unsupported"
    /// rather than as an error, so callers can fall back to another dispatch.
    pub fn external_product(&self, other: &Residue) -> Option<Residue> {
        (self.tag() == other.tag()).then(|| self.raw_mul(other))
    }

    /// Jacobi symbol of this residue modulo the (odd) cardinal.
    pub fn jacobi(&self) -> Result<i8, AlgebraError> {
        Ok(jacobi(self.value, self.cardinal())?)
    }
}

impl Element for Residue {
    type Algebra = CongruenceRing;

    fn algebra(&self) -> &CongruenceRing {
        &self.ring
    }

    fn raw_add(&self, rhs: &Self) -> Self {
        self.ring.reduce(self.value as i128 + rhs.value as i128)
    }

    fn raw_sub(&self, rhs: &Self) -> Self {
        self.ring.reduce(self.value as i128 - rhs.value as i128)
    }

    fn raw_mul(&self, rhs: &Self) -> Self {
        self.ring.reduce(self.value as i128 * rhs.value as i128)
    }

    fn raw_scale(&self, s: &Residue) -> Self {
        s.raw_mul(self)
    }

    fn neg(&self) -> Self {
        self.ring.reduce(-(self.value as i128))
    }

    // Z/NZ is its own conjugate.
    fn conjugate(&self) -> Self {
        self.clone()
    }

    fn is_invertible(&self) -> bool {
        matches!(gcd(self.cardinal(), self.value), Ok(1))
    }

    fn is_unimodular(&self) -> bool {
        self.raw_mul(self).value == 1
    }

    fn inverse(&self) -> Result<Self, AlgebraError> {
        if !self.is_invertible() {
            trace!(element = %self, "refusing to invert");
            return Err(AlgebraError::NotInvertible(self.to_string()));
        }
        let bezout = extended_euclid(self.value, self.cardinal())?;
        Ok(self.ring.element(bezout.u))
    }

    fn dump(&self) -> Vec<i64> {
        vec![self.value]
    }

    fn flatten(&self) -> Vec<Residue> {
        vec![self.clone()]
    }

    fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl PartialEq for Residue {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag() && self.value == other.value
    }
}

impl Eq for Residue {}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.cardinal())
    }
}
