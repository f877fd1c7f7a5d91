//! Cayley–Dickson doubling of an arbitrary base algebra.
//!
//! `Doubling<B>` pairs elements of `B` and multiplies them with
//!
//! ```text
//! (a0, a1) · (b0, b1) = (a0·b0 + γ ⨯ (conj(b1)·a1),  a1·conj(b0) + b1·a0)
//! ```
//!
//! where γ is the structural constant of the level, a scalar of the leaf
//! ring. The new unit (0, 1) squares to γ, so γ = −1 at every level yields
//! the complex, quaternion and octonion progression. The reference formula
//! prints `− γ` in the first component; that sign does not give the norm 3
//! for (2, 3) over Z/5Z with γ = 4, and `+ γ` does, so `+ γ` is used.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, instrument, trace};

use crate::algebra::{Algebra, AlgebraTag, Coercible, Element, Scalar};
use crate::AlgebraError;

#[derive(Debug)]
struct DoublingInner<B: Algebra> {
    base: B,
    ring: B::Ring,
    structural: Scalar<B>,
    tag: AlgebraTag,
    dimension: usize,
}

/// Descriptor of the algebra obtained by doubling `B` with a structural constant.
#[derive(Clone, Debug)]
pub struct Doubling<B: Algebra>(Arc<DoublingInner<B>>);

impl<B: Algebra> Doubling<B> {
    /// Builds the doubled algebra. Fails if `structural` does not live in
    /// the base ring of `base`.
    #[instrument(level = "debug", skip_all, fields(base = %base.tag()))]
    pub fn new(base: B, structural: Scalar<B>) -> Result<Self, AlgebraError> {
        if base.base_ring_tag() != structural.base_ring_tag() {
            return Err(AlgebraError::BaseRingMismatch {
                base: base.base_ring_tag().clone(),
                structural: structural.base_ring_tag().clone(),
            });
        }
        let ring = structural.algebra().clone();
        let tag = AlgebraTag::Doubling {
            parent: Arc::new(base.tag().clone()),
            structural: structural.dump().into_boxed_slice(),
        };
        let dimension = 2 * base.dimension();
        debug!(%tag, dimension, "built doubling");
        Ok(Self(Arc::new(DoublingInner {
            base,
            ring,
            structural,
            tag,
            dimension,
        })))
    }

    #[inline]
    pub fn base(&self) -> &B {
        &self.0.base
    }

    #[inline]
    pub fn structural(&self) -> &Scalar<B> {
        &self.0.structural
    }

    /// The element `(c0, c1)`; both components must belong to the base algebra.
    pub fn pair(&self, c0: B::Element, c1: B::Element) -> Result<Doubled<B>, AlgebraError> {
        for c in [&c0, &c1] {
            if c.tag() != self.base().tag() {
                return Err(AlgebraError::ComponentMismatch {
                    found: c.tag().clone(),
                    expected: self.base().tag().clone(),
                });
            }
        }
        Ok(self.assemble(c0, c1))
    }

    /// `(c0, 0)`.
    pub fn lift(&self, c0: B::Element) -> Result<Doubled<B>, AlgebraError> {
        let zero = self.base().zero();
        self.pair(c0, zero)
    }

    fn assemble(&self, c0: B::Element, c1: B::Element) -> Doubled<B> {
        Doubled {
            algebra: self.clone(),
            c0,
            c1,
        }
    }
}

impl<B: Algebra> Algebra for Doubling<B> {
    type Element = Doubled<B>;
    type Ring = B::Ring;

    fn tag(&self) -> &AlgebraTag {
        &self.0.tag
    }

    fn base_ring(&self) -> &B::Ring {
        &self.0.ring
    }

    fn dimension(&self) -> usize {
        self.0.dimension
    }

    fn zero(&self) -> Doubled<B> {
        self.assemble(self.base().zero(), self.base().zero())
    }

    fn upcast_integer(&self, n: i64) -> Doubled<B> {
        self.assemble(self.base().upcast_integer(n), self.base().zero())
    }

    /// Tries, in order: an element of this very type, an element of the
    /// base type wrapped as `(x, 0)`, and finally the base type's own upcast.
    fn upcast(&self, x: &dyn Coercible) -> Result<Doubled<B>, AlgebraError> {
        let any = x.as_any();
        if let Some(e) = any.downcast_ref::<Doubled<B>>() {
            if e.tag() == self.tag() {
                return Ok(e.clone());
            }
        }
        if let Some(b) = any.downcast_ref::<B::Element>() {
            if b.tag() == self.base().tag() {
                return Ok(self.assemble(b.clone(), self.base().zero()));
            }
        }
        trace!(from = %x.algebra_tag(), into = %self.tag(), "upcasting through base");
        match self.base().upcast(x) {
            Ok(lifted) => Ok(self.assemble(lifted, self.base().zero())),
            Err(_) => Err(AlgebraError::Upcast {
                from: x.algebra_tag().clone(),
                into: self.tag().clone(),
            }),
        }
    }

    fn project(&self, e: &Doubled<B>) -> Scalar<B> {
        self.base().project(&e.c0)
    }

    fn from_coordinates(&self, coords: &[i64]) -> Result<Doubled<B>, AlgebraError> {
        if coords.len() != self.dimension() {
            return Err(AlgebraError::Dimension {
                expected: self.dimension(),
                got: coords.len(),
            });
        }
        let (lo, hi) = coords.split_at(self.base().dimension());
        Ok(self.assemble(
            self.base().from_coordinates(lo)?,
            self.base().from_coordinates(hi)?,
        ))
    }

    fn structurals(&self) -> Vec<Scalar<B>> {
        let mut all = self.base().structurals();
        all.push(self.structural().clone());
        all
    }

    fn random(&self, rng: &mut impl Rng) -> Doubled<B> {
        let c0 = self.base().random(rng);
        let c1 = self.base().random(rng);
        self.assemble(c0, c1)
    }
}

/// An element `(c0, c1)` of a [`Doubling`].
#[derive(Clone, Debug)]
pub struct Doubled<B: Algebra> {
    algebra: Doubling<B>,
    c0: B::Element,
    c1: B::Element,
}

impl<B: Algebra> Doubled<B> {
    #[inline]
    pub fn components(&self) -> (&B::Element, &B::Element) {
        (&self.c0, &self.c1)
    }

    #[inline]
    pub fn first(&self) -> &B::Element {
        &self.c0
    }

    #[inline]
    pub fn second(&self) -> &B::Element {
        &self.c1
    }

    /// The leaf scalar this element's norm reduces to.
    fn norm_scalar(&self) -> Scalar<B> {
        self.algebra.project(&self.cayley_norm())
    }
}

impl<B: Algebra> Element for Doubled<B> {
    type Algebra = Doubling<B>;

    fn algebra(&self) -> &Doubling<B> {
        &self.algebra
    }

    fn raw_add(&self, rhs: &Self) -> Self {
        self.algebra
            .assemble(self.c0.raw_add(&rhs.c0), self.c1.raw_add(&rhs.c1))
    }

    fn raw_sub(&self, rhs: &Self) -> Self {
        self.algebra
            .assemble(self.c0.raw_sub(&rhs.c0), self.c1.raw_sub(&rhs.c1))
    }

    fn raw_mul(&self, rhs: &Self) -> Self {
        let (a0, a1) = (&self.c0, &self.c1);
        let (b0, b1) = (&rhs.c0, &rhs.c1);
        let twisted = b1
            .conjugate()
            .raw_mul(a1)
            .raw_scale(self.algebra.structural());
        let c0 = a0.raw_mul(b0).raw_add(&twisted);
        let c1 = a1.raw_mul(&b0.conjugate()).raw_add(&b1.raw_mul(a0));
        self.algebra.assemble(c0, c1)
    }

    fn raw_scale(&self, s: &Scalar<B>) -> Self {
        self.algebra
            .assemble(self.c0.raw_scale(s), self.c1.raw_scale(s))
    }

    fn neg(&self) -> Self {
        self.algebra.assemble(self.c0.neg(), self.c1.neg())
    }

    fn conjugate(&self) -> Self {
        self.algebra.assemble(self.c0.conjugate(), self.c1.neg())
    }

    fn is_invertible(&self) -> bool {
        self.norm_scalar().is_invertible()
    }

    fn is_unimodular(&self) -> bool {
        self.norm_scalar() == self.algebra.base_ring().one()
    }

    fn inverse(&self) -> Result<Self, AlgebraError> {
        let norm = self.norm_scalar();
        if !norm.is_invertible() {
            trace!(element = %self, "refusing to invert");
            return Err(AlgebraError::NotInvertible(self.to_string()));
        }
        Ok(self.conjugate().raw_scale(&norm.inverse()?))
    }

    fn dump(&self) -> Vec<i64> {
        let mut coords = self.c0.dump();
        coords.extend(self.c1.dump());
        coords
    }

    fn flatten(&self) -> Vec<Scalar<B>> {
        let mut coords = self.c0.flatten();
        coords.extend(self.c1.flatten());
        coords
    }
}

impl<B: Algebra> PartialEq for Doubled<B> {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag() && self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<B: Algebra> Eq for Doubled<B> where B::Element: Eq {}

/// Flat coordinates followed by the structural constants, e.g. `(2, 3) {4 [5]}`.
impl<B: Algebra> fmt::Display for Doubled<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.dump().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ") {{")?;
        for (i, s) in self.algebra.structurals().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{s}")?;
        }
        write!(f, "}}")
    }
}
