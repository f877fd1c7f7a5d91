//! The classical tower over Z/NZ, built from a [`TowerParams`] set.

use cayley_params::{ParamsError, TowerParams};

use crate::algebra::Algebra;
use crate::congruence::CongruenceRing;
use crate::doubling::Doubling;
use crate::AlgebraError;

pub type Complex = Doubling<CongruenceRing>;
pub type Quaternion = Doubling<Complex>;
pub type Octonion = Doubling<Quaternion>;
pub type Sedenion = Doubling<Octonion>;

/// Doubles `base` with the structural constant of `level`.
fn double<B: Algebra>(
    base: B,
    params: &TowerParams,
    level: usize,
) -> Result<Doubling<B>, AlgebraError> {
    let constant = params
        .structural(level)
        .ok_or(ParamsError::DepthMismatch {
            expected: level + 1,
            actual: params.depth(),
        })?;
    let structural = base.base_ring().upcast_integer(constant);
    Doubling::new(base, structural)
}

pub fn complex(params: &TowerParams) -> Result<Complex, AlgebraError> {
    params.expect_depth(1)?;
    let ring = CongruenceRing::new(params.modulus())?;
    double(ring, params, 0)
}

pub fn quaternion(params: &TowerParams) -> Result<Quaternion, AlgebraError> {
    params.expect_depth(2)?;
    let ring = CongruenceRing::new(params.modulus())?;
    double(double(ring, params, 0)?, params, 1)
}

pub fn octonion(params: &TowerParams) -> Result<Octonion, AlgebraError> {
    params.expect_depth(3)?;
    let ring = CongruenceRing::new(params.modulus())?;
    let c = double(ring, params, 0)?;
    let q = double(c, params, 1)?;
    double(q, params, 2)
}

pub fn sedenion(params: &TowerParams) -> Result<Sedenion, AlgebraError> {
    params.expect_depth(4)?;
    let ring = CongruenceRing::new(params.modulus())?;
    let c = double(ring, params, 0)?;
    let q = double(c, params, 1)?;
    let o = double(q, params, 2)?;
    double(o, params, 3)
}
