//! Typed parameter sets for Cayley–Dickson towers over Z/NZ.
//!
//! A tower is fully described by the modulus of its leaf congruence ring and
//! one structural constant per doubling level, listed from the leaf upward.
//! Constants are stored as canonical residues in `[0, modulus)`.
//!
//! Presets cover the classical progression with structural constant −1 at
//! every level: Gaussian integers, Hamilton quaternions, octonions and
//! sedenions, plus split quaternions.

use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deepest tower a parameter set may describe (sedenions).
pub const MAX_DEPTH: usize = 4;

/// Validated tower description. Fields are private so that every value,
/// deserialized ones included, has gone through [`TowerParams::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTowerParams")]
pub struct TowerParams {
    /// Cardinal N of the leaf ring Z/NZ.
    modulus: i64,
    /// Structural constant of each doubling level, leaf first.
    structurals: Vec<i64>,
}

/// Unchecked wire form of [`TowerParams`].
#[derive(Deserialize)]
struct RawTowerParams {
    modulus: i64,
    structurals: Vec<i64>,
}

impl TryFrom<RawTowerParams> for TowerParams {
    type Error = ParamsError;

    fn try_from(raw: RawTowerParams) -> Result<Self, ParamsError> {
        Self::new(raw.modulus, raw.structurals)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("modulus must be > 1 but is {0}")]
    InvalidModulus(i64),
    #[error("tower depth must lie in 1..={max} but is {depth}")]
    Depth { depth: usize, max: usize },
    #[error("tower has depth {actual} but depth {expected} was requested")]
    DepthMismatch { expected: usize, actual: usize },
}

impl TowerParams {
    /// Construct and validate a parameter set; structurals are reduced mod `modulus`.
    pub fn new(modulus: i64, structurals: Vec<i64>) -> Result<Self, ParamsError> {
        if modulus <= 1 {
            return Err(ParamsError::InvalidModulus(modulus));
        }
        let depth = structurals.len();
        if depth == 0 || depth > MAX_DEPTH {
            return Err(ParamsError::Depth {
                depth,
                max: MAX_DEPTH,
            });
        }
        let structurals = structurals
            .into_iter()
            .map(|c| c.rem_euclid(modulus))
            .collect();
        Ok(Self {
            modulus,
            structurals,
        })
    }

    /// Same constant at every level.
    pub fn uniform(modulus: i64, structural: i64, depth: usize) -> Result<Self, ParamsError> {
        Self::new(modulus, vec![structural; depth])
    }

    /// Z/pZ[i] with i² = −1.
    pub fn gaussian(modulus: i64) -> Result<Self, ParamsError> {
        Self::uniform(modulus, -1, 1)
    }

    /// Hamilton quaternions over Z/pZ.
    pub fn hamilton(modulus: i64) -> Result<Self, ParamsError> {
        Self::uniform(modulus, -1, 2)
    }

    /// Split quaternions over Z/pZ (i² = −1, j² = +1).
    pub fn split_quaternion(modulus: i64) -> Result<Self, ParamsError> {
        Self::new(modulus, vec![-1, 1])
    }

    /// Cayley octonions over Z/pZ.
    pub fn octonion(modulus: i64) -> Result<Self, ParamsError> {
        Self::uniform(modulus, -1, 3)
    }

    /// Sedenions over Z/pZ.
    pub fn sedenion(modulus: i64) -> Result<Self, ParamsError> {
        Self::uniform(modulus, -1, 4)
    }

    #[inline]
    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    /// Structural constants as residues in `[0, modulus)`, leaf first.
    #[inline]
    pub fn structurals(&self) -> &[i64] {
        &self.structurals
    }

    /// Number of doubling levels above the leaf.
    #[inline]
    pub fn depth(&self) -> usize {
        self.structurals.len()
    }

    /// Number of leaf coordinates of an element: 2^depth.
    #[inline]
    pub fn dimension(&self) -> usize {
        // depth <= MAX_DEPTH holds for every constructed value.
        1 << self.depth().min(MAX_DEPTH)
    }

    /// Structural constant of doubling level `level` (0 is the level built on the leaf).
    pub fn structural(&self, level: usize) -> Option<i64> {
        self.structurals.get(level).copied()
    }

    /// Fails unless the tower has exactly `expected` levels.
    pub fn expect_depth(&self, expected: usize) -> Result<(), ParamsError> {
        if self.depth() != expected {
            return Err(ParamsError::DepthMismatch {
                expected,
                actual: self.depth(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for TowerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TowerParams{{ N={}, structurals=[", self.modulus)?;
        for (i, c) in self.structurals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "], dim={} }}", self.dimension())
    }
}

// Tests live in `crates/cayley-params/tests/` (no in-file test modules).
