//! Classical integer arithmetic: GCD, Bézout coefficients and the Jacobi symbol.
//!
//! All routines work on `i64` inputs with `i128` intermediates, so the only
//! failure besides invalid Jacobi moduli is a result that no longer fits the
//! host type (magnitudes reaching `2^63`).

use thiserror::Error;

/// Coarse classification of failures shared by the whole workspace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong kind of operand: non-integral input, mismatched algebras.
    Type,
    /// Operand of the right kind but outside the accepted range.
    Value,
    /// Inversion of a non-invertible element.
    ZeroDivision,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArithError {
    #[error("{0} is not an integer")]
    NotIntegral(f64),
    #[error("{0} is strictly less than 1")]
    ModulusTooSmall(i64),
    #[error("{0} is even")]
    EvenModulus(i64),
    #[error("result does not fit in an i64")]
    Overflow,
}

impl ArithError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArithError::NotIntegral(_) => ErrorKind::Type,
            ArithError::ModulusTooSmall(_) | ArithError::EvenModulus(_) | ArithError::Overflow => {
                ErrorKind::Value
            }
        }
    }
}

/// Bézout identity `u·a + v·b = gcd`, with `gcd >= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bezout {
    pub u: i64,
    pub v: i64,
    pub gcd: i64,
}

/// Checked conversion of a host floating value into an integer operand.
pub fn integral(x: f64) -> Result<i64, ArithError> {
    if !x.is_finite() || x.fract() != 0.0 {
        return Err(ArithError::NotIntegral(x));
    }
    // 2^63 is exactly representable; i64::MAX is not.
    if x < -9_223_372_036_854_775_808.0 || x >= 9_223_372_036_854_775_808.0 {
        return Err(ArithError::Overflow);
    }
    Ok(x as i64)
}

/// Greatest common divisor of `a` and `b`, always non-negative.
///
/// `gcd(a, 0) == |a|` and `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> Result<i64, ArithError> {
    let g = gcd_u64(a.unsigned_abs(), b.unsigned_abs());
    i64::try_from(g).map_err(|_| ArithError::Overflow)
}

fn gcd_u64(a: u64, b: u64) -> u64 {
    if a < b {
        return gcd_u64(b, a);
    }
    let (mut a, mut b) = (a, b);
    while b > 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Extended Euclidean algorithm.
///
/// Returns `(u, v, g)` packed in a [`Bezout`] such that `u·a + v·b = g = gcd(a, b)`.
pub fn extended_euclid(a: i64, b: i64) -> Result<Bezout, ArithError> {
    if a.unsigned_abs() < b.unsigned_abs() {
        let swapped = extended_euclid(b, a)?;
        return Ok(Bezout {
            u: swapped.v,
            v: swapped.u,
            gcd: swapped.gcd,
        });
    }

    let (mut r0, mut r1) = (a as i128, b as i128);
    let (mut u0, mut u1) = (1i128, 0i128);
    let (mut v0, mut v1) = (0i128, 1i128);
    while r1 != 0 {
        let q = r0 / r1;
        (r0, r1) = (r1, r0 - q * r1);
        (u0, u1) = (u1, u0 - q * u1);
        (v0, v1) = (v1, v0 - q * v1);
    }
    if r0 < 0 {
        (r0, u0, v0) = (-r0, -u0, -v0);
    }

    let fit = |x: i128| i64::try_from(x).map_err(|_| ArithError::Overflow);
    Ok(Bezout {
        u: fit(u0)?,
        v: fit(v0)?,
        gcd: fit(r0)?,
    })
}

/// Jacobi symbol `(a / n)` for odd `n >= 1`.
///
/// Strips powers of two using the supplementary law on `n mod 8`, then flips
/// the pair with quadratic reciprocity until the residue reaches 1.
pub fn jacobi(a: i64, n: i64) -> Result<i8, ArithError> {
    if n < 1 {
        return Err(ArithError::ModulusTooSmall(n));
    }
    if n % 2 == 0 {
        return Err(ArithError::EvenModulus(n));
    }
    if n == 1 {
        return Ok(1);
    }
    if gcd(a, n)? != 1 {
        return Ok(0);
    }

    let (mut a, mut n) = (a, n);
    let mut sign = 1i8;
    loop {
        let factor_for_two = if matches!(n % 8, 1 | 7) { 1 } else { -1 };
        // gcd(a, n) == 1 and n > 1, so m is never zero.
        let mut m = a.rem_euclid(n);
        while m % 2 == 0 {
            sign *= factor_for_two;
            m >>= 1;
        }
        if m == 1 {
            return Ok(sign);
        }
        if !(n % 4 == 1 || m % 4 == 1) {
            sign = -sign;
        }
        (a, n) = (n, m);
    }
}
