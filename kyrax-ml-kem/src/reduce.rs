//! Modular arithmetic for ML-KEM.
//!
//! Constant-time Barrett and Montgomery reduction for coefficients of the
//! polynomial ring Z_q\[X\]/(X^256 + 1).

use crate::params::Q;

/// q^(-1) mod 2^16, as a signed value: -3327
pub const QINV: i32 = -3327;

/// R^2 mod q for Montgomery: (2^16)^2 mod q = 1353
pub const MONT_R2: i32 = 1353;

/// Barrett constant for a 24-bit shift: floor((2^24 + q/2) / q) = 5040
pub const BARRETT_MUL: i32 = ((1 << 24) + (Q as i32) / 2) / (Q as i32);

/// Final inverse-NTT scale: 2^(-7) * R^2 mod q = 1441
pub const INV_N_MONT: i16 = 1441;

/// Add q when `r` is negative, without branching.
#[inline]
const fn add_q_if_negative(r: i16) -> i16 {
    r + ((r >> 15) & Q as i16)
}

/// Barrett reduction: canonical representative of `a` in [0, q-1].
///
/// The quotient estimate `floor(a * v / 2^24)` is off by at most one in
/// either direction over the whole `i16` range, so two masked corrections
/// bring the remainder into [0, q).
#[inline]
pub const fn barrett_reduce(a: i16) -> i16 {
    let a = a as i32;
    let t = (a * BARRETT_MUL) >> 24;
    // r in [-q, 2q)
    let r = (a - t * (Q as i32)) as i16;
    let r = add_q_if_negative(r);
    add_q_if_negative(r - Q as i16)
}

/// Montgomery reduction: compute a * R^(-1) mod q where R = 2^16
///
/// Given `a` in range [-q*2^15, q*2^15], computes `a * 2^(-16) mod q`.
///
/// # Returns
/// Result in range (-q, q)
#[inline]
pub const fn montgomery_reduce(a: i32) -> i16 {
    // t = a * q^(-1) mod 2^16 (keep low 16 bits)
    let t = (a.wrapping_mul(QINV)) as i16;
    let t = (a - (t as i32) * (Q as i32)) >> 16;
    t as i16
}

/// Multiply two values and Montgomery-reduce the product: a * b * R^(-1) mod q.
#[inline]
pub const fn montgomery_mul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}

/// Convert a value to Montgomery form: a -> a * R mod q
#[inline]
pub const fn to_mont(a: i16) -> i16 {
    montgomery_reduce((a as i32) * MONT_R2)
}
