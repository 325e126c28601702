//! Byte encoding and decoding for ML-KEM polynomials.
//!
//! Implements FIPS 203 Algorithms 5 (ByteEncode) and 6 (ByteDecode) for any
//! width d in 1..=12, packing eight d-bit values into d bytes at a time.
//!
//! The d=12 form (384 bytes per polynomial) carries the public key t and the
//! secret key s; d=1 carries the message.

use crate::params::{POLY_BYTES, Q};
use crate::poly::Poly;
use crate::reduce::barrett_reduce;
use subtle::{Choice, ConstantTimeEq};

/// Encode `poly` with `d` bits per coefficient into `out` (32*d bytes).
///
/// Coefficients must already lie in [0, 2^d); higher bits are masked off.
pub fn byte_encode(poly: &Poly, d: usize, out: &mut [u8]) {
    debug_assert!((1..=12).contains(&d));
    debug_assert!(out.len() >= 32 * d);
    let mask = (1u128 << d) - 1;

    for (block, chunk) in poly.coeffs.chunks_exact(8).zip(out.chunks_exact_mut(d)) {
        let mut acc = 0u128;
        for (j, &c) in block.iter().enumerate() {
            acc |= ((c as u16 as u128) & mask) << (j * d);
        }
        for (i, byte) in chunk.iter_mut().enumerate() {
            *byte = (acc >> (8 * i)) as u8;
        }
    }
}

/// Decode 32*d bytes into a polynomial with `d`-bit coefficients.
///
/// No modular reduction is applied; values lie in [0, 2^d).
pub fn byte_decode(bytes: &[u8], d: usize) -> Poly {
    debug_assert!((1..=12).contains(&d));
    debug_assert!(bytes.len() >= 32 * d);
    let mask = (1u128 << d) - 1;
    let mut poly = Poly::new();

    for (block, chunk) in poly.coeffs.chunks_exact_mut(8).zip(bytes.chunks_exact(d)) {
        let mut acc = 0u128;
        for (i, &byte) in chunk.iter().enumerate() {
            acc |= (byte as u128) << (8 * i);
        }
        for (j, c) in block.iter_mut().enumerate() {
            *c = ((acc >> (j * d)) & mask) as i16;
        }
    }

    poly
}

/// Encode a polynomial to bytes using 12-bit coefficients.
///
/// The polynomial must be canonical (all coefficients in [0, q-1]).
pub fn poly_to_bytes(poly: &Poly) -> [u8; POLY_BYTES] {
    debug_assert!(poly.coeffs.iter().all(|&c| (0..Q as i16).contains(&c)));
    let mut bytes = [0u8; POLY_BYTES];
    byte_encode(poly, 12, &mut bytes);
    bytes
}

/// Decode 384 bytes to a polynomial, reducing each 12-bit value modulo q.
pub fn poly_from_bytes(bytes: &[u8]) -> Poly {
    let mut poly = byte_decode(&bytes[..POLY_BYTES], 12);
    for c in poly.coeffs.iter_mut() {
        *c = barrett_reduce(*c);
    }
    poly
}

/// Check that a run of 12-bit encoded polynomials survives decode then re-encode.
///
/// Any coefficient in [q, 4095] is reduced by [`poly_from_bytes`] and so
/// re-encodes to different bytes. The comparison runs in constant time over
/// the whole input. `t_bytes` must be a whole number of polynomials.
pub fn encoding_is_canonical(t_bytes: &[u8]) -> Choice {
    debug_assert_eq!(t_bytes.len() % POLY_BYTES, 0);
    let mut ok = Choice::from(1u8);
    for chunk in t_bytes.chunks_exact(POLY_BYTES) {
        let reencoded = poly_to_bytes(&poly_from_bytes(chunk));
        ok &= reencoded[..].ct_eq(chunk);
    }
    ok
}

/// Encode a 32-byte message as a polynomial.
///
/// Bit b of the message becomes the coefficient b * 1665 (that is, b * ceil(q/2)).
pub fn msg_to_poly(m: &[u8; 32]) -> Poly {
    let mut poly = Poly::new();
    let half_q = ((Q as i16) + 1) / 2;

    for (i, &byte) in m.iter().enumerate() {
        for j in 0..8 {
            let mask = -(((byte >> j) & 1) as i16);
            poly.coeffs[8 * i + j] = mask & half_q;
        }
    }

    poly
}

/// Decode a polynomial to a 32-byte message.
///
/// Each coefficient maps to `round(2c/q) mod 2`. The polynomial must be canonical.
pub fn poly_to_msg(poly: &Poly) -> [u8; 32] {
    let mut m = [0u8; 32];

    for (i, byte) in m.iter_mut().enumerate() {
        for j in 0..8 {
            let c = poly.coeffs[8 * i + j] as u32;
            let bit = (((c << 1) + Q as u32 / 2) / Q as u32) & 1;
            *byte |= (bit as u8) << j;
        }
    }

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::N;

    #[test]
    fn test_poly_to_bytes_from_bytes_roundtrip() {
        let mut poly = Poly::new();
        for i in 0..N {
            poly.coeffs[i] = (i as i16 * 13) % (Q as i16);
        }

        let bytes = poly_to_bytes(&poly);
        let recovered = poly_from_bytes(&bytes);
        assert_eq!(poly.coeffs, recovered.coeffs);
    }

    #[test]
    fn test_poly_to_bytes_layout() {
        // c0 = 0xABC, c1 = 0x123 -> bc 3a 12
        let mut poly = Poly::new();
        poly.coeffs[0] = 0xABC;
        poly.coeffs[1] = 0x123;
        let bytes = poly_to_bytes(&poly);
        assert_eq!(&bytes[..3], &[0xBC, 0x3A, 0x12]);
        assert!(bytes[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_poly_to_bytes_from_bytes_max() {
        let poly = Poly {
            coeffs: [(Q - 1) as i16; N],
        };
        let bytes = poly_to_bytes(&poly);
        let recovered = poly_from_bytes(&bytes);
        assert!(recovered.coeffs.iter().all(|&c| c == (Q - 1) as i16));
    }

    #[test]
    fn test_poly_from_bytes_reduces() {
        // c0 = 0xFFF = 4095 -> 766
        let mut bytes = [0u8; POLY_BYTES];
        bytes[0] = 0xFF;
        bytes[1] = 0x0F;
        let poly = poly_from_bytes(&bytes);
        assert_eq!(poly.coeffs[0], 4095 - Q as i16);
    }

    #[test]
    fn test_msg_to_poly_to_msg_roundtrip() {
        let msg: [u8; 32] = core::array::from_fn(|i| (i as u8).wrapping_mul(73) ^ 0x5A);
        let poly = msg_to_poly(&msg);
        assert_eq!(poly_to_msg(&poly), msg);
    }

    #[test]
    fn test_msg_to_poly_values() {
        let zeros = msg_to_poly(&[0u8; 32]);
        assert!(zeros.coeffs.iter().all(|&c| c == 0));

        let ones = msg_to_poly(&[0xFFu8; 32]);
        assert!(ones.coeffs.iter().all(|&c| c == 1665));
    }

    #[test]
    fn test_poly_to_msg_rounding() {
        // round(2c/q) mod 2 is 1 exactly for c in [833, 2496]
        let mut poly = Poly::new();
        poly.coeffs[0] = 832;
        poly.coeffs[1] = 833;
        poly.coeffs[2] = 2496;
        poly.coeffs[3] = 2497;
        poly.coeffs[4] = 3328;
        let m = poly_to_msg(&poly);
        assert_eq!(m[0], 0b0000_0110);
    }

    #[test]
    fn test_byte_encode_decode_roundtrip_all_widths() {
        for d in 1..=12usize {
            let mut poly = Poly::new();
            for i in 0..N {
                poly.coeffs[i] = (i.wrapping_mul(2654435761) % (1 << d)) as i16;
            }
            let mut bytes = [0u8; 384];
            byte_encode(&poly, d, &mut bytes[..32 * d]);
            let recovered = byte_decode(&bytes[..32 * d], d);
            assert_eq!(poly.coeffs, recovered.coeffs, "width {}", d);
        }
    }

    #[test]
    fn test_byte_encode_d1_is_bit_order() {
        let mut poly = Poly::new();
        poly.coeffs[0] = 1;
        poly.coeffs[9] = 1;
        let mut bytes = [0u8; 32];
        byte_encode(&poly, 1, &mut bytes);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[1], 0x02);
    }

    #[test]
    fn test_encoding_is_canonical_valid() {
        let zeros = [0u8; 3 * POLY_BYTES];
        assert!(bool::from(encoding_is_canonical(&zeros)));

        // All coefficients = Q-1 = 0xD00: bytes 00 0D D0
        let mut max = [0u8; 3 * POLY_BYTES];
        for chunk in max.chunks_exact_mut(3) {
            chunk[1] = 0x0D;
            chunk[2] = 0xD0;
        }
        assert!(bool::from(encoding_is_canonical(&max)));
    }

    #[test]
    fn test_encoding_is_canonical_invalid() {
        // c0 = Q = 0xD01
        let mut t = [0u8; 2 * POLY_BYTES];
        t[0] = 0x01;
        t[1] = 0x0D;
        assert!(!bool::from(encoding_is_canonical(&t)));

        // c1 = Q: (b1 >> 4) | (b2 << 4) = 0x01 | 0xD00
        let mut t = [0u8; 2 * POLY_BYTES];
        t[1] = 0x10;
        t[2] = 0xD0;
        assert!(!bool::from(encoding_is_canonical(&t)));

        // c1 = 0xFFF in the last polynomial
        let mut t = [0u8; 2 * POLY_BYTES];
        t[2 * POLY_BYTES - 2] = 0xF0;
        t[2 * POLY_BYTES - 1] = 0xFF;
        assert!(!bool::from(encoding_is_canonical(&t)));
    }
}
