//! Byte strings to field elements and back.
//!
//! A byte string is read as a big-endian unsigned integer. The mapping drops
//! leading zero bytes: `decode(encode(b"\0ab"))` yields `b"ab"`. Callers must
//! not feed chunks that begin with NUL; [`crate::scheme`] rejects secrets
//! containing NUL for this reason.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{Result, SharingError};
use crate::field::PrimeField;

pub fn encode(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal big-endian representation; zero decodes to an empty string.
pub fn decode(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Splits `bytes` into `max_len`-sized pieces with a shorter final remainder.
pub fn chunk(bytes: &[u8], max_len: usize) -> Result<Vec<&[u8]>> {
    if max_len == 0 {
        return Err(SharingError::DegenerateInput(
            "chunk length must be positive".to_string(),
        ));
    }
    Ok(bytes.chunks(max_len).collect())
}

/// Largest chunk length whose every encoding stays below the field modulus.
///
/// An L-byte chunk encodes to at most 2^(8L) - 1, which is below p whenever
/// 8L <= bits(p) - 1.
pub fn max_chunk_len(field: &PrimeField) -> usize {
    ((field.bits() - 1) / 8) as usize
}
