//! Field and chunking configuration.
//!
//! The defaults are the interchange values: modulus 2^127 - 1 and 15-byte
//! chunks. Other moduli can be loaded from JSON, e.g.
//! `{"modulus": [1613], "chunk_size": 1}` (num-bigint serializes a `BigUint`
//! as its little-endian u32 digits).

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::codec::max_chunk_len;
use crate::error::{Result, SharingError};
use crate::field::PrimeField;

pub const DEFAULT_CHUNK_SIZE: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingConfig {
    pub modulus: BigUint,
    pub chunk_size: usize,
}

impl Default for SharingConfig {
    fn default() -> Self {
        SharingConfig {
            modulus: PrimeField::mersenne_127().modulus().clone(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SharingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SharingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the modulus is prime and that no chunk can encode to a value
    /// at or above it.
    pub fn validate(&self) -> Result<()> {
        self.field().map(|_| ())
    }

    /// Builds the field this configuration describes.
    pub fn field(&self) -> Result<PrimeField> {
        let field = PrimeField::new(self.modulus.clone())?;
        if self.chunk_size == 0 {
            return Err(SharingError::DegenerateInput(
                "chunk size must be positive".to_string(),
            ));
        }
        let limit = max_chunk_len(&field);
        if self.chunk_size > limit {
            return Err(SharingError::InvalidModulus(format!(
                "{}-bit modulus holds at most {} bytes per chunk, {} requested",
                field.bits(),
                limit,
                self.chunk_size
            )));
        }
        Ok(field)
    }
}
