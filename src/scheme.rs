//! Byte-string split and combine over chunked secrets.
//!
//! Split: secret -> chunks -> field elements -> one polynomial per chunk ->
//! per-chunk share vectors -> per-participant bundles. Combine runs the same
//! pipeline backwards. Chunks are positional, so bundle value i always belongs
//! to chunk i.

use rand::{rngs::OsRng, CryptoRng, RngCore};

use crate::bundle::{bundles_from_chunk_shares, point_maps_from_bundles, ShareBundle};
use crate::codec::{chunk, decode, encode};
use crate::config::SharingConfig;
use crate::error::{Result, SharingError};
use crate::field::PrimeField;
use crate::sss::{reconstruct, split_secret, ShamirSecretSharing};

#[derive(Clone, Debug)]
pub struct SecretSharer {
    field: PrimeField,
    chunk_size: usize,
}

impl Default for SecretSharer {
    fn default() -> Self {
        SecretSharer {
            field: PrimeField::mersenne_127(),
            chunk_size: crate::config::DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SecretSharer {
    pub fn new(config: &SharingConfig) -> Result<Self> {
        Ok(SecretSharer {
            field: config.field()?,
            chunk_size: config.chunk_size,
        })
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Splits `secret` into `share_count` bundles, any `threshold` of which
    /// recover it. Randomness comes from the operating system.
    pub fn split(
        &self,
        secret: &[u8],
        share_count: usize,
        threshold: usize,
    ) -> Result<Vec<ShareBundle>> {
        self.split_with_rng(secret, share_count, threshold, &mut OsRng)
    }

    pub fn split_with_rng<R: RngCore + CryptoRng>(
        &self,
        secret: &[u8],
        share_count: usize,
        threshold: usize,
        rng: &mut R,
    ) -> Result<Vec<ShareBundle>> {
        validate_secret(secret)?;
        let params = ShamirSecretSharing::new(threshold, share_count)?;

        let chunks = chunk(secret, self.chunk_size)?;
        log::info!(
            "splitting {} byte secret into {} chunk(s), {}-of-{}",
            secret.len(),
            chunks.len(),
            threshold,
            share_count
        );

        let chunk_shares = chunks
            .iter()
            .enumerate()
            .map(|(i, piece)| {
                log::debug!("sharing chunk {} ({} bytes)", i, piece.len());
                split_secret(&self.field, &encode(piece), &params, &mut *rng)
            })
            .collect::<Result<Vec<_>>>()?;

        bundles_from_chunk_shares(&chunk_shares)
    }

    /// Recovers the secret from bundles of distinct participants.
    ///
    /// Fewer bundles than the threshold used at split time is not detected and
    /// produces garbage.
    pub fn combine(&self, bundles: &[ShareBundle]) -> Result<Vec<u8>> {
        if bundles.len() < 2 {
            return Err(SharingError::DegenerateInput(format!(
                "at least 2 bundles are required, got {}",
                bundles.len()
            )));
        }
        if bundles.len() == 2 {
            log::warn!("combining exactly 2 bundles; the threshold cannot be confirmed");
        }

        let point_maps = point_maps_from_bundles(bundles)?;
        log::info!(
            "combining {} bundle(s) over {} chunk(s)",
            bundles.len(),
            point_maps.len()
        );

        let mut secret = Vec::new();
        for (i, points) in point_maps.iter().enumerate() {
            log::debug!("interpolating chunk {}", i);
            let value = reconstruct(&self.field, points)?;
            secret.extend(decode(&value));
        }
        Ok(secret)
    }
}

/// Secrets must be non-empty ASCII without NUL bytes.
///
/// NUL is refused because a chunk starting with it would lose that byte in
/// the integer encoding.
pub fn validate_secret(secret: &[u8]) -> Result<()> {
    if secret.is_empty() {
        return Err(SharingError::InvalidSecret("secret is empty".to_string()));
    }
    if !secret.is_ascii() {
        return Err(SharingError::InvalidSecret(
            "secret must be ASCII".to_string(),
        ));
    }
    if secret.contains(&0) {
        return Err(SharingError::InvalidSecret(
            "secret must not contain NUL bytes".to_string(),
        ));
    }
    Ok(())
}

/// [`SecretSharer::split`] with the interchange configuration.
pub fn split(secret: &[u8], share_count: usize, threshold: usize) -> Result<Vec<ShareBundle>> {
    SecretSharer::default().split(secret, share_count, threshold)
}

/// [`SecretSharer::combine`] with the interchange configuration.
pub fn combine(bundles: &[ShareBundle]) -> Result<Vec<u8>> {
    SecretSharer::default().combine(bundles)
}
