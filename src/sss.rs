use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SharingError};
use crate::field::PrimeField;
use crate::polynomial::Polynomial;

/// x-coordinate to y-value, one entry per contributing participant.
pub type PointMap = BTreeMap<u32, BigUint>;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ShamirSecretSharing {
    pub threshold: usize,   //t
    pub share_count: usize, //n
}

impl ShamirSecretSharing {
    pub fn new(threshold: usize, share_count: usize) -> Result<Self> {
        if threshold < 2 || share_count < threshold || share_count > u32::MAX as usize {
            return Err(SharingError::InvalidThreshold {
                threshold,
                share_count,
            });
        }
        Ok(ShamirSecretSharing {
            threshold,
            share_count,
        })
    }

    /// Re-checks the parameters against `field`.
    ///
    /// Identifiers 1..=n must stay distinct and non-zero modulo p, so n < p.
    pub fn validate(&self, field: &PrimeField) -> Result<()> {
        ShamirSecretSharing::new(self.threshold, self.share_count)?;
        if BigUint::from(self.share_count) >= *field.modulus() {
            return Err(SharingError::InvalidThreshold {
                threshold: self.threshold,
                share_count: self.share_count,
            });
        }
        Ok(())
    }

    /// Participant identifiers 1..=n.
    pub fn indices(&self) -> Vec<u32> {
        (1..=self.share_count as u32).collect()
    }
}

/// A point (x, f(x)) on a secret-hiding polynomial.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Share {
    pub x: u32,
    pub y: BigUint,
}

/// Hides `secret` in a fresh random polynomial of degree t-1 and evaluates it
/// at x = 1..=n.
pub fn split_secret<R: RngCore + CryptoRng>(
    field: &PrimeField,
    secret: &BigUint,
    params: &ShamirSecretSharing,
    rng: &mut R,
) -> Result<Vec<Share>> {
    params.validate(field)?;
    let polynomial = Polynomial::random(field, secret, params.threshold - 1, rng)?;
    split_secret_with_polynomial(field, &polynomial, params)
}

/// Deterministic variant of [`split_secret`] over a caller-supplied polynomial.
pub fn split_secret_with_polynomial(
    field: &PrimeField,
    polynomial: &Polynomial,
    params: &ShamirSecretSharing,
) -> Result<Vec<Share>> {
    params.validate(field)?;
    if polynomial.coefficients().len() != params.threshold {
        return Err(SharingError::DegenerateInput(format!(
            "polynomial of degree {} cannot back threshold {}",
            polynomial.degree(),
            params.threshold
        )));
    }

    let indices = params.indices();
    let values = polynomial.evaluate_many(field, &indices);
    Ok(indices
        .into_iter()
        .zip(values)
        .map(|(x, y)| Share { x, y })
        .collect())
}

/// Lagrange interpolation at x = 0.
///
/// Each y is weighted by prod_{j != i} x_j / (x_j - x_i). The number of points
/// is not checked against the split-time threshold: too few points yield a
/// wrong value rather than an error.
pub fn reconstruct(field: &PrimeField, points: &PointMap) -> Result<BigUint> {
    if points.is_empty() {
        return Err(SharingError::DegenerateInput(
            "no points to interpolate".to_string(),
        ));
    }

    let xs: Vec<BigUint> = points.keys().map(|&x| BigUint::from(x)).collect();

    points
        .values()
        .enumerate()
        .try_fold(BigUint::zero(), |acc, (i, yi)| -> Result<BigUint> {
            let basis = lagrange_basis_at_zero(field, &xs, i)?;
            Ok(field.add(&acc, &field.mul(&basis, &field.normalize(yi))))
        })
}

fn lagrange_basis_at_zero(field: &PrimeField, xs: &[BigUint], i: usize) -> Result<BigUint> {
    let xi = &xs[i];
    xs.iter()
        .enumerate()
        .filter(|(j, _)| *j != i)
        .try_fold(BigUint::one(), |acc, (_, xj)| -> Result<BigUint> {
            let den_inv = field.inverse(&field.sub(xj, xi))?;
            Ok(field.mul(&acc, &field.mul(xj, &den_inv)))
        })
}

/// Collects shares into the point map consumed by [`reconstruct`].
pub fn to_point_map(shares: &[Share]) -> Result<PointMap> {
    let mut points = PointMap::new();
    for share in shares {
        if points.insert(share.x, share.y.clone()).is_some() {
            return Err(SharingError::DuplicateIdentifier(share.x));
        }
    }
    Ok(points)
}
