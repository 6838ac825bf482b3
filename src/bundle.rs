//! Per-participant share bundles.
//!
//! Splitting produces a (chunk x participant) matrix of y-values. Each
//! participant receives one row of its transpose, written as decimal values
//! joined by `+` in chunk order, e.g. `3 1942+77+1031`.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::{Result, SharingError};
use crate::sss::{PointMap, Share};

pub const DELIMITER: char = '+';

/// One participant's y-values across every chunk of a secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareBundle {
    pub x: u32,
    pub values: Vec<BigUint>,
}

impl ShareBundle {
    /// Parses the identifier and value list given as two separate tokens.
    pub fn parse(x: &str, bundle: &str) -> Result<Self> {
        let x = x
            .trim()
            .parse::<u32>()
            .map_err(|e| SharingError::MalformedBundle(format!("identifier {:?}: {}", x, e)))?;
        if x == 0 {
            return Err(SharingError::MalformedBundle(
                "identifier 0 is reserved for the secret".to_string(),
            ));
        }
        Ok(ShareBundle {
            x,
            values: split_on_delimiter(bundle)?,
        })
    }

    /// The `+`-joined value list without the identifier.
    pub fn values_string(&self) -> String {
        join_row(&self.values)
    }
}

impl fmt::Display for ShareBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.values_string())
    }
}

impl FromStr for ShareBundle {
    type Err = SharingError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(x), Some(bundle), None) => ShareBundle::parse(x, bundle),
            _ => Err(SharingError::MalformedBundle(format!(
                "expected `<x> <values>`, got {:?}",
                s
            ))),
        }
    }
}

fn join_row(values: &[BigUint]) -> String {
    values
        .iter()
        .map(|v| v.to_str_radix(10))
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// Turns rows of equal length into columns. Unequal rows are a caller error.
fn transpose<T: Clone>(rows: &[Vec<T>]) -> Result<Vec<Vec<T>>> {
    let width = match rows.first() {
        Some(first) => first.len(),
        None => return Ok(Vec::new()),
    };
    if let Some(row) = rows.iter().find(|r| r.len() != width) {
        return Err(SharingError::ShareCountMismatch {
            expected: width,
            found: row.len(),
        });
    }
    Ok((0..width)
        .map(|j| rows.iter().map(|row| row[j].clone()).collect())
        .collect())
}

/// Reshapes per-chunk share vectors into one `+`-joined string per participant.
///
/// `[[23, 345], [100, 99], [19, 50]]` becomes `["23+100+19", "345+99+50"]`.
pub fn join(chunk_shares: &[Vec<BigUint>]) -> Result<Vec<String>> {
    Ok(transpose(chunk_shares)?
        .iter()
        .map(|column| join_row(column))
        .collect())
}

/// Inverse of the per-row construction in [`join`].
pub fn split_on_delimiter(bundle: &str) -> Result<Vec<BigUint>> {
    bundle
        .trim()
        .split(DELIMITER)
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SharingError::MalformedBundle(format!(
                    "{:?} is not a decimal integer",
                    part
                )));
            }
            BigUint::parse_bytes(part.as_bytes(), 10).ok_or_else(|| {
                SharingError::MalformedBundle(format!("{:?} is not a decimal integer", part))
            })
        })
        .collect()
}

/// Builds participant bundles from the shares of each chunk, in chunk order.
///
/// Every chunk must have been evaluated at the same identifiers in the same
/// order.
pub fn bundles_from_chunk_shares(chunk_shares: &[Vec<Share>]) -> Result<Vec<ShareBundle>> {
    let columns = transpose(chunk_shares)?;
    columns
        .into_iter()
        .map(|column| {
            let x = column.first().map(|s| s.x).unwrap_or_default();
            if let Some(other) = column.iter().find(|s| s.x != x) {
                return Err(SharingError::MalformedBundle(format!(
                    "identifier {} mixed with {} in one bundle",
                    other.x, x
                )));
            }
            Ok(ShareBundle {
                x,
                values: column.into_iter().map(|s| s.y).collect(),
            })
        })
        .collect()
}

/// Point map #i holds `x -> values[i]` for every supplied bundle.
pub fn point_maps_from_bundles(bundles: &[ShareBundle]) -> Result<Vec<PointMap>> {
    let chunk_count = match bundles.first() {
        Some(first) => first.values.len(),
        None => return Ok(Vec::new()),
    };

    let mut maps = vec![PointMap::new(); chunk_count];
    for bundle in bundles {
        if bundle.x == 0 {
            return Err(SharingError::MalformedBundle(
                "identifier 0 is reserved for the secret".to_string(),
            ));
        }
        if bundle.values.len() != chunk_count {
            return Err(SharingError::ShareCountMismatch {
                expected: chunk_count,
                found: bundle.values.len(),
            });
        }
        for (map, value) in maps.iter_mut().zip(&bundle.values) {
            if map.insert(bundle.x, value.clone()).is_some() {
                return Err(SharingError::DuplicateIdentifier(bundle.x));
            }
        }
    }
    Ok(maps)
}

/// Parses raw `(x, bundle)` pairs and regroups them per chunk.
pub fn build_per_chunk_point_maps<S: AsRef<str>>(inputs: &[(u32, S)]) -> Result<Vec<PointMap>> {
    let bundles = inputs
        .iter()
        .map(|(x, bundle)| -> Result<ShareBundle> {
            Ok(ShareBundle {
                x: *x,
                values: split_on_delimiter(bundle.as_ref())?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    point_maps_from_bundles(&bundles)
}
