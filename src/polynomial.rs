use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::{Result, SharingError};
use crate::field::PrimeField;

/// Coefficients over a prime field, index i holding the coefficient of x^i.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<BigUint>,
}

impl Polynomial {
    pub fn from_coefficients(coefficients: Vec<BigUint>) -> Self {
        Polynomial { coefficients }
    }

    /// Reduces possibly negative coefficients into the field.
    pub fn from_signed(field: &PrimeField, coefficients: &[BigInt]) -> Self {
        Polynomial {
            coefficients: coefficients.iter().map(|c| field.reduce(c)).collect(),
        }
    }

    /// Samples a polynomial of exactly `degree` whose constant term is `constant`.
    ///
    /// Coefficients 1..degree-1 are uniform over the field; the top coefficient
    /// is resampled until non-zero so the threshold implied by the degree holds.
    pub fn random<R: RngCore + CryptoRng>(
        field: &PrimeField,
        constant: &BigUint,
        degree: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if degree == 0 {
            return Err(SharingError::DegenerateInput(
                "polynomial degree must be at least 1".to_string(),
            ));
        }
        if !field.contains(constant) {
            return Err(SharingError::DegenerateInput(
                "constant term is not a field element".to_string(),
            ));
        }

        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(constant.clone());
        coefficients.extend((1..degree).map(|_| field.random_element(rng)));
        coefficients.push(field.random_nonzero_element(rng));

        Ok(Polynomial { coefficients })
    }

    pub fn coefficients(&self) -> &[BigUint] {
        &self.coefficients
    }

    pub fn constant(&self) -> Option<&BigUint> {
        self.coefficients.first()
    }

    /// Length minus one; an empty polynomial reports degree 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner evaluation at `x`, reduced into the field.
    pub fn evaluate(&self, field: &PrimeField, x: &BigUint) -> BigUint {
        self.coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, c| field.add(&field.mul(&acc, x), c))
    }

    /// Evaluates at every x in `points`, in order.
    pub fn evaluate_many(&self, field: &PrimeField, points: &[u32]) -> Vec<BigUint> {
        points
            .iter()
            .map(|&x| self.evaluate(field, &BigUint::from(x)))
            .collect()
    }
}

impl fmt::Display for Polynomial {
    /// Highest degree first, zero terms skipped, e.g. `2x^4 + 3x^2 + 4x + 2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .coefficients
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| !c.is_zero())
            .map(|(power, c)| {
                let coefficient = if c.is_one() && power != 0 {
                    String::new()
                } else {
                    c.to_string()
                };
                match power {
                    0 => coefficient,
                    1 => format!("{}x", coefficient),
                    _ => format!("{}x^{}", coefficient, power),
                }
            })
            .collect();

        if terms.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", terms.join(" + "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn poly(values: &[u32]) -> Polynomial {
        Polynomial::from_coefficients(values.iter().map(|&v| BigUint::from(v)).collect())
    }

    #[test]
    fn evaluates_worked_example() {
        let field = PrimeField::new(BigUint::from(1613u32)).unwrap();
        let p = poly(&[1234, 166, 94]);
        let shares = p.evaluate_many(&field, &[1, 2, 3, 4, 5, 6]);
        let expected: Vec<BigUint> = [1494u32, 329, 965, 176, 1188, 775]
            .iter()
            .map(|&v| BigUint::from(v))
            .collect();
        assert_eq!(shares, expected);
    }

    #[test]
    fn evaluation_does_not_mutate() {
        let field = PrimeField::new(BigUint::from(1613u32)).unwrap();
        let p = poly(&[1234, 166, 94]);
        let before = p.clone();
        let first = p.evaluate(&field, &BigUint::from(4u32));
        let _ = p.evaluate(&field, &BigUint::from(9u32));
        let second = p.evaluate(&field, &BigUint::from(4u32));
        assert_eq!(first, second);
        assert_eq!(p, before);
    }

    #[test]
    fn negative_coefficients_are_normalized() {
        let field = PrimeField::new(BigUint::from(17u32)).unwrap();
        // -1 + 2x == 16 + 2x (mod 17)
        let p = Polynomial::from_signed(&field, &[BigInt::from(-1), BigInt::from(2)]);
        assert_eq!(p.coefficients()[0], BigUint::from(16u32));
        assert_eq!(p.evaluate(&field, &BigUint::from(3u32)), BigUint::from(5u32));
    }

    #[test]
    fn random_polynomial_has_stated_degree() {
        let field = PrimeField::new(BigUint::from(5u32)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let secret = BigUint::from(3u32);
        for degree in 1..6 {
            for _ in 0..200 {
                let p = Polynomial::random(&field, &secret, degree, &mut rng).unwrap();
                assert_eq!(p.degree(), degree);
                assert_eq!(p.constant(), Some(&secret));
                assert!(!p.coefficients()[degree].is_zero());
                assert!(p.coefficients().iter().all(|c| field.contains(c)));
            }
        }
    }

    #[test]
    fn random_rejects_degenerate_input() {
        let field = PrimeField::new(BigUint::from(5u32)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Polynomial::random(&field, &BigUint::one(), 0, &mut rng),
            Err(SharingError::DegenerateInput(_))
        ));
        assert!(matches!(
            Polynomial::random(&field, &BigUint::from(5u32), 2, &mut rng),
            Err(SharingError::DegenerateInput(_))
        ));
    }

    #[test]
    fn display_formats_terms() {
        assert_eq!(poly(&[2, 4, 3, 0, 2]).to_string(), "2x^4 + 3x^2 + 4x + 2");
        assert_eq!(poly(&[1, 0, 0, 0, 7]).to_string(), "7x^4 + 1");
        assert_eq!(poly(&[1, 1, 5, 0, 0]).to_string(), "5x^2 + x + 1");
        assert_eq!(poly(&[0, 1, 5, 0, 0]).to_string(), "5x^2 + x");
        assert_eq!(poly(&[0, 0]).to_string(), "0");
    }
}
