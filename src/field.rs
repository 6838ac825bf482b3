use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::{Result, SharingError};

/// Decimal form of 2^127 - 1, the interchange modulus.
pub const MERSENNE_127: &str = "170141183460469231731687303715884105727";

const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Arithmetic in Z/pZ for an explicit prime p.
///
/// Every value returned by these methods lies in `[0, p)`. The field is passed
/// by reference into polynomial evaluation and interpolation so several moduli
/// can be used side by side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    /// Builds a field after checking that `modulus` is a probable prime >= 3.
    pub fn new(modulus: BigUint) -> Result<Self> {
        if modulus < BigUint::from(3u32) {
            return Err(SharingError::InvalidModulus(format!(
                "{} is too small",
                modulus
            )));
        }
        if !is_probable_prime(&modulus) {
            return Err(SharingError::InvalidModulus(format!(
                "{} is not prime",
                modulus
            )));
        }
        Ok(PrimeField { modulus })
    }

    /// The field over 2^127 - 1.
    pub fn mersenne_127() -> Self {
        PrimeField {
            modulus: (BigUint::one() << 127u32) - BigUint::one(),
        }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn bits(&self) -> u64 {
        self.modulus.bits()
    }

    pub fn contains(&self, value: &BigUint) -> bool {
        value < &self.modulus
    }

    /// Maps any integer, negative ones included, into `[0, p)`.
    pub fn reduce(&self, value: &BigInt) -> BigUint {
        let modulus = BigInt::from(self.modulus.clone());
        // mod_floor with a positive divisor is never negative
        let (_, magnitude) = value.mod_floor(&modulus).into_parts();
        magnitude
    }

    pub fn normalize(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let b = b % &self.modulus;
        (a + &self.modulus - b) % &self.modulus
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Modular exponentiation; a^(p-2) is the Fermat form of the inverse.
    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    /// Returns b with a*b = 1 (mod p).
    ///
    /// Fails with [`SharingError::NonInvertibleElement`] when gcd(a, p) != 1,
    /// which for a prime p means a = 0 (mod p).
    pub fn inverse(&self, a: &BigUint) -> Result<BigUint> {
        let a = BigInt::from(a % &self.modulus);
        let modulus = BigInt::from(self.modulus.clone());
        let egcd = a.extended_gcd(&modulus);
        if !egcd.gcd.is_one() {
            let (_, value) = a.into_parts();
            return Err(SharingError::NonInvertibleElement { value });
        }
        Ok(self.reduce(&egcd.x))
    }

    /// Uniform sample from `[0, p)`.
    pub fn random_element<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_below(&self.modulus)
    }

    /// Uniform sample from `[1, p)`, resampling on zero.
    pub fn random_nonzero_element<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        loop {
            let candidate = self.random_element(rng);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }
}

impl Default for PrimeField {
    fn default() -> Self {
        PrimeField::mersenne_127()
    }
}

/// Miller-Rabin over the first twelve primes as witnesses.
///
/// Deterministic below 3.3 * 10^24, probabilistic above.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }
    for w in WITNESSES {
        let w = BigUint::from(w);
        if n == &w {
            return true;
        }
        if (n % &w).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - BigUint::one();
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    WITNESSES.iter().all(|&w| {
        let mut x = BigUint::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            return true;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                return true;
            }
        }
        false
    })
}
