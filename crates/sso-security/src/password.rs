//! Password hashing with Argon2id, plus bcrypt for hashes stored by older deployments.
//!
//! Stored hashes are self-describing: the algorithm tag prefix selects the
//! verifier and the cost parameters are read back from the stored string, so the
//! configured scheme can change without invalidating existing hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use sso_shared::config::{PasswordAlgorithm, PasswordSettings};
use thiserror::Error;

const BCRYPT_MIN_COST: u32 = 4;
const BCRYPT_MAX_COST: u32 = 31;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Invalid hash cost: {0}")]
    InvalidCost(String),
    #[error("Hash error: {0}")]
    HashError(String),
}

/// Algorithm and cost used for new hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    Argon2id {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
    Bcrypt {
        cost: u32,
    },
}

impl From<&PasswordSettings> for HashScheme {
    fn from(settings: &PasswordSettings) -> Self {
        match settings.algorithm {
            PasswordAlgorithm::Argon2id => HashScheme::Argon2id {
                memory_kib: settings.argon2_memory_kib,
                iterations: settings.argon2_iterations,
                parallelism: settings.argon2_parallelism,
            },
            PasswordAlgorithm::Bcrypt => HashScheme::Bcrypt {
                cost: settings.bcrypt_cost,
            },
        }
    }
}

enum Hasher {
    Argon2(Argon2<'static>),
    Bcrypt(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoredFormat {
    Argon2,
    Bcrypt,
}

impl StoredFormat {
    fn detect(stored_hash: &str) -> Option<Self> {
        if stored_hash.starts_with("$argon2") {
            Some(StoredFormat::Argon2)
        } else if ["$2a$", "$2b$", "$2x$", "$2y$"]
            .iter()
            .any(|tag| stored_hash.starts_with(tag))
        {
            Some(StoredFormat::Bcrypt)
        } else {
            None
        }
    }
}

pub struct PasswordService {
    hasher: Hasher,
    decoy_hash: String,
}

impl PasswordService {
    /// Fails only when the cost parameters are unusable.
    pub fn new(scheme: HashScheme) -> Result<Self, PasswordError> {
        let hasher = match scheme {
            HashScheme::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => {
                let params = Params::new(memory_kib, iterations, parallelism, None)
                    .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;
                Hasher::Argon2(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
            }
            HashScheme::Bcrypt { cost } => {
                if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&cost) {
                    return Err(PasswordError::InvalidCost(format!(
                        "bcrypt cost {} outside {}..={}",
                        cost, BCRYPT_MIN_COST, BCRYPT_MAX_COST
                    )));
                }
                Hasher::Bcrypt(cost)
            }
        };

        let decoy_plaintext = SaltString::generate(&mut OsRng);
        let decoy_hash = Self::hash_with(&hasher, decoy_plaintext.as_str())?;
        Ok(Self { hasher, decoy_hash })
    }

    pub fn from_settings(settings: &PasswordSettings) -> Result<Self, PasswordError> {
        Self::new(HashScheme::from(settings))
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Self::hash_with(&self.hasher, password)
    }

    /// Constant-time check of `password` against `stored_hash`.
    /// Malformed or unrecognised hashes verify as `false`.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match StoredFormat::detect(stored_hash) {
            Some(StoredFormat::Argon2) => match PasswordHash::new(stored_hash) {
                Ok(parsed) => Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok(),
                Err(_) => false,
            },
            Some(StoredFormat::Bcrypt) => bcrypt::verify(password, stored_hash).unwrap_or(false),
            None => false,
        }
    }

    /// Burns one verification worth of CPU; always `false`.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.decoy_hash);
        false
    }

    fn hash_with(hasher: &Hasher, password: &str) -> Result<String, PasswordError> {
        match hasher {
            Hasher::Argon2(argon2) => {
                let salt = SaltString::generate(&mut OsRng);
                argon2
                    .hash_password(password.as_bytes(), &salt)
                    .map(|h| h.to_string())
                    .map_err(|e| PasswordError::HashError(e.to_string()))
            }
            Hasher::Bcrypt(cost) => {
                bcrypt::hash(password, *cost).map_err(|e| PasswordError::HashError(e.to_string()))
            }
        }
    }
}
