//! Application-wide constants

pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 259_200;
/// Ten years.
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 315_360_000;
pub const DEFAULT_COOKIE_NAME: &str = "sso_session";
pub const DEFAULT_COOKIE_PATH: &str = "/";
pub const MIN_SECRET_LENGTH: usize = 32;
pub const GENERATED_SECRET_BYTES: usize = 64;

/// Shared by the unknown-email and wrong-password paths.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

pub const DEFAULT_ARGON2_MEMORY_KIB: u32 = 19_456;
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 2;
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 1;
pub const DEFAULT_BCRYPT_COST: u32 = 12;
