//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 4000;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Maximum display name length
pub const MAX_NAME_LENGTH: u64 = 100;

// =============================================================================
// GRADER DEFAULTS
// =============================================================================

/// Wall-clock budget for a whole program run, in milliseconds
pub const DEFAULT_RUN_TIMEOUT_MS: u64 = 2_000;

/// Wall-clock budget for a single test case, in milliseconds
pub const DEFAULT_CASE_TIMEOUT_MS: u64 = 1_000;

/// Interpreter operations allowed per evaluation
pub const DEFAULT_MAX_OPERATIONS: u64 = 5_000_000;

/// Maximum script call depth
pub const DEFAULT_MAX_CALL_LEVELS: usize = 64;

/// Stack size of each grading thread, sized for `DEFAULT_MAX_CALL_LEVELS`
/// nested script calls in an unoptimized build
pub const GRADER_STACK_BYTES: usize = 64 * 1024 * 1024;

/// Maximum captured output per run, in bytes
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 64 * 1024;

/// Maximum submitted source size, in bytes
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 64 * 1024;

/// Maximum string length a script may build
pub const MAX_SCRIPT_STRING_SIZE: usize = 1024 * 1024;

/// Maximum array length a script may build
pub const MAX_SCRIPT_ARRAY_SIZE: usize = 100_000;

/// Placeholder written when a successful run produced no output
pub const NO_OUTPUT_MESSAGE: &str = "Code executed successfully (no output)";

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers
pub mod languages {
    pub const RHAI: &str = "rhai";
    pub const JAVASCRIPT: &str = "javascript";
    pub const PYTHON: &str = "python";
    pub const JAVA: &str = "java";
    pub const CPP: &str = "cpp";
}

/// File extensions for each language
pub mod file_extensions {
    pub const RHAI: &str = "rhai";
    pub const JAVASCRIPT: &str = "js";
    pub const PYTHON: &str = "py";
    pub const JAVA: &str = "java";
    pub const CPP: &str = "cpp";
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const STUDENT: &str = "student";
}

// =============================================================================
// WORKSHOP DEFAULTS
// =============================================================================

/// Defaults applied to optional workshop fields
pub mod workshop_defaults {
    pub const LEVEL: &str = "Beginner";
    pub const PRICE: &str = "Free";
    pub const LANGUAGE: &str = "English";
    pub const CATEGORY: &str = "Web Development";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum workshop title length
pub const MAX_WORKSHOP_TITLE_LENGTH: u64 = 256;

/// Maximum workshop description length
pub const MAX_WORKSHOP_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum number of tags on a workshop
pub const MAX_WORKSHOP_TAGS: u64 = 32;
