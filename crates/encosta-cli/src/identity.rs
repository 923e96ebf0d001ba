//! Caller identity resolution for CLI commands.
//!
//! The resolution chain: `--as` flag > `ENCOSTA_IDENTITY` env > user config
//! default. The resolved id is only a claim; commands verify it against the
//! user registry before acting on it.

use std::env;

/// Errors from caller resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityResolutionError {
    /// Human-readable description.
    pub message: String,
    /// Machine error code.
    pub code: &'static str,
}

impl std::fmt::Display for IdentityResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for IdentityResolutionError {}

/// Environment reader trait for dependency injection in tests.
trait EnvReader {
    fn get(&self, key: &str) -> Option<String>;
}

/// Real environment reader.
struct RealEnv;

impl EnvReader for RealEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Core resolution logic, parameterized by environment reader.
fn resolve_caller_with(
    cli_flag: Option<&str>,
    env: &dyn EnvReader,
    config_default: Option<&str>,
) -> Option<String> {
    // Step 1: explicit --as flag
    if let Some(caller) = cli_flag {
        if !caller.is_empty() {
            return Some(caller.to_string());
        }
    }

    // Step 2: ENCOSTA_IDENTITY env
    if let Some(val) = env.get("ENCOSTA_IDENTITY") {
        return Some(val);
    }

    // Step 3: default identity from the user config file
    if let Some(id) = config_default {
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    None
}

/// Resolve the caller id following the 3-step chain:
///
/// 1. `--as` CLI flag (passed as `cli_flag`)
/// 2. `ENCOSTA_IDENTITY` environment variable
/// 3. `identity` from the user-level config file
///
/// Returns `None` if no id could be resolved.
pub fn resolve_caller(cli_flag: Option<&str>, config_default: Option<&str>) -> Option<String> {
    resolve_caller_with(cli_flag, &RealEnv, config_default)
}

/// Resolve the caller id, returning an error if not found.
///
/// Use this for commands that act on behalf of a user.
pub fn require_caller(
    cli_flag: Option<&str>,
    config_default: Option<&str>,
) -> Result<String, IdentityResolutionError> {
    resolve_caller(cli_flag, config_default).ok_or_else(|| IdentityResolutionError {
        message: "Caller identity required for this command.".to_string(),
        code: "missing_identity",
    })
}
