//! CLI argument value parsers
//!
//! Checks that go beyond what clap can validate automatically. Each returns
//! the parsed value or a message clap prints next to the offending flag.

use std::fs;
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Upper bound for `migrate --rollback`
const MAX_ROLLBACK_STEPS: u32 = 100;

/// Longest hostname accepted for `--host`
const MAX_HOST_LEN: usize = 253;

/// Validate port number is within valid range (1-65535)
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!("Port must be a valid number between 1 and 65535, got: '{port_str}'")
    })?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// Validate that a configuration file exists and is readable
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{path_str}'"));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{path_str}'"));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{path_str}': {e}"))
}

/// Validate rollback steps is between 1 and 100
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!("Rollback steps must be a valid positive number, got: '{steps_str}'")
    })?;

    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }

    if steps > MAX_ROLLBACK_STEPS {
        return Err(format!(
            "Rollback steps cannot exceed {MAX_ROLLBACK_STEPS}"
        ));
    }

    Ok(steps)
}

/// Validate host address format (basic validation)
///
/// Dotted-digit input must be a valid IPv4 address; anything else is
/// treated as a hostname.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.contains(char::is_whitespace) {
        return Err("Host address cannot contain spaces".to_string());
    }

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return host
            .parse::<Ipv4Addr>()
            .map(|_| host.to_string())
            .map_err(|_| format!("Invalid IPv4 address format: '{host_str}'"));
    }

    if host.len() > MAX_HOST_LEN {
        return Err(format!(
            "Host address is too long (maximum {MAX_HOST_LEN} characters)"
        ));
    }

    Ok(host.to_string())
}

/// Validate a user id for `token --user`
pub fn validate_user_id(user_str: &str) -> Result<String, String> {
    let user = user_str.trim();

    if user.is_empty() {
        return Err("User id cannot be empty".to_string());
    }

    Ok(user.to_string())
}
