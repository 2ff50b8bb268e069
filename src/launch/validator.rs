use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use crate::launch::error::LaunchError;
const MAX_PROGRAM_LEN: usize = 4096;
const MAX_LABEL_LEN: usize = 256;
const MAX_HOST_LEN: usize = 253;
const MAX_ENV_KEY_LEN: usize = 1024;
const MAX_ENV_VALUE_LEN: usize = 4096;
/// Validation utilities for launch configuration
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the program every launch task invokes.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError::InvalidConfiguration`] if:
    /// - Program is empty or contains only whitespace
    /// - Program has leading or trailing whitespace
    /// - Program contains null bytes
    /// - Program length exceeds maximum allowed length
    ///
    /// # Examples
    /// ```rust
    /// use server_starter::launch::validator::ConfigValidator;
    ///
    /// assert!(ConfigValidator::validate_program("ClusterServer.exe").is_ok());
    /// assert!(ConfigValidator::validate_program("").is_err());
    /// ```
    pub fn validate_program(program: &str) -> Result<(), LaunchError> {
        if program.trim().is_empty() {
            return Err(LaunchError::InvalidConfiguration(
                "Program cannot be empty".to_string(),
            ));
        }
        if program.trim() != program {
            return Err(LaunchError::InvalidConfiguration(
                "Program cannot have leading or trailing whitespace".to_string(),
            ));
        }
        if program.contains('\0') {
            return Err(LaunchError::InvalidConfiguration(
                "Program contains null characters".to_string(),
            ));
        }
        if program.len() > MAX_PROGRAM_LEN {
            return Err(LaunchError::InvalidConfiguration(
                "Program length exceeds maximum allowed length".to_string(),
            ));
        }

        Ok(())
    }

    /// Validates the half-open port range.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError::InvalidConfiguration`] if the range is empty
    /// or starts at port 0.
    ///
    /// # Examples
    /// ```rust
    /// use server_starter::launch::validator::ConfigValidator;
    ///
    /// assert!(ConfigValidator::validate_ports(&(8060..8080)).is_ok());
    /// assert!(ConfigValidator::validate_ports(&(8080..8060)).is_err());
    /// ```
    pub fn validate_ports(ports: &Range<u16>) -> Result<(), LaunchError> {
        if ports.start == 0 {
            return Err(LaunchError::InvalidConfiguration(
                "Port range cannot start at 0".to_string(),
            ));
        }
        if ports.is_empty() {
            return Err(LaunchError::InvalidConfiguration(format!(
                "Port range {}..{} is empty",
                ports.start, ports.end
            )));
        }

        Ok(())
    }

    /// Validates the label passed with `-n`.
    ///
    /// The label is a single argument and also the URL path segment the
    /// servers listen on, so it cannot contain whitespace.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError::InvalidConfiguration`] if:
    /// - Label is empty
    /// - Label contains whitespace or null bytes
    /// - Label length exceeds maximum allowed length
    pub fn validate_label(label: &str) -> Result<(), LaunchError> {
        if label.is_empty() {
            return Err(LaunchError::InvalidConfiguration(
                "Label cannot be empty".to_string(),
            ));
        }
        if label.chars().any(char::is_whitespace) {
            return Err(LaunchError::InvalidConfiguration(format!(
                "Label '{label}' cannot contain whitespace"
            )));
        }
        if label.contains('\0') {
            return Err(LaunchError::InvalidConfiguration(
                "Label contains null characters".to_string(),
            ));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(LaunchError::InvalidConfiguration(format!(
                "Label '{label}' exceeds maximum length"
            )));
        }

        Ok(())
    }

    /// Validates the delay candidate set.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError::InvalidConfiguration`] if there are no candidates.
    pub fn validate_delays(delays: &[u64]) -> Result<(), LaunchError> {
        if delays.is_empty() {
            return Err(LaunchError::InvalidConfiguration(
                "Delay candidate set cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Validates the host used to build replica addresses.
    pub fn validate_host(host: &str) -> Result<(), LaunchError> {
        if host.is_empty() {
            return Err(LaunchError::InvalidConfiguration(
                "Host cannot be empty".to_string(),
            ));
        }
        if host.chars().any(|c| c.is_whitespace() || c == '/' || c == '\0') {
            return Err(LaunchError::InvalidConfiguration(format!(
                "Host '{host}' contains invalid characters"
            )));
        }
        if host.len() > MAX_HOST_LEN {
            return Err(LaunchError::InvalidConfiguration(format!(
                "Host '{host}' exceeds maximum length"
            )));
        }

        Ok(())
    }

    /// Validates working directory
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError::InvalidConfiguration`] if the directory does
    /// not exist or is not a directory.
    pub fn validate_working_dir(dir: &str) -> Result<(), LaunchError> {
        let path = Path::new(dir);

        if !path.exists() {
            return Err(LaunchError::InvalidConfiguration(format!(
                "Working directory does not exist: {dir}"
            )));
        }
        if !path.is_dir() {
            return Err(LaunchError::InvalidConfiguration(format!(
                "Working directory is not a directory: {dir}"
            )));
        }

        Ok(())
    }

    /// Validates environment variables
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError::InvalidConfiguration`] if:
    /// - any key is empty, or contains `=`, spaces, or null bytes
    /// - any value contains null bytes
    /// - any key or value exceeds maximum length
    pub fn validate_env_vars(env: &HashMap<String, String>) -> Result<(), LaunchError> {
        for (key, value) in env {
            if key.trim().is_empty() {
                return Err(LaunchError::InvalidConfiguration(
                    "Environment variable key cannot be empty".to_string(),
                ));
            }
            if key.contains('=') {
                return Err(LaunchError::InvalidConfiguration(format!(
                    "Environment variable key '{key}' cannot contain '='"
                )));
            }
            if key.contains(' ') {
                return Err(LaunchError::InvalidConfiguration(format!(
                    "Environment variable key '{key}' cannot contain spaces"
                )));
            }
            if key.contains('\0') || value.contains('\0') {
                return Err(LaunchError::InvalidConfiguration(format!(
                    "Environment variable '{key}' contains null characters"
                )));
            }
            if key.len() > MAX_ENV_KEY_LEN {
                return Err(LaunchError::InvalidConfiguration(format!(
                    "Environment variable key '{key}' exceeds maximum length"
                )));
            }
            if value.len() > MAX_ENV_VALUE_LEN {
                return Err(LaunchError::InvalidConfiguration(format!(
                    "Environment variable '{key}' value exceeds maximum length"
                )));
            }
        }

        Ok(())
    }
}
