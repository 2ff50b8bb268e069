use std::collections::HashMap;
use std::ops::Range;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::launch::{command::LaunchCommand, error::LaunchError, validator::ConfigValidator};

/// Program launched when none is configured
pub const DEFAULT_PROGRAM: &str = "ClusterServer.exe";
/// First port (inclusive) and last port (exclusive) of the default fleet
pub const DEFAULT_PORTS: Range<u16> = 8060..8080;
pub const DEFAULT_LABEL: &str = "qqq";
pub const DEFAULT_DELAYS: [u64; 2] = [10, 100];
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Configuration for one batch launch
///
/// Every field is passed to the [`Launcher`](crate::launch::launcher::Launcher)
/// explicitly; nothing is read from globals or the environment.
///
/// # Examples
///
/// ```rust
/// use server_starter::launch::config::LaunchConfig;
///
/// let config = LaunchConfig::new("ClusterServer.exe")
///     .ports(8060..8062)
///     .label("qqq")
///     .delays([10, 100]);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.port_count(), 2);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    /// The executable every launch task invokes
    pub program: String,

    /// Half-open range of ports, one launched process per port
    ///
    /// The end is exclusive, so port 65535 itself cannot be launched.
    pub ports: Range<u16>,

    /// Name passed with `-n`, also the URL path the servers answer on
    pub label: String,

    /// Candidate values for `-d`, one picked at random per process
    pub delays: Vec<u64>,

    /// Append `-a` to every command
    pub async_mode: bool,

    /// Host used when listing replica addresses
    pub host: String,

    /// Working directory for the launched processes
    pub working_dir: Option<String>,

    /// Extra environment variables on top of the inherited environment
    pub env: Option<HashMap<String, String>>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        LaunchConfig {
            program: DEFAULT_PROGRAM.to_string(),
            ports: DEFAULT_PORTS,
            label: DEFAULT_LABEL.to_string(),
            delays: DEFAULT_DELAYS.to_vec(),
            async_mode: false,
            host: DEFAULT_HOST.to_string(),
            working_dir: None,
            env: None,
        }
    }
}

impl LaunchConfig {
    pub fn new(program: impl Into<String>) -> Self {
        LaunchConfig {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn ports(mut self, ports: Range<u16>) -> Self {
        self.ports = ports;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn delays<I>(mut self, delays: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.delays = delays.into_iter().collect();
        self
    }

    pub fn async_mode(mut self, enabled: bool) -> Self {
        self.async_mode = enabled;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env<K, V, I>(mut self, env: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.env = Some(env.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Number of processes a launch with this configuration starts
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::InvalidConfiguration`] for the first field that
    /// fails its check in [`ConfigValidator`].
    pub fn validate(&self) -> Result<(), LaunchError> {
        ConfigValidator::validate_program(&self.program)?;
        ConfigValidator::validate_ports(&self.ports)?;
        ConfigValidator::validate_label(&self.label)?;
        ConfigValidator::validate_delays(&self.delays)?;
        ConfigValidator::validate_host(&self.host)?;

        if let Some(dir) = &self.working_dir {
            ConfigValidator::validate_working_dir(dir)?;
        }
        if let Some(env) = &self.env {
            ConfigValidator::validate_env_vars(env)?;
        }

        Ok(())
    }

    /// Build one command per port, picking each delay with the thread-local RNG
    pub fn build_commands(&self) -> Result<Vec<LaunchCommand>, LaunchError> {
        self.build_commands_with(&mut rand::thread_rng())
    }

    /// Build one command per port, picking each delay from `rng`
    ///
    /// Commands come back in ascending port order.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::InvalidConfiguration`] if the configuration
    /// does not validate.
    pub fn build_commands_with<R>(&self, rng: &mut R) -> Result<Vec<LaunchCommand>, LaunchError>
    where
        R: Rng + ?Sized,
    {
        self.validate()?;

        self.ports
            .clone()
            .map(|port| -> Result<LaunchCommand, LaunchError> {
                let delay = self.delays.choose(&mut *rng).copied().ok_or_else(|| {
                    LaunchError::InvalidConfiguration(
                        "Delay candidate set cannot be empty".to_string(),
                    )
                })?;
                Ok(LaunchCommand::new(self, port, delay))
            })
            .collect()
    }

    /// Parse a configuration from TOML; missing fields keep their defaults
    ///
    /// # Examples
    ///
    /// ```rust
    /// use server_starter::launch::config::LaunchConfig;
    ///
    /// let config = LaunchConfig::from_toml_str(r#"
    ///     label = "sum"
    ///     delays = [5]
    ///     ports = { start = 9000, end = 9004 }
    /// "#).unwrap();
    ///
    /// assert_eq!(config.program, "ClusterServer.exe");
    /// assert_eq!(config.port_count(), 4);
    /// ```
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, LaunchError> {
        toml::from_str(s).map_err(|e| LaunchError::Parse(e.to_string()))
    }

    /// Read and parse a TOML configuration file
    #[cfg(feature = "config-file")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, LaunchError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
