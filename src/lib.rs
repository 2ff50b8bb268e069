//! # server-starter
//!
//! Launch a fleet of cluster server replicas, one process per port in a
//! contiguous range, and return immediately.
//!
//! Every launched process gets the same label and a delay picked at random
//! from a small candidate set. The launcher spawns each process, detaches it,
//! and never looks at it again: no supervision, no output capture, no exit
//! codes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use server_starter::launch::{config::LaunchConfig, launcher::Launcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LaunchConfig::new("ClusterServer.exe")
//!         .ports(8060..8080)
//!         .label("qqq")
//!         .delays([10, 100]);
//!
//!     // Validate the configuration
//!     config.validate()?;
//!
//!     // Spawns 20 servers and returns without waiting for them
//!     let report = Launcher::new(config).launch()?;
//!     println!("Started {} servers", report.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Inspecting Commands Without Launching
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use server_starter::launch::config::LaunchConfig;
//!
//! let config = LaunchConfig::default().ports(8060..8062);
//! let commands = config.build_commands_with(&mut StdRng::seed_from_u64(7)).unwrap();
//!
//! assert_eq!(commands.len(), 2);
//! assert!(commands[0].command_line().starts_with("ClusterServer.exe -p 8060 -n qqq -d "));
//! ```
//!
//! ## Optional Features
//!
//! - `serde`: Enable serialization support for [`LaunchConfig`](launch::config::LaunchConfig)
//! - `config-file`: Load a `LaunchConfig` from TOML
//! - `tracing`: Enable structured logging integration
//! - `cli`: Build the `server-starter` binary (default)

pub mod helper;
pub mod launch;
