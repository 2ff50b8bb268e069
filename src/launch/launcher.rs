use rand::Rng;
use tokio::process::{Child, Command};
use tokio::runtime::Handle;

use crate::helper::tracing::MaybeInstrument;
use crate::launch::command::{LaunchCommand, resolve_program, setup_command};
use crate::launch::config::LaunchConfig;
use crate::launch::error::LaunchError;

/// What a launch started: one entry per port, in port order
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchReport {
    pub commands: Vec<LaunchCommand>,
    pub host: String,
}

impl LaunchReport {
    /// Number of launch tasks created
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when the port range produced no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Ports in launch order
    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.commands.iter().map(|c| c.port)
    }

    /// Addresses of the launched servers, one per line in a replica file
    pub fn replica_addresses(&self) -> Vec<String> {
        self.commands
            .iter()
            .map(|c| c.replica_address(&self.host))
            .collect()
    }
}

/// Starts one detached process per port and returns without waiting
///
/// # Examples
///
/// ```rust,no_run
/// use server_starter::launch::{config::LaunchConfig, launcher::Launcher};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = LaunchConfig::new("ClusterServer.exe")
///         .ports(8060..8062)
///         .label("qqq")
///         .delays([10, 100]);
///
///     let report = Launcher::new(config).launch()?;
///     for address in report.replica_addresses() {
///         println!("{address}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Launcher {
    config: LaunchConfig,
}

impl Launcher {
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Launch every command, picking delays with the thread-local RNG
    ///
    /// See [`Launcher::launch_with`].
    pub fn launch(&self) -> Result<LaunchReport, LaunchError> {
        self.launch_with(&mut rand::thread_rng())
    }

    /// Launch every command, picking delays from `rng`
    ///
    /// Each process is spawned before this returns and then handed to a
    /// detached task on the current Tokio runtime. Nothing is joined: spawn
    /// failures and exit statuses are only traced, never returned.
    ///
    /// # Errors
    ///
    /// - [`LaunchError::InvalidConfiguration`] if the configuration does not validate
    /// - [`LaunchError::Runtime`] if called outside a Tokio runtime
    pub fn launch_with<R>(&self, rng: &mut R) -> Result<LaunchReport, LaunchError>
    where
        R: Rng + ?Sized,
    {
        let handle = Handle::try_current().map_err(|e| LaunchError::Runtime(e.to_string()))?;
        let commands = self.config.build_commands_with(rng)?;

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "launch",
            program = %self.config.program,
            ports = ?self.config.ports,
            label = %self.config.label,
        )
        .entered();

        // Child processes register with the runtime's reaper on spawn.
        let _guard = handle.enter();
        for command in &commands {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                port = command.port,
                delay = command.delay,
                command = %command,
                "Launching process"
            );

            let program = resolve_program(&command.program, self.config.working_dir.as_deref());
            let mut cmd = Command::new(program);
            setup_command(&mut cmd, command, &self.config);
            start_detached(&handle, &mut cmd, command.port);
        }

        #[cfg(feature = "tracing")]
        tracing::info!(count = commands.len(), "Launch tasks started");

        Ok(LaunchReport {
            commands,
            host: self.config.host.clone(),
        })
    }
}

fn start_detached(handle: &Handle, cmd: &mut Command, port: u16) {
    match cmd.spawn() {
        Ok(child) => {
            // Dropping the JoinHandle detaches the task.
            drop(handle.spawn(wait_discarded(child).maybe_instrument("wait", port)));
        }
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(port, error = %_err, "Failed to spawn process");
        }
    }
}

async fn wait_discarded(mut child: Child) {
    let _status = child.wait().await;

    #[cfg(feature = "tracing")]
    match _status {
        Ok(status) => tracing::debug!(?status, "Process exited"),
        Err(err) => tracing::debug!(error = %err, "Failed to wait for process"),
    };
}
