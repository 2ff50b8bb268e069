use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::launch::config::LaunchConfig;

/// One process invocation: the program plus its `-p`, `-n` and `-d` flags
///
/// Built by [`LaunchConfig::build_commands`]; each command owns everything
/// its launch task needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub port: u16,
    pub label: String,
    pub delay: u64,
    pub async_mode: bool,
}

impl LaunchCommand {
    pub(crate) fn new(config: &LaunchConfig, port: u16, delay: u64) -> Self {
        LaunchCommand {
            program: config.program.clone(),
            port,
            label: config.label.clone(),
            delay,
            async_mode: config.async_mode,
        }
    }

    /// Arguments in the order the server expects them
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-p".to_string(),
            self.port.to_string(),
            "-n".to_string(),
            self.label.clone(),
            "-d".to_string(),
            self.delay.to_string(),
        ];
        if self.async_mode {
            args.push("-a".to_string());
        }
        args
    }

    /// The full command as a single line, e.g. `ClusterServer.exe -p 8060 -n qqq -d 10`
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in self.args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }

    /// Address the launched server answers on
    pub fn replica_address(&self, host: &str) -> String {
        format!("http://{}:{}/{}/", host, self.port, self.label)
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Resolve a bare program name against the launch directory.
///
/// A name without path separators that names a file in `working_dir` (or the
/// current directory when unset) becomes that absolute path, the way a shell
/// finds an executable next to it. Anything else is returned unchanged and
/// left to the normal `PATH` search.
pub(crate) fn resolve_program(program: &str, working_dir: Option<&str>) -> PathBuf {
    if program.contains(['/', '\\']) {
        return PathBuf::from(program);
    }

    let Ok(current_dir) = std::env::current_dir() else {
        return PathBuf::from(program);
    };
    let base = match working_dir {
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    let candidate = base.join(Path::new(program));
    if candidate.is_file() {
        candidate
    } else {
        PathBuf::from(program)
    }
}

/// Configures a `tokio::process::Command` for one launch.
///
/// Sets arguments, working directory, and extra environment. Stdio is
/// inherited from the launcher and the child outlives the handle.
///
/// # Arguments
///
/// * `cmd` - The command to configure.
/// * `launch` - The port, label and delay for this process.
/// * `config` - Shared settings for the whole batch.
pub(crate) fn setup_command(cmd: &mut Command, launch: &LaunchCommand, config: &LaunchConfig) {
    cmd.args(launch.args());

    if let Some(dir) = &config.working_dir {
        cmd.current_dir(dir);
    }

    if let Some(envs) = &config.env {
        cmd.envs(envs);
    }

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(false);
}
