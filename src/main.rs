//! Launch a fleet of cluster server replicas and exit.
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use server_starter::launch::{
    config::LaunchConfig,
    launcher::{LaunchReport, Launcher},
};

#[derive(Parser, Debug)]
#[command(
    name = "server-starter",
    version,
    about = "Start one cluster server per port in a range and leave them running"
)]
struct Cli {
    /// TOML file with launch settings; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server executable to launch
    #[arg(long)]
    program: Option<String>,

    /// First port (inclusive)
    #[arg(long)]
    start: Option<u16>,

    /// Last port (exclusive)
    #[arg(long)]
    end: Option<u16>,

    /// Label passed to every server with -n
    #[arg(short = 'n', long)]
    label: Option<String>,

    /// Delay candidate, repeat for several
    #[arg(short = 'd', long = "delay")]
    delays: Vec<u64>,

    /// Pass -a to every server
    #[arg(short = 'a', long)]
    async_mode: bool,

    /// Host written into replica addresses
    #[arg(long)]
    host: Option<String>,

    /// Write one replica address per line to this file
    #[arg(long)]
    replicas_out: Option<PathBuf>,

    /// Print the commands without starting anything
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn into_config(self) -> Result<LaunchConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => LaunchConfig::from_file(path)?,
            None => LaunchConfig::default(),
        };

        if let Some(program) = self.program {
            config.program = program;
        }
        if let Some(start) = self.start {
            config.ports.start = start;
        }
        if let Some(end) = self.end {
            config.ports.end = end;
        }
        if let Some(label) = self.label {
            config.label = label;
        }
        if !self.delays.is_empty() {
            config.delays = self.delays;
        }
        if self.async_mode {
            config.async_mode = true;
        }
        if let Some(host) = self.host {
            config.host = host;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Launch (or with `--dry-run`, print) the fleet and write the replica file
///
/// Dry-run command lines go to `out`, one per line.
fn run(cli: Cli, out: &mut impl Write) -> Result<LaunchReport, Box<dyn std::error::Error>> {
    let dry_run = cli.dry_run;
    let replicas_out = cli.replicas_out.clone();
    let config = cli.into_config()?;

    let report = if dry_run {
        let commands = config.build_commands()?;
        for command in &commands {
            writeln!(out, "{command}")?;
        }
        LaunchReport {
            commands,
            host: config.host.clone(),
        }
    } else {
        Launcher::new(config).launch()?
    };

    if let Some(path) = replicas_out {
        let mut contents = report.replica_addresses().join("\n");
        contents.push('\n');
        std::fs::write(&path, contents)?;
        tracing::info!(path = %path.display(), count = report.len(), "Wrote replica addresses");
    }

    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    run(cli, &mut std::io::stdout().lock())?;

    Ok(())
}
