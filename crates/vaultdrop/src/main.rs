mod commands;
mod factory;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vaultdrop_cloud::Deadline;

#[derive(Parser)]
#[command(name = "vdrop")]
#[command(about = "Share secret files through your own cloud infrastructure", long_about = None)]
struct Cli {
    /// Settings file (default: ./vaultdrop.yaml, ~/.config/vaultdrop/config.yaml)
    #[arg(short, long, global = true, env = "VDROP_CONFIG")]
    config: Option<PathBuf>,

    /// Backend to use (overrides the settings file)
    #[arg(short, long, global = true, env = "VDROP_BACKEND")]
    backend: Option<String>,

    /// Overall timeout in seconds for remote calls
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the backend account with the required resources
    Bootstrap {
        /// Manifest with provisioning templates and parameters (local path or https:// URL)
        #[arg(short, long)]
        manifest: String,
    },
    /// Share a secret file through the configured backend
    Distribute {
        /// The file which holds your secrets
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("vaultdrop {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let settings = load_settings(cli.config.as_deref())?;
    let backend_name = cli
        .backend
        .clone()
        .unwrap_or_else(|| settings.backend.clone());
    let backend = factory::backend_from_settings(&backend_name, &settings).await?;

    let deadline = match cli.timeout {
        Some(secs) => Deadline::after(Duration::from_secs(secs)),
        None => Deadline::none(),
    };

    match cli.command {
        Commands::Bootstrap { manifest } => {
            commands::bootstrap::handle(backend.as_ref(), &manifest, deadline).await?;
        }
        Commands::Distribute { file } => {
            commands::distribute::handle(backend.as_ref(), &file, deadline).await?;
        }
        Commands::Version => {
            unreachable!("Version is handled before settings loading");
        }
    }

    Ok(())
}

fn load_settings(config: Option<&Path>) -> anyhow::Result<vaultdrop_config::Settings> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => vaultdrop_config::find_settings_file()?,
    };
    tracing::debug!(path = %path.display(), "Loading settings");
    Ok(vaultdrop_config::Settings::load(&path)?)
}
