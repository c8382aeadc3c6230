mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use dockyard_core::Environment;

#[derive(Parser)]
#[command(
    name = "dockyard",
    about = "Scaffold Docker dev and production environments for Laravel apps"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write Dockerfiles, nginx configs, compose files and .env.production
    Init {
        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
        /// Only generate the development stack
        #[arg(long, conflicts_with = "prod_only")]
        dev_only: bool,
        /// Only generate the production stack
        #[arg(long)]
        prod_only: bool,
        /// Patch .env with values that reach the dev containers
        #[arg(long, conflicts_with = "prod_only")]
        patch_env: bool,
    },
    /// Print the assembled compose document
    Compose {
        #[arg(long, value_enum, default_value_t = Target::Dev)]
        env: Target,
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Print dev .env values or the production .env template
    Env {
        #[arg(long, value_enum, default_value_t = Target::Dev)]
        env: Target,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Dev,
    Prod,
}

impl From<Target> for Environment {
    fn from(target: Target) -> Self {
        match target {
            Target::Dev => Environment::Dev,
            Target::Prod => Environment::Prod,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Yaml,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // arch-lint: allow(no-silent-result-drop) reason="an unset or invalid RUST_LOG falls back to info"
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            force,
            dev_only,
            prod_only,
            patch_env,
        } => commands::init(commands::InitOptions {
            force,
            dev: !prod_only,
            prod: !dev_only,
            patch_env,
        })?,
        Commands::Compose { env, format } => commands::compose(env.into(), format)?,
        Commands::Env { env } => commands::env(env.into())?,
    }

    Ok(())
}
