use anyhow::Result;
use clap::{Parser, Subcommand};
use jdis::commands::{dump_command, list_backends_command, setup_command};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Javap-backed disassembler for compiled Java classes.
///
/// This CLI is a thin wrapper around `jdis-core` (exposed in code as `jdis_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "jdis",
    version,
    about = "Javap-backed disassembler for compiled Java classes",
    long_about = None
)]
struct Cli {
    /// Log at debug level instead of warn (always on stderr).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Disassemble one compiled class file with the configured javap.
    ///
    /// Prints the raw javap listing on success. On failure stdout carries a
    /// diagnostic block suitable for bug reports and the exit code is
    /// nonzero.
    Dump {
        /// Path to the `.class` file to disassemble.
        class_file: String,

        /// JDK installation root or direct javap path, overriding the
        /// environment and the config file for this run.
        #[arg(long)]
        tool_root: Option<String>,

        /// Config file location. Defaults to `~/.jdis.json`.
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of the raw listing.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Locate a javap installation and record it in the config file.
    ///
    /// Resolution order: `--path`, then `JDIS_JAVAP`/`JAVA_HOME`, then a
    /// `PATH` search. The recorded location may be either the executable
    /// itself or a JDK installation root.
    Setup {
        /// JDK installation root or direct javap path.
        #[arg(long)]
        path: Option<String>,

        /// Config file location. Defaults to `~/.jdis.json`.
        #[arg(long)]
        config: Option<String>,
    },

    /// List known disassembler backends and their configuration status.
    Backends {
        /// Config file location. Defaults to `~/.jdis.json`.
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Dump { class_file, tool_root, config, json } => {
            dump_command(&class_file, tool_root, config, json)?
        }
        Command::Setup { path, config } => setup_command(path, config)?,
        Command::Backends { config, json } => list_backends_command(config, json)?,
    }

    Ok(())
}

/// Route library diagnostics to stderr so listings on stdout stay clean.
fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber =
        FmtSubscriber::builder().with_max_level(level).with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
