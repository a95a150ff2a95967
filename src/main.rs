use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use vjoy_abi::report::{self, Format};
use vjoy_abi::{functions, structs, TypeMap};

/// Inspect and check the vJoy primitive type map on this target.
#[derive(Parser, Debug)]
#[command(name = "vjoy-abi", version)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the primitive type map and rewrite rules.
    Table {
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Check every alias against this target; fails on any mismatch.
    Verify,
    /// Print the contract digest, optionally failing if it differs.
    Fingerprint {
        #[arg(long, value_name = "HEX")]
        expect: Option<String>,
    },
    /// Print sizes and field offsets of the vJoy structures.
    Layouts {
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Print the declared vJoyInterface exports.
    Exports {
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(command = ?cli.command, "starting");

    let map = TypeMap::builtin();
    match cli.command {
        Command::Table { format } => print!("{}", report::type_map(&map, format)?),
        Command::Verify => {
            map.verify()
                .context("the primitive type map does not hold on this target")?;
            info!(
                primitives = map.primitives().len(),
                pointer_bytes = std::mem::size_of::<usize>(),
                "type map verified"
            );
            println!("ok");
        }
        Command::Fingerprint { expect } => {
            if let Some(expected) = expect {
                map.check_fingerprint(&expected)
                    .context("the declared ABI contract changed")?;
            }
            println!("{}", map.fingerprint());
        }
        Command::Layouts { format } => {
            print!("{}", report::layouts(&structs::layouts(), format)?)
        }
        Command::Exports { format } => {
            print!("{}", report::exports(functions::EXPORTS, format)?)
        }
    }

    Ok(())
}
