//! rpcid - GUID and policy handle tool
//!
//! Converts between the textual and binary forms of RPC identifiers,
//! compares and sorts GUIDs, and renders policy handles.
//!
//! USAGE:
//!   rpcid [OPTIONS] <COMMAND>
//!
//! EXAMPLES:
//!   rpcid guid parse "{12345678-9ABC-DEF0-1234-56789ABCDEF0}"
//!   rpcid guid decode 123456789abcdef0123456789abcdef0
//!   rpcid guid compare 00000000-0000-0000-0000-000000000001 \
//!                      00000000-0000-0000-0000-000000000002
//!   rpcid guid random -n 4
//!   rpcid handle --type 5 abcdefab-0000-0000-0000-000000000001

use anyhow::Context;
use clap::{Parser, Subcommand};
use librpc_misc::{Guid, PolicyHandle};
use std::cmp::Ordering;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "rpcid")]
#[command(version)]
#[command(about = "Inspect, convert and compare RPC GUIDs and policy handles")]
struct Args {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GUID operations
    #[command(subcommand)]
    Guid(GuidCommand),

    /// Render a policy handle
    Handle {
        /// Handle type tag
        #[arg(short = 't', long = "type", default_value_t = 0, allow_negative_numbers = true)]
        handle_type: i32,

        /// Canonical GUID string (nil when omitted)
        #[arg(value_name = "UUID")]
        uuid: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum GuidCommand {
    /// Parse a GUID in canonical, braced or bare-hex form
    Parse {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Decode 32 hex digits of canonical binary encoding
    Decode {
        #[arg(value_name = "HEX")]
        hex: String,
    },

    /// Print the canonical binary encoding as hex
    Encode {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Compare two GUIDs
    Compare { a: String, b: String },

    /// Print GUIDs in ascending order
    Sort {
        #[arg(value_name = "GUID", required = true)]
        guids: Vec<String>,
    },

    /// Generate random GUIDs
    Random {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

fn parse_guid(text: &str) -> anyhow::Result<Guid> {
    Guid::parse_string(text).with_context(|| format!("invalid GUID {text:?}"))
}

fn run_guid(command: GuidCommand) -> anyhow::Result<Vec<String>> {
    let lines = match command {
        GuidCommand::Parse { text } => {
            let guid = Guid::from_data_blob(text.as_bytes())
                .with_context(|| format!("invalid GUID {text:?}"))?;
            debug!(?guid, "parsed");
            vec![guid.to_string(), guid.braced(), format!("{:?}", guid)]
        }
        GuidCommand::Decode { hex } => {
            let bytes = hex::decode(&hex).with_context(|| format!("invalid hex {hex:?}"))?;
            let guid = Guid::parse_bytes(&bytes)
                .with_context(|| format!("hex {hex:?} is not a GUID encoding"))?;
            vec![guid.to_string()]
        }
        GuidCommand::Encode { text } => vec![hex::encode(parse_guid(&text)?.to_bytes())],
        GuidCommand::Compare { a, b } => {
            let ordering = parse_guid(&a)?.compare(&parse_guid(&b)?);
            let word = match ordering {
                Ordering::Less => "less",
                Ordering::Equal => "equal",
                Ordering::Greater => "greater",
            };
            vec![word.to_string()]
        }
        GuidCommand::Sort { guids } => {
            let mut parsed = guids
                .iter()
                .map(|text| parse_guid(text))
                .collect::<anyhow::Result<Vec<_>>>()?;
            parsed.sort();
            parsed.iter().map(Guid::to_string).collect()
        }
        GuidCommand::Random { count } => (0..count).map(|_| Guid::random().to_string()).collect(),
    };
    Ok(lines)
}

fn run(command: Command) -> anyhow::Result<Vec<String>> {
    match command {
        Command::Guid(command) => run_guid(command),
        Command::Handle { handle_type, uuid } => {
            let handle = PolicyHandle::new(handle_type, uuid.as_deref())
                .context("invalid policy handle")?;
            debug!(?handle, "built");
            Ok(vec![
                handle.to_string(),
                format!("{:?}", handle),
                hex::encode(handle.to_bytes()),
            ])
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    for line in run(args.command)? {
        println!("{}", line);
    }
    Ok(())
}
