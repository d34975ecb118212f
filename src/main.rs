//! Command-line interface for keygen
//!
//! # Usage Examples
//!
//! ```bash
//! # Derive one value
//! keygen derive string users 1 email
//!
//! # Derive a run of values under users/0 .. users/9 as JSON
//! keygen derive time users --count 10 --format json
//!
//! # Inspect the raw hashes
//! keygen hash users 1 email
//! keygen hash users 1 email --wide
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use keygen::{report, Generator, Value};

#[derive(Parser)]
#[command(name = "keygen")]
#[command(about = "Derive deterministic fixture values from key paths")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a scalar value from a key path
    Derive {
        /// Kind of value to derive
        #[arg(value_enum)]
        kind: Kind,

        /// Key path segments
        #[arg(required = true)]
        keys: Vec<String>,

        /// Derive N values under the key path extended with 0..N
        #[arg(long)]
        count: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value = "text", env = "KEYGEN_FORMAT")]
        format: OutputFormat,
    },

    /// Print the hash of a key path in hex
    Hash {
        /// Key path segments
        keys: Vec<String>,

        /// Print the 256-bit hash instead of the 64-bit one
        #[arg(long)]
        wide: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Int,
    Int64,
    Uint,
    Uint64,
    Length,
    String,
    Bool,
    Float32,
    Float64,
    Time,
    Url,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn derive(gen: &Generator, kind: Kind, keys: &[String]) -> anyhow::Result<Value> {
    let value = match kind {
        Kind::Int => Value::Int(gen.int(keys) as i64),
        Kind::Int64 => Value::Int(gen.int64(keys)),
        Kind::Uint => Value::Uint(gen.uint(keys) as u64),
        Kind::Uint64 => Value::Uint(gen.uint64(keys)),
        Kind::Length => Value::Uint(gen.length(keys) as u64),
        Kind::String => Value::String(gen.string(keys)),
        Kind::Bool => Value::Bool(gen.bool(keys)),
        Kind::Float32 => Value::Float(gen.float32(keys) as f64),
        Kind::Float64 => Value::Float(gen.float64(keys)),
        Kind::Time => Value::Time(gen.time(keys)),
        Kind::Url => Value::Url(
            gen.url(keys)
                .with_context(|| format!("Failed to derive url for {}", keys.join("/")))?,
        ),
    };
    Ok(value)
}

/// JSON has no NaN or infinity; those floats are written as strings.
fn to_json(value: &Value) -> anyhow::Result<String> {
    let json = match value {
        Value::Float(x) if !x.is_finite() => serde_json::to_string(&x.to_string())?,
        _ => serde_json::to_string(value)?,
    };
    Ok(json)
}

fn print_value(value: &Value, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{value}"),
        OutputFormat::Json => println!("{}", to_json(value)?),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let gen = Generator::new(report::log_and_continue);

    match cli.command {
        Commands::Derive {
            kind,
            keys,
            count,
            format,
        } => match count {
            None => print_value(&derive(&gen, kind, &keys)?, format)?,
            Some(count) => {
                tracing::info!("Deriving {} {:?} values under {}", count, kind, keys.join("/"));
                for i in 0..count {
                    let mut indexed = keys.clone();
                    indexed.push(i.to_string());
                    print_value(&derive(&gen, kind, &indexed)?, format)?;
                }
            }
        },
        Commands::Hash { keys, wide } => {
            if wide {
                let hex: String = keygen::hash::hash256(&keys)
                    .iter()
                    .map(|b| format!("{b:02x}"))
                    .collect();
                println!("{hex}");
            } else {
                println!("{:016x}", keygen::hash::hash64(&keys));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_derive() {
        let cli = Cli::try_parse_from([
            "keygen", "derive", "uint64", "users", "1", "--count", "3", "--format", "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Derive {
                kind,
                keys,
                count,
                format,
            } => {
                assert!(matches!(kind, Kind::Uint64));
                assert_eq!(keys, vec!["users", "1"]);
                assert_eq!(count, Some(3));
                assert!(matches!(format, OutputFormat::Json));
            }
            Commands::Hash { .. } => panic!("Expected derive command"),
        }
    }

    #[test]
    fn test_json_keeps_non_finite_floats() {
        assert_eq!(to_json(&Value::Float(f64::NAN)).unwrap(), "\"NaN\"");
        assert_eq!(to_json(&Value::Float(f64::INFINITY)).unwrap(), "\"inf\"");
        assert_eq!(to_json(&Value::Float(f64::NEG_INFINITY)).unwrap(), "\"-inf\"");
        assert_eq!(to_json(&Value::Float(1.5)).unwrap(), "1.5");
        assert_eq!(to_json(&Value::Uint(7)).unwrap(), "7");
    }

    #[test]
    fn test_derive_matches_library() {
        let gen = Generator::default();
        let keys = vec!["users".to_string(), "1".to_string()];

        assert_eq!(
            derive(&gen, Kind::String, &keys).unwrap(),
            Value::String(keygen::string(&keys))
        );
        assert_eq!(
            derive(&gen, Kind::Length, &keys).unwrap(),
            Value::Uint(keygen::length(&keys) as u64)
        );
        assert!(matches!(
            derive(&gen, Kind::Url, &keys).unwrap(),
            Value::Url(_)
        ));
    }
}
