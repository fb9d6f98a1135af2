use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
mod auth;
mod logging;
use logging::LogFormat;
use pwcodec::{HashPrimitive, Options, Record};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, clap::Args)]
struct Pbkdf2Args {
    /// Salt length in bytes, 1 to 256 (default: 16)
    #[arg(long, global = true, env = "PWCODEC_SALT_LEN")]
    salt_len: Option<usize>,

    /// PBKDF2 iteration count (default: 32)
    #[arg(long, global = true, env = "PWCODEC_ITERATIONS")]
    iterations: Option<u32>,

    /// Derived key length in bytes (default: 32)
    #[arg(long, global = true, env = "PWCODEC_KEY_LEN")]
    key_len: Option<usize>,

    /// HMAC hash: sha256, sha384 or sha512 (default: sha512)
    #[arg(long, global = true, env = "PWCODEC_HASH")]
    hash: Option<HashPrimitive>,
}

impl Pbkdf2Args {
    fn to_options(&self) -> Result<Options> {
        let default = Options::default();

        Ok(Options::new(
            self.salt_len.unwrap_or(default.salt_len()),
            self.iterations.unwrap_or(default.iterations()),
            self.key_len.unwrap_or(default.key_len()),
            self.hash.unwrap_or(default.hash()),
        )?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "pwcodec")]
#[command(version, about = "Encode and verify salted PBKDF2 password records.")]
struct Cli {
    #[command(flatten)]
    pbkdf2: Pbkdf2Args,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text, env = "PWCODEC_LOG_FORMAT")]
    log_format: LogFormat,

    /// Log successful operations too
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password and prints the hex record
    Hash {
        /// Print salt, tag, key and parameters as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Checks a password against a hex record
    #[command(arg_required_else_help = true)]
    Verify {
        #[arg(conflicts_with = "record_file", required_unless_present = "record_file")]
        record: Option<String>,

        /// Read the record from a file instead
        #[arg(long, value_name = "PATH")]
        record_file: Option<PathBuf>,
    },

    /// Shows the fields of a hex record
    #[command(arg_required_else_help = true)]
    Inspect {
        record: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct RecordReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a str>,
    salt: String,
    tag: String,
    derived_key: String,
    options: &'a Options,
}

impl<'a> RecordReport<'a> {
    fn new(record: &Record, options: &'a Options) -> Self {
        Self {
            record: None,
            salt: String::from_utf8_lossy(record.salt()).into_owned(),
            tag: String::from_utf8_lossy(record.tag()).into_owned(),
            derived_key: hex::encode(record.derived_key()),
            options,
        }
    }

    fn print_table(&self) {
        let o = self.options;
        println!("{:<12} {}", "salt", self.salt);
        println!("{:<12} {}", "tag", self.tag);
        println!("{:<12} {}", "derived key", self.derived_key);
        println!(
            "{:<12} {} + 6 + {} bytes, {}, {} iterations",
            "layout",
            o.salt_len(),
            o.key_len(),
            o.hash(),
            o.iterations()
        );
    }
}

fn load_record(record: Option<String>, record_file: Option<PathBuf>) -> Result<String> {
    match (record, record_file) {
        (Some(r), _) => Ok(r.trim().to_string()),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read record from {}", path.display()))?;
            Ok(text.trim().to_string())
        }
        (None, None) => anyhow::bail!("no record given"),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.log_format, args.verbose);
    let options = args.pbkdf2.to_options()?;

    match args.command {
        Commands::Hash { json } => {
            let password = auth::read_password(true)?;
            let encoded = pwcodec::encode(password.as_bytes(), &options)?;
            drop(password);

            let record = encoded.into_record();
            let hex = record.to_hex();
            info!(salt_len = options.salt_len(), key_len = options.key_len(), hash = %options.hash(), "password hashed");

            if json {
                let mut report = RecordReport::new(&record, &options);
                report.record = Some(&hex);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{hex}");
            }
        }
        Commands::Verify {
            record,
            record_file,
        } => {
            let record = load_record(record, record_file)?;
            let password = auth::read_password(false)?;

            match pwcodec::verify_record(&password, &record, &options) {
                Ok(()) => {
                    info!("password verified");
                    println!("password verified");
                }
                Err(e) => {
                    let kind = if e.is_malformed() { "malformed_record" } else { "password_mismatch" };
                    warn!(kind, "verification failed");
                    return Err(e.into());
                }
            }
        }
        Commands::Inspect { record, json } => {
            let parsed = Record::from_hex(record.trim(), &options)?;
            let report = RecordReport::new(&parsed, &options);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print_table();
            }
        }
    }

    Ok(())
}
