//! sqlnamed CLI
//!
//! Command-line tool for rewriting SQL named parameters into positional
//! placeholders.

mod input;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::FmtSubscriber;

use sqlnamed_core::{DialectKind, Parser, ParserOptions, SqlValue};

use crate::input::{parse_assignment, parse_params_json, read_sql};

/// Rewrite SQL named parameters (`:name`) into positional placeholders.
#[derive(ClapParser)]
#[command(name = "sqlnamed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a query and bind parameter values.
    Rewrite {
        /// SQL text (read from --file or stdin if omitted).
        sql: Option<String>,

        /// Read the SQL from a file.
        #[arg(short, long, conflicts_with = "sql")]
        file: Option<PathBuf>,

        /// Placeholder dialect: postgres, generic or mssql.
        #[arg(
            short,
            long,
            env = "SQLNAMED_DIALECT",
            value_parser = str::parse::<DialectKind>,
            default_value_t = DialectKind::Postgres
        )]
        dialect: DialectKind,

        /// Parameter value as NAME=VALUE (VALUE is parsed as JSON, or taken as text).
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        /// JSON object whose entries are bound as parameters.
        #[arg(long, value_name = "JSON")]
        params_json: Option<String>,

        /// Reject empty parameter names and unterminated string literals.
        #[arg(long)]
        strict: bool,

        /// Fail if any parameter is left without a value.
        #[arg(long)]
        require_all: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the parameters of a query and their placeholder ordinals.
    Names {
        /// SQL text (read from --file or stdin if omitted).
        sql: Option<String>,

        /// Read the SQL from a file.
        #[arg(short, long, conflicts_with = "sql")]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct RewriteOutput<'a> {
    query: &'a str,
    parameters: &'a [Option<SqlValue>],
    unset: Vec<&'a str>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Rewrite {
            sql,
            file,
            dialect,
            params,
            params_json,
            strict,
            require_all,
            format,
        } => {
            let sql = read_sql(sql, file.as_deref())?;
            let options = ParserOptions {
                dialect,
                reject_empty_names: strict,
                reject_unterminated_literals: strict,
            };
            let mut parser = options
                .parse(&sql)
                .context("Failed to rewrite query")?;

            if let Some(json) = params_json {
                let values = parse_params_json(&json)?;
                debug!(count = values.len(), "Binding parameters from JSON");
                parser.set_values_from_map(values);
            }
            for assignment in &params {
                let (name, value) = parse_assignment(assignment)?;
                if !parser.positions().contains(&name) {
                    warn!("Query has no parameter named '{}'", name);
                }
                parser.set_value(&name, value);
            }

            if require_all {
                parser
                    .bound_parameters()
                    .context("Not every parameter has a value")?;
            }

            let unset = parser.unset_parameters();
            if !unset.is_empty() {
                info!("Parameters without a value: {}", unset.join(", "));
            }

            match format {
                OutputFormat::Text => {
                    println!("{}", parser.parsed_query());
                    for (slot, value) in parser.parsed_parameters().iter().enumerate() {
                        let name = parser.positions().name_of(slot).unwrap_or_default();
                        let rendered = value
                            .as_ref()
                            .map_or_else(|| String::from("<unset>"), SqlValue::to_sql_inline);
                        println!("  {:>3}  :{:<20} {}", slot + 1, name, rendered);
                    }
                }
                OutputFormat::Json => {
                    let output = RewriteOutput {
                        query: parser.parsed_query(),
                        parameters: parser.parsed_parameters(),
                        unset,
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
        }

        Commands::Names { sql, file } => {
            let sql = read_sql(sql, file.as_deref())?;
            let parser = Parser::new(&sql);

            if parser.positions().is_empty() {
                info!("Query has no named parameters.");
            }
            for (name, slots) in parser.positions().iter() {
                let ordinals: Vec<String> = slots.iter().map(|s| (s + 1).to_string()).collect();
                println!(":{} -> {}", name, ordinals.join(", "));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite_dialect(args: &[&str]) -> Result<DialectKind, clap::Error> {
        let cli = Cli::try_parse_from(args)?;
        match cli.command {
            Commands::Rewrite { dialect, .. } => Ok(dialect),
            Commands::Names { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_dialect_defaults_to_postgres() {
        assert_eq!(
            rewrite_dialect(&["sqlnamed", "rewrite", "SELECT 1"]).unwrap(),
            DialectKind::Postgres
        );
    }

    #[test]
    fn test_dialect_accepts_aliases() {
        assert_eq!(
            rewrite_dialect(&["sqlnamed", "rewrite", "--dialect", "sqlite", "SELECT 1"]).unwrap(),
            DialectKind::Generic
        );
        assert_eq!(
            rewrite_dialect(&["sqlnamed", "rewrite", "-d", "sqlserver", "SELECT 1"]).unwrap(),
            DialectKind::Mssql
        );
    }

    #[test]
    fn test_unknown_dialect_is_rejected() {
        assert!(rewrite_dialect(&["sqlnamed", "rewrite", "--dialect", "oracle", "SELECT 1"]).is_err());
    }
}
