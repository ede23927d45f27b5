//! Command-line front end for the technique catalog.
//!
//! Loads a catalog from a JSON file, applies the requested filters, and
//! either prints a table to stdout or exports the matches to CSV/JSON.
//! All policy lives here: the library takes explicit parameters and has no
//! notion of flags, default filenames, or exit codes.

use anyhow::{Context, Result, bail};
use attack_hunter::{ExportFormat, Query, export_to_path, load_catalog_from_path, render, search};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let catalog = load_catalog_from_path(&args.catalog)?;

    let mut query = Query::parse(
        args.keyword.as_deref(),
        args.tactic.as_deref(),
        args.severity.as_deref(),
    )?;
    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }

    let result = search(&catalog, &query);

    match args.export {
        Some(format) => {
            let destination = args
                .output
                .unwrap_or_else(|| PathBuf::from(format!("techniques.{format}")));
            export_to_path(&result, format, &destination)?;
            eprintln!("Exported {} technique(s) to {}", result.len(), destination.display());
        }
        None => print!("{}", render(&result)),
    }
    Ok(())
}

struct CliArgs {
    catalog: PathBuf,
    keyword: Option<String>,
    tactic: Option<String>,
    severity: Option<String>,
    limit: Option<usize>,
    export: Option<ExportFormat>,
    output: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog: Option<PathBuf> = None;
        let mut keyword: Option<String> = None;
        let mut tactic: Option<String> = None;
        let mut severity: Option<String> = None;
        let mut limit: Option<usize> = None;
        let mut export: Option<ExportFormat> = None;
        let mut output: Option<PathBuf> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" | "-c" => {
                    catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?));
                }
                "--keyword" | "-k" => {
                    keyword = Some(next_value(&mut args, "--keyword")?);
                }
                "--tactic" | "-t" => {
                    tactic = Some(next_value(&mut args, "--tactic")?);
                }
                "--severity" | "-s" => {
                    severity = Some(next_value(&mut args, "--severity")?);
                }
                "--limit" | "-m" => {
                    let raw = next_value(&mut args, "--limit")?;
                    let parsed = raw
                        .parse::<usize>()
                        .with_context(|| format!("invalid value for --limit: {raw}"))?;
                    limit = Some(parsed);
                }
                "--export" | "-e" => {
                    let raw = next_value(&mut args, "--export")?;
                    export = Some(ExportFormat::parse(&raw)?);
                }
                "--output" | "-o" => {
                    output = Some(PathBuf::from(next_value(&mut args, "--output")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        let Some(catalog) = catalog else {
            bail!("--catalog is required; see --help");
        };
        if output.is_some() && export.is_none() {
            bail!("--output requires --export");
        }

        Ok(CliArgs {
            catalog,
            keyword,
            tactic,
            severity,
            limit,
            export,
            output,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: hunt --catalog PATH [--keyword WORD] [--tactic TA-CODE] [--severity LEVEL] [--limit N] [--export csv|json] [--output PATH]\n\
Searches a technique catalog and prints the matches as a table, or exports them when --export is given.\n\
Severity levels: LOW, MEDIUM, HIGH, CRITICAL. Tactics accept TA-codes (TA0001) or phase names (initial-access).\n\
Without --output, exports land in techniques.csv / techniques.json in the current directory.\n"
}

fn print_usage() {
    print!("{}", usage());
}
