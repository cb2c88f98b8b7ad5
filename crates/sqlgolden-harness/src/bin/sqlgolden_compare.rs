use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;
use sqlgolden_core::golden::{self, ComparisonOrder, GoldenOutcome};
use sqlgolden_harness::{init_cli_logging, unified_diff};

#[derive(Debug)]
struct CliConfig {
    reference: PathBuf,
    actual: PathBuf,
    order: ComparisonOrder,
    json: bool,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    reference: String,
    actual: String,
    #[serde(flatten)]
    outcome: &'a GoldenOutcome,
    diff: String,
}

fn print_help() {
    let help = "\
sqlgolden-compare: compare a recorded SQL file with a golden reference

USAGE:
    sqlgolden-compare --reference <PATH> --actual <PATH> [OPTIONS]

OPTIONS:
    --reference <PATH>   Golden reference file
    --actual <PATH>      Recorded statements in golden format
    --unordered          Ignore statement order
    --json               Print the comparison as JSON
    -h, --help           Show this help

EXIT STATUS:
    0 files match, 1 files differ, 2 usage or I/O error
";
    println!("{help}");
}

fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut reference: Option<PathBuf> = None;
    let mut actual: Option<PathBuf> = None;
    let mut order = ComparisonOrder::Ordered;
    let mut json = false;

    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--reference" => {
                index += 1;
                if index >= args.len() {
                    return Err("--reference requires a value".to_owned());
                }
                reference = Some(PathBuf::from(&args[index]));
            }
            "--actual" => {
                index += 1;
                if index >= args.len() {
                    return Err("--actual requires a value".to_owned());
                }
                actual = Some(PathBuf::from(&args[index]));
            }
            "--unordered" => order = ComparisonOrder::Unordered,
            "--json" => json = true,
            "-h" | "--help" => {
                print_help();
                return Err(String::new());
            }
            unknown => {
                return Err(format!("unknown option: {unknown}"));
            }
        }
        index += 1;
    }

    Ok(CliConfig {
        reference: reference.ok_or_else(|| "--reference is required".to_owned())?,
        actual: actual.ok_or_else(|| "--actual is required".to_owned())?,
        order,
        json,
    })
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|error| format!("read_failed path={} error={error}", path.display()))
}

fn run(args: &[String]) -> Result<i32, String> {
    let config = parse_args(args)?;
    let reference = read(&config.reference)?;
    let actual = read(&config.actual)?;

    let mut entries = golden::parse_reference(&actual);
    let outcome = golden::compare(&entries, &reference, config.order);
    if config.order == ComparisonOrder::Unordered {
        entries.sort_unstable();
    }
    let diff = unified_diff(&reference, &golden::serialize(&entries));

    if config.json {
        let report = JsonReport {
            reference: config.reference.display().to_string(),
            actual: config.actual.display().to_string(),
            outcome: &outcome,
            diff,
        };
        let payload = serde_json::to_string_pretty(&report)
            .map_err(|error| format!("report_serialize_failed: {error}"))?;
        println!("{payload}");
    } else if outcome.pass {
        println!("match: {}", config.reference.display());
    } else {
        println!("{}", outcome.diagnostics());
        if !diff.is_empty() {
            println!();
            print!("{diff}");
        }
    }

    Ok(i32::from(!outcome.pass))
}

fn main() -> ExitCode {
    init_cli_logging();
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(1) => ExitCode::from(1),
        Ok(_) => ExitCode::from(2),
        Err(error) if error.is_empty() => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("ERROR sqlgolden-compare failed: {error}");
            ExitCode::from(2)
        }
    }
}
