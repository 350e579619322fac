use clap::{ArgGroup, Parser};
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::{error, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use subnet_planner::config_loader::{inline_config, load_config};
use subnet_planner::export::{export_csv, export_json, export_markdown, print_table};
use subnet_planner::planner::plan_networks;
use subnet_planner::record::OutputRecord;

const EXAMPLES: &str = "\
Examples:
  subnet-planner --input config.json
  subnet-planner --input config.json --export-json plan.json --export-csv plan.csv
  subnet-planner --network 192.168.1.0/24 --hosts 50:2,10:3
  subnet-planner --network 10.0.0.0/16 --cidr 26:2,28:1";

/// Plan IPv4 subnets inside parent networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "network"])))]
struct Args {
    /// Path to a JSON or YAML configuration file
    #[arg(short, long, short_alias = 'f', value_name = "FILE")]
    input: Option<PathBuf>,

    /// Parent network in CIDR notation (e.g. 192.168.1.0/24)
    #[arg(short, long)]
    network: Option<String>,

    /// Host requirements as value:count pairs (e.g. 50:2,10:3 => 2x50-host, 3x10-host)
    #[arg(long, requires = "network")]
    hosts: Option<String>,

    /// Prefix requirements as value:count pairs (e.g. 26:2,28:1 => 2x/26, 1x/28)
    #[arg(long, requires = "network")]
    cidr: Option<String>,

    /// Export the plan to a JSON file
    #[arg(long = "export-json", visible_alias = "exportjson", alias = "json", value_name = "FILE")]
    export_json: Option<PathBuf>,

    /// Export the plan to a CSV file
    #[arg(long = "export-csv", visible_alias = "exportcsv", alias = "csv", value_name = "FILE")]
    export_csv: Option<PathBuf>,

    /// Export the plan to a Markdown file (empty to disable)
    #[arg(
        long = "export-md",
        visible_alias = "exportmd",
        alias = "md",
        value_name = "FILE",
        default_value = "plan.md"
    )]
    export_md: String,
}

/// Drop a leading `plan` word kept for compatibility with older invocations
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    if args.get(1).is_some_and(|arg| arg == "plan") {
        args.remove(1);
    }
    args
}

fn report_export(kind: &str, path: &Path, result: Result<()>) {
    match result {
        Ok(()) => {
            println!("✓ {}: {}", kind, path.display());
            info!("Exported {} plan to {:?}", kind, path);
        }
        Err(e) => error!("error exporting {}: {:?}", kind, e),
    }
}

fn run_exports(args: &Args, records: &[OutputRecord]) {
    if let Some(path) = &args.export_json {
        report_export("JSON", path, export_json(records, path));
    }
    if let Some(path) = &args.export_csv {
        report_export("CSV", path, export_csv(records, path));
    }
    if !args.export_md.is_empty() {
        let path = Path::new(&args.export_md);
        report_export("Markdown", path, export_markdown(records, path));
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse_from(normalize_args(std::env::args_os()));

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match (&args.input, &args.network) {
        (Some(path), _) => load_config(path)?,
        (None, Some(network)) => inline_config(network, args.hosts.as_deref(), args.cidr.as_deref())?,
        (None, None) => bail!("either --input or --network must be provided"),
    };

    let records = plan_networks(&config.networks).wrap_err("planning error")?;

    print_table(&records);
    println!();
    run_exports(&args, &records);

    Ok(())
}
