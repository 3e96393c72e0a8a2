use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use investran_upload::{
    config::ParamOverrides,
    ingest::{combine_batches, load_batches},
    output::{self, ARCHIVE_NAME, MANUAL_STEP_REMINDER},
    pipeline, LinkMode, RunContext, RunParams,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LinkArg {
    Explicit,
    Positional,
}

impl From<LinkArg> for LinkMode {
    fn from(a: LinkArg) -> Self {
        match a {
            LinkArg::Explicit => LinkMode::Explicit,
            LinkArg::Positional => LinkMode::Positional,
        }
    }
}

/// Convert Platform Eleven TRANSACTION and CONTACT exports into the five
/// Investran upload sheets.
#[derive(Debug, Parser)]
#[command(name = "investran-convert", version)]
struct Cli {
    /// TRANSACTION files, directories or glob patterns (.csv, .json, .zip)
    #[arg(long, short = 't', num_args = 1.., required = true)]
    transactions: Vec<String>,

    /// CONTACT files, directories or glob patterns (.csv, .json, .zip)
    #[arg(long, short = 'c', num_args = 1.., required = true)]
    contacts: Vec<String>,

    /// YAML file with contact_domain / vehicle / vehicle_close_date / commitment_date
    #[arg(long)]
    config: Option<PathBuf>,

    /// "Contact Domain" for sheets 1-3
    #[arg(long)]
    contact_domain: Option<String>,

    /// "Vehicle" for sheets 4-5
    #[arg(long)]
    vehicle: Option<String>,

    /// "Specific Vehicle Close Date" (MM/DD/YYYY) for sheet 5
    #[arg(long)]
    vehicle_close_date: Option<String>,

    /// "Investor Commitment Date" (MM/DD/YYYY) for sheet 5
    #[arg(long)]
    commitment_date: Option<String>,

    /// How contacts are paired with transactions
    #[arg(long, value_enum, default_value = "explicit")]
    link_mode: LinkArg,

    /// Write the five sheets as CSV files into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Write the five sheets as xlsx workbooks into this ZIP archive
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Write a JSON run summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ─── 2) resolve run parameters ───────────────────────────────────
    let base = match &cli.config {
        Some(path) => RunParams::from_yaml_file(path)?,
        None => RunParams::default(),
    };
    let params = base.merge(ParamOverrides {
        contact_domain: cli.contact_domain.clone(),
        vehicle: cli.vehicle.clone(),
        vehicle_close_date: cli.vehicle_close_date.clone(),
        commitment_date: cli.commitment_date.clone(),
    });
    params.warn_suspicious();
    let ctx = RunContext::new(params).with_link_mode(cli.link_mode.into());

    // ─── 3) load + combine batches ───────────────────────────────────
    let tx_batches = load_batches(&cli.transactions).context("loading TRANSACTION inputs")?;
    let contact_batches = load_batches(&cli.contacts).context("loading CONTACT inputs")?;
    let transactions = combine_batches("transaction", &tx_batches);
    let contacts = combine_batches("contact", &contact_batches);

    // ─── 4) run the conversion ───────────────────────────────────────
    let run = match pipeline::run_combined(&ctx, &transactions, &contacts) {
        Ok(run) => run,
        Err(e) => {
            error!("{}", e);
            error!("please provide both TRANSACTION and CONTACT files; nothing was written");
            std::process::exit(2);
        }
    };

    // ─── 5) write outputs ────────────────────────────────────────────
    let archive = match (&cli.archive, &cli.out_dir) {
        (Some(path), _) => Some(path.clone()),
        (None, None) => Some(PathBuf::from(ARCHIVE_NAME)),
        (None, Some(_)) => None,
    };
    if let Some(dir) = &cli.out_dir {
        output::write_dir(&run.sheets, dir)?;
    }
    if let Some(path) = &archive {
        output::write_archive(&run.sheets, path)?;
    }
    if let Some(path) = &cli.summary {
        run.summary.write_json(path)?;
    }

    info!(rows = run.summary.aligned_rows, "all done");
    eprintln!("{}", MANUAL_STEP_REMINDER);
    Ok(())
}
