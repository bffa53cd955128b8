use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use sintax_parse_rs::classify::classify_hits;
use sintax_parse_rs::config::{Config, DEFAULT_THRESHOLD};
use sintax_parse_rs::error::Result;
use sintax_parse_rs::hits::read_hit_records;
use sintax_parse_rs::CallPolicy;

#[derive(Debug, Parser)]
#[command(version, about = "Parse sintax tsv output from sintax_rs")]
struct Args {
    #[arg(long, help = "Path to sintax tsv file.")]
    tsv: PathBuf,

    #[arg(
        long,
        default_value_t = DEFAULT_THRESHOLD,
        help = "Cutoff for determining taxonomic level classification"
    )]
    threshold: f64,

    #[arg(short, long, help = "Output directory")]
    outdir: PathBuf,

    #[arg(long, default_value_t = 0, help = "Worker threads (0 = all cores)")]
    threads: usize,

    #[arg(long, help = "Report the finest qualifying rank instead of the first")]
    finest: bool,

    #[arg(short, long, help = "Do not show progress spinners")]
    quiet: bool,
}

fn spinner(color: &str, msg: &'static str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    let template = format!("{{spinner:.{color}}} {{msg}}");
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template(&template)
    {
        pb.set_style(style);
    }
    pb.set_message(msg);
    pb
}

fn run(args: Args) -> Result<()> {
    let config = Config {
        threshold: args.threshold,
        policy: if args.finest {
            CallPolicy::FinestQualifying
        } else {
            CallPolicy::FirstQualifying
        },
        threads: args.threads,
    };
    config.validate()?;

    // 1. Load the hit table
    let pb = spinner("blue", "Reading hit table...", args.quiet);
    let records = read_hit_records(&args.tsv)?;
    pb.finish_with_message(format!("Read {} hit records.", records.len()));

    // 2. Vote per ASV
    let pb = spinner("green", "Classifying ASVs...", args.quiet);
    let results = classify_hits(&records, &config)?;
    pb.finish_with_message(format!(
        "Classified {} of {} ASVs.",
        results.report.len(),
        results.full_results.len()
    ));

    // 3. Write outputs
    let pb = spinner("yellow", "Writing output files...", args.quiet);
    results.write_to(&args.outdir)?;
    pb.finish_with_message("Output files created.");

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
