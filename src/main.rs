use anyhow::{Context, Result};
use clap::Parser;
use tzsleuth::{
    analyzer::{AnalysisReport, Analyzer},
    cli::{Cli, OutputFormat},
    config::AnalysisConfig,
    csv_output,
    histogram::ActivityHistogram,
    html_output,
    ingest::EventLog,
    json_output::JsonOutput,
    output_dir::OutputDir,
    text_report,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; warnings always reach stderr.
///
/// `-v`/`--debug` add their level on top of `RUST_LOG`; without them
/// `RUST_LOG` is used as given, falling back to WARN when unset.
fn init_tracing(verbose: bool, debug: bool) {
    let filter = if debug || verbose {
        let level = if debug {
            tracing::Level::TRACE
        } else {
            tracing::Level::INFO
        };
        EnvFilter::from_default_env().add_directive(level.into())
    } else {
        EnvFilter::builder()
            .with_default_directive(tracing::Level::WARN.into())
            .from_env_lossy()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file if one was given, then apply command-line overrides
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    let config = args.apply_overrides(config);
    config.validate()?;
    Ok(config)
}

/// Analyze either a timestamps file or a raw histogram
fn run_analysis(args: &Cli, analyzer: &Analyzer) -> Result<AnalysisReport> {
    match (&args.input, &args.counts) {
        (Some(path), None) => {
            let events = EventLog::from_file(path)?;
            Ok(analyzer.analyze_events(&events))
        }
        (None, Some(counts)) => {
            let histogram =
                ActivityHistogram::from_counts(counts).context("Invalid --counts histogram")?;
            Ok(analyzer.analyze_histogram(histogram))
        }
        (Some(_), Some(_)) => {
            anyhow::bail!("Cannot specify both INPUT and --counts. Choose one.");
        }
        (None, None) => {
            anyhow::bail!(
                "Must specify either INPUT or --counts. Usage: tzsleuth output.json or tzsleuth --counts C0,...,C23"
            );
        }
    }
}

fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => text_report::render(report),
        OutputFormat::Json => JsonOutput::from_report(report).to_json()?,
        OutputFormat::Csv => csv_output::hourly_csv(report),
        OutputFormat::Html => html_output::render(report),
    })
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.verbose, args.debug);

    let config = load_config(&args)?;
    let analyzer = Analyzer::new(config.estimator)?;
    let report = run_analysis(&args, &analyzer)?;

    // Directory creation is an explicit step, before any artifact is written
    if let Some(dir) = &config.output.directory {
        OutputDir::ensure(dir)?.write_all(&report)?;
    }

    print!("{}", render(&report, args.format)?);

    Ok(())
}
