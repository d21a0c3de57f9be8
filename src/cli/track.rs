use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::snapshot::load_population;
use crate::core::types::{BirthYearRange, Mode};
use crate::matching::engine::{ResolutionEngine, TrackingConfig};
use crate::matching::similarity::DEFAULT_CUTOFF;
use crate::parsing::csv::{read_snapshot_file, ColumnMapping};
use crate::report::TrackingReport;

/// Years before the census year still considered a plausible birth year
pub const DEFAULT_SPAN: i32 = 100;

#[derive(Args)]
pub struct TrackArgs {
    /// First (earlier) census snapshot
    #[arg(required = true)]
    pub snapshot_a: PathBuf,

    /// Second (later) census snapshot
    #[arg(required = true)]
    pub snapshot_b: PathBuf,

    /// Census year of the first snapshot
    #[arg(long)]
    pub year_a: Option<i32>,

    /// Census year of the second snapshot
    #[arg(long)]
    pub year_b: Option<i32>,

    /// Number of years before the census year accepted as birth years
    #[arg(long, default_value_t = DEFAULT_SPAN)]
    pub span: i32,

    /// Plausible birth years in the first snapshot (MIN:MAX), overrides --year-a
    #[arg(long)]
    pub range_a: Option<BirthYearRange>,

    /// Plausible birth years in the second snapshot (MIN:MAX), overrides --year-b
    #[arg(long)]
    pub range_b: Option<BirthYearRange>,

    /// Who to follow from the first snapshot: heads of household or their children
    #[arg(short, long, default_value = "head")]
    pub mode: Mode,

    /// Similarity cutoff for names, origins and streets (0 < cutoff <= 1)
    #[arg(long, default_value_t = DEFAULT_CUTOFF)]
    pub cutoff: f64,

    /// Field delimiter of the input files
    #[arg(short, long, default_value = ";")]
    pub delimiter: char,

    /// JSON file mapping fields to column names
    #[arg(long)]
    pub columns: Option<PathBuf>,
}

/// Execute track subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid or an input cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TrackArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let range_a = birth_year_range(args.range_a, args.year_a, args.span, "first")?;
    let range_b = birth_year_range(args.range_b, args.year_b, args.span, "second")?;
    let config = TrackingConfig::new(args.mode, range_a, range_b).with_cutoff(args.cutoff)?;

    let delimiter = u8::try_from(args.delimiter)
        .with_context(|| format!("Delimiter '{}' is not a single-byte character", args.delimiter))?;
    let columns = match &args.columns {
        Some(path) => ColumnMapping::load_from_file(path)
            .with_context(|| format!("Failed to load column mapping {}", path.display()))?,
        None => ColumnMapping::default(),
    };

    let rows_a = read_snapshot_file(&args.snapshot_a, delimiter, &columns)
        .with_context(|| format!("Failed to read {}", args.snapshot_a.display()))?;
    let rows_b = read_snapshot_file(&args.snapshot_b, delimiter, &columns)
        .with_context(|| format!("Failed to read {}", args.snapshot_b.display()))?;

    let snapshot_a = load_population(&rows_a, config.mode, config.range_a);
    // The second snapshot is never expanded into children
    let snapshot_b = load_population(&rows_b, Mode::Head, config.range_b);

    if verbose {
        eprintln!(
            "Snapshot A: {} people from {} rows (birth years {})",
            snapshot_a.len(),
            snapshot_a.rows(),
            config.range_a
        );
        eprintln!(
            "Snapshot B: {} people from {} rows (birth years {})",
            snapshot_b.len(),
            snapshot_b.rows(),
            config.range_b
        );
    }

    let engine = ResolutionEngine::with_config(&config);
    let resolution = engine.resolve(snapshot_a.people(), snapshot_b.people());

    let label_a = label(&args.snapshot_a, args.year_a);
    let label_b = label(&args.snapshot_b, args.year_b);
    let report = TrackingReport::build(&label_a, &snapshot_a, &label_b, &snapshot_b, &resolution);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => report.write_text(&mut out)?,
        OutputFormat::Json => report.write_json(&mut out)?,
        OutputFormat::Tsv => report.write_tsv(&mut out)?,
    }
    out.flush()?;

    Ok(())
}

fn birth_year_range(
    explicit: Option<BirthYearRange>,
    census_year: Option<i32>,
    span: i32,
    which: &str,
) -> anyhow::Result<BirthYearRange> {
    match (explicit, census_year) {
        (Some(range), _) => Ok(range),
        (None, Some(year)) => Ok(BirthYearRange::for_census(year, span)?),
        (None, None) => bail!(
            "No birth year range for the {which} snapshot: pass its census year or an explicit MIN:MAX range"
        ),
    }
}

/// Census year if known, file name otherwise
fn label(path: &Path, census_year: Option<i32>) -> String {
    census_year.map_or_else(
        || {
            path.file_stem()
                .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
        },
        |year| year.to_string(),
    )
}
