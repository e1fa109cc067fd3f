use clap::Parser;
use quoteform::{FieldMapping, QuoteFlow, TestDataSource, TraceSurface, VehicleType};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "quoteform")]
#[command(about = "Data-driven form automation: inspect test data rotation and dry-run the quote flow")]
#[command(version)]
struct Cli {
    /// Test data file (JSON with a named record array)
    data: PathBuf,

    /// Root array key in the data file
    #[arg(long, default_value = TestDataSource::DEFAULT_ARRAY_KEY)]
    key: String,

    /// Validate the data file and mappings without running
    #[arg(long)]
    check: bool,

    /// Print the rotation order for this many draws
    #[arg(long, value_name = "N")]
    cycles: Option<usize>,

    /// Run the full quote flow for the next record against a trace surface
    #[arg(long)]
    dry_run: bool,

    /// Override the record's vehicle type for the dry run
    #[arg(long)]
    vehicle: Option<String>,

    /// Replace a built-in page mapping (can be used multiple times)
    #[arg(short = 'm', long = "mapping", value_name = "FILE")]
    mappings: Vec<PathBuf>,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> quoteform::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let source = TestDataSource::load_with_key(&cli.data, &cli.key)?;

    let mut flow = QuoteFlow::new();
    for path in &cli.mappings {
        let mapping = FieldMapping::load(path)?;
        println!("Mapping loaded: {} ({} fields)", mapping.page, mapping.fields.len());
        flow = flow.with_mapping(mapping)?;
    }

    if cli.check {
        println!("Data file valid: {}", cli.data.display());
        println!("  Records: {}", source.len());
        for (i, record) in source.records().iter().enumerate() {
            println!("    [{}] {} fields", i, record.len());
        }
        return Ok(());
    }

    if let Some(cycles) = cli.cycles {
        println!("Rotation order over {} draws:", cycles);
        for draw in 0..cycles {
            println!("  draw {} -> record {}", draw, draw % source.len());
        }
        return Ok(());
    }

    if cli.dry_run {
        let mut record = source.next_record();
        if let Some(ref vehicle) = cli.vehicle {
            // Validate before overriding so typos fail here, not mid-flow.
            VehicleType::from_str(vehicle)?;
            record = record.set("VehicleType", vehicle.clone());
        }

        let surface = TraceSurface::new();
        flow.run(&surface, &record).await?;

        let ops = surface.ops();
        println!();
        println!("✓ Dry run complete");
        println!("  Interactions: {}", ops.len());
        for op in &ops {
            println!("    {:?}", op);
        }
        return Ok(());
    }

    println!("Nothing to do: pass --check, --cycles, or --dry-run");
    Ok(())
}
