use anyhow::Context;
use astrodex::config::AstrodexConfig;
use astrodex::evaluation::{
    evaluate_chart, overall_testimony, Assessment, ConditionWorksheet, ScoreReport,
    TestimonyResult, WorksheetFlags,
};
use astrodex::geocoding::{estimate_utc_offset, validate_coordinates, GeocodingClient, OfflineBackend};
use astrodex::storage::{BirthData, ChartStore, JsonFileStore};
use astrodex::western::DignitiesService;
use astrodex::{ephemeris, Aspect, Body, ChartCalculator, ChartResult, DignitySet, Observer};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Config file (default: configs/astrodex.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate and evaluate a birth chart.
    Chart(ChartArgs),
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Birth date, YYYY-MM-DD.
    date: Option<String>,

    /// Local birth time, HH:MM.
    time: Option<String>,

    #[arg(long, default_value = "Client")]
    name: String,

    /// Place name, resolved through the geocoder.
    #[arg(long)]
    location: Option<String>,

    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Hours east of UTC (default: config, then estimated from longitude).
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<f64>,

    /// Print the full result as JSON.
    #[arg(long)]
    json: bool,

    /// Store the birth details for later `--load`.
    #[arg(long)]
    save: bool,

    /// Reuse the stored birth details.
    #[arg(long, conflicts_with_all = ["date", "time"])]
    load: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorksheetSummary {
    worksheet: ConditionWorksheet,
    essential_total: i32,
    accidental_total: i32,
    overall: i32,
    assessment: Assessment,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    birth: BirthData,
    chart: ChartResult,
    aspects: Vec<Aspect>,
    dignities: BTreeMap<Body, DignitySet>,
    testimony: BTreeMap<Body, TestimonyResult>,
    scores: BTreeMap<Body, ScoreReport>,
    worksheets: BTreeMap<Body, WorksheetSummary>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("astrodex: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AstrodexConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Chart(args) => chart(args, &config).await,
    }
}

async fn chart(args: ChartArgs, config: &AstrodexConfig) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&config.storage.dir);

    let birth = if args.load {
        store
            .load()?
            .with_context(|| format!("No saved birth data in {}", store.path().display()))?
    } else {
        BirthData {
            name: args.name.clone(),
            date: args.date.clone().context("Birth date is required")?,
            time: args.time.clone().context("Birth time is required")?,
            location: args.location.clone().unwrap_or_default(),
        }
    };

    let (latitude, longitude) = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => {
            validate_coordinates(lat, lon)?;
            (lat, lon)
        }
        _ => {
            let client = GeocodingClient::with_min_interval(
                OfflineBackend,
                config.geocoding.min_interval(),
            );
            let place = client.geocode(&birth.location).await?;
            log::info!("Resolved '{}' to {}", birth.location, place.display_name);
            (place.latitude, place.longitude)
        }
    };

    let utc_offset = args
        .utc_offset
        .or(config.chart.utc_offset)
        .unwrap_or_else(|| f64::from(estimate_utc_offset(longitude)));
    let instant = birth.instant(utc_offset)?;

    let provider = ephemeris::from_settings(&config.ephemeris)?;
    let calculator = ChartCalculator::new(provider).with_house_system(config.chart.house_system);
    let chart = calculator.calculate_complete_chart(instant, Observer::new(latitude, longitude))?;
    let aspects = calculator.chart_aspects(&chart);
    let dignities = DignitiesService.chart_dignities(&chart.placements(), chart.sect);

    let evaluation = evaluate_chart(&birth.name, &chart, &aspects, &dignities)?;
    let scores = evaluation.calculate_all_scores();
    let mut testimony = BTreeMap::new();
    let mut worksheets = BTreeMap::new();
    for (&body, &dignity) in &dignities {
        testimony.insert(body, overall_testimony(body, &aspects, chart.sect));
        let worksheet =
            ConditionWorksheet::from_chart(body, &chart, &aspects, dignity, WorksheetFlags::default())?;
        worksheets.insert(
            body,
            WorksheetSummary {
                essential_total: worksheet.essential_total(),
                accidental_total: worksheet.accidental_total(),
                overall: worksheet.overall(),
                assessment: worksheet.assessment(),
                worksheet,
            },
        );
    }

    if args.save {
        store.save(&birth)?;
    }

    let report = Report {
        birth,
        chart,
        aspects,
        dignities,
        testimony,
        scores,
        worksheets,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &Report) {
    let chart = &report.chart;
    println!("{} - {}", report.birth.name, chart.instant);
    println!(
        "Ascendant {}{}, {} chart",
        astrodex::chart::to_sign(chart.ascendant).formatted,
        if chart.ascendant_degraded { " (approximate)" } else { "" },
        chart.sect
    );
    println!();

    for (body, planet) in &chart.planets {
        let mut line = format!(
            "{:<8} {:<16} house {:>2}  {} {}",
            body.name(),
            planet.placement.formatted,
            planet.house,
            planet.motion.direction,
            planet.motion.speed_category
        );
        if let Some(score) = report.scores.get(body) {
            line.push_str(&format!(
                "  score {:+} ({:.0}, {})",
                score.raw_score, score.normalized_score, score.grade
            ));
        }
        if let Some(summary) = report.worksheets.get(body) {
            line.push_str(&format!("  worksheet {:+} {}", summary.overall, summary.assessment));
        }
        println!("{line}");
    }

    if !report.aspects.is_empty() {
        println!();
        for aspect in &report.aspects {
            println!("{aspect}");
        }
    }
}
