mod locations;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use plume_core::{
    build_table, dispersion_curves, log_spaced_distances, CloudCover, CloudCoverUnit,
    DispersionRow, EmissionSource, GramsPerSecond, MeteorologicalInput, Meters, MetersPerSecond,
    PlumeEstimate, PlumeModel, ReceptorPoint, StabilityClass, StabilityClassifier,
    StabilitySource, WeatherResponse, WindSpeedUnit,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Gaussian plume calculator with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "plume-calc")]
#[command(about = "Ground-level concentration from an elevated point source", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute stability class, σy, σz and ground-level concentration
    Calc(CalcArgs),
    /// Print σy and σz for all six stability classes at one distance
    Table {
        /// Downwind distance in m
        #[arg(short, long)]
        x: f64,

        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
    /// Print σy/σz curves over log-spaced distances as CSV
    Curves {
        /// log10 of the first distance (m)
        #[arg(long, default_value_t = 2.0)]
        from_exp: f64,

        /// log10 of the last distance (m)
        #[arg(long, default_value_t = 5.0)]
        to_exp: f64,

        /// Number of distance samples
        #[arg(short, long, default_value_t = 200)]
        samples: usize,

        /// Which spread to emit
        #[arg(long, value_enum, default_value_t = Axis::Both)]
        axis: Axis,
    },
    /// List the reference city table
    Cities,
    /// Run validation checks against the closed-form model
    Validate,
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Wind speed u in m/s
    #[arg(short, long)]
    wind_speed: Option<f64>,

    /// Cloud cover, in the unit given by --cloud-unit
    #[arg(short, long, default_value_t = 0.0)]
    cloud_cover: f64,

    /// Unit of the cloud cover value and of the classifier cutoff
    #[arg(long, value_enum, default_value_t = CloudUnitArg::Percent)]
    cloud_unit: CloudUnitArg,

    /// Override the classifier cutoff (default 40 %, 4 tenths or 0.4)
    #[arg(long)]
    cutoff: Option<f64>,

    /// Read wind speed and cloud cover from a saved weather response body
    #[arg(long, conflicts_with = "wind_speed")]
    weather_json: Option<PathBuf>,

    /// The weather response reports wind speed in km/h
    #[arg(long, requires = "weather_json")]
    weather_kmh: bool,

    /// Select the stability class directly (A-F) instead of computing it
    #[arg(long)]
    class: Option<String>,

    /// Emission rate Q in g/s
    #[arg(short = 'q', long, default_value_t = 0.0)]
    emission_rate: f64,

    /// Effective stack height H in m
    #[arg(long, default_value_t = 0.0)]
    stack_height: f64,

    /// Downwind distance x in m
    #[arg(short = 'x', long, default_value_t = 0.0)]
    downwind: f64,

    /// Crosswind distance y in m
    #[arg(short = 'y', long, default_value_t = 0.0, allow_negative_numbers = true)]
    crosswind: f64,

    /// Reference city (display only)
    #[arg(long)]
    city: Option<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CloudUnitArg {
    Percent,
    Tenths,
    Fraction,
}

impl From<CloudUnitArg> for CloudCoverUnit {
    fn from(arg: CloudUnitArg) -> Self {
        match arg {
            CloudUnitArg::Percent => CloudCoverUnit::Percent,
            CloudUnitArg::Tenths => CloudCoverUnit::Tenths,
            CloudUnitArg::Fraction => CloudCoverUnit::Fraction,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Y,
    Z,
    Both,
}

#[derive(Serialize)]
struct CalcReport {
    city: Option<String>,
    meteorology: MeteorologicalInput,
    estimate: PlumeEstimate,
    table: [DispersionRow; 6],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Calc(args) => run_calc(args),
        Command::Table { x, json } => run_table(*x, *json),
        Command::Curves {
            from_exp,
            to_exp,
            samples,
            axis,
        } => run_curves(*from_exp, *to_exp, *samples, *axis),
        Command::Cities => {
            run_cities();
            Ok(())
        }
        Command::Validate => {
            run_validation();
            Ok(())
        }
    }
}

fn load_meteorology(args: &CalcArgs, unit: CloudCoverUnit) -> Result<MeteorologicalInput> {
    if let Some(path) = &args.weather_json {
        let body = fs::read_to_string(path)
            .with_context(|| format!("reading weather response {}", path.display()))?;
        let wind_unit = if args.weather_kmh {
            WindSpeedUnit::KilometersPerHour
        } else {
            WindSpeedUnit::MetersPerSecond
        };
        let met = WeatherResponse::from_json(&body)
            .and_then(|response| response.to_meteorological_input(wind_unit))
            .with_context(|| format!("interpreting weather response {}", path.display()))?;
        info!(path = %path.display(), wind = met.wind_speed.value(), "loaded weather response");
        return Ok(met);
    }

    let wind = args.wind_speed.unwrap_or(0.0);
    Ok(MeteorologicalInput::new(
        MetersPerSecond::try_new(wind)?,
        CloudCover::try_new(args.cloud_cover, unit)?,
    ))
}

fn run_calc(args: &CalcArgs) -> Result<()> {
    let city = match &args.city {
        Some(name) => {
            let (lat, lon) = locations::find(name)
                .with_context(|| format!("unknown city '{name}', see `plume-calc cities`"))?;
            Some(format!("{} ({lat:.2}, {lon:.2})", name.trim()))
        }
        None => None,
    };

    let unit = CloudCoverUnit::from(args.cloud_unit);
    let met = load_meteorology(args, unit)?;

    if met.wind_speed.value() == 0.0
        || args.emission_rate == 0.0
        || args.stack_height == 0.0
        || args.downwind == 0.0
    {
        bail!(
            "please enter all required values: wind speed, emission rate, \
             stack height and downwind distance must be non-zero"
        );
    }

    let classifier = match args.cutoff {
        Some(cutoff) => StabilityClassifier::with_cutoff(unit, cutoff)?,
        None => StabilityClassifier::preset(unit),
    };
    let stability = StabilitySource::from_token(args.class.as_deref())?;

    let source = EmissionSource::new(
        GramsPerSecond::try_new(args.emission_rate)?,
        Meters::try_named("stack height", args.stack_height)?,
    );
    let receptor = ReceptorPoint::try_new(
        Meters::try_named("downwind distance", args.downwind)?,
        args.crosswind,
    )?;

    let estimate = PlumeModel::new(classifier).evaluate(&source, &receptor, &met, stability)?;
    let table = build_table(receptor.downwind());

    if args.json {
        let report = CalcReport {
            city,
            meteorology: met,
            estimate,
            table,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== Gaussian Plume Model ===\n");
    if let Some(city) = &city {
        println!("City: {city} (reference only)");
    }
    print!("Wind: {}, Cloud cover: {}", met.wind_speed, met.cloud_cover);
    match met.mixing_height {
        Some(h) => println!(", Mixing height: {h}"),
        None => println!(),
    }
    println!(
        "Source: Q = {}, H = {}; receptor x = {}, y = {:.2} m\n",
        source.emission_rate,
        source.stack_height,
        receptor.downwind(),
        receptor.crosswind()
    );

    let origin = match stability {
        StabilitySource::Computed => "Computed",
        StabilitySource::Manual(_) => "Selected",
    };
    println!(
        "{origin} Stability Class: {} ({})",
        estimate.class,
        estimate.class.label()
    );
    println!("σy = {}", estimate.dispersion.sigma_y);
    println!("σz = {}", estimate.dispersion.sigma_z);
    println!("Ground Level Concentration = {}\n", estimate.concentration);

    print_table(&table);
    Ok(())
}

fn print_table(table: &[DispersionRow]) {
    println!("{:<6} {:<18} {:>12} {:>12}", "Class", "Condition", "σy (m)", "σz (m)");
    for row in table {
        println!(
            "{:<6} {:<18} {:>12.2} {:>12.2}",
            row.class,
            row.label,
            row.sigma_y.value(),
            row.sigma_z.value()
        );
    }
}

fn run_table(x: f64, json: bool) -> Result<()> {
    let table = build_table(Meters::try_named("downwind distance", x)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("σy and σz for all stability classes at x = {x} m\n");
        print_table(&table);
    }
    Ok(())
}

fn run_curves(from_exp: f64, to_exp: f64, samples: usize, axis: Axis) -> Result<()> {
    let distances = log_spaced_distances(from_exp, to_exp, samples)
        .context("building distance samples")?;
    match axis {
        Axis::Y => println!("x_m,class,sigma_y_m"),
        Axis::Z => println!("x_m,class,sigma_z_m"),
        Axis::Both => println!("x_m,class,sigma_y_m,sigma_z_m"),
    }
    for curve in dispersion_curves(&distances) {
        for point in &curve.points {
            let (x, sy, sz) = (point.x.value(), point.sigma_y.value(), point.sigma_z.value());
            match axis {
                Axis::Y => println!("{x},{},{sy}", curve.class),
                Axis::Z => println!("{x},{},{sz}", curve.class),
                Axis::Both => println!("{x},{},{sy},{sz}", curve.class),
            }
        }
    }
    Ok(())
}

fn run_cities() {
    let mut region = "";
    for &(group, city, lat, lon) in locations::CITIES {
        if group != region {
            println!("\n{group}");
            region = group;
        }
        println!("  {city:<20} {lat:>6.2} {lon:>6.2}");
    }
}

fn run_validation() {
    println!("=== Running Validation Checks ===\n");

    let check = |name: &str, pass: bool, detail: String| {
        let mark = if pass { "✓ PASS" } else { "✗ FAIL" };
        println!("  {mark}: {name} ({detail})");
    };

    println!("Check 1: Stability classification bands");
    let cases = [
        (1.5, 30.0, StabilityClass::A),
        (2.5, 50.0, StabilityClass::C),
        (6.5, 80.0, StabilityClass::E),
    ];
    for (wind, cloud, expected) in cases {
        let got = plume_core::classify(wind, cloud);
        check(
            &format!("u = {wind} m/s, cloud = {cloud} %"),
            got == expected,
            format!("got {got}, expected {expected}"),
        );
    }

    println!("\nCheck 2: Worked example (Q = 100 g/s, u = 3 m/s, H = 50 m, x = 1 km, class D)");
    match worked_example() {
        Ok((c, reference)) => check(
            "concentration matches closed form",
            ((c - reference) / reference).abs() < 1e-9,
            format!("{c:.6e} g/m³"),
        ),
        Err(err) => check("concentration matches closed form", false, err.to_string()),
    }

    println!("\nCheck 3: Calm wind");
    match plume_core::concentration_raw(100.0, 0.0, 50.0, 1000.0, 0.0, 76.0, 60.0) {
        Ok(c) => check("zero wind gives zero concentration", c == 0.0, format!("{c}")),
        Err(err) => check("zero wind gives zero concentration", false, err.to_string()),
    }

    println!("\nCheck 4: Instability ordering at 1 km");
    let x = match Meters::try_new(1000.0) {
        Ok(x) => x,
        Err(err) => {
            check("σ decreases from A to F", false, err.to_string());
            return;
        }
    };
    let table = build_table(x);
    let ordered = table
        .windows(2)
        .all(|w| w[0].sigma_y > w[1].sigma_y && w[0].sigma_z > w[1].sigma_z);
    check("σ decreases from A to F", ordered, format!("{} rows", table.len()));

    println!("\n=== Validation Complete ===");
}

/// Worked example at 1 km in class D: `(computed, closed-form reference)` in g/m³.
fn worked_example() -> Result<(f64, f64)> {
    let x = Meters::try_new(1000.0)?;
    let sy = plume_core::sigma_y(x, StabilityClass::D).value();
    let sz = plume_core::sigma_z(x, StabilityClass::D).value();
    let reference = 100.0 / (2.0 * std::f64::consts::PI * 3.0 * sy * sz)
        * (-(50.0_f64 * 50.0) / (2.0 * sz * sz)).exp();
    let c = plume_core::concentration_raw(100.0, 3.0, 50.0, 1000.0, 0.0, sy, sz)?;
    Ok((c, reference))
}
