//! StressIQ CLI
//!
//! Scores vitals and runs relief sessions from the terminal.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use stressiq::{
    init_logging, Activity, Config, DominantRegion, RegionKey, RegionStressStore, Session,
    SessionSettings, SimulatedScan, StressReport, StressScoreEngine, VitalsSnapshot, CATALOG,
    DISCLAIMER, VERSION,
};

#[derive(Parser)]
#[command(name = "stressiq")]
#[command(author = "StressIQ")]
#[command(version = VERSION)]
#[command(about = "Regional stress scoring from wearable vitals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// A vitals reading. Omitted values come from the demo reading.
#[derive(Args, Debug, Clone)]
struct VitalsArgs {
    /// Root mean square of successive differences, ms
    #[arg(long)]
    rmssd: Option<f64>,

    /// Standard deviation of NN intervals, ms (reported only)
    #[arg(long)]
    sdnn: Option<f64>,

    /// Breaths per minute
    #[arg(long)]
    resp_rate: Option<f64>,

    /// Blood oxygen saturation, percent
    #[arg(long)]
    spo2: Option<f64>,

    /// Beats per minute
    #[arg(long)]
    heart_rate: Option<f64>,

    /// Escalation multiplier (overrides config)
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Escalation exponent (overrides config)
    #[arg(long)]
    harshness: Option<f64>,
}

impl VitalsArgs {
    fn snapshot(&self, config: &Config) -> VitalsSnapshot {
        let demo = VitalsSnapshot::demo();
        let reading = VitalsSnapshot::new(
            self.rmssd.unwrap_or(demo.rmssd),
            self.sdnn.unwrap_or(demo.sdnn),
            self.resp_rate.unwrap_or(demo.resp_rate),
            self.spo2.unwrap_or(demo.spo2),
            self.heart_rate.unwrap_or(demo.heart_rate),
        );
        let tuned = config.scoring.apply(reading);
        tuned.with_tuning(
            self.sensitivity.unwrap_or(tuned.sensitivity),
            self.harshness.unwrap_or(tuned.harshness),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single reading
    Score {
        #[command(flatten)]
        vitals: VitalsArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the simulated scan, then score its reading
    Scan {
        #[command(flatten)]
        vitals: VitalsArgs,
    },

    /// Start an interactive relief session
    Session {
        #[command(flatten)]
        vitals: VitalsArgs,

        /// Run the simulated scan before the session starts
        #[arg(long)]
        scan: bool,
    },

    /// List corrective activities
    Activities {
        /// Only show activities for this region
        #[arg(long)]
        region: Option<String>,
    },

    /// Show configuration
    Config,

    /// Display wellness disclaimer
    Disclaimer,

    /// Serve the HTTP API (requires server feature)
    #[cfg(feature = "server")]
    Serve {
        /// Port to bind to
        #[arg(long, default_value = "8787")]
        port: u16,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { vitals, json } => cmd_score(&vitals, json),
        Commands::Scan { vitals } => cmd_scan(&vitals),
        Commands::Session { vitals, scan } => cmd_session(&vitals, scan),
        Commands::Activities { region } => cmd_activities(region.as_deref()),
        Commands::Config => cmd_config(),
        Commands::Disclaimer => {
            println!("{DISCLAIMER}");
            Ok(())
        }
        #[cfg(feature = "server")]
        Commands::Serve { port } => cmd_serve(port),
    }
}

fn load_config() -> anyhow::Result<Config> {
    Config::load().with_context(|| format!("loading {:?}", Config::config_path()))
}

fn cmd_score(vitals: &VitalsArgs, json: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let snapshot = vitals.snapshot(&config);
    let report = StressScoreEngine::new().score(&snapshot)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.rounded())?);
        return Ok(());
    }

    print_report(&report);
    print_outlook(&report, &config)
}

fn cmd_scan(vitals: &VitalsArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    let snapshot = run_scan(&config, vitals.snapshot(&config))?;
    let report = StressScoreEngine::new().score(&snapshot)?;

    print_report(&report);
    print_outlook(&report, &config)
}

/// Run a simulated scan with a progress line. Ctrl+C cancels it.
fn run_scan(config: &Config, snapshot: VitalsSnapshot) -> anyhow::Result<VitalsSnapshot> {
    let mut scan = SimulatedScan::new(config.scan.clone(), snapshot);
    ctrlc_handler(scan.cancel_handle())?;

    println!(
        "Scanning (about {}s, press Ctrl+C to cancel)...",
        config.scan.total_duration().as_secs()
    );
    let result = scan.wait_with(|percent| {
        print!("\r  Progress: {percent:>3}%");
        let _ = io::stdout().flush();
    });
    println!();

    Ok(result?)
}

fn cmd_session(vitals: &VitalsArgs, scan: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let mesh_map = config.mesh_map()?;

    let mut snapshot = vitals.snapshot(&config);
    if scan {
        snapshot = run_scan(&config, snapshot)?;
    }

    let mut session = Session::from_snapshot(&snapshot, SessionSettings::from(&config))?;
    println!("StressIQ v{VERSION}");
    println!("Session {}", session.id());
    println!();
    print_report(session.initial_report());
    print_status(&session)?;
    println!();
    println!("Commands: status, complete <id>, relieve <REGION>, activities [REGION], paint, quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let arg = words.next();

        let outcome = match (command, arg) {
            ("status", _) => print_status(&session),
            ("complete", Some(id)) => session
                .complete_activity(id)
                .map(|c| println!("{}: {:.3} -> {:.3}", c.region.label(), c.before, c.after))
                .map_err(anyhow::Error::from),
            ("relieve", Some(name)) => name
                .parse::<RegionKey>()
                .and_then(|region| session.complete_region(region))
                .map(|c| println!("{}: {:.3} -> {:.3}", c.region.label(), c.before, c.after))
                .map_err(anyhow::Error::from),
            ("activities", region) => cmd_activities(region),
            ("paint", _) => session.current_vector().map_err(anyhow::Error::from).map(|vector| {
                for paint in mesh_map.paint(&vector) {
                    println!(
                        "  {:<12} {:<11} {} {:.3}",
                        paint.mesh.as_str(),
                        paint.region.as_str(),
                        paint.base_color,
                        paint.intensity
                    );
                }
            }),
            ("quit" | "exit", _) => break,
            _ => {
                eprintln!("Unknown command: {}", line.trim());
                Ok(())
            }
        };

        if let Err(e) = outcome {
            eprintln!("Error: {e}");
        }
    }

    let summary = session.summary()?;
    println!();
    println!("Session summary");
    println!("===============");
    println!("  Activities completed: {}", summary.completions);
    println!("  Total relief: {:.3}", summary.total_relief);
    println!("  Mean regional stress: {:.3}", summary.mean_stress);
    println!("  Spread: {:.3}", summary.stress_spread);
    Ok(())
}

fn cmd_activities(region: Option<&str>) -> anyhow::Result<()> {
    let activities: Vec<&Activity> = match region {
        Some(name) => CATALOG.for_region(name.parse()?).collect(),
        None => CATALOG.all().iter().collect(),
    };

    for activity in activities {
        print_activity(activity);
    }
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let config = load_config()?;

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(feature = "server")]
fn cmd_serve(port: u16) -> anyhow::Result<()> {
    use stressiq::server::{run, ServerConfig};

    let config = load_config()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let (addr, shutdown_tx) = run(ServerConfig::new(port, config)).await?;
        println!("Listening on http://{addr}");
        println!("Press Ctrl+C to stop");

        tokio::signal::ctrl_c().await?;
        let _ = shutdown_tx.send(());
        Ok::<(), anyhow::Error>(())
    })
}

fn print_report(report: &StressReport) {
    println!("Global stress: {:.3}", report.global);
    println!("Regions:");
    for (region, value) in report.regions.iter() {
        println!("  {:<11} {:.3}", region.label(), value);
    }
}

/// Dominant region and suggestions for a one-off report.
fn print_outlook(report: &StressReport, config: &Config) -> anyhow::Result<()> {
    let store = RegionStressStore::with_vector(report.regions)
        .with_elevation_threshold(config.elevation_threshold);
    print_dominant(&store.most_stressed_region()?);
    Ok(())
}

fn print_status(session: &Session) -> anyhow::Result<()> {
    print_dominant(&session.dominant()?);
    Ok(())
}

fn print_dominant(dominant: &DominantRegion) {
    if !dominant.elevated {
        println!("All regions calm.");
        return;
    }

    println!(
        "Most stressed: {} ({:.3})",
        dominant.region.label(),
        dominant.value
    );
    println!("Try:");
    for activity in CATALOG.recommend(dominant) {
        println!("  {:<18} {}", activity.id, activity.title);
    }
}

fn print_activity(activity: &Activity) {
    println!(
        "{:<18} [{}] {}",
        activity.id, activity.region, activity.title
    );
    println!("  {}", activity.blurb);
    if let Some(goal) = activity.goal_metric {
        println!("  Goal: {goal}");
    }
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(cancelled: Arc<AtomicBool>) -> anyhow::Result<()> {
    if let Err(e) = ctrlc::set_handler(move || {
        cancelled.store(true, Ordering::SeqCst);
    }) {
        bail!("Error setting Ctrl+C handler: {e}");
    }
    Ok(())
}
