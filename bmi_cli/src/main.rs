use bmi_core::*;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "Body mass index calculator and history tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI and optionally save it (default)
    Calc {
        /// Weight in kilograms (prompted if omitted)
        #[arg(long, allow_negative_numbers = true)]
        weight: Option<f64>,

        /// Height in centimeters (prompted if omitted)
        #[arg(long, allow_negative_numbers = true)]
        height: Option<f64>,

        /// Save without asking
        #[arg(long, conflicts_with = "no_save")]
        save: bool,

        /// Never save, don't ask
        #[arg(long, conflicts_with = "save")]
        no_save: bool,
    },

    /// Show saved measurements, newest first
    History,
}

/// What to do with a successful calculation
#[derive(Clone, Copy)]
enum SaveMode {
    Always,
    Never,
    Ask,
}

impl SaveMode {
    fn from_flags(save: bool, no_save: bool) -> Self {
        match (save, no_save) {
            (true, _) => SaveMode::Always,
            (_, true) => SaveMode::Never,
            _ => SaveMode::Ask,
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    bmi_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_or_default(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    tracing::debug!("Using database {:?}", config.database_path());
    let mut tracker = Tracker::open(&config);
    // Calculation works without the store; save and history report the failure
    if let Err(e) = tracker.initialize_store() {
        tracing::warn!("Measurement store unavailable at startup: {}", e);
    }

    let decimals = config.display.decimals;
    match cli.command {
        Some(Commands::Calc {
            weight,
            height,
            save,
            no_save,
        }) => cmd_calc(
            &mut tracker,
            weight,
            height,
            SaveMode::from_flags(save, no_save),
            decimals,
        ),
        Some(Commands::History) => cmd_history(&mut tracker, decimals),
        None => {
            // Default to an interactive "calc"
            cmd_calc(&mut tracker, None, None, SaveMode::Ask, decimals)
        }
    }
}

fn cmd_calc(
    tracker: &mut Tracker<SqliteStore>,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    mode: SaveMode,
    decimals: usize,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let weight_kg = match weight_kg {
        Some(w) => w,
        None => prompt_number(&mut input, "Weight (kg)")?,
    };
    let height_cm = match height_cm {
        Some(h) => h,
        None => prompt_number(&mut input, "Height (cm)")?,
    };

    let pending = tracker.compute_bmi(weight_kg, cm_to_m(height_cm))?;
    display_result(&pending, decimals);

    let should_save = match mode {
        SaveMode::Always => true,
        SaveMode::Never => false,
        SaveMode::Ask => prompt_confirm(&mut input, "Save this record? [y/N]")?,
    };

    if should_save {
        ensure_store_ready(tracker)?;
        let record_id = tracker.save_measurement(&pending)?;
        println!("\n✓ BMI record saved to history (id {})", record_id);
    } else {
        println!("\n[Not saved]");
    }

    Ok(())
}

fn cmd_history(tracker: &mut Tracker<SqliteStore>, decimals: usize) -> Result<()> {
    ensure_store_ready(tracker)?;
    let records = tracker.list_history()?;
    println!("{}", render_table(&records, decimals));
    Ok(())
}

/// Retry initialization if it failed at startup, surfacing the error
fn ensure_store_ready(tracker: &mut Tracker<SqliteStore>) -> Result<()> {
    if tracker.store().is_ready() {
        Ok(())
    } else {
        tracker.initialize_store()
    }
}

fn display_result(pending: &PendingMeasurement, decimals: usize) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BMI RESULT");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Your BMI: {:.*}", decimals, pending.bmi_value());
    println!("  Category: {}", pending.category());
    println!();
}

fn report_error(error: &Error) {
    if error.is_invalid_measurement() {
        eprintln!("Input Error: Please enter valid, positive numbers for weight and height.");
        eprintln!("  ({})", error);
    } else if error.is_storage_unavailable() {
        eprintln!("Storage Error: {}", error);
        eprintln!("  Nothing was changed; you can retry the same command.");
    } else {
        eprintln!("Error: {}", error);
    }
}

fn prompt_number(input: &mut impl BufRead, label: &str) -> Result<f64> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::InvalidMeasurement(format!("no value entered for {}", label)));
    }

    let text = line.trim();
    text.parse::<f64>()
        .map_err(|_| Error::InvalidMeasurement(format!("{:?} is not a number", text)))
}

fn prompt_confirm(input: &mut impl BufRead, question: &str) -> Result<bool> {
    println!("─────────────────────────────────────────");
    print!("{} ", question);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
