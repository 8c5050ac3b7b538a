//! EDT Calendar CLI
//!
//! Command-line tool for converting spreadsheet timetables into calendar files.

use clap::{Parser, Subcommand};
use edt_core::{parse_schedule, to_ics, to_json, Config, TimeRange};
use log::LevelFilter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edt-cli")]
#[command(about = "Spreadsheet timetable to calendar converter", long_about = None)]
#[command(version)]
struct Cli {
    /// Log how every cell is interpreted
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CSV timetable to a calendar file
    Convert {
        /// Path to the CSV timetable
        #[arg(short, long, default_value = "edt.csv")]
        file: PathBuf,

        /// Configuration file (JSON); built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (ics or json)
        #[arg(long, default_value = "ics")]
        format: String,

        /// Output file path; standard output when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the tables, headers and entries found in a CSV timetable
    Inspect {
        /// Path to the CSV timetable
        #[arg(short, long, default_value = "edt.csv")]
        file: PathBuf,

        /// Configuration file (JSON); built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the default configuration as a template
    InitConfig {
        /// Output path for the configuration file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> edt_core::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Convert {
            file,
            config,
            format,
            output,
        } => cmd_convert(&file, config.as_ref(), &format, output.as_ref()),
        Commands::Inspect { file, config } => cmd_inspect(&file, config.as_ref()),
        Commands::InitConfig { output } => cmd_init_config(&output),
    }
}

fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(path: Option<&PathBuf>) -> edt_core::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn cmd_convert(
    file: &PathBuf,
    config: Option<&PathBuf>,
    format: &str,
    output: Option<&PathBuf>,
) -> edt_core::Result<()> {
    let schedule = parse_schedule(file, load_config(config)?)?;
    let events = schedule.events()?;

    let content = match format.to_lowercase().as_str() {
        "ics" => to_ics(&events, &schedule.config().locale),
        "json" => to_json(&events)?,
        _ => {
            eprintln!("Unknown format: {}. Supported formats: ics, json", format);
            std::process::exit(1);
        }
    };

    match output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            write!(writer, "{}", content)?;
            writer.flush()?;

            println!("Exported {} events to {}", events.len(), path.display());
        }
        None => print!("{}", content),
    }

    Ok(())
}

fn cmd_inspect(file: &PathBuf, config: Option<&PathBuf>) -> edt_core::Result<()> {
    let schedule = parse_schedule(file, load_config(config)?)?;

    println!("File: {}", file.display());
    println!("Rows: {}", schedule.row_count());
    println!("Tables: {}", schedule.tables().len());

    for (n, table) in schedule.tables().iter().enumerate() {
        println!();
        println!("Table {} ({} entries)", n + 1, table.entry_count());
        println!("{}", "-".repeat(40));

        for (column, day) in table.days() {
            println!("  day   col {:>3}: {}", column, day);
        }
        for (row, date) in table.dates() {
            println!("  date  row {:>3}: {}", row, date);
        }
        for (column, range) in table.time_ranges() {
            println!("  time  col {:>3}: {}", column, format_range(range));
        }

        println!();
        for (key, text) in table.entries() {
            println!(
                "  ({}:{}:{}) {}",
                key.column,
                key.row,
                key.variant,
                text.replace('\n', " | ")
            );
        }
    }

    Ok(())
}

fn cmd_init_config(output: &PathBuf) -> edt_core::Result<()> {
    Config::default().save(output)?;

    println!("Created configuration file: {}", output.display());
    println!();
    println!("Edit the file to adapt it to your timetable, then run:");
    println!("  edt-cli convert --file <csv> --config {}", output.display());

    Ok(())
}

fn format_range(range: &TimeRange) -> String {
    let clock = |minutes: i64| format!("{}h{:02}", minutes / 60, minutes % 60);
    format!(
        "{}-{}",
        clock(range.start.num_minutes()),
        clock(range.end.num_minutes())
    )
}
