//! zonetext CLI - zone profile inspection and text reflow

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use zonetext::{ReflowEngine, ZoneProfile};

#[derive(Parser)]
#[command(name = "zonetext")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Reflow zone-extracted text and inspect zone profiles", long_about = None)]
struct Cli {
    /// Input text file (reflowed to stdout)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reflow raw zone-extracted text
    Reflow {
        /// Input text file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List zones defined in a profile
    Zones {
        /// Profile JSON file
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,

        /// Output the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which zones apply to a page
    Page {
        /// Profile JSON file
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,

        /// 1-based page number
        #[arg(value_name = "PAGE")]
        page: usize,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Reflow { input, output }) => {
            cmd_reflow(input.as_deref(), output.as_deref())
        }
        Some(Commands::Zones { profile, json }) => cmd_zones(&profile, json),
        Some(Commands::Page { profile, page }) => cmd_page(&profile, page),
        None => {
            // Default behavior: reflow if an input file is provided
            if let Some(input) = cli.input {
                cmd_reflow(Some(&input), None)
            } else {
                println!("{}", "Usage: zonetext <FILE>".yellow());
                println!("       zonetext --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_reflow(input: Option<&Path>, output: Option<&Path>) -> zonetext::Result<()> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let text = ReflowEngine::new().reflow(&raw);

    match output {
        Some(path) => {
            fs::write(path, text)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}

fn cmd_zones(path: &Path, json: bool) -> zonetext::Result<()> {
    let profile = ZoneProfile::load(path)?;

    if json {
        println!("{}", profile.to_json()?);
        return Ok(());
    }

    println!("{} {}", "Profile:".bold(), profile.profile_name);
    if let Some(pdf_file) = &profile.pdf_file {
        println!("{} {}", "Calibrated on:".bold(), pdf_file);
    }
    println!();

    for zone in &profile.zones {
        println!(
            "  {} {} ({}): ({}, {}) {}×{}",
            "•".green(),
            zone.label.bold(),
            zone.pages,
            zone.x,
            zone.y,
            zone.width,
            zone.height
        );
    }
    println!("\n{} zones", profile.zones.len());

    Ok(())
}

fn cmd_page(path: &Path, page: usize) -> zonetext::Result<()> {
    if page == 0 {
        return Err(zonetext::Error::Other(
            "page numbers are 1-based".to_string(),
        ));
    }

    let profile = ZoneProfile::load(path)?;
    let labels: Vec<&str> = profile
        .zones_for_page(page - 1)
        .map(|z| z.label.as_str())
        .collect();

    if labels.is_empty() {
        println!("{} no zones apply to page {}", "•".yellow(), page);
    } else {
        println!("{} on page {}:", "Zones".bold(), page);
        for label in labels {
            println!("  {} {}", "•".green(), label);
        }
    }

    Ok(())
}
