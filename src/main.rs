use clap::Parser;
use std::process;
use verdict_scraper::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = commands::shared::setup_logging(&args.global) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Verdict Scraper - Administrative Court Verdict Harvester");
    println!("========================================================");
    println!();
    println!("Harvests verdict listings from the administrative justice search portal,");
    println!("downloads the listed documents and computes statistics over them.");
    println!();
    println!("USAGE:");
    println!("    verdict-scraper [OPTIONS] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    harvest     Walk the search results and write the year's listing");
    println!("    fetch       Download the documents of one or more yearly listings");
    println!("    analyze     Compute statistics over the downloaded year directories");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>    Configuration file (YAML)");
    println!("    -v, --verbose          Increase logging verbosity");
    println!("    -q, --quiet            Suppress output except errors");
    println!("    -h, --help             Show help information");
    println!("    -V, --version          Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    verdict-scraper harvest \"appalt*\" 2023");
    println!("    verdict-scraper fetch 2021 --until 2023");
    println!("    verdict-scraper analyze");
    println!();
    println!("For detailed help on any command, use:");
    println!("    verdict-scraper <COMMAND> --help");
}
