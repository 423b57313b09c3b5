use clap::Parser;
use hidro_registry::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Hidro Registry - Hydroelectric Plant Registry Inspector");
    println!("=======================================================");
    println!();
    println!("Decode hydroelectric plant registry files in either the fixed-record");
    println!("binary layout or the multi-block text layout, and report on the plants");
    println!("and their cascade topology.");
    println!();
    println!("USAGE:");
    println!("    hidro_registry <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    summary     Decode a registry file and summarize its contents");
    println!("    cascade     Report the cascade topology of a registry file");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Summarize a registry file (format auto-detected):");
    println!("    hidro_registry summary hidr.dat");
    println!();
    println!("    # Same report as JSON:");
    println!("    hidro_registry summary hidr.dat --format json");
    println!();
    println!("    # Whole-basin cascade topology:");
    println!("    hidro_registry cascade hidr.dat");
    println!();
    println!("    # Downstream chain and aggregated storage of plant 66:");
    println!("    hidro_registry cascade hidr.dat --plant 66");
    println!();
    println!("For detailed help on any command, use:");
    println!("    hidro_registry <COMMAND> --help");
}
