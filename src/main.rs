use clap::Parser;
use flatfile_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {error}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Flatfile Processor - Flat-File to XML Converter");
    println!("===============================================");
    println!();
    println!("Parse flat-file text data (CSV-like, fixed or variable structure,");
    println!("single or multi record-type) into XML records of named fields.");
    println!();
    println!("USAGE:");
    println!("    flatfile-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert a flat file to XML records (main command)");
    println!("    check       Compile and report a field specification");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert a CSV file with named fields:");
    println!("    flatfile-processor convert -i people.csv -o people.xml \\");
    println!("                               --fields firstname,lastname,gender");
    println!();
    println!("    # Multi record-type data with per-type field lists:");
    println!("    flatfile-processor convert -i orders.csv \\");
    println!("                               --fields \"book[name,author]|magazine[name,issue]\"");
    println!();
    println!("    # Custom record delimiter and regex tokenization:");
    println!("    flatfile-processor convert -i data.txt -d \"%%\" \\");
    println!("                               --pattern \"(\\\\w+)-(\\\\w+)\"");
    println!();
    println!("    # Inspect a field specification without parsing data:");
    println!("    flatfile-processor check --fields \"name,$ignore$2,email?trim\"");
    println!();
    println!("For detailed help on any command, use:");
    println!("    flatfile-processor <COMMAND> --help");
}
