//! Convert command implementation for the flatfile processor CLI
//!
//! Contains the complete conversion workflow: configuration from CLI
//! arguments, parser selection, XML emission and summary reporting.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::time::Instant;

use colored::*;
use tracing::{debug, info};

use super::shared::{ConvertStats, create_spinner, setup_logging};
use crate::app::services::emitter::{XmlEmitter, parse_to_sink};
use crate::app::services::record_parser::{DelimitedParser, RegexParser};
use crate::cli::args::ConvertArgs;
use crate::{Error, Result};

/// Convert command runner
///
/// Orchestrates the conversion workflow:
/// 1. Set up logging and validate arguments
/// 2. Open the input and output streams
/// 3. Parse records and emit XML with progress reporting
/// 4. Report summary statistics
pub fn run_convert(args: ConvertArgs) -> Result<ConvertStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting flat-file conversion");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = args.to_config();
    let reader = open_input(&args)?;
    let writer = open_output(&args)?;

    let emitter = XmlEmitter::new(writer, args.root_name.clone()).with_indent(args.indent);

    // Spinner goes to stderr, safe alongside XML on stdout
    let spinner = args.show_progress().then(|| create_spinner("Parsing records..."));

    let emit = match &args.pattern {
        Some(pattern) => {
            debug!("Tokenizing records with regex pattern: {}", pattern);
            let mut parser = RegexParser::new(reader, pattern, config)?;
            let mut emitter = emitter;
            parse_to_sink(&mut parser, &mut emitter)?
        }
        None => {
            debug!("Tokenizing records on separator: {:?}", args.separator);
            let mut parser = DelimitedParser::with_separator(reader, &args.separator, config)?;
            let mut emitter = emitter;
            parse_to_sink(&mut parser, &mut emitter)?
        }
    };

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    let stats = ConvertStats::from_emit(emit, start_time.elapsed());

    info!(
        "Conversion completed in {:.2}s: {} records, {} fields",
        stats.processing_time.as_secs_f64(),
        stats.records_emitted,
        stats.fields_emitted
    );

    // Summary goes to stdout only when it cannot corrupt the XML stream
    if args.output_path.is_some() && !args.quiet {
        print_summary(&stats);
    }

    Ok(stats)
}

/// Open the input stream: the named file, or stdin
fn open_input(args: &ConvertArgs) -> Result<Box<dyn Read>> {
    match &args.input_path {
        Some(path) => {
            info!("Reading from {}", path.display());
            let file = File::open(path)
                .map_err(|e| Error::io(format!("Failed to open input file: {}", path.display()), e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            info!("Reading from stdin");
            Ok(Box::new(std::io::stdin()))
        }
    }
}

/// Open the output stream: the named file, or stdout
fn open_output(args: &ConvertArgs) -> Result<Box<dyn Write>> {
    match &args.output_path {
        Some(path) => {
            info!("Writing to {}", path.display());
            let file = File::create(path).map_err(|e| {
                Error::io(format!("Failed to create output file: {}", path.display()), e)
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

/// Print a human-readable conversion summary
fn print_summary(stats: &ConvertStats) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time.as_millis().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Records emitted:".bright_cyan(),
        stats.records_emitted.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Fields emitted:".bright_cyan(),
        stats.fields_emitted.to_string().bright_white().bold()
    );
    if stats.records_truncated > 0 {
        println!(
            "  {} {}",
            "Truncated records:".bright_cyan(),
            stats.records_truncated.to_string().bright_red().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_convert_file_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("people.csv");
        let output = temp_dir.path().join("people.xml");
        std::fs::write(&input, "Tom,Fennelly\nMike,Fennelly\n").unwrap();

        let args = ConvertArgs {
            input_path: Some(input),
            output_path: Some(output.clone()),
            fields: Some("firstname,lastname".to_string()),
            quiet: true,
            ..Default::default()
        };

        let stats = run_convert(args).unwrap();
        assert_eq!(stats.records_emitted, 2);
        assert_eq!(stats.fields_emitted, 4);

        let xml = std::fs::read_to_string(&output).unwrap();
        assert!(xml.contains("<firstname>Tom</firstname>"));
        assert!(xml.contains("<lastname>Fennelly</lastname>"));
        assert!(xml.starts_with("<records>"));
        assert!(xml.ends_with("</records>"));
    }

    #[test]
    fn test_convert_missing_input() {
        let args = ConvertArgs {
            input_path: Some(std::path::PathBuf::from("/nonexistent/input.csv")),
            quiet: true,
            ..Default::default()
        };
        assert!(run_convert(args).is_err());
    }
}
