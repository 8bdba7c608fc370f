//! Command-line argument definitions for the flatfile processor
//!
//! This module defines the complete CLI interface using clap derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ParserConfig;
use crate::constants::{
    DEFAULT_FIELD_SEPARATOR, DEFAULT_RECORD_ELEMENT_NAME, DEFAULT_ROOT_ELEMENT_NAME,
};
use crate::{Error, Result};

/// CLI arguments for the flatfile processor
///
/// Converts flat-file text data (CSV-like, fixed or variable structure,
/// single or multi record-type) into an XML document of named fields.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "flatfile-processor",
    version,
    about = "Convert flat-file text data into XML records of named fields",
    long_about = "Parses flat-file text streams using a compact field-specification grammar \
                  (field names, ignore markers, wildcards, per-field transforms) with literal \
                  or regex record delimiters, and emits the parsed records as XML. Supports \
                  multi record-type dispatch, header validation and in-message field names."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the flatfile processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert a flat file to XML records (default command)
    Convert(ConvertArgs),
    /// Check a field specification and report the compiled record types
    Check(CheckArgs),
}

/// Arguments for the convert command (main parsing workflow)
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input file to parse
    ///
    /// Reads from stdin when not specified.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input file to parse (stdin if omitted)"
    )]
    pub input_path: Option<PathBuf>,

    /// Output file for generated XML
    ///
    /// Writes to stdout when not specified.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file for generated XML (stdout if omitted)"
    )]
    pub output_path: Option<PathBuf>,

    /// Field specification
    ///
    /// Single-type form: a comma-separated field list such as
    /// "firstname,lastname,$ignore$2,email?trim.upper_case".
    /// Multi-type form: one or more "TypeName[field,list]" stanzas joined
    /// with "|". When omitted, every field is captured positionally as
    /// field_0, field_1, ...
    #[arg(
        short = 'f',
        long = "fields",
        value_name = "SPEC",
        help = "Field specification (names, $ignore$ markers, wildcards, ?transforms)"
    )]
    pub fields: Option<String>,

    /// Record delimiter
    ///
    /// A literal string (escape sequences \n, \r, \t and XML entities are
    /// decoded), or a regular expression when prefixed with "regex:".
    /// Defaults to line boundaries (CR/LF) when not specified.
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "DELIM",
        help = "Record delimiter: literal text, or \"regex:<pattern>\" (default: line boundaries)"
    )]
    pub delimiter: Option<String>,

    /// Field separator for delimited tokenization
    #[arg(
        short = 's',
        long = "separator",
        value_name = "SEP",
        default_value = DEFAULT_FIELD_SEPARATOR,
        help = "Field separator within a record"
    )]
    pub separator: String,

    /// Regular expression for field tokenization
    ///
    /// Switches tokenization from separator splitting to regex matching:
    /// capture groups become the field values, or the pattern splits the
    /// record when it declares no groups.
    #[arg(
        short = 'p',
        long = "pattern",
        value_name = "REGEX",
        conflicts_with = "separator",
        help = "Tokenize records by regex capture groups instead of a separator"
    )]
    pub pattern: Option<String>,

    /// Element name for records in the output
    #[arg(
        long = "record-name",
        value_name = "NAME",
        default_value = DEFAULT_RECORD_ELEMENT_NAME,
        help = "Element name for single-type records"
    )]
    pub record_name: String,

    /// Root element name for the output document
    #[arg(
        long = "root-name",
        value_name = "NAME",
        default_value = DEFAULT_ROOT_ELEMENT_NAME,
        help = "Root element name for the XML output"
    )]
    pub root_name: String,

    /// Keep the record delimiter in the parsed record text
    #[arg(
        long = "keep-delimiter",
        help = "Keep the record delimiter at the end of each record's text"
    )]
    pub keep_delimiter: bool,

    /// Number of leading records to skip before parsing
    #[arg(
        long = "skip-lines",
        value_name = "COUNT",
        default_value_t = 0,
        help = "Number of leading records to skip (negative values treated as 0)"
    )]
    pub skip_lines: i32,

    /// Read field names from the first record after skipping
    #[arg(
        long = "fields-in-message",
        help = "Take field names from the first record of the stream"
    )]
    pub fields_in_message: bool,

    /// Validate the declared field names against the first record
    #[arg(
        long = "validate-header",
        help = "Validate declared field names against the first record of the stream"
    )]
    pub validate_header: bool,

    /// Reject records with fewer fields than declared
    ///
    /// In strict mode, records shorter than the declared unignored field
    /// count are skipped with a warning instead of being emitted truncated.
    #[arg(long = "strict", help = "Skip records with fewer fields than declared")]
    pub strict: bool,

    /// Indent the XML output
    #[arg(long = "indent", help = "Indent the XML output")]
    pub indent: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the check command (field specification inspection)
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Field specification to compile and report
    #[arg(
        short = 'f',
        long = "fields",
        value_name = "SPEC",
        help = "Field specification to compile"
    )]
    pub fields: Option<String>,

    /// Element name for single-type records
    #[arg(
        long = "record-name",
        value_name = "NAME",
        default_value = DEFAULT_RECORD_ELEMENT_NAME,
        help = "Element name for single-type records"
    )]
    pub record_name: String,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input_path.display()
                )));
            }

            if input_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is a directory: {}",
                    input_path.display()
                )));
            }
        }

        if let Some(output_path) = &self.output_path {
            if let Some(parent) = output_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        if self.separator.is_empty() {
            return Err(Error::configuration(
                "Field separator must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the parser configuration from the CLI arguments
    pub fn to_config(&self) -> ParserConfig {
        ParserConfig {
            fields: self.fields.clone(),
            record_delimiter: self.delimiter.clone(),
            keep_delimiter: self.keep_delimiter,
            record_element_name: self.record_name.clone(),
            skip_lines: self.skip_lines,
            fields_in_message: self.fields_in_message,
            validate_header: self.validate_header,
            strict: self.strict,
            ..Default::default()
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress output (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl CheckArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: None,
            fields: None,
            delimiter: None,
            separator: DEFAULT_FIELD_SEPARATOR.to_string(),
            pattern: None,
            record_name: DEFAULT_RECORD_ELEMENT_NAME.to_string(),
            root_name: DEFAULT_ROOT_ELEMENT_NAME.to_string(),
            keep_delimiter: false,
            skip_lines: 0,
            fields_in_message: false,
            validate_header: false,
            strict: false,
            indent: false,
            verbose: 0,
            quiet: false,
        }
    }
}
