//! Check command implementation for the flatfile processor CLI
//!
//! Compiles a field specification without parsing any data and reports the
//! resulting record types, field names, ignore slots and transforms.

use colored::*;
use tracing::debug;

use super::shared::{ConvertStats, setup_logging};
use crate::app::models::RecordMetaData;
use crate::app::services::field_grammar::RecordMetadataSet;
use crate::app::services::transforms::TransformRegistry;
use crate::cli::args::CheckArgs;
use crate::Result;

/// Check command runner
///
/// Compiles the field specification and prints a report of the record
/// types it declares. Fails with a configuration error when the
/// specification is malformed.
pub fn run_check(args: CheckArgs) -> Result<ConvertStats> {
    setup_logging(args.get_log_level(), false)?;

    debug!("Checking field specification: {:?}", args.fields);

    let transforms = TransformRegistry::default();
    let set = RecordMetadataSet::compile(&args.record_name, args.fields.as_deref(), &transforms)?;

    print_report(&args, &set);

    Ok(ConvertStats::default())
}

/// Print a human-readable report of the compiled record types
fn print_report(args: &CheckArgs, set: &RecordMetadataSet) {
    println!("{}", "Field Specification Report".bright_green().bold());
    println!(
        "  {} {}",
        "Specification:".bright_cyan(),
        args.fields.as_deref().unwrap_or("(none: wildcard capture)")
    );
    println!(
        "  {} {}",
        "Dispatch mode:".bright_cyan(),
        if set.is_multi_type() {
            "multi record-type (first token selects the type)"
        } else {
            "single record-type"
        }
    );

    for metadata in set.record_types() {
        print_record_type(metadata);
    }
}

fn print_record_type(metadata: &RecordMetaData) {
    println!(
        "\n  {} {}",
        "Record type:".bright_cyan(),
        metadata.name().bright_white().bold()
    );

    if metadata.is_wildcard() && metadata.fields().is_empty() {
        println!("    (wildcard: fields captured positionally as field_0, field_1, ...)");
        return;
    }

    for field in metadata.fields() {
        if field.ignore() {
            if field.ignore_count() == crate::constants::IGNORE_COUNT_UNBOUNDED {
                println!("    {} (rest of record)", "$ignore$".bright_yellow());
            } else if field.ignore_count() > 1 {
                println!(
                    "    {} ({} fields)",
                    "$ignore$".bright_yellow(),
                    field.ignore_count()
                );
            } else {
                println!("    {}", "$ignore$".bright_yellow());
            }
        } else {
            match field.transform() {
                Some(chain) if !chain.is_empty() => {
                    println!("    {} (transformed)", field.name().bright_white())
                }
                _ => println!("    {}", field.name().bright_white()),
            }
        }
    }

    if metadata.is_wildcard() {
        println!("    {} (remaining fields captured positionally)", "*".bright_yellow());
    }

    println!(
        "    {} {} named, {} ignored",
        "Totals:".bright_cyan(),
        metadata.unignored_field_count(),
        metadata.ignored_field_count()
    );
}
