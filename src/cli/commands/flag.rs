//! Flag command implementation.
//!
//! Toggle bookmarks, cart items, pins and more-markers on records, and list
//! what is flagged.

use crate::cli::{Cli, FlagAction, FlagArgs, OutputFormat};
use crate::error::Result;
use crate::model::FlagKind;

use super::{flag_markers, flag_names, open_authenticated, source_or_default};

/// Run the flag command.
pub fn run(cli: &Cli, args: &FlagArgs) -> Result<()> {
    let mut catalog = open_authenticated(cli)?;

    match &args.action {
        FlagAction::Toggle { id, kind } => {
            let value = catalog.toggle_flag(id, *kind)?;
            match cli.effective_output() {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "id": id, "flag": kind, "value": value })
                ),
                _ => {
                    let verb = if value { "Set" } else { "Cleared" };
                    println!("{verb} {kind} on {id}");
                }
            }
        }

        FlagAction::Show { id } => {
            let flags = catalog.flags_for(id)?;
            match cli.effective_output() {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&flags)?),
                OutputFormat::Tsv => {
                    println!("id\tbookmark\tplus\tpin\tmore");
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        id, flags.bookmark, flags.plus, flags.pin, flags.more
                    );
                }
                OutputFormat::Compact => println!("{id}\t{}", flag_names(flags)),
                OutputFormat::Text => {
                    for kind in FlagKind::ALL {
                        let mark = if flags.get(kind) { "on" } else { "off" };
                        println!("{:<9}{mark}", kind.name());
                    }
                }
            }
        }

        FlagAction::List { kind } => {
            let flagged = catalog.flagged(*kind);
            match cli.effective_output() {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&flagged)?),
                OutputFormat::Tsv => {
                    println!("source\tid\ttitle\tflags");
                    for item in &flagged {
                        println!(
                            "{}\t{}\t{}\t{}",
                            item.source,
                            item.record.id,
                            item.record.title,
                            flag_names(item.flags)
                        );
                    }
                }
                OutputFormat::Compact => {
                    for item in &flagged {
                        println!("{}", item.record.id);
                    }
                }
                OutputFormat::Text => {
                    if flagged.is_empty() {
                        println!("No flagged records.");
                    }
                    for item in &flagged {
                        println!(
                            "{} {:<6} {}  {}",
                            flag_markers(item.flags),
                            item.source.key(),
                            item.record.id,
                            item.record.title
                        );
                    }
                }
            }
        }

        FlagAction::Count { kind, source } => {
            let source = source_or_default(&catalog, *source);
            let count = catalog.flag_count(source, *kind);
            match cli.effective_output() {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "source": source, "flag": kind, "count": count })
                ),
                _ => println!("{count}"),
            }
        }
    }

    Ok(())
}
