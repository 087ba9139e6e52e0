//! Facets command implementation.

use crate::cli::{Cli, FacetsArgs, OutputFormat};
use crate::error::Result;

use super::{open_authenticated, source_or_default};

/// Run the facets command.
pub fn run(cli: &Cli, args: &FacetsArgs) -> Result<()> {
    let catalog = open_authenticated(cli)?;
    let source = source_or_default(&catalog, args.source);
    let values = catalog.facets(source, &args.category, args.subcategory.as_deref());

    match cli.effective_output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&values)?),
        _ => {
            if values.is_empty() {
                eprintln!("No values found.");
            }
            for value in values {
                println!("{value}");
            }
        }
    }

    Ok(())
}
