//! Tree command implementation.

use crate::cli::{Cli, OutputFormat, TreeArgs};
use crate::error::{CatalogError, Result};
use crate::model::CategoryTree;

use super::{open_authenticated, source_or_default};

/// Run the tree command.
pub fn run(cli: &Cli, args: &TreeArgs) -> Result<()> {
    let catalog = open_authenticated(cli)?;
    let source = source_or_default(&catalog, args.source);

    let node = catalog
        .tree(source)
        .node(args.path.as_slice())
        .ok_or_else(|| CatalogError::InvalidArgument {
            name: "path".to_string(),
            reason: format!("no node '{}' in the {} tree", args.path.join(" / "), source),
        })?;

    match cli.effective_output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(node)?),
        OutputFormat::Tsv | OutputFormat::Compact => {
            for label in node.labels() {
                println!("{label}");
            }
        }
        OutputFormat::Text => {
            let title = if args.path.is_empty() {
                source.display_name().to_string()
            } else {
                args.path.join(" / ")
            };
            println!("{title} ({} labels)", node.total_labels());
            print_tree(node, "", args.depth.unwrap_or(usize::MAX));
        }
    }

    Ok(())
}

fn print_tree(node: &CategoryTree, prefix: &str, depth: usize) {
    if depth == 0 {
        return;
    }
    let count = node.len();
    for (index, (label, child)) in node.iter().enumerate() {
        let last = index + 1 == count;
        let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        println!("{prefix}{branch}{label}");
        print_tree(child, &format!("{prefix}{indent}"), depth - 1);
    }
}
