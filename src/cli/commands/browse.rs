//! Browse command implementation.
//!
//! Builds a browsing state from the arguments, asks the catalog for the
//! page and prints it.

use crate::api::Catalog;
use crate::browser::{BrowseView, BrowserState, NO_DATA};
use crate::cli::{BrowseArgs, Cli, OutputFormat};
use crate::error::Result;
use crate::pagination::parse_page;

use super::{flag_markers, flag_names, open_authenticated, source_or_default};

/// Run the browse command.
pub fn run(cli: &Cli, args: &BrowseArgs) -> Result<()> {
    let catalog = open_authenticated(cli)?;
    let state = build_state(&catalog, args);

    if args.all {
        return print_all(cli, &catalog, &state);
    }

    let view = catalog.view(&state);
    match cli.effective_output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Tsv => print_tsv(&view),
        OutputFormat::Compact => {
            for row in &view.rows {
                println!("{}\t{}", row.record.id, row.record.title);
            }
        }
        OutputFormat::Text => print_text(&view),
    }

    Ok(())
}

/// Replay the arguments as browsing events.
fn build_state(catalog: &Catalog, args: &BrowseArgs) -> BrowserState {
    let page_size = args
        .page_size
        .unwrap_or(catalog.config().browse.page_size);
    let mut state = BrowserState::new(source_or_default(catalog, args.source), page_size);

    if let Some(category) = &args.category {
        state.select_category(category.as_str());
    }
    if let Some(subcategory) = &args.subcategory {
        state.select_subcategory(subcategory.as_str());
    }
    if let Some(subset) = &args.subset {
        state.select_subset(subset.as_str());
    }
    if let Some(query) = &args.search {
        state.set_query(query.as_str());
    }
    if let Some(kind) = args.flag {
        state.toggle_flag_filter(kind);
    }
    catalog.go_to_page(&mut state, parse_page(&args.page));
    state
}

fn print_all(cli: &Cli, catalog: &Catalog, state: &BrowserState) -> Result<()> {
    let records = catalog.filtered(state.source(), state.criteria());
    match cli.effective_output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        _ => {
            for record in records {
                println!("{}\t{}", record.id, record.title);
            }
        }
    }
    Ok(())
}

fn print_tsv(view: &BrowseView<'_>) {
    println!("id\ttitle\tbreadcrumb\tfrequency\tunit\tflags");
    for row in &view.rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.record.id,
            row.record.title,
            row.breadcrumb,
            row.record.frequency,
            row.record.unit,
            flag_names(row.flags),
        );
    }
}

fn print_text(view: &BrowseView<'_>) {
    println!(
        "{}  [{}]  Selected ({})",
        console::style(&view.heading).bold(),
        view.source_name,
        view.cart_count
    );
    println!();

    if view.is_empty() {
        println!("{NO_DATA}");
        return;
    }

    for row in &view.rows {
        println!(
            "{} {}  {}",
            flag_markers(row.flags),
            console::style(&row.record.id).dim(),
            row.record.title
        );
        println!(
            "     {}  |  {}  |  {}",
            row.breadcrumb, row.record.frequency, row.record.unit
        );
    }

    if view.is_paginated() {
        println!();
        println!("{}  (page {} of {})", view.showing, view.page, view.total_pages);
    }
}
