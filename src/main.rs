// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canopy CLI entrypoint.
//!
//! Serves a JSON array of records through an in-memory source, replays the requested
//! expand/search/select steps against a selector, and prints the rendered rows.

use std::error::Error;

use canopy::load::{Completion, MemorySource};
use canopy::model::{NodeId, NodeRecord};
use canopy::selection::RenderRow;
use canopy::{SearchStatus, Selector, SelectorConfig};
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <records.json> [--config <file>] [--expand <id>]... [--search <keyword>] [--select <id>]... [--include-descendants] [--expand-all]\n\n<records.json> holds an array of records: {{\"id\", \"name\", \"ancestorPath\"?, \"type\"?, \"canExpand\"?}}.\nRoots are loaded first; --expand ids are opened in order, fetching children on demand.\n--search runs a keyword search against the records; --expand-all opens every loaded node.\n\nLogging goes to stderr and is controlled by RUST_LOG (default: warn)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    records: Option<String>,
    config: Option<String>,
    expand: Vec<String>,
    search: Option<String>,
    select: Vec<String>,
    include_descendants: bool,
    expand_all: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--expand" => options.expand.push(args.next().ok_or(())?),
            "--search" => {
                if options.search.is_some() {
                    return Err(());
                }
                options.search = Some(args.next().ok_or(())?);
            }
            "--select" => options.select.push(args.next().ok_or(())?),
            "--include-descendants" => {
                if options.include_descendants {
                    return Err(());
                }
                options.include_descendants = true;
            }
            "--expand-all" => {
                if options.expand_all {
                    return Err(());
                }
                options.expand_all = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.records.is_some() {
                    return Err(());
                }
                options.records = Some(arg);
            }
        }
    }

    if options.records.is_none() {
        return Err(());
    }

    Ok(options)
}

fn print_rows<T: Clone>(selector: &Selector<T>) {
    let render = selector.render();
    for row in &render.rows {
        let mark = if row.is_selected() { "[x]" } else { "[ ]" };
        match row {
            RenderRow::Node { row: flat, .. } => {
                let toggle = if !flat.has_children() {
                    " "
                } else if flat.collapsed() {
                    "+"
                } else {
                    "-"
                };
                let indent = "  ".repeat(flat.depth());
                println!("{indent}{toggle} {mark} {} ({})", flat.name(), flat.id());
            }
            RenderRow::Detached { id, label } => println!("~ {mark} {label} ({id}, detached)"),
        }
    }

    match selector.search_status() {
        SearchStatus::Ready { keyword, has_match } => {
            println!("search {keyword:?}: {}", if *has_match { "match" } else { "no match" });
        }
        SearchStatus::Failed { keyword, error } => println!("search {keyword:?} failed: {error}"),
        SearchStatus::Idle | SearchStatus::Pending { .. } => {}
    }
}

fn note_stale(step: &str, completion: Completion) {
    if completion == Completion::Stale {
        tracing::warn!(step, "result superseded before it was applied");
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "canopy".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();

        let mut config = match &options.config {
            Some(path) => SelectorConfig::from_path(path)?,
            None => SelectorConfig::default(),
        };
        if options.include_descendants {
            config.include_descendants = true;
        }

        let raw = std::fs::read_to_string(options.records.as_deref().unwrap_or_default())?;
        let records: Vec<NodeRecord> = serde_json::from_str(&raw)?;
        let source = MemorySource::new(records);
        let mut selector: Selector = Selector::new(config);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async {
            note_stale("roots", selector.load_roots(&source).await?);
            for raw in &options.expand {
                let id = NodeId::new(raw).map_err(canopy::SelectorError::from)?;
                note_stale("expand", selector.expand(&source, &id).await?);
            }
            if let Some(keyword) = &options.search {
                note_stale("search", selector.search(&source, keyword).await);
            }
            Ok::<(), Box<dyn Error>>(())
        })?;

        if options.expand_all {
            selector.expand_all();
        }
        for raw in &options.select {
            let id = NodeId::new(raw).map_err(canopy::SelectorError::from)?;
            selector.select(&id);
        }

        print_rows(&selector);
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("canopy: {err}");
        std::process::exit(1);
    }
}
