//! `vplcfg match` command

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use crate::cli::{MatchArgs, OutputFormat};
use crate::commands::load_settings;
use vplcfg::ops::{matching_indices, select_implementation, Manifest, PropertyFilter};
use vplcfg::util::diagnostic::suggestions;

#[derive(Debug, Serialize)]
struct Selected<'a> {
    index: usize,
    name: &'a str,
}

pub fn execute(args: MatchArgs) -> Result<()> {
    let config = load_settings(args.config.as_deref())?;

    let manifest_path = args
        .manifest
        .or_else(|| config.defaults.manifest.clone())
        .ok_or_else(|| anyhow!("no implementation manifest given\n{}", suggestions::NO_MANIFEST))?;

    let mut filters = config.filter_list()?;
    for arg in &args.filters {
        let filter: PropertyFilter = arg.parse()?;
        filters.push(filter);
    }

    let manifest = Manifest::load(&manifest_path)?;
    let mut enumerator = manifest
        .enumerator()
        .with_context(|| format!("invalid manifest {}", manifest_path.display()))?;

    tracing::debug!(
        "matching {} implementation(s) against {} filter(s)",
        enumerator.descriptors().len(),
        filters.len()
    );

    let indices: Vec<usize> = if args.first {
        select_implementation(&mut enumerator, &filters)
            .into_iter()
            .collect()
    } else {
        matching_indices(&mut enumerator, &filters)
    };

    if indices.is_empty() {
        bail!(
            "no implementation satisfies {} filter(s)\n{}",
            filters.len(),
            suggestions::NO_MATCH
        );
    }

    let selected: Vec<Selected<'_>> = indices
        .iter()
        .map(|&index| Selected {
            index,
            name: enumerator.descriptors()[index].name(),
        })
        .collect();

    match args.format {
        OutputFormat::Text => {
            for s in &selected {
                println!("{}: {}", s.index, s.name);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&selected)?);
        }
    }

    Ok(())
}
