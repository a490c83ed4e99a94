//! `vplcfg schema` command

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::{OutputFormat, SchemaArgs};
use vplcfg::core::FieldCategory;
use vplcfg::schema::{catalog, LeafPath};
use vplcfg::util::diagnostic::suggestions;

#[derive(Debug, Serialize)]
struct SchemaEntry<'a> {
    path: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    fourcc: bool,
    offset: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    shape: Vec<usize>,
}

impl<'a> From<&'a LeafPath> for SchemaEntry<'a> {
    fn from(leaf: &'a LeafPath) -> Self {
        SchemaEntry {
            path: &leaf.path,
            kind: leaf.kind.as_str(),
            fourcc: leaf.category == FieldCategory::FourCC,
            offset: leaf.offset,
            shape: leaf.shape.clone(),
        }
    }
}

pub fn execute(args: SchemaArgs) -> Result<()> {
    let set = if args.caps {
        catalog().impl_description()
    } else {
        catalog().video_param()
    };

    let leaves: Vec<LeafPath> = set
        .leaf_paths()
        .into_iter()
        .filter(|leaf| {
            args.prefix
                .as_deref()
                .map_or(true, |prefix| leaf.path.starts_with(prefix))
        })
        .collect();

    if leaves.is_empty() {
        let prefix = args.prefix.as_deref().unwrap_or_default();
        bail!(
            "no property path starts with `{}`\n{}",
            prefix,
            suggestions::UNKNOWN_PROPERTY
        );
    }

    let entries: Vec<SchemaEntry<'_>> = leaves.iter().map(SchemaEntry::from).collect();

    match args.format {
        OutputFormat::Text => {
            let width = entries.iter().map(|e| e.path.len()).max().unwrap_or(0);
            for entry in &entries {
                println!(
                    "{:<width$}  {:<12}  +{}",
                    entry.path,
                    type_label(entry),
                    entry.offset,
                    width = width
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

/// `u16`, `u32 fourcc`, `char[128]`, `u16[3][2]`.
fn type_label(entry: &SchemaEntry<'_>) -> String {
    let mut label = entry.kind.to_string();
    for dim in &entry.shape {
        label.push_str(&format!("[{}]", dim));
    }
    if entry.fourcc {
        label.push_str(" fourcc");
    }
    label
}
