//! `vplcfg set` command

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::{OutputFormat, SetArgs};
use crate::commands::{load_settings, report_config_error, split_assignment};
use vplcfg::core::{ConfigRecord, Value};
use vplcfg::ops::{apply_with_attach, get_property, set_property};

/// A property and the values it holds after all params are applied.
#[derive(Debug, Serialize)]
struct Touched {
    path: String,
    values: Vec<Value>,
}

pub fn execute(args: SetArgs, color: bool) -> Result<()> {
    let config = load_settings(args.config.as_deref())?;
    let attach = !args.no_attach && config.attach_extensions();

    let mut params = config.param_pairs()?;
    for arg in &args.params {
        params.push(split_assignment(arg)?);
    }

    if params.is_empty() {
        bail!(
            "no properties given\n\
             help: Pass PATH=VALUE arguments or add a [params] table to vplcfg.toml"
        );
    }

    let mut record = ConfigRecord::video_param();
    for (path, value) in &params {
        let result = if attach {
            apply_with_attach(&mut record, path, value)
        } else {
            set_property(&mut record, path, value)
        };
        if let Err(e) = result {
            report_config_error(&e, color);
            bail!("failed to set `{}`", path);
        }
    }

    tracing::debug!(
        "applied {} param(s), {} extension buffer(s) attached",
        params.len(),
        record.extensions().len()
    );

    // Read back in first-touched order, once per path
    let mut touched: Vec<Touched> = Vec::new();
    for (path, _) in &params {
        if touched.iter().any(|t| t.path == *path) {
            continue;
        }
        let values = get_property(&record, path)
            .with_context(|| format!("failed to read back `{}`", path))?;
        touched.push(Touched {
            path: path.clone(),
            values,
        });
    }

    match args.format {
        OutputFormat::Text => {
            for t in &touched {
                let rendered: Vec<String> = t.values.iter().map(Value::to_string).collect();
                println!("{} = {}", t.path, rendered.join(", "));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&touched)?);
        }
    }

    Ok(())
}
