//! Command implementations

pub mod completions;
pub mod matches;
pub mod schema;
pub mod set;

use std::path::Path;

use anyhow::{bail, Context, Result};
use miette::{GraphicalReportHandler, GraphicalTheme};

use vplcfg::resolver::ConfigError;
use vplcfg::util::config::{global_config_path, load_config, project_config_path};
use vplcfg::util::diagnostic::emit;
use vplcfg::util::Config;

/// Load the config named on the command line, or the merged global and
/// project config when none is named.
pub fn load_settings(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path),
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            Ok(load_config(
                global_config_path().as_deref(),
                &project_config_path(&cwd),
            ))
        }
    }
}

/// Split a `PATH=VALUE` argument at the first `=`.
pub fn split_assignment(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((path, value)) if !path.trim().is_empty() => {
            Ok((path.trim().to_string(), value.to_string()))
        }
        _ => bail!("invalid argument `{}`, expected PATH=VALUE", arg),
    }
}

/// Print a property error to stderr, marking the offending part of the
/// path when it is known.
pub fn report_config_error(err: &ConfigError, color: bool) {
    if let Some(report) = err.to_report() {
        let theme = if color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let mut out = String::new();
        if GraphicalReportHandler::new_themed(theme)
            .render_report(&mut out, &report)
            .is_ok()
        {
            eprint!("{}", out);
            return;
        }
    }
    emit(&err.to_diagnostic(), color);
}
