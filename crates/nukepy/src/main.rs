//! `nukepy`: run Python through Nuke's terminal mode.
//!
//! Usable as an interpreter line (`#!/usr/bin/env nukepy`) or directly:
//! `nukepy -c 'import nuke; print(nuke.NUKE_VERSION_STRING)'`.
//! Every argument is forwarded to `Nuke -c 4G -t --` after translation.

use std::process::ExitCode;

use anyhow::Result;
use nukewrap::{exit_code, translate, LaunchCfg, LaunchError, TranslateCfg, TranslateError};

const USAGE: &str = "usage: nukepy [-c CODE] [ARGS...]";

fn main() -> ExitCode {
    nukewrap::logging::init();
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("nukepy: {err:#}");
            let code = failure_code(&err);
            if code == 2 {
                eprintln!("{USAGE}");
            }
            ExitCode::from(code)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let launch_cfg = LaunchCfg::from_env();
    let translation = translate(std::env::args_os().skip(1), &TranslateCfg::default())?;
    let status = nukewrap::launch(&launch_cfg, &translation.args);
    translation.finish();
    let code = exit_code(status?);
    tracing::debug!(code, "wrapper exit");
    Ok(ExitCode::from(code))
}

/// 2 for usage errors, shell-style codes for launch failures, 1 otherwise.
fn failure_code(err: &anyhow::Error) -> u8 {
    if let Some(err) = err.downcast_ref::<TranslateError>() {
        return if err.is_usage() { 2 } else { 1 };
    }
    if let Some(err) = err.downcast_ref::<LaunchError>() {
        return err.exit_code();
    }
    1
}
