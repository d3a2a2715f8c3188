// Copyright 2025 sway-scenes contributors
// SPDX-License-Identifier: MPL-2.0

//! Wrapper for the `swaymsg` CLI.

use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::process::Command;

/// A display mode advertised by an output. Refresh rates are in millihertz,
/// as sway reports them.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct Mode {
    pub width: u32,
    pub height: u32,
    pub refresh: u32,
}

/// Output geometry in the compositor's coordinate space.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Output {
    pub name: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub transform: Option<String>,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub current_mode: Option<Mode>,
    #[serde(default)]
    pub modes: Vec<Mode>,
}

impl Output {
    /// First advertised mode. sway lists the preferred mode first.
    #[must_use]
    pub fn preferred_mode(&self) -> Option<&Mode> {
        self.modes.first()
    }
}

/// Result of one command in a `swaymsg` batch.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(default)]
    pub parse_error: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("sway rejected {rejected} of {total} commands: {outcomes:?}")]
    Apply {
        rejected: usize,
        total: usize,
        outcomes: Vec<Outcome>,
    },
    #[error("`swaymsg` exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("`swaymsg` JSON format error")]
    Json(#[from] serde_json::Error),
    #[error("could not exec `swaymsg`")]
    Spawn(#[source] std::io::Error),
    #[error("`swaymsg` output not UTF-8")]
    Utf(#[from] std::str::Utf8Error),
}

/// Asks sway for every output it currently knows about, in the
/// compositor's enumeration order.
///
/// # Errors
///
/// Returns error if `swaymsg` cannot be executed, exits unsuccessfully,
/// or emits anything other than the expected JSON array.
pub async fn get_outputs() -> Result<Vec<Output>, Error> {
    let output = Command::new("swaymsg")
        .args(["--raw", "-t", "get_outputs"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(Error::Spawn)?;

    if !output.status.success() {
        return Err(Error::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    parse_outputs(std::str::from_utf8(&output.stdout).map_err(Error::Utf)?)
}

/// Parses the JSON array emitted by `swaymsg -t get_outputs`.
///
/// # Errors
///
/// Returns error if the text is not such an array.
pub fn parse_outputs(json: &str) -> Result<Vec<Output>, Error> {
    serde_json::from_str(json).map_err(Error::Json)
}

/// Submits a command batch to sway and checks every per-command result.
///
/// sway replies with one result object per command in the batch. A single
/// unsuccessful entry fails the whole apply, with the complete reply
/// attached to the error.
///
/// # Errors
///
/// Returns error if `swaymsg` cannot be executed, exits unsuccessfully,
/// replies with something other than JSON results, or rejects any command
/// in the batch.
pub async fn apply(command: &str) -> Result<Vec<Outcome>, Error> {
    tracing::debug!(command, "invoking `swaymsg`");

    let output = Command::new("swaymsg")
        .arg("--")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(Error::Spawn)?;

    if !output.status.success() {
        return Err(Error::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let outcomes = serde_json::from_str(std::str::from_utf8(&output.stdout).map_err(Error::Utf)?)?;

    verify_outcomes(outcomes)
}

/// Checks a parsed `swaymsg` reply, failing if any command was rejected.
///
/// # Errors
///
/// Returns error carrying the full reply if any outcome is unsuccessful.
pub fn verify_outcomes(outcomes: Vec<Outcome>) -> Result<Vec<Outcome>, Error> {
    let total = outcomes.len();
    let rejected = outcomes.iter().filter(|outcome| !outcome.success).count();

    if rejected == 0 {
        Ok(outcomes)
    } else {
        Err(Error::Apply {
            rejected,
            total,
            outcomes,
        })
    }
}
