// Copyright 2025 sway-scenes contributors
// SPDX-License-Identifier: MPL-2.0

//! Scenario matching and layout rendering for sway outputs.
//!
//! Detection matches the compositor's output list against labeled identity
//! rules, selection walks an ordered scenario table and takes the first
//! whose required monitors are all present, and rendering turns the winner
//! into sway `output` commands. Everything here is pure; talking to sway
//! lives in `sway-scenes-shell`.

pub mod layout;
pub use layout::{
    auto_row, flatten, Directive, DirectiveKind, Layout, ModeSpec, OutputSettings, ScaleFilter,
    Transform,
};

pub mod monitor;
pub use monitor::{detect, Matched, MonitorRule};

pub mod scenario;
pub use scenario::{select, Action, Entry, Placement, Scenario, Template};

pub use sway_scenes_shell as shell;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no scenario in the table is applicable")]
    NoScenario,
    #[error("invalid monitor rule pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("scenario `{scenario}` references unmatched monitor `{monitor}`")]
    UnmatchedMonitor {
        scenario: &'static str,
        monitor: &'static str,
    },
}
