// Copyright 2025 sway-scenes contributors
// SPDX-License-Identifier: MPL-2.0

//! Ordered scenario tables and first-match selection.
//!
//! A table lists scenarios most specific first. Selection walks the table
//! and takes the first scenario whose required monitors were all detected;
//! a final entry requiring nothing makes the table total.

use crate::layout::{self, Directive, Layout, ModeSpec, OutputSettings};
use crate::monitor::Matched;
use crate::shell::Output;
use crate::Error;

/// A named desk arrangement, applicable once every required monitor is
/// present.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    pub name: &'static str,
    /// Labels of the monitor rules that must all have matched.
    pub requires: &'static [&'static str],
    pub template: Template,
}

#[derive(Clone, Copy, Debug)]
pub enum Template {
    /// Curated placement for each required monitor.
    Fixed(&'static [Entry]),
    /// Single row of native-resolution outputs, left to right.
    AutoRow { leading: Option<&'static str> },
}

/// One directive template within a fixed scenario.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub monitor: &'static str,
    pub action: Action,
}

#[derive(Clone, Copy, Debug)]
pub enum Action {
    Place(Placement),
    Disable,
}

/// Curated mode and position for one monitor.
#[derive(Clone, Copy, Debug)]
pub struct Placement {
    pub mode: ModeSpec,
    pub position: (i32, i32),
    pub scale: f64,
}

impl Entry {
    #[must_use]
    pub const fn place(monitor: &'static str, mode: ModeSpec, x: i32, y: i32) -> Self {
        Self {
            monitor,
            action: Action::Place(Placement {
                mode,
                position: (x, y),
                scale: 1.0,
            }),
        }
    }

    #[must_use]
    pub const fn disable(monitor: &'static str) -> Self {
        Self {
            monitor,
            action: Action::Disable,
        }
    }
}

/// First scenario whose required monitors were all detected.
///
/// Returns `None` only for a table without a catch-all entry.
#[must_use]
pub fn select<'a>(scenarios: &'a [Scenario], matched: &Matched<'_>) -> Option<&'a Scenario> {
    for scenario in scenarios {
        if scenario
            .requires
            .iter()
            .all(|label| matched.contains(label))
        {
            return Some(scenario);
        }

        tracing::debug!(scenario = scenario.name, "required monitors absent; skipping");
    }

    None
}

impl Scenario {
    /// Renders this scenario against the detected monitors, splicing each
    /// matched output's port name into the template.
    ///
    /// # Errors
    ///
    /// Returns error if the template names a monitor that was not detected.
    /// A well-formed table lists every placed monitor in `requires`, so a
    /// scenario chosen by [`select`] always renders.
    pub fn render(&self, matched: &Matched<'_>, outputs: &[Output]) -> Result<Layout, Error> {
        match self.template {
            Template::Fixed(entries) => {
                let mut directives = Vec::with_capacity(entries.len());

                for entry in entries {
                    let output = matched.get(entry.monitor).ok_or(Error::UnmatchedMonitor {
                        scenario: self.name,
                        monitor: entry.monitor,
                    })?;

                    directives.push(match entry.action {
                        Action::Place(placement) => Directive::configure(
                            &output.name,
                            OutputSettings::new(placement.mode)
                                .position(placement.position.0, placement.position.1)
                                .scale(placement.scale),
                        ),
                        Action::Disable => Directive::disable(&output.name),
                    });
                }

                Ok(Layout::new(directives))
            }

            Template::AutoRow { leading } => {
                let leading = match leading {
                    Some(label) => Some(matched.get(label).ok_or(Error::UnmatchedMonitor {
                        scenario: self.name,
                        monitor: label,
                    })?),
                    None => None,
                };

                Ok(layout::auto_row(outputs, leading))
            }
        }
    }
}
