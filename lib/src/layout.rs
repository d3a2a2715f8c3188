// Copyright 2025 sway-scenes contributors
// SPDX-License-Identifier: MPL-2.0

//! Typed model of sway `output` commands.
//!
//! A [`Layout`] renders two ways: the block form found in sway config files
//! (via [`Display`]) and the single-line batch form `swaymsg` accepts (via
//! [`Layout::command`]). [`flatten`] rewrites existing block text into the
//! batch form and agrees with [`Layout::command`] on anything this module
//! rendered.

use std::fmt::{self, Display};

use crate::shell::{Mode, Output};

/// A resolution and refresh rate in the form sway expects, such as
/// `1920x1080@144.001Hz`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ModeSpec {
    pub width: u32,
    pub height: u32,
    /// Refresh rate in millihertz, matching `swaymsg` reports.
    pub refresh_mhz: u32,
}

impl ModeSpec {
    #[must_use]
    pub const fn new(width: u32, height: u32, refresh_mhz: u32) -> Self {
        Self {
            width,
            height,
            refresh_mhz,
        }
    }

    /// Refresh rate in hertz as sway renders it (`60.0`, `144.001`).
    #[must_use]
    pub fn refresh_hz(self) -> impl Display {
        Refresh(self.refresh_mhz)
    }
}

impl Display for ModeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}@{}Hz",
            self.width,
            self.height,
            Refresh(self.refresh_mhz)
        )
    }
}

impl From<&Mode> for ModeSpec {
    fn from(mode: &Mode) -> Self {
        Self::new(mode.width, mode.height, mode.refresh)
    }
}

/// Millihertz as decimal hertz, trailing zeros trimmed but always keeping
/// at least one fractional digit, matching the refresh strings sway itself
/// prints.
struct Refresh(u32);

impl Display for Refresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1000;
        let frac = self.0 % 1000;

        if frac == 0 {
            return write!(f, "{whole}.0");
        }

        let mut frac = format!("{frac:03}");
        while frac.ends_with('0') {
            frac.pop();
        }

        write!(f, "{whole}.{frac}")
    }
}

/// Scale rendered so whole numbers keep a fractional digit (`1.0`, not `1`).
struct Scale(f64);

impl Display for Scale {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Transform {
    #[default]
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
    Flipped,
    Flipped90,
    Flipped180,
    Flipped270,
}

impl Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transform::Normal => "normal",
            Transform::Rotate90 => "90",
            Transform::Rotate180 => "180",
            Transform::Rotate270 => "270",
            Transform::Flipped => "flipped",
            Transform::Flipped90 => "flipped-90",
            Transform::Flipped180 => "flipped-180",
            Transform::Flipped270 => "flipped-270",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ScaleFilter {
    Linear,
    #[default]
    Nearest,
    Smart,
}

impl Display for ScaleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScaleFilter::Linear => "linear",
            ScaleFilter::Nearest => "nearest",
            ScaleFilter::Smart => "smart",
        })
    }
}

/// Everything sway needs to drive one enabled output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputSettings {
    pub mode: ModeSpec,
    pub position: (i32, i32),
    pub transform: Transform,
    pub scale: f64,
    pub scale_filter: ScaleFilter,
    pub adaptive_sync: bool,
    pub dpms: bool,
}

impl OutputSettings {
    #[must_use]
    pub const fn new(mode: ModeSpec) -> Self {
        Self {
            mode,
            position: (0, 0),
            transform: Transform::Normal,
            scale: 1.0,
            scale_filter: ScaleFilter::Nearest,
            adaptive_sync: false,
            dpms: true,
        }
    }

    #[must_use]
    pub const fn position(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    #[must_use]
    pub const fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// One output directive: configure a named output, or disable it.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: String,
    pub kind: DirectiveKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DirectiveKind {
    Configure(OutputSettings),
    Disable,
}

impl Directive {
    #[must_use]
    pub fn configure(name: impl Into<String>, settings: OutputSettings) -> Self {
        Self {
            name: name.into(),
            kind: DirectiveKind::Configure(settings),
        }
    }

    #[must_use]
    pub fn disable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DirectiveKind::Disable,
        }
    }

    /// Single-line form accepted inside a `swaymsg` batch.
    #[must_use]
    pub fn flat(&self) -> String {
        match &self.kind {
            DirectiveKind::Configure(settings) => format!(
                "output \"{}\" mode {} pos {} {} transform {} scale {} scale_filter {} adaptive_sync {} dpms {}",
                self.name,
                settings.mode,
                settings.position.0,
                settings.position.1,
                settings.transform,
                Scale(settings.scale),
                settings.scale_filter,
                on_off(settings.adaptive_sync),
                on_off(settings.dpms),
            ),
            DirectiveKind::Disable => format!("output \"{}\" disable", self.name),
        }
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DirectiveKind::Configure(settings) => {
                writeln!(f, "output \"{}\" {{", self.name)?;
                writeln!(f, "    mode  {}", settings.mode)?;
                writeln!(f, "    pos {} {}", settings.position.0, settings.position.1)?;
                writeln!(f, "    transform {}", settings.transform)?;
                writeln!(f, "    scale {}", Scale(settings.scale))?;
                writeln!(f, "    scale_filter {}", settings.scale_filter)?;
                writeln!(f, "    adaptive_sync {}", on_off(settings.adaptive_sync))?;
                writeln!(f, "    dpms {}", on_off(settings.dpms))?;
                f.write_str("}")
            }
            DirectiveKind::Disable => write!(f, "output \"{}\" disable", self.name),
        }
    }
}

const fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// The ordered directive list for one apply, covering every output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub directives: Vec<Directive>,
}

impl Layout {
    #[must_use]
    pub fn new(directives: Vec<Directive>) -> Self {
        Self { directives }
    }

    /// The comma-joined batch command `swaymsg` applies in one call.
    #[must_use]
    pub fn command(&self) -> String {
        let flat: Vec<String> = self.directives.iter().map(Directive::flat).collect();
        flat.join(", ")
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for directive in &self.directives {
            writeln!(f, "{directive}")?;
        }

        Ok(())
    }
}

/// Places every output in a single left-to-right row at native resolution.
///
/// Each output uses its first advertised mode at scale 1.0, and x positions
/// are the running sum of the widths placed before it. With `leading`, that
/// output is placed first and the rest follow in enumeration order. An
/// output advertising no modes at all is disabled instead of placed.
#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub fn auto_row(outputs: &[Output], leading: Option<&Output>) -> Layout {
    let mut directives = Vec::with_capacity(outputs.len());
    let mut x = 0;

    let rest = outputs
        .iter()
        .filter(|output| leading.is_none_or(|lead| output.name != lead.name));

    for output in leading.into_iter().chain(rest) {
        let Some(mode) = output.preferred_mode() else {
            tracing::warn!(output = %output.name, "output advertises no modes; disabling");
            directives.push(Directive::disable(&output.name));
            continue;
        };

        directives.push(Directive::configure(
            &output.name,
            OutputSettings::new(ModeSpec::from(mode)).position(x, 0),
        ));

        x += mode.width as i32;
    }

    Layout::new(directives)
}

/// Rewrites block-style output configuration into the single-line batch
/// form `swaymsg` accepts.
///
/// Comment lines are dropped, braces and line breaks removed, runs of
/// whitespace collapsed, and `, ` inserted between output declarations.
/// Indentation and interleaved comments never change the result.
#[must_use]
pub fn flatten(config: &str) -> String {
    let mut pieces = Vec::new();

    for line in config.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.replace(['{', '}'], " ");
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");

        if !collapsed.is_empty() {
            pieces.push(collapsed);
        }
    }

    pieces.join(" ").replace(" output ", ", output ")
}
