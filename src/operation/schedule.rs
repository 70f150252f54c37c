//! Event schedules and template rendering

use chrono::TimeDelta;
use thiserror::Error;

use super::{OperationKind, Parameters};

/// Console lines played back while booting a game version.
pub const DEFAULT_LAUNCH_LINES: [&str; 14] = [
    "[SHEIHU] Initializing launch environment for Minecraft {version}",
    "[SHEIHU] Checking Mojang Authentication status...",
    "[AUTH] Access Token verified. User: {username}",
    "[SHEIHU] Fetching version manifest from Mojang servers...",
    "[FILES] Comparing local assets with remote hash indices...",
    "[FILES] 1,429 assets verified. All files intact.",
    "[SHEIHU] Constructing classpath...",
    "[SHEIHU] Allocating JVM memory: -Xmx{maxRam}",
    "[JVM] Starting subprocess: java -jar minecraft.jar --version {version}",
    "[GAME] Setting up LWJGL window...",
    "[GAME] Initializing SoundSystem...",
    "[GAME] Reloading Resource Packs: [Vanilla]",
    "[GAME] Minecraft initialized successfully.",
    "[SHEIHU] Engine standby. Handover to game process complete.",
];

/// Line shown while the portable launcher bundle is packaged.
pub const DEFAULT_EXPORT_LINES: [&str; 1] =
    ["[SHEIHU] Packaging application bundle SheihuLauncher_Portable.zip..."];

pub const DEFAULT_LAUNCH_PERIOD_MS: u64 = 400;
pub const DEFAULT_DOWNLOAD_PERIOD_MS: u64 = 50;
pub const DEFAULT_DOWNLOAD_INCREMENT: u8 = 5;
pub const DEFAULT_EXPORT_PERIOD_MS: u64 = 1000;
/// Longest accepted tick period: one day.
pub const MAX_PERIOD_MS: u64 = 86_400_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Tick period must be between 1 and 86400000 milliseconds, got {0}")]
    InvalidPeriod(u64),

    #[error("Progress increment must be between 1 and 100, got {0}")]
    InvalidIncrement(u8),

    #[error("Log schedule needs at least one line")]
    EmptyTemplates,

    #[error("Operation '{kind}' needs a {expected} schedule")]
    WrongStyle {
        kind: OperationKind,
        expected: &'static str,
    },
}

/// How an operation kind advances on each tick.
///
/// Only built through [`Schedule::log`] and [`Schedule::percent`], so every
/// schedule has a positive period and reaches completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    period: TimeDelta,
    style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Style {
    Log { templates: Vec<String> },
    Percent { increment: u8 },
}

impl Schedule {
    pub fn log(period_ms: u64, templates: Vec<String>) -> Result<Self, ScheduleError> {
        if templates.is_empty() {
            return Err(ScheduleError::EmptyTemplates);
        }
        Ok(Self {
            period: period_from_millis(period_ms)?,
            style: Style::Log { templates },
        })
    }

    pub fn percent(period_ms: u64, increment: u8) -> Result<Self, ScheduleError> {
        if !(1..=100).contains(&increment) {
            return Err(ScheduleError::InvalidIncrement(increment));
        }
        Ok(Self {
            period: period_from_millis(period_ms)?,
            style: Style::Percent { increment },
        })
    }

    pub fn period(&self) -> TimeDelta {
        self.period
    }

    pub(crate) fn style(&self) -> &Style {
        &self.style
    }

    pub fn is_log(&self) -> bool {
        matches!(self.style, Style::Log { .. })
    }

    /// Log templates, for log-style schedules.
    pub fn templates(&self) -> Option<&[String]> {
        match &self.style {
            Style::Log { templates } => Some(templates),
            Style::Percent { .. } => None,
        }
    }

    /// Per-tick increment, for percentage-style schedules.
    pub fn increment(&self) -> Option<u8> {
        match self.style {
            Style::Percent { increment } => Some(increment),
            Style::Log { .. } => None,
        }
    }

    /// Ticks from start until the terminal `Complete`, counting the tick
    /// that carries it.
    pub fn ticks_to_complete(&self) -> usize {
        match &self.style {
            // One tick per line, plus the tick after the last line.
            Style::Log { templates } => templates.len() + 1,
            Style::Percent { increment } => 100usize.div_ceil(*increment as usize),
        }
    }

    /// Parameter names referenced by the templates, in first-use order.
    pub fn required_parameters(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for template in self.templates().unwrap_or_default() {
            for name in placeholders(template) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    fn expect_style(self, kind: OperationKind, log: bool) -> Result<Self, ScheduleError> {
        if self.is_log() == log {
            Ok(self)
        } else {
            Err(ScheduleError::WrongStyle {
                kind,
                expected: if log { "log" } else { "percentage" },
            })
        }
    }
}

fn period_from_millis(ms: u64) -> Result<TimeDelta, ScheduleError> {
    if !(1..=MAX_PERIOD_MS).contains(&ms) {
        return Err(ScheduleError::InvalidPeriod(ms));
    }
    Ok(TimeDelta::milliseconds(ms as i64))
}

fn default_log(period_ms: u64, lines: &[&str]) -> Schedule {
    Schedule {
        period: TimeDelta::milliseconds(period_ms as i64),
        style: Style::Log {
            templates: lines.iter().map(|s| s.to_string()).collect(),
        },
    }
}

/// The schedule for every known operation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSet {
    launch: Schedule,
    download: Schedule,
    export: Schedule,
}

impl ScheduleSet {
    /// `launch` must be log-style and `download` percentage-style. The
    /// export schedule starts at its default; see [`ScheduleSet::with_export`].
    pub fn new(launch: Schedule, download: Schedule) -> Result<Self, ScheduleError> {
        Ok(Self {
            launch: launch.expect_style(OperationKind::LaunchSequence, true)?,
            download: download.expect_style(OperationKind::Download, false)?,
            export: default_log(DEFAULT_EXPORT_PERIOD_MS, &DEFAULT_EXPORT_LINES),
        })
    }

    /// Replace the export schedule, which must be log-style.
    pub fn with_export(mut self, export: Schedule) -> Result<Self, ScheduleError> {
        self.export = export.expect_style(OperationKind::ExportBundle, true)?;
        Ok(self)
    }

    pub fn for_kind(&self, kind: OperationKind) -> &Schedule {
        match kind {
            OperationKind::LaunchSequence => &self.launch,
            OperationKind::Download => &self.download,
            OperationKind::ExportBundle => &self.export,
        }
    }
}

impl Default for ScheduleSet {
    fn default() -> Self {
        Self {
            launch: default_log(DEFAULT_LAUNCH_PERIOD_MS, &DEFAULT_LAUNCH_LINES),
            download: Schedule {
                period: TimeDelta::milliseconds(DEFAULT_DOWNLOAD_PERIOD_MS as i64),
                style: Style::Percent {
                    increment: DEFAULT_DOWNLOAD_INCREMENT,
                },
            },
            export: default_log(DEFAULT_EXPORT_PERIOD_MS, &DEFAULT_EXPORT_LINES),
        }
    }
}

/// Iterate over `{name}` placeholders. Anything in braces that is not a
/// plain identifier is left alone as literal text.
fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    let mut rest = template;
    std::iter::from_fn(move || loop {
        let open = rest.find('{')?;
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_placeholder_name(&after[..close]) => {
                rest = &after[close + 1..];
                return Some(&after[..close]);
            }
            Some(_) => rest = after,
            None => return None,
        }
    })
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Substitute parameters into a template in a single pass.
///
/// Values are inserted verbatim; braces inside a value are never expanded.
/// Returns the name of the first placeholder with no matching parameter.
pub fn render(template: &str, parameters: &Parameters) -> Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_placeholder_name(&after[..close]) => {
                let name = &after[..close];
                let value = parameters.get(name).ok_or_else(|| name.to_string())?;
                out.push_str(value);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Ok(out)
}
