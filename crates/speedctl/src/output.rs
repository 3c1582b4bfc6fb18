//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one value per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::{OwoColorize, Style};
use tabled::{Table, Tabled, settings::Style as TableStyle};

use speedctl_core::{LogCategory, Severity};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Applies styles only when color is enabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: should_color(mode),
        }
    }

    pub fn paint(self, text: &str, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }

    pub fn up_down(self, up: bool) -> String {
        if up {
            self.paint("UP", Style::new().green())
        } else {
            self.paint("DOWN", Style::new().red())
        }
    }

    pub fn warn(self, text: &str) -> String {
        self.paint(text, Style::new().bright_red())
    }

    /// Background for one log line. Alerts are always red.
    pub fn log_line(self, line: &str, category: LogCategory, severity: Severity) -> String {
        let style = if severity == Severity::Alert {
            Style::new().on_red().black()
        } else {
            category_style(category)
        };
        self.paint(line, style)
    }
}

fn category_style(category: LogCategory) -> Style {
    match category {
        LogCategory::Mail => Style::new().on_yellow().black(),
        LogCategory::WebSession => Style::new().on_bright_yellow().black(),
        LogCategory::Time => Style::new().on_green().black(),
        LogCategory::Voice => Style::new().on_blue(),
        LogCategory::DynamicDns => Style::new().on_bright_green().black(),
        LogCategory::LteSim => Style::new().on_bright_magenta().black(),
        LogCategory::Dsl => Style::new().on_magenta().black(),
        LogCategory::Igmp => Style::new().on_bright_black(),
        LogCategory::Wifi => Style::new().on_cyan(),
        LogCategory::Vpn => Style::new().on_white().black(),
        LogCategory::Dhcp => Style::new().on_bright_cyan().black(),
        LogCategory::Unclassified => Style::new().on_bright_white().black(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `plain_fn` on each item to emit one line per item
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    plain_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&plain_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since detail views don't map onto one row type.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => plain_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Clear the terminal before a watch-mode redraw.
pub fn clear_screen() {
    let mut stdout = io::stdout().lock();
    let _ = write!(stdout, "\x1b[2J\x1b[H");
    let _ = stdout.flush();
}

// ── Format-specific renderers ────────────────────────────────────────

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(TableStyle::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.expect("serialization should not fail")
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
