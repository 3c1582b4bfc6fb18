//! Device log, classified and color-coded.

use tabled::Tabled;

use speedctl_core::{Command as CoreCommand, CommandOutput, LogCategory, LogEntry, LogFilter, Router};

use crate::cli::{GlobalOpts, LogArgs, OutputFormat};
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::unexpected_output;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Messages")]
    description: &'static str,
}

fn filter_from(args: &LogArgs) -> Result<LogFilter, CliError> {
    let filter = match (&args.include, &args.exclude) {
        (Some(keys), _) => LogFilter::include(keys)?,
        (None, Some(keys)) => LogFilter::exclude(keys)?,
        (None, None) => LogFilter::default(),
    };
    Ok(filter)
}

fn print_categories(painter: Painter, quiet: bool) {
    let rows: Vec<CategoryRow> = LogCategory::all()
        .map(|c| CategoryRow {
            key: c.key(),
            name: painter.log_line(&c.to_string(), c, speedctl_core::Severity::Normal),
            description: c.description(),
        })
        .collect();
    output::print_output(&output::render_table(&rows), quiet);
}

fn colored_lines(entries: &[LogEntry], painter: Painter) -> String {
    entries
        .iter()
        .map(|e| painter.log_line(&e.line, e.category, e.severity))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle(
    router: &Router,
    args: LogArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter::new(settings.color);
    if args.categories {
        print_categories(painter, global.quiet);
        return Ok(());
    }

    let command = CoreCommand::ShowLog {
        count: args.count,
        filter: filter_from(&args)?,
    };
    let CommandOutput::Log(entries) = router.execute(&command).await? else {
        return Err(unexpected_output());
    };

    let out = match settings.output {
        OutputFormat::Table => colored_lines(&entries, painter),
        OutputFormat::Plain => entries
            .iter()
            .map(|e| e.line.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        format => output::render_single(format, &entries, |_| String::new(), |_| String::new()),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(include: Option<&str>, exclude: Option<&str>) -> LogArgs {
        LogArgs {
            count: -1,
            include: include.map(str::to_owned),
            exclude: exclude.map(str::to_owned),
            categories: false,
        }
    }

    #[test]
    fn include_wins_shape() {
        let filter = filter_from(&args(Some("w"), None)).unwrap();
        assert_eq!(filter.effective_exclusions().len(), 11);
    }

    #[test]
    fn unknown_key_is_usage_error() {
        let err = filter_from(&args(None, Some("bogus"))).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn no_flags_shows_everything() {
        let filter = filter_from(&args(None, None)).unwrap();
        assert!(filter.effective_exclusions().is_empty());
    }
}
