//! Horizon CLI - inspect goal timestamps, statuses and progress.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use horizon_core::{
    DisplayStatus, FixedClock, Instant, LocalDateTime, SystemClock, WireGoal, Zone,
};
use horizon_status::{
    daily_scores, duration_breakdown, extended_stats, monthly_stats, priority_breakdown,
    source_breakdown, weighted_completion, PeriodStats, StatusEngine,
};
use horizon_time::{
    format_for_display, format_for_input, DisplayKind, InputKind, ParseKind, TimeContext,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "horizon")]
#[command(about = "Goal time conversion and status engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Timezone for local fields (IANA name, UTC offset, `utc` or `system`)
    #[arg(long, global = true, default_value = "system")]
    tz: Zone,

    /// Freeze the clock at this many epoch milliseconds
    #[arg(long, global = true)]
    now: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the display status of each goal in a JSON file (`-` for stdin)
    Status {
        /// JSON array of wire goals
        file: PathBuf,
    },
    /// Show weighted completion of the goals in a JSON file
    Progress {
        /// JSON array of wire goals
        file: PathBuf,
    },
    /// Show completion by priority, by source, by length and by day
    Breakdown {
        /// JSON array of wire goals
        file: PathBuf,
    },
    /// Show a year of completion rolled up by month (and optionally week)
    Year {
        /// JSON array of wire goals
        file: PathBuf,
        /// Calendar year, defaults to the current local year
        #[arg(long)]
        year: Option<i32>,
        /// Also list ISO weeks
        #[arg(long)]
        weeks: bool,
        /// Print the full rollup as JSON
        #[arg(long)]
        json: bool,
    },
    /// Format an instant for input controls or display
    Format {
        /// Epoch milliseconds
        #[arg(allow_hyphen_values = true)]
        millis: i64,
        /// date, time or datetime
        #[arg(long, default_value = "datetime")]
        kind: String,
        /// Use the UTC-pinned display format instead of the input format
        #[arg(long)]
        display: bool,
    },
    /// Parse an input-control string into an instant
    Parse {
        /// The input string
        input: String,
        /// date, end-date, time or datetime
        #[arg(long, default_value = "datetime")]
        kind: ParseKind,
    },
    /// Show the instant bounds of a local day (defaults to today)
    Day {
        /// YYYY-MM-DD
        date: Option<NaiveDate>,
    },
}

/// Runtime configuration assembled from the command line.
#[derive(Debug, Clone)]
struct Config {
    /// Zone local fields are read in
    zone: Zone,
    /// Frozen clock, or the system clock when unset
    now: Option<Instant>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zone: Zone::System,
            now: None,
        }
    }
}

impl Config {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            zone: cli.tz,
            now: cli.now.map(Instant::from_millis),
        }
    }

    fn context(&self) -> TimeContext {
        match self.now {
            Some(now) => TimeContext::new(self.zone, FixedClock(now)),
            None => TimeContext::new(self.zone, SystemClock),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_goals(path: &Path) -> Result<Vec<WireGoal>> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read goals from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).context("Expected a JSON array of goals")
}

fn format_badge(status: DisplayStatus) -> &'static str {
    match status {
        DisplayStatus::Upcoming => "UPCOMING",
        DisplayStatus::Active => "ACTIVE",
        DisplayStatus::Late => "LATE",
        DisplayStatus::Completed => "COMPLETED",
        DisplayStatus::Tardy => "TARDY",
        DisplayStatus::Skipped => "SKIPPED",
        DisplayStatus::Failed => "FAILED",
    }
}

fn format_period(row: &PeriodStats) -> String {
    format!(
        "  {:<8} {:>3}/{:<3} {:>5.1}% ({} days, {} with nothing done)",
        row.period,
        row.completed_events,
        row.total_events,
        row.completion_rate * 100.0,
        row.days_with_tasks,
        row.days_with_no_tasks_complete
    )
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli);
    let ctx = config.context();
    info!("Using zone {} at {}", ctx.zone(), ctx.now_local());

    match cli.command {
        Commands::Status { file } => {
            let goals = ctx.decode_goals(read_goals(&file)?);
            let engine = StatusEngine::new(ctx.clock());

            println!("Goals ({})", goals.len());
            for (goal, status) in goals.iter().zip(engine.statuses(&goals)) {
                let id = goal.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
                let due = format_for_display(goal.end_bound(), DisplayKind::DateTime);
                println!("  {} | {} | {} | {}", id, format_badge(status), goal.name, due);
            }
        }
        Commands::Progress { file } => {
            let goals = read_goals(&file)?;
            let stats = weighted_completion(&goals);

            println!("Resolved: {}/{}", stats.resolved_count, stats.total_count);
            println!("Weighted: {}/{}", stats.weighted_resolved, stats.weighted_total);
            if stats.uses_count_fallback() && stats.has_data() {
                println!("  (no weighted goals, using counts)");
            }
            if stats.has_data() {
                println!("Progress: {:.1}%", stats.percentage());
            } else {
                println!("Progress: no data");
            }
        }
        Commands::Breakdown { file } => {
            let goals = read_goals(&file)?;

            println!("By priority:");
            for row in priority_breakdown(&goals) {
                println!(
                    "  {:<8} {:>3}/{:<3} {:.0}%",
                    row.priority,
                    row.completed_events,
                    row.total_events,
                    row.completion_rate * 100.0
                );
            }

            let sources = source_breakdown(&goals);
            println!("By source:");
            let rows = [("routine", &sources.routine_events), ("task", &sources.task_events)];
            for (name, row) in rows {
                println!(
                    "  {:<8} {:>3}/{:<3} {:.0}% (avg weight {:.2})",
                    name,
                    row.completed_events,
                    row.total_events,
                    row.completion_rate * 100.0,
                    row.avg_priority_weight
                );
            }

            println!("By length:");
            for row in duration_breakdown(&goals) {
                println!(
                    "  {:<9} {:>3}/{:<3} {:.0}% (avg {:.0} min)",
                    row.duration_range,
                    row.completed_events,
                    row.total_events,
                    row.completion_rate * 100.0,
                    row.avg_duration_minutes
                );
            }

            let days = daily_scores(&ctx, &goals);
            println!("By day:");
            for day in &days {
                println!(
                    "  {} {:>3}/{:<3} score {:.2}",
                    day.date, day.completed_events, day.total_events, day.score
                );
            }
            println!("By month:");
            for row in monthly_stats(&days) {
                println!("{}", format_period(&row));
            }
        }
        Commands::Year {
            file,
            year,
            weeks,
            json,
        } => {
            let goals = read_goals(&file)?;
            let year = year.unwrap_or_else(|| ctx.today().year());
            let stats = extended_stats(&ctx, &goals, year);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("{}", format_period(&stats.yearly_stats));
            println!("By month:");
            for row in &stats.monthly_stats {
                println!("{}", format_period(row));
            }
            if weeks {
                println!("By week:");
                for row in &stats.weekly_stats {
                    println!("{}", format_period(row));
                }
            }
        }
        Commands::Format {
            millis,
            kind,
            display,
        } => {
            let value = ctx.decode_instant(Some(Instant::from_millis(millis)));
            let text = if display {
                let kind: DisplayKind = kind.parse().map_err(anyhow::Error::msg)?;
                format_for_display(value.as_ref(), kind)
            } else {
                let kind: InputKind = kind.parse().map_err(anyhow::Error::msg)?;
                format_for_input(value.as_ref(), kind)
            };
            println!("{}", text);
        }
        Commands::Parse { input, kind } => {
            let value = match ctx.try_parse_from_input(&input, kind) {
                Ok(value) => value,
                Err(err) => {
                    warn!("{}; using epoch", err);
                    LocalDateTime::epoch(ctx.zone())
                }
            };
            if value.instant().is_epoch() {
                println!("{} (epoch)", value.instant());
            } else {
                println!("{}", value.instant());
            }
            println!("  local: {}", value);
        }
        Commands::Day { date } => {
            let date = date.unwrap_or_else(|| ctx.today());
            let (start, end) = ctx.day_bounds(date);
            println!("{} in {}", date, ctx.zone());
            println!("  start: {}", start);
            println!("  end:   {}", end);
            let hours = (end.as_millis() - start.as_millis() + 1) as f64 / 3_600_000.0;
            println!("  hours: {:.1}", hours);
        }
    }

    Ok(())
}
