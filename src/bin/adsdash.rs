use std::collections::HashMap;
use std::path::PathBuf;

use adsdash::config::{ENV_CREDS_PATH, ENV_SPREADSHEET_ID, ENV_WORKSHEET};
use adsdash::date_util::parse_ymd;
use adsdash::report::format::{format_count, format_currency, format_percent};
use adsdash::report::InsightEntry;
use adsdash::{
    AdRecord, AdsDashboard, DashboardReport, FilterCriteria, FilterOptions, Insight, Settings,
    Severity, SpendOverTime,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "adsdash", about = "Ad performance dashboard backed by a Google Sheet")]
struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Read settings from this env file instead of ./.env and ~/.adsdash/env
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Service-account credentials file (overrides CREDS_PATH)
    #[arg(long, value_name = "PATH")]
    creds: Option<String>,

    /// Spreadsheet key or URL (overrides SPREADSHEET_ID)
    #[arg(long, value_name = "ID_OR_URL")]
    spreadsheet: Option<String>,

    /// Worksheet title (default: first worksheet)
    #[arg(long)]
    worksheet: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full dashboard: KPIs, spend over time, insights, and the ad table
    Report {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List campaigns and the date span available for filtering
    Options {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Filtered ad rows, highest spend first
    Table {
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum rows to print
        #[arg(long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Automated insights for the selection
    Insights {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Campaign to include (repeatable; default: all campaigns)
    #[arg(long = "campaign", value_name = "NAME")]
    campaigns: Vec<String>,
    /// Start of the date window (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// End of the date window (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
}

impl FilterArgs {
    /// Narrow the dashboard defaults by whatever flags were given.
    fn criteria(&self, dash: &AdsDashboard) -> anyhow::Result<FilterCriteria> {
        let from = self.from.as_deref().map(|s| parse_date_arg("--from", s)).transpose()?;
        let to = self.to.as_deref().map(|s| parse_date_arg("--to", s)).transpose()?;
        Ok(dash.default_criteria().narrowed(&self.campaigns, from, to))
    }
}

fn parse_date_arg(flag: &str, value: &str) -> anyhow::Result<NaiveDate> {
    parse_ymd(value).ok_or_else(|| anyhow::anyhow!("{flag}: invalid date '{value}' (expected YYYY-MM-DD)"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut overrides = HashMap::new();
    for (key, value) in [
        (ENV_CREDS_PATH, &cli.creds),
        (ENV_SPREADSHEET_ID, &cli.spreadsheet),
        (ENV_WORKSHEET, &cli.worksheet),
    ] {
        if let Some(v) = value {
            overrides.insert(key.to_string(), v.clone());
        }
    }
    let settings = Settings::load(&overrides, cli.env_file.as_deref())?;
    let dash = AdsDashboard::load(&settings).await?;

    match cli.command {
        Commands::Report { filter, json } => {
            let report = dash.report(&filter.criteria(&dash)?);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Options { json } => {
            let options = dash.options();
            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                print_options(&options);
            }
        }
        Commands::Table { filter, limit, json } => {
            let mut rows = dash.report(&filter.criteria(&dash)?).table;
            if let Some(n) = limit {
                rows.truncate(n);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_table(&rows);
            }
        }
        Commands::Insights { filter, json } => {
            let report = dash.report(&filter.criteria(&dash)?);
            if json {
                let entries: Vec<InsightEntry> =
                    report.insights.iter().copied().map(InsightEntry::from).collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_insights(&report.insights);
            }
        }
    }

    Ok(())
}

fn print_report(report: &DashboardReport) {
    println!("Ad Performance Dashboard");
    println!(
        "  Campaigns: {}",
        report
            .criteria
            .campaign_names
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Dates:     {} to {}", report.criteria.date_from, report.criteria.date_to);
    println!();

    println!("Key Metrics");
    for (label, value) in report.kpis() {
        println!("  {:<13} {value}", format!("{label}:"));
    }
    println!();

    println!("Spend Over Time");
    match &report.spend_over_time {
        SpendOverTime::Series(points) => {
            for p in points {
                println!("  {}  {:>12}", p.date, format_currency(p.spend));
            }
        }
        SpendOverTime::NotEnoughVariation => {
            println!("  Not enough date variation to show 'Spend Over Time' chart.");
        }
    }
    println!();

    print_insights(&report.insights);
    println!();

    print_table(&report.table);
    println!();
    println!("Dashboard updates live from your Google Sheet every time you load this page.");
    println!(
        "Sheet read at {}",
        report.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

fn print_options(options: &FilterOptions) {
    println!("Campaigns ({}):", options.campaigns.len());
    for name in &options.campaigns {
        println!("  {name}");
    }
    match (options.date_min, options.date_max) {
        (Some(min), Some(max)) => println!("Dates: {min} to {max}"),
        _ => println!("Dates: none"),
    }
}

fn print_insights(insights: &[Insight]) {
    println!("Automated Insight Summary");
    for insight in insights {
        let tag = match insight.severity() {
            Severity::Warning => "warn",
            Severity::Positive => "good",
            Severity::Alert => "alert",
            Severity::Info => "info",
            Severity::Success => "ok",
        };
        println!("  [{tag:>5}] {insight}");
    }
}

fn print_table(rows: &[AdRecord]) {
    println!("Ad Performance Table");
    if rows.is_empty() {
        println!("  No rows match the current filters.");
        return;
    }
    println!(
        "  {:<28} {:<10} {:<10} {:>12} {:>8} {:>12} {:>8} {:>8}",
        "Campaign", "Start", "Stop", "Spend", "Clicks", "Impressions", "CPC", "CTR"
    );
    for r in rows {
        println!(
            "  {:<28} {:<10} {:<10} {:>12} {:>8} {:>12} {:>8} {:>8}",
            truncate(&r.campaign_name, 28),
            r.date_start,
            r.date_stop,
            format_currency(r.spend),
            format_count(r.clicks),
            format_count(r.impressions),
            format!("${:.2}", r.cpc),
            format_percent(r.ctr),
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
