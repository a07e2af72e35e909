use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use finesight::app::{Session, SessionState};
use finesight::client;
use finesight::config::{Config, ConfigOverrides};
use finesight::insight::UserInsight;
use finesight::recommendation::extract::parse_recommendation_text;
use finesight::views::{self, budget, expenses, insights, recommendations};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Tab {
    Expenses,
    Insights,
    Budget,
    Recommendations,
}

#[derive(Debug, Parser)]
#[command(name = "finesight", about = "Personal financial insight dashboard")]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Backend base URL (overrides config file and FINESIGHT_API_URL)
    #[arg(long = "api-url")]
    api_url: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and render the financial insight for one user
    Analyze {
        user_id: String,
        /// Render a single view instead of all four
        #[arg(long, value_enum)]
        tab: Option<Tab>,
    },
    /// Probe the backend health endpoint
    Health,
    /// Inspect or initialize the configuration file
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_env();
    config.apply_overrides(ConfigOverrides {
        base_url: cli.api_url.clone(),
    });

    match &cli.command {
        Commands::Config { init, show } => {
            handle_config_command(*init, *show, &config, &config_path)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Health => {
            if client::check_health(&config.api.base_url).await {
                println!("Backend at {} is healthy", config.api.base_url);
                Ok(ExitCode::SUCCESS)
            } else {
                println!("Backend at {} is not reachable", config.api.base_url);
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Analyze { user_id, tab } => {
            run_analyze(&config, user_id, *tab, cli.output).await
        }
    }
}

fn handle_config_command(init: bool, show: bool, config: &Config, path: &Path) -> Result<()> {
    if init {
        Config::write_template(path)?;
        println!("Wrote config template to {}", path.display());
    }
    if show || !init {
        println!("{}", views::render_json(config)?);
    }
    Ok(())
}

async fn run_analyze(
    config: &Config,
    user_id: &str,
    tab: Option<Tab>,
    output: OutputFormat,
) -> Result<ExitCode> {
    let mut session = Session::new();
    session.analyze(&config.api.base_url, user_id).await;

    match session.state() {
        SessionState::Ready(insight) => {
            print_insight(insight, tab, output, config)?;
            Ok(ExitCode::SUCCESS)
        }
        SessionState::NotFound { .. } => {
            if let Some(banner) = session.banner() {
                println!("{banner}");
            }
            Ok(ExitCode::FAILURE)
        }
        _ => {
            if let Some(banner) = session.banner() {
                eprintln!("{banner}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_insight(
    insight: &UserInsight,
    tab: Option<Tab>,
    output: OutputFormat,
    config: &Config,
) -> Result<()> {
    let warning_ratio = config.display.discretionary_warning_ratio;

    if let OutputFormat::Json = output {
        let rendered = match tab {
            // The recommendations view works off the re-parsed narrative,
            // not the raw text.
            Some(Tab::Recommendations) => {
                views::render_json(&parse_recommendation_text(&insight.recommendation_text))?
            }
            Some(Tab::Expenses) => views::render_json(&insight.current_expenses)?,
            Some(Tab::Budget) => views::render_json(&insight.budget_recommendations)?,
            Some(Tab::Insights) => views::render_json(&serde_json::json!({
                "behavior_insight": insight.behavior_insight,
                "financial_insight": insight.financial_insight,
            }))?,
            None => views::render_json(insight)?,
        };
        println!("{rendered}");
        return Ok(());
    }

    let show = |candidate: Tab| tab.is_none() || tab == Some(candidate);

    println!("User ID: {}", insight.user_id);
    if show(Tab::Expenses) {
        println!("\n💳 Current Expenses");
        println!("{}", expenses::render_expenses(insight, warning_ratio));
    }
    if show(Tab::Insights) {
        println!("\n🔍 Behavior & Financial Insight");
        println!("{}", insights::render_insights(insight));
    }
    if show(Tab::Budget) {
        println!("\n📋 Recommended Budget (Next Month)");
        println!("{}", budget::render_budget(&insight.budget_recommendations));
    }
    if show(Tab::Recommendations) {
        println!("\n💡 Personalized Recommendations");
        let parsed = parse_recommendation_text(&insight.recommendation_text);
        println!("{}", recommendations::render_recommendations(&parsed));
    }
    Ok(())
}
