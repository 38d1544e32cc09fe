use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use srcom::query::RunStatusFilter;

#[derive(Parser, Debug)]
#[command(
    name = "srcom",
    version,
    about = "Query speedrun.com games, leaderboards, runs and users",
    long_about = "A command-line tool for the speedrun.com REST API. Read-only \
                  endpoints work anonymously; pass an API key for anything tied \
                  to an account."
)]
pub struct Cli {
    /// API key sent as X-API-Key
    #[arg(long, global = true, env = "SPEEDRUN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Log requests and dump full request/response bodies to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// API root
    #[arg(long, global = true, default_value = srcom::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Attempts per request, including the first
    #[arg(long, global = true, default_value_t = 3)]
    pub max_retries: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search and inspect games
    #[command(subcommand)]
    Games(GamesCommands),

    /// Show leaderboards
    #[command(subcommand)]
    Leaderboard(LeaderboardCommands),

    /// List and inspect runs
    #[command(subcommand)]
    Runs(RunsCommands),

    /// Search and inspect users
    #[command(subcommand)]
    Users(UsersCommands),

    /// List and inspect game series
    #[command(subcommand)]
    Series(SeriesCommands),
}

#[derive(Subcommand, Debug)]
pub enum GamesCommands {
    /// Fuzzy search by name
    Search {
        name: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 20)]
        max: u32,
    },
    /// Show one game by ID or abbreviation
    Get { id: String },
    /// List a game's categories
    Categories {
        id: String,
        /// Only (true) or no (false) miscellaneous categories
        #[arg(long)]
        miscellaneous: Option<bool>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LeaderboardCommands {
    /// Full-game leaderboard
    Game {
        game: String,
        category: String,
        #[command(flatten)]
        filters: BoardFilters,
    },
    /// Individual-level leaderboard
    Level {
        game: String,
        level: String,
        category: String,
        #[command(flatten)]
        filters: BoardFilters,
    },
}

#[derive(Args, Debug, Default)]
pub struct BoardFilters {
    /// Only runs placed this high or better
    #[arg(long)]
    pub top: Option<u32>,

    /// Platform ID
    #[arg(long)]
    pub platform: Option<String>,

    /// Region ID
    #[arg(long)]
    pub region: Option<String>,

    /// Only runs with a video
    #[arg(long)]
    pub video_only: bool,

    /// Variable filter as <variable-id>=<value-id>; repeatable
    #[arg(long = "var", value_name = "ID=VALUE", value_parser = parse_variable)]
    pub variables: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
pub enum RunsCommands {
    /// List runs
    List {
        /// Game ID
        #[arg(long)]
        game: Option<String>,
        /// User ID
        #[arg(long)]
        user: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Maximum number of results
        #[arg(long, default_value_t = 20)]
        max: u32,
    },
    /// Show one run
    Get { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// Search by name
    Search {
        name: String,
        #[arg(long, default_value_t = 20)]
        max: u32,
    },
    /// Show one user by ID or name
    Get { id: String },
    /// A user's personal bests
    Pbs {
        id: String,
        /// Restrict to one game (ID or abbreviation)
        #[arg(long)]
        game: Option<String>,
        /// Only personal bests placed this high or better
        #[arg(long)]
        top: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SeriesCommands {
    /// List series
    List {
        /// Filter by name
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = 20)]
        max: u32,
    },
    /// Show one series by ID or abbreviation
    Get { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusArg {
    New,
    Verified,
    Rejected,
}

impl From<StatusArg> for RunStatusFilter {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::New => RunStatusFilter::New,
            StatusArg::Verified => RunStatusFilter::Verified,
            StatusArg::Rejected => RunStatusFilter::Rejected,
        }
    }
}

fn parse_variable(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((id, value)) if !id.is_empty() && !value.is_empty() => {
            Ok((id.to_string(), value.to_string()))
        }
        _ => Err(format!("expected <variable-id>=<value-id>, got {s:?}")),
    }
}
