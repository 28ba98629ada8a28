use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use pag_tracker::types::{ListParams, ReferenceList, SummaryDimension};

#[derive(Parser)]
#[command(name = "pagtrack")]
#[command(about = "Browse and edit projects on the PAG tracking dashboard", version)]
#[command(after_help = "EXAMPLES:
    pagtrack projects --country Kenya     List projects in a country
    pagtrack project view 42              Show project details
    pagtrack dashboard kpis               Show headline figures
    pagtrack open /projects/42/edit       Open a dashboard page by path")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log requests and show detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// API base URL (overrides PAGTRACK_API_BASE_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects (optionally by country or status)
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    pagtrack projects
    pagtrack projects --search water --page 2
    pagtrack projects --country \"Côte d'Ivoire\"
    pagtrack projects --status \"Pending Approval\"
    pagtrack projects --param fund=GEF"
    )]
    Projects(ProjectListArgs),
    /// Manage a single project
    #[command(
        alias = "p",
        after_help = "EXAMPLES:
    pagtrack project view 42
    pagtrack project create --data '{\"title\": \"Wells\"}'
    pagtrack project update 42 --file project.json
    pagtrack project delete 42"
    )]
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// List reference data used by project forms
    #[command(after_help = "EXAMPLES:
    pagtrack lookup countries
    pagtrack lookup lead-org-units --json")]
    Lookup {
        /// Which list to fetch
        #[arg(value_enum)]
        list: ReferenceList,
    },
    /// Dashboard metrics
    #[command(
        alias = "d",
        after_help = "EXAMPLES:
    pagtrack dashboard kpis
    pagtrack dashboard value-by-country"
    )]
    Dashboard {
        #[command(subcommand)]
        metric: DashboardCommands,
    },
    /// Project counts and map data
    #[command(after_help = "EXAMPLES:
    pagtrack summary by-country
    pagtrack summary world-map --json")]
    Summary {
        #[command(subcommand)]
        view: SummaryCommands,
    },
    /// Resolve a dashboard path and show that page
    #[command(after_help = "EXAMPLES:
    pagtrack open /
    pagtrack open /dashboard
    pagtrack open /projects/42
    pagtrack open /projects/42/edit")]
    Open {
        /// Path (or full URL) of the page
        path: String,
    },
    /// List the dashboard's navigation paths
    Routes,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    pagtrack completions bash > ~/.bash_completion.d/pagtrack
    pagtrack completions zsh > ~/.zfunc/_pagtrack")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Show project details
    #[command(alias = "v")]
    View {
        /// Project ID
        id: String,
    },
    /// Create a project from a JSON payload
    #[command(alias = "c")]
    Create(PayloadArgs),
    /// Replace a project with a JSON payload
    #[command(alias = "u")]
    Update {
        /// Project ID
        id: String,

        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a project
    #[command(alias = "rm")]
    Delete {
        /// Project ID
        id: String,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum DashboardCommands {
    /// Headline KPIs
    Kpis,
    /// Total PAG value per country (single and combined)
    ValueByCountry,
    /// Total PAG value per lead organisation unit
    ValueByLeadOrg,
    /// Total PAG value per theme
    ValueByTheme,
    /// AI-generated insights
    Insights,
}

#[derive(Subcommand, Clone, Copy)]
pub enum SummaryCommands {
    /// Project count per country
    ByCountry,
    /// Project count per lead organisation unit
    ByOrgUnit,
    /// Project count per theme
    ByTheme,
    /// Data for the world map view
    WorldMap,
}

impl SummaryCommands {
    pub fn dimension(self) -> Option<SummaryDimension> {
        match self {
            SummaryCommands::ByCountry => Some(SummaryDimension::Country),
            SummaryCommands::ByOrgUnit => Some(SummaryDimension::OrgUnit),
            SummaryCommands::ByTheme => Some(SummaryDimension::Theme),
            SummaryCommands::WorldMap => None,
        }
    }
}

#[derive(Args, Default)]
pub struct ProjectListArgs {
    /// Only projects in this country (by name)
    #[arg(long, conflicts_with = "status")]
    pub country: Option<String>,

    /// Only projects with this status (e.g. "Approved")
    #[arg(long)]
    pub status: Option<String>,

    /// Full-text search term
    #[arg(long, short)]
    pub search: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Sort field, prefix with '-' for descending (e.g. -created_at)
    #[arg(long)]
    pub ordering: Option<String>,

    /// Extra filter as key=value (repeatable)
    #[arg(long = "param", value_parser = parse_key_value, value_name = "KEY=VALUE")]
    pub params: Vec<(String, String)>,

    /// Display format for the list
    #[arg(long, value_enum, default_value = "table")]
    pub view: ListView,
}

impl ProjectListArgs {
    pub fn list_params(&self) -> ListParams {
        let mut params = ListParams::new();
        params.page = self.page;
        params.page_size = self.page_size;
        params.search = self.search.clone();
        params.ordering = self.ordering.clone();
        for (key, value) in &self.params {
            params = params.filter(key, value);
        }
        params
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListView {
    /// Compact table of key fields
    #[default]
    Table,
    /// Every field the backend returns
    Full,
}

#[derive(Args, Default)]
pub struct PayloadArgs {
    /// Project payload as inline JSON
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,

    /// Read the project payload from a JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
