mod cli;
mod commands;
mod output;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ProjectCommands};
use pag_tracker::error::Result;
use pag_tracker::{ApiClient, Config, RequestLog, RouteTable};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_tracing(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

/// Logs go to stderr; RUST_LOG wins over the --verbose default.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pag_tracker={default_level},pagtrack={default_level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);
    output::set_quiet(cli.quiet);

    let table = RouteTable::standard();

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "pagtrack", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        Commands::Routes => {
            commands::pages::routes(&table);
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?.with_base_url(cli.base_url);
            let mut builder = ApiClient::from_config(&config);
            if cli.verbose {
                builder = builder.middleware(RequestLog);
            }
            let client = builder.build()?;

            match command {
                Commands::Projects(args) => {
                    commands::projects::list(&client, args).await?;
                }
                Commands::Project { action } => match action {
                    ProjectCommands::View { id } => {
                        commands::projects::view(&client, &id).await?;
                    }
                    ProjectCommands::Create(args) => {
                        commands::projects::create(&client, args).await?;
                    }
                    ProjectCommands::Update { id, payload } => {
                        commands::projects::update(&client, &id, payload).await?;
                    }
                    ProjectCommands::Delete { id } => {
                        commands::projects::delete(&client, &id).await?;
                    }
                },
                Commands::Lookup { list } => {
                    commands::lookup::list(&client, list).await?;
                }
                Commands::Dashboard { metric } => {
                    commands::dashboard::show(&client, metric).await?;
                }
                Commands::Summary { view } => {
                    commands::dashboard::show_summary(&client, view).await?;
                }
                Commands::Open { path } => {
                    commands::pages::open(&client, &table, &path).await?;
                }
                Commands::Completions { .. } | Commands::Init | Commands::Routes => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
