//! draftbox CLI entry point.
//!
//! Parses CLI arguments, initializes tracing and the draft store, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    draftbox_observe::tracing_setup::init_tracing(cli::log_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need the store
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "draftbox", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;
    tracing::debug!(data_dir = %state.data_dir.display(), "draft store ready");

    let result = match cli.command {
        Commands::Save {
            draft_type,
            title,
            data,
            id,
        } => cli::draft::save_draft(&state, draft_type, title, &data, id, cli.json).await,
        Commands::Get { id } => cli::draft::show_draft(&state, &id, cli.json).await,
        Commands::List { draft_type } => cli::draft::list_drafts(&state, &draft_type, cli.json).await,
        Commands::ListAll => cli::draft::list_all_drafts(&state, cli.json).await,
        Commands::Find { draft_type, title } => {
            cli::draft::find_drafts(&state, &draft_type, &title, cli.json).await
        }
        Commands::Types => cli::draft::list_types(&state, cli.json).await,
        Commands::Delete { id } => cli::draft::delete_draft(&state, &id, cli.json).await,
        Commands::Clear { force } => cli::draft::clear_drafts(&state, force, cli.json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    draftbox_observe::tracing_setup::shutdown_tracing();
    result
}
