use crate::cli::SelectArgs;
use crate::config::build_config;
use crate::data::LoadedInputs;
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use tokio::sync::mpsc;
use tokio::task;
use tracing::info;
use tranchesel::core::io::todo::TodoFile;
use tranchesel::engine::progress::ProgressReporter;
use tranchesel::workflows::select;

pub async fn run(args: SelectArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args.selection, args.output.as_deref())?;
    let core_config = &app_config.core_config;

    let inputs = task::block_in_place(|| {
        LoadedInputs::load(&app_config.inputs, core_config.scoring_mode)
    })?;

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Selecting {} ligands ({})...",
        core_config.target, core_config.scoring_mode
    );
    info!("Invoking the core selection workflow...");

    let result = task::block_in_place(|| {
        select::run(
            &inputs.library,
            inputs.scores.as_table(),
            core_config,
            &reporter,
        )
    })?;

    let selection = &result.selection;
    info!(
        "Writing {} selected collections to {:?}",
        selection.len(),
        &app_config.output_path
    );
    TodoFile::write_to_path(selection.rows(), &app_config.output_path)?;

    if let Some(search) = &result.search {
        println!(
            "  Filter: {} ({} round(s), {} ligands matched)",
            search.current(),
            search.rounds.len(),
            search.total()
        );
    }
    println!(
        "✓ {} collections ({} baseline, {} added), {} ligands selected ({} over target).",
        selection.len(),
        selection.baseline().count(),
        selection.added().count(),
        selection.total_ligands(),
        selection.overshoot()
    );
    println!(
        "  Todo list written to: {}",
        app_config.output_path.display()
    );

    Ok(())
}
