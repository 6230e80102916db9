use crate::cli::PatternArgs;
use crate::config::build_config;
use crate::data::{LoadedInputs, LoadedScores};
use crate::error::{CliError, Result};
use crate::ui::{CliProgressHandler, UiEvent};
use tokio::sync::mpsc;
use tokio::task;
use tracing::info;
use tranchesel::engine::config::ScoringMode;
use tranchesel::engine::progress::ProgressReporter;
use tranchesel::engine::strategy::FilterSearch;
use tranchesel::workflows::select;

pub async fn run(args: PatternArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let app_config = build_config(&args.selection, None)?;
    let core_config = &app_config.core_config;
    if core_config.scoring_mode != ScoringMode::DimensionAveraging {
        return Err(CliError::Config(format!(
            "The 'pattern' command only supports 'dimension_averaging', not '{}'.",
            core_config.scoring_mode
        )));
    }

    let inputs = task::block_in_place(|| {
        LoadedInputs::load(&app_config.inputs, core_config.scoring_mode)
    })?;
    let LoadedScores::Classes(scores) = &inputs.scores else {
        return Err(CliError::Other(anyhow::anyhow!(
            "dimension-averaging inputs did not load a class score table"
        )));
    };

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Running the filter search...");
    let search = task::block_in_place(|| {
        select::search_filter(&inputs.library, scores, core_config, &reporter)
    })?;

    print!("{}", render_report(&search));
    Ok(())
}

fn render_report(search: &FilterSearch) -> String {
    let mut out = format!(
        "Seed tranche pattern:            {}\nSeed number of ligands:          {}\n",
        search.seed, search.seed_total
    );
    for round in &search.rounds {
        out.push_str(&format!(
            "\nRound {} (dimension {}, class '{}', diff {:.4})\n\
             Previous tranche pattern:        {}\n\
             Previous number of ligands:      {}\n\
             Added tranche pattern:           {}\n\
             Current tranche pattern:         {}\n\
             Current number of ligands:       {}\n",
            round.round,
            round.dimension,
            round.class,
            round.diff,
            round.previous,
            round.previous_ligands,
            round.added,
            round.current,
            round.ligands
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tranchesel::engine::filter::SelectionFilter;
    use tranchesel::engine::state::RoundRecord;

    #[test]
    fn report_lists_every_round() {
        let mut current = SelectionFilter::from_seeds(b"AX");
        current.include(0, b'B');
        let search = FilterSearch {
            seed: SelectionFilter::from_seeds(b"AX"),
            seed_total: 10,
            rounds: vec![RoundRecord {
                round: 1,
                dimension: 0,
                class: 'B',
                diff: 2.0,
                previous: SelectionFilter::from_seeds(b"AX"),
                added: SelectionFilter::from_seeds(b"BX"),
                current,
                previous_ligands: 10,
                ligands: 17,
            }],
        };

        let report = render_report(&search);
        assert!(report.starts_with("Seed tranche pattern:            [A][X]\n"));
        assert!(report.contains("Round 1 (dimension 0, class 'B', diff 2.0000)"));
        assert!(report.contains("Previous number of ligands:      10"));
        assert!(report.contains("Added tranche pattern:           [B][X]"));
        assert!(report.contains("Current tranche pattern:         [AB][X]"));
        assert!(report.contains("Current number of ligands:       17"));
    }
}
