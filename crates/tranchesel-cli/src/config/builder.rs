use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileLigandCount};
use super::models::{AppConfig, InputPaths};
use crate::cli::SelectionArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use std::path::{Path, PathBuf};
use tranchesel::engine::config::{self as core_config, EligibilityScope};

pub fn build_config(args: &SelectionArgs, output: Option<&Path>) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let selection_file = file_config.selection.take().unwrap_or_default();
    let inputs_file = file_config.inputs.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let target = match (&args.target, &selection_file.target) {
        (Some(text), _) => parse_target(text)?,
        (None, Some(FileLigandCount::Count(count))) => *count,
        (None, Some(FileLigandCount::Text(text))) => parse_target(text)?,
        (None, None) => {
            return Err(CliError::Config(
                "A target ligand count is required either in the config file or via --target."
                    .to_string(),
            ));
        }
    };

    let scoring_mode: core_config::ScoringMode = args
        .mode
        .as_deref()
        .or(selection_file.scoring_mode.as_deref())
        .unwrap_or(&defaults.scoring_mode)
        .parse()
        .map_err(|e: core_config::ConfigError| CliError::Config(e.to_string()))?;

    let eligibility_scope: EligibilityScope = if args.match_collection_key {
        EligibilityScope::Collection
    } else {
        selection_file
            .eligibility_scope
            .as_deref()
            .unwrap_or(&defaults.eligibility_scope)
            .parse()
            .map_err(|e: core_config::ConfigError| CliError::Config(e.to_string()))?
    };

    let seed_overflow: core_config::SeedOverflowPolicy = args
        .seed_overflow
        .as_deref()
        .or(selection_file.seed_overflow.as_deref())
        .unwrap_or(&defaults.seed_overflow)
        .parse()
        .map_err(|e: core_config::ConfigError| CliError::Config(e.to_string()))?;

    let mut builder = core_config::SelectionConfigBuilder::new()
        .target(target)
        .scoring_mode(scoring_mode)
        .eligibility_scope(eligibility_scope)
        .seed_overflow(seed_overflow);
    if let Some(pattern) = args
        .eligibility
        .as_ref()
        .or(selection_file.eligibility_pattern.as_ref())
    {
        builder = builder.eligibility_pattern(pattern.as_str());
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let inputs = InputPaths {
        scores: require_path(args.scores.as_ref(), inputs_file.scores, "scores")?,
        collections: require_path(
            args.collections.as_ref(),
            inputs_file.collections,
            "collections",
        )?,
        tranches: args.tranches.clone().or(inputs_file.tranches),
    };

    let output_path = output
        .map(Path::to_path_buf)
        .or(output_file.todo_file)
        .unwrap_or_else(|| PathBuf::from(&defaults.todo_file));

    Ok(AppConfig {
        inputs,
        output_path,
        core_config,
    })
}

fn parse_target(text: &str) -> Result<u64> {
    parser::parse_ligand_count(text).map_err(|e| CliError::Argument(e.to_string()))
}

fn require_path(
    cli_arg: Option<&PathBuf>,
    file_arg: Option<PathBuf>,
    kind: &str,
) -> Result<PathBuf> {
    cli_arg.cloned().or(file_arg).ok_or_else(|| {
        CliError::Config(format!(
            "A path for '{}' is required either in the config file or via --{}.",
            kind, kind
        ))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let value = value_str.to_string();

        match key.trim() {
            "selection.target" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .target = Some(FileLigandCount::Text(value));
            }
            "selection.scoring-mode" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .scoring_mode = Some(value);
            }
            "selection.eligibility-pattern" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .eligibility_pattern = Some(value);
            }
            "selection.eligibility-scope" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .eligibility_scope = Some(value);
            }
            "selection.seed-overflow" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .seed_overflow = Some(value);
            }
            "inputs.scores" => {
                config.inputs.get_or_insert_with(Default::default).scores =
                    Some(PathBuf::from(value));
            }
            "inputs.collections" => {
                config
                    .inputs
                    .get_or_insert_with(Default::default)
                    .collections = Some(PathBuf::from(value));
            }
            "inputs.tranches" => {
                config.inputs.get_or_insert_with(Default::default).tranches =
                    Some(PathBuf::from(value));
            }
            "output.todo-file" => {
                config.output.get_or_insert_with(Default::default).todo_file =
                    Some(PathBuf::from(value));
            }
            other => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    other
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tranchesel::engine::config::{Aggregation, ScoringMode, SeedOverflowPolicy};

    fn base_args() -> SelectionArgs {
        SelectionArgs {
            scores: Some(PathBuf::from("scores.csv")),
            collections: Some(PathBuf::from("collections.csv")),
            target: Some("100".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn cli_arguments_and_defaults_build_a_config() {
        let app = build_config(&base_args(), None).expect("build ok");
        assert_eq!(app.core_config.target, 100);
        assert_eq!(
            app.core_config.scoring_mode,
            ScoringMode::DimensionAveraging
        );
        assert_eq!(app.core_config.seed_overflow, SeedOverflowPolicy::Trim);
        assert!(app.core_config.eligibility.is_none());
        assert_eq!(app.inputs.scores, PathBuf::from("scores.csv"));
        assert_eq!(app.inputs.tranches, None);
        assert_eq!(
            app.output_path,
            PathBuf::from(DefaultsConfig::default().todo_file)
        );
    }

    #[test]
    fn file_values_fill_in_missing_arguments() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            [selection]
            target = "2.5K"
            scoring-mode = "tranche_ave_score"
            eligibility-pattern = "[AB].*"
            eligibility-scope = "collection"

            [inputs]
            scores = "prescreen.csv.gz"
            collections = "collections.csv"
            tranches = "tranches.csv"

            [output]
            todo-file = "out/todo.all"
            "#,
        )
        .unwrap();

        let args = SelectionArgs {
            config: Some(cfg_path),
            ..Default::default()
        };
        let app = build_config(&args, None).expect("build ok");

        assert_eq!(app.core_config.target, 2_500);
        assert_eq!(
            app.core_config.scoring_mode,
            ScoringMode::TrancheScore(Aggregation::Average)
        );
        let eligibility = app.core_config.eligibility.unwrap();
        assert_eq!(eligibility.pattern(), "[AB].*");
        assert_eq!(eligibility.scope(), EligibilityScope::Collection);
        assert_eq!(app.inputs.tranches, Some(PathBuf::from("tranches.csv")));
        assert_eq!(app.output_path, PathBuf::from("out/todo.all"));
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            [selection]
            target = 50
            scoring-mode = "tranche_min_score"
            seed-overflow = "keep"
            "#,
        )
        .unwrap();

        let mut args = base_args();
        args.config = Some(cfg_path);
        args.mode = Some("dimension_averaging".to_string());
        args.seed_overflow = Some("trim".to_string());

        let app = build_config(&args, Some(Path::new("cli.todo"))).expect("build ok");
        assert_eq!(app.core_config.target, 100);
        assert_eq!(
            app.core_config.scoring_mode,
            ScoringMode::DimensionAveraging
        );
        assert_eq!(app.core_config.seed_overflow, SeedOverflowPolicy::Trim);
        assert_eq!(app.output_path, PathBuf::from("cli.todo"));
    }

    #[test]
    fn set_values_override_file_values() {
        let mut args = base_args();
        args.target = None;
        args.set_values = vec![
            "selection.target=3M".to_string(),
            "selection.scoring-mode=tranche_min_score".to_string(),
            "selection.eligibility-pattern=A=B|C".to_string(),
            "inputs.tranches=t.csv".to_string(),
            "output.todo-file=set.todo".to_string(),
        ];

        let app = build_config(&args, None).expect("build ok");
        assert_eq!(app.core_config.target, 3_000_000);
        assert_eq!(
            app.core_config.eligibility.unwrap().pattern(),
            "A=B|C"
        );
        assert_eq!(app.inputs.tranches, Some(PathBuf::from("t.csv")));
        assert_eq!(app.output_path, PathBuf::from("set.todo"));
    }

    #[test]
    fn invalid_settings_are_reported() {
        let mut args = base_args();
        args.set_values = vec!["selection.unknown=1".to_string()];
        assert!(matches!(build_config(&args, None), Err(CliError::Config(_))));

        let mut args = base_args();
        args.set_values = vec!["no-equals-sign".to_string()];
        assert!(matches!(build_config(&args, None), Err(CliError::Config(_))));

        let mut args = base_args();
        args.mode = Some("tranche_median_score".to_string());
        assert!(matches!(build_config(&args, None), Err(CliError::Config(_))));

        let mut args = base_args();
        args.eligibility = Some("[A".to_string());
        assert!(matches!(build_config(&args, None), Err(CliError::Config(_))));

        let mut args = base_args();
        args.target = Some("lots".to_string());
        assert!(matches!(
            build_config(&args, None),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn missing_inputs_and_target_are_reported() {
        let mut args = base_args();
        args.target = None;
        assert!(matches!(build_config(&args, None), Err(CliError::Config(_))));

        let mut args = base_args();
        args.collections = None;
        assert!(matches!(build_config(&args, None), Err(CliError::Config(_))));
    }
}
