use phf::{Map, phf_map};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Target ligand count must be a positive integer")]
    ZeroTarget,

    #[error(
        "Unknown scoring mode '{0}'. Expected 'dimension_averaging', 'tranche_min_score' or 'tranche_ave_score'."
    )]
    UnknownScoringMode(String),

    #[error("Unknown aggregation mode '{0}'. Expected 'min' or 'average'.")]
    UnknownAggregation(String),

    #[error("Unknown eligibility scope '{0}'. Expected 'tranche' or 'collection'.")]
    UnknownEligibilityScope(String),

    #[error("Unknown seed overflow policy '{0}'. Expected 'trim' or 'keep'.")]
    UnknownSeedOverflowPolicy(String),

    #[error("Invalid eligibility pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// How replicate prescreen scores are merged into one score per tranche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    Min,
    Average,
}

static AGGREGATIONS: Map<&'static str, Aggregation> = phf_map! {
    "min" => Aggregation::Min,
    "minimum" => Aggregation::Min,
    "average" => Aggregation::Average,
    "ave" => Aggregation::Average,
    "mean" => Aggregation::Average,
};

impl Aggregation {
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::Min => "min",
            Aggregation::Average => "average",
        }
    }
}

impl FromStr for Aggregation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AGGREGATIONS
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ConfigError::UnknownAggregation(s.to_string()))
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The selection strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringMode {
    /// Greedy growth of a per-dimension class filter from class scores.
    DimensionAveraging,
    /// Rank scan over collections ordered by their merged tranche score.
    TrancheScore(Aggregation),
}

static SCORING_MODES: Map<&'static str, ScoringMode> = phf_map! {
    "dimension_averaging" => ScoringMode::DimensionAveraging,
    "dimension-averaging" => ScoringMode::DimensionAveraging,
    "tranche_min_score" => ScoringMode::TrancheScore(Aggregation::Min),
    "tranche-min-score" => ScoringMode::TrancheScore(Aggregation::Min),
    "tranche_ave_score" => ScoringMode::TrancheScore(Aggregation::Average),
    "tranche-ave-score" => ScoringMode::TrancheScore(Aggregation::Average),
    "tranche_average_score" => ScoringMode::TrancheScore(Aggregation::Average),
};

impl ScoringMode {
    pub fn name(&self) -> &'static str {
        match self {
            ScoringMode::DimensionAveraging => "dimension_averaging",
            ScoringMode::TrancheScore(Aggregation::Min) => "tranche_min_score",
            ScoringMode::TrancheScore(Aggregation::Average) => "tranche_ave_score",
        }
    }
}

impl FromStr for ScoringMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SCORING_MODES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ConfigError::UnknownScoringMode(s.to_string()))
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which key the eligibility pattern is matched against during a rank scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EligibilityScope {
    /// The bare tranche code, e.g. `AX`.
    #[default]
    Tranche,
    /// The collection key, e.g. `AX_0000001`.
    Collection,
}

impl FromStr for EligibilityScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tranche" => Ok(EligibilityScope::Tranche),
            "collection" => Ok(EligibilityScope::Collection),
            _ => Err(ConfigError::UnknownEligibilityScope(s.to_string())),
        }
    }
}

/// What to do when the seed filter alone already exceeds the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedOverflowPolicy {
    /// Trim within the seed filter's own collections.
    #[default]
    Trim,
    /// Keep every seed collection.
    Keep,
}

impl FromStr for SeedOverflowPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trim" => Ok(SeedOverflowPolicy::Trim),
            "keep" => Ok(SeedOverflowPolicy::Keep),
            _ => Err(ConfigError::UnknownSeedOverflowPolicy(s.to_string())),
        }
    }
}

/// A compiled full-string eligibility pattern.
#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    pattern: String,
    regex: Regex,
    scope: EligibilityScope,
}

impl EligibilityFilter {
    pub fn new(pattern: &str, scope: EligibilityScope) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            scope,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn scope(&self) -> EligibilityScope {
        self.scope
    }

    /// Whether `key` matches the pattern in full.
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

#[derive(Debug, Clone)]
pub struct SelectionConfig {
    pub target: u64,
    pub scoring_mode: ScoringMode,
    pub eligibility: Option<EligibilityFilter>,
    pub seed_overflow: SeedOverflowPolicy,
}

#[derive(Default)]
pub struct SelectionConfigBuilder {
    target: Option<u64>,
    scoring_mode: Option<ScoringMode>,
    eligibility_pattern: Option<String>,
    eligibility_scope: Option<EligibilityScope>,
    seed_overflow: Option<SeedOverflowPolicy>,
}

impl SelectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, ligands: u64) -> Self {
        self.target = Some(ligands);
        self
    }
    pub fn scoring_mode(mut self, mode: ScoringMode) -> Self {
        self.scoring_mode = Some(mode);
        self
    }
    pub fn eligibility_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.eligibility_pattern = Some(pattern.into());
        self
    }
    pub fn eligibility_scope(mut self, scope: EligibilityScope) -> Self {
        self.eligibility_scope = Some(scope);
        self
    }
    pub fn seed_overflow(mut self, policy: SeedOverflowPolicy) -> Self {
        self.seed_overflow = Some(policy);
        self
    }

    pub fn build(self) -> Result<SelectionConfig, ConfigError> {
        let target = self.target.ok_or(ConfigError::MissingParameter("target"))?;
        if target == 0 {
            return Err(ConfigError::ZeroTarget);
        }
        let scoring_mode = self
            .scoring_mode
            .ok_or(ConfigError::MissingParameter("scoring_mode"))?;
        let eligibility = self
            .eligibility_pattern
            .map(|p| EligibilityFilter::new(&p, self.eligibility_scope.unwrap_or_default()))
            .transpose()?;

        Ok(SelectionConfig {
            target,
            scoring_mode,
            eligibility,
            seed_overflow: self.seed_overflow.unwrap_or_default(),
        })
    }
}
