pub struct DefaultsConfig {
    pub scoring_mode: String,
    pub eligibility_scope: String,
    pub seed_overflow: String,
    pub todo_file: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            scoring_mode: "dimension_averaging".to_string(),
            eligibility_scope: "tranche".to_string(),
            seed_overflow: "trim".to_string(),
            todo_file: "todo.all".to_string(),
        }
    }
}
