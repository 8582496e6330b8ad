//! Ruleset creation form.

use crate::model::{BloomLevel, GradingStyle, Hardness, QuestionType, RulesetConfig};
use crate::traits::QuizApi;

use super::{error_text, Route};

pub const NAME_REQUIRED: &str = "Ruleset name is required";

/// Bounds of the question-count field.
pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 50;

/// Form fields for a new ruleset, with the same defaults the service expects.
#[derive(Debug, Clone)]
pub struct RulesetForm {
    pub name: String,
    pub hardness: Hardness,
    pub num_questions: u32,
    pub timed: bool,
    /// Minutes, only used when `timed` is set.
    pub time_limit: Option<u32>,
    pub grading_style: GradingStyle,
    bloom_levels: Vec<BloomLevel>,
    submitting: bool,
    error: Option<String>,
}

impl Default for RulesetForm {
    fn default() -> Self {
        let defaults = RulesetConfig::default();
        Self {
            name: String::new(),
            hardness: defaults.hardness,
            num_questions: u32::try_from(defaults.num_questions).unwrap_or(MIN_QUESTIONS),
            timed: false,
            time_limit: None,
            grading_style: defaults.grading_style,
            bloom_levels: defaults.bloom_levels,
            submitting: false,
            error: None,
        }
    }
}

impl RulesetForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bloom_levels(&self) -> &[BloomLevel] {
        &self.bloom_levels
    }

    /// Check or uncheck a Bloom level.
    pub fn toggle_bloom_level(&mut self, level: BloomLevel) {
        if let Some(pos) = self.bloom_levels.iter().position(|l| *l == level) {
            self.bloom_levels.remove(pos);
        } else {
            self.bloom_levels.push(level);
        }
    }

    /// Replace the Bloom selection, dropping duplicates.
    pub fn set_bloom_levels(&mut self, levels: impl IntoIterator<Item = BloomLevel>) {
        self.bloom_levels.clear();
        for level in levels {
            if !self.bloom_levels.contains(&level) {
                self.bloom_levels.push(level);
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Package the fields into the configuration object, or explain what is
    /// missing.
    pub fn build_config(&self) -> Result<RulesetConfig, String> {
        if self.name.trim().is_empty() {
            return Err(NAME_REQUIRED.to_string());
        }
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.num_questions) {
            return Err(format!(
                "Number of questions must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}"
            ));
        }
        let time_limit = if self.timed {
            match self.time_limit {
                Some(minutes) if minutes > 0 => Some(i64::from(minutes)),
                _ => return Err("Timed quizzes need a time limit in minutes".to_string()),
            }
        } else {
            None
        };

        Ok(RulesetConfig {
            hardness: self.hardness,
            num_questions: i64::from(self.num_questions),
            time_limit,
            grading_style: self.grading_style,
            bloom_levels: self.bloom_levels.clone(),
            question_types: vec![QuestionType::Mcq],
        })
    }

    pub async fn submit(&mut self, api: &dyn QuizApi) -> Option<Route> {
        let config = match self.build_config() {
            Ok(config) => config,
            Err(message) => {
                self.error = Some(message);
                return None;
            }
        };

        self.submitting = true;
        self.error = None;
        let outcome = api.create_ruleset(self.name.trim(), &config).await;
        self.submitting = false;

        match outcome {
            Ok(ruleset) => {
                tracing::info!(ruleset_id = %ruleset.id, name = %ruleset.name, "ruleset created");
                Some(Route::Dashboard)
            }
            Err(e) => {
                self.error = Some(error_text(&e, "Failed to create ruleset"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_defaults() {
        let form = RulesetForm::new();
        assert_eq!(form.hardness, Hardness::Medium);
        assert_eq!(form.num_questions, 10);
        assert!(!form.timed);
        assert_eq!(form.grading_style, GradingStyle::EndOnly);
        assert_eq!(
            form.bloom_levels(),
            &[BloomLevel::Remember, BloomLevel::Understand]
        );
    }

    #[test]
    fn blank_name_is_refused() {
        let mut form = RulesetForm::new();
        form.name = "   ".into();
        assert_eq!(form.build_config().unwrap_err(), NAME_REQUIRED);
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut form = RulesetForm::new();
        form.toggle_bloom_level(BloomLevel::Remember);
        form.toggle_bloom_level(BloomLevel::Create);
        assert_eq!(
            form.bloom_levels(),
            &[BloomLevel::Understand, BloomLevel::Create]
        );
    }

    #[test]
    fn untimed_config_has_no_limit() {
        let mut form = RulesetForm::new();
        form.name = "Chapter 1".into();
        form.time_limit = Some(15);
        let config = form.build_config().unwrap();
        assert_eq!(config.time_limit, None);
        assert_eq!(config.question_types, vec![QuestionType::Mcq]);
    }

    #[test]
    fn timed_config_needs_positive_limit() {
        let mut form = RulesetForm::new();
        form.name = "Midterm".into();
        form.timed = true;
        assert!(form.build_config().is_err());
        form.time_limit = Some(0);
        assert!(form.build_config().is_err());
        form.time_limit = Some(30);
        assert_eq!(form.build_config().unwrap().time_limit, Some(30));
    }

    #[test]
    fn question_count_bounds() {
        let mut form = RulesetForm::new();
        form.name = "Bounds".into();
        form.num_questions = 0;
        assert!(form.build_config().is_err());
        form.num_questions = 51;
        assert!(form.build_config().is_err());
        form.num_questions = 50;
        assert!(form.build_config().is_ok());
    }
}
