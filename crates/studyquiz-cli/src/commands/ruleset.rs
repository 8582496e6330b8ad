//! The `studyquiz ruleset` commands.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyquiz_core::model::{BloomLevel, GradingStyle, Hardness, Ruleset};
use studyquiz_core::pages::RulesetForm;
use studyquiz_core::QuizApi;

use super::{command_for, connect, page_failure};

/// Flags of `studyquiz ruleset create`.
pub struct CreateArgs {
    pub name: String,
    pub hardness: Hardness,
    pub questions: u32,
    pub time_limit: Option<u32>,
    pub grading_style: GradingStyle,
    pub bloom: Vec<BloomLevel>,
}

impl CreateArgs {
    fn into_form(self) -> RulesetForm {
        let mut form = RulesetForm::new();
        form.name = self.name;
        form.hardness = self.hardness;
        form.num_questions = self.questions;
        form.timed = self.time_limit.is_some();
        form.time_limit = self.time_limit;
        form.grading_style = self.grading_style;
        if !self.bloom.is_empty() {
            form.set_bloom_levels(self.bloom);
        }
        form
    }
}

pub async fn create(config: Option<&Path>, args: CreateArgs) -> Result<()> {
    let mut form = args.into_form();
    if let Err(message) = form.build_config() {
        anyhow::bail!("{message}");
    }

    let api = connect(config)?;
    let Some(route) = form.submit(&api).await else {
        return Err(page_failure(form.error(), "Failed to create ruleset"));
    };

    println!("Created ruleset \"{}\".", form.name.trim());
    println!("Next: {}", command_for(&route));
    Ok(())
}

pub async fn list(config: Option<&Path>) -> Result<()> {
    let api = connect(config)?;
    let rulesets = api.list_rulesets().await?;

    if rulesets.is_empty() {
        println!("No rulesets yet. Run: studyquiz ruleset create --name <name>");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Name",
        "Difficulty",
        "Questions",
        "Time limit",
        "Grading",
    ]);
    for ruleset in &rulesets {
        table.add_row(vec![
            Cell::new(&ruleset.id),
            Cell::new(&ruleset.name),
            Cell::new(ruleset.config.hardness),
            Cell::new(ruleset.config.num_questions),
            Cell::new(time_limit_label(ruleset)),
            Cell::new(ruleset.config.grading_style),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(config: Option<&Path>, ruleset_id: &str) -> Result<()> {
    let api = connect(config)?;
    let ruleset = api.get_ruleset(ruleset_id).await?;

    let levels: Vec<String> = ruleset
        .config
        .bloom_levels
        .iter()
        .map(ToString::to_string)
        .collect();

    println!("{} ({})", ruleset.name, ruleset.id);
    println!("  Difficulty:   {}", ruleset.config.hardness);
    println!("  Questions:    {}", ruleset.config.num_questions);
    println!("  Time limit:   {}", time_limit_label(&ruleset));
    println!("  Grading:      {}", ruleset.config.grading_style);
    println!("  Bloom levels: {}", levels.join(", "));
    Ok(())
}

fn time_limit_label(ruleset: &Ruleset) -> String {
    match ruleset.config.time_limit {
        Some(minutes) => format!("{minutes} min"),
        None => "untimed".to_string(),
    }
}
