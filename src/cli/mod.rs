use clap::Parser;
use std::path::PathBuf;

use crate::plan::{Category, GradeLevel};

#[derive(Parser, Debug)]
#[command(name="startup-architect", version, about="Plan, mentor, and prototype a startup idea with an LLM")]
pub struct Args {
    /// TOML config file; defaults are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    /// Pre-fill the idea for step 1.
    #[arg(long)]
    pub idea: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(GradeLevel::MIN as i64..=GradeLevel::MAX as i64))]
    pub grade: Option<u8>,

    #[arg(long, value_enum)]
    pub category: Option<Category>,

    /// Directory for prototype.html and plan.json.
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub save_transcripts: bool,

    /// Confirm every step transition automatically.
    #[arg(long, short = 'y', default_value_t = false)]
    pub yes: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    pub fn grade_level(&self) -> Option<GradeLevel> {
        self.grade.and_then(GradeLevel::new)
    }
}
