use anyhow::Result;
use fs_err as fs;
use std::path::{Path, PathBuf};

use crate::plan::Plan;

pub const PROTOTYPE_FILE: &str = "prototype.html";
pub const PROTOTYPE_MIME: &str = "text/html";
pub const PLAN_FILE: &str = "plan.json";

/// Write the generator output byte-for-byte as `prototype.html`.
pub fn write_prototype(dir: &Path, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(PROTOTYPE_FILE);
    fs::write(&path, html)?;
    Ok(path)
}

/// Write the plan in its wire shape as pretty JSON.
pub fn write_plan(dir: &Path, plan: &Plan) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(PLAN_FILE);
    fs::write(&path, serde_json::to_string_pretty(plan)?)?;
    Ok(path)
}
