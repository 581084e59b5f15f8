use serde_json::Value;
use tracing::{info, warn};

use crate::errors::PlanGenerationError;
use crate::plan::{Category, GradeLevel, Plan};
use crate::prompt;
use crate::provider::CompletionClient;
use crate::sanitize::sanitize;

use super::ARCHITECT_TEMPERATURE;

pub async fn generate_plan(
    client: &dyn CompletionClient,
    idea: &str,
    grade: GradeLevel,
    category: Category,
) -> Result<Plan, PlanGenerationError> {
    let system = prompt::system_prompt_architect(grade, category);
    let user = prompt::user_prompt_architect(idea);

    let raw = client.complete(Some(&system), &user, ARCHITECT_TEMPERATURE).await?;
    let plan = plan_from_reply(&raw)?;
    info!(name = %plan.name, features = plan.features.len(), "startup plan generated");
    Ok(plan)
}

/// Sanitize a raw reply, find the JSON object in it, and validate it into a Plan.
pub fn plan_from_reply(raw: &str) -> Result<Plan, PlanGenerationError> {
    let clean = sanitize(raw);
    let value = decode_json(&clean).ok_or(PlanGenerationError::NoJsonFound)?;
    Ok(Plan::from_value(&value)?)
}

/// Strict parse first; otherwise the first balanced `{...}` span that parses as an object.
fn decode_json(text: &str) -> Option<Value> {
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return Some(v);
    }
    warn!("reply is not bare JSON; scanning for an embedded object");
    text.match_indices('{')
        .filter_map(|(start, _)| balanced_object_end(text, start).map(|end| &text[start..=end]))
        .find_map(|span| serde_json::from_str::<Value>(span).ok().filter(Value::is_object))
}

/// Byte index of the `}` closing the object that opens at `start`.
/// Braces inside JSON string literals are not counted.
fn balanced_object_end(s: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate().skip(start) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
