use tracing::info;

use crate::errors::PrototypeGenerationError;
use crate::plan::Plan;
use crate::prompt;
use crate::provider::CompletionClient;
use crate::sanitize::{strip_code_fences, strip_reasoning};

use super::CREATIVE_TEMPERATURE;

/// Generate a landing page for the plan.
///
/// Only reasoning spans and surrounding code fences are removed; the HTML
/// itself is passed through unvalidated.
pub async fn generate_prototype(
    client: &dyn CompletionClient,
    plan: &Plan,
) -> Result<String, PrototypeGenerationError> {
    let user = prompt::forge_prompt(plan);
    let raw = client.complete(None, &user, CREATIVE_TEMPERATURE).await?;
    let html = strip_code_fences(&strip_reasoning(&raw));
    info!(bytes = html.len(), "prototype generated");
    Ok(html)
}
