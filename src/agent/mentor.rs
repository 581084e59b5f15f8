use tracing::{info, warn};

use crate::errors::MentorshipGenerationError;
use crate::plan::Plan;
use crate::prompt;
use crate::provider::CompletionClient;
use crate::sanitize::sanitize;
use crate::wizard::Answers;

use super::CREATIVE_TEMPERATURE;

/// Free-form advice on a plan and the student's answers. The reply is prose, never parsed.
pub async fn generate_mentorship(
    client: &dyn CompletionClient,
    plan: &Plan,
    answers: &Answers,
) -> Result<String, MentorshipGenerationError> {
    if answers.is_empty() {
        warn!("no mentor answers recorded; advising on the plan alone");
    }
    let user = prompt::mentor_prompt(plan, answers);
    let raw = client.complete(None, &user, CREATIVE_TEMPERATURE).await?;
    let advice = sanitize(&raw);
    info!(chars = advice.len(), answers = answers.len(), "mentorship advice generated");
    Ok(advice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CompletionError;
    use crate::provider::testing::ScriptedClient;

    fn plan() -> Plan {
        Plan {
            name: "Lemon".into(),
            problem: "Thirst".into(),
            audience: "Neighbors".into(),
            features: vec!["cold".into(), "cheap".into()],
            revenue: "Per cup".into(),
            roadmap: vec!["Summer".into()],
        }
    }

    #[tokio::test]
    async fn advice_is_sanitized_prose() {
        let client = ScriptedClient::replying("<think>hmm</think>\n  Great start! <b>Test</b> pricing first.  ");
        let answers: Answers = [("How will you test willingness to pay?", "Sell ten cups")].into_iter().collect();

        let advice = generate_mentorship(&client, &plan(), &answers).await.unwrap();
        assert_eq!(advice, "Great start! Test pricing first.");

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].system.is_none());
        assert!((calls[0].temperature - 0.7).abs() < f32::EPSILON);
        assert!(calls[0].user.contains("\"How will you test willingness to pay?\": \"Sell ten cups\""));
        assert!(calls[0].user.contains("Name: Lemon"));
    }

    #[tokio::test]
    async fn upstream_failure_is_wrapped() {
        let client = ScriptedClient::failing(CompletionError::EmptyResponse);
        let err = generate_mentorship(&client, &plan(), &Answers::default()).await.unwrap_err();
        assert!(matches!(err, MentorshipGenerationError(CompletionError::EmptyResponse)));
    }
}
