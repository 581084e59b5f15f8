use crate::plan::{Category, GradeLevel, Plan};
use crate::wizard::Answers;

const PLAN_SCHEMA: &str = r#"{"name": string, "problem": string, "audience": string, "features": [string], "revenue": string, "roadmap": [string]}"#;

pub fn system_prompt_architect(grade: GradeLevel, category: Category) -> String {
    format!(
        "Generate a startup plan as a JSON object with the following schema: {PLAN_SCHEMA}. \
Use vocabulary and sentence length appropriate for grade {grade}. \
Category context: {category}. \
Make sure all fields are present and arrays contain multiple items."
    )
}

pub fn user_prompt_architect(idea: &str) -> String {
    format!("Idea: {idea}")
}

pub fn mentor_prompt(plan: &Plan, answers: &Answers) -> String {
    let answers_json = serde_json::to_string_pretty(answers).unwrap_or_else(|_| "{}".to_string());
    format!(
"Based on this startup plan and the student's answers, provide personalized mentorship advice:

Startup Plan:
Name: {name}
Problem: {problem}
Audience: {audience}
Features: {features}
Revenue: {revenue}
Roadmap: {roadmap}

Student Answers:
{answers_json}

Provide constructive feedback and next steps. Be encouraging but realistic.",
        name = plan.name,
        problem = plan.problem,
        audience = plan.audience,
        features = plan.features.join(", "),
        revenue = plan.revenue,
        roadmap = plan.roadmap.join(", "),
    )
}

/// Landing page request. Only the first three features are shown to the model.
pub fn forge_prompt(plan: &Plan) -> String {
    let key_features = plan.features.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    format!(r#"Create a complete, modern HTML landing page for a startup with these details:

Name: {name}
Problem: {problem}
Target Audience: {audience}
Key Features: {key_features}
Revenue Model: {revenue}

Requirements:
- Use Tailwind CSS via CDN
- Dark theme with modern design
- Include hero section, features section, and call-to-action
- Make it responsive and visually appealing
- Use semantic HTML5 tags
- Add smooth hover effects and transitions
- Include a navigation header

Return ONLY the complete HTML code (no explanations, no markdown fences)."#,
        name = plan.name,
        problem = plan.problem,
        audience = plan.audience,
        revenue = plan.revenue,
    )
}

/// Questions the student answers during the Mentor step, in display order.
pub fn mentor_questions(_plan: &Plan) -> Vec<String> {
    vec![
        "What makes this problem urgent for your audience?".to_string(),
        "Which feature delivers the earliest measurable value?".to_string(),
        "How will you test willingness to pay for the solution?".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Plan {
        Plan {
            name: "StudyBuddy".into(),
            problem: "Homework is lonely".into(),
            audience: "Middle schoolers".into(),
            features: vec!["chat".into(), "quizzes".into(), "streaks".into(), "badges".into()],
            revenue: "Freemium".into(),
            roadmap: vec!["MVP".into(), "Beta".into()],
        }
    }

    #[test]
    fn architect_prompt_carries_grade_and_category() {
        let p = system_prompt_architect(GradeLevel::new(7).unwrap(), Category::AiTool);
        assert!(p.contains("appropriate for grade 7"));
        assert!(p.contains("Category context: AI Tool."));
        for field in ["\"name\"", "\"problem\"", "\"audience\"", "\"features\"", "\"revenue\"", "\"roadmap\""] {
            assert!(p.contains(field), "schema missing {field}");
        }
    }

    #[test]
    fn idea_is_embedded_verbatim() {
        assert_eq!(user_prompt_architect("A \"quoted\" idea\nwith lines"), "Idea: A \"quoted\" idea\nwith lines");
    }

    #[test]
    fn forge_prompt_uses_first_three_features_only() {
        let p = forge_prompt(&plan());
        assert!(p.contains("Key Features: chat, quizzes, streaks\n"));
        assert!(!p.contains("badges"));
        assert!(!p.contains("MVP"));
        assert!(p.contains("Tailwind CSS via CDN"));
    }

    #[test]
    fn mentor_prompt_lists_answers_in_question_order() {
        let mut answers = Answers::default();
        answers.insert("Zebra question?", "z");
        answers.insert("Apple question?", "a");
        let p = mentor_prompt(&plan(), &answers);
        assert!(p.contains("Features: chat, quizzes, streaks, badges"));
        assert!(p.contains("Roadmap: MVP, Beta"));
        let zebra = p.find("Zebra question?").unwrap();
        let apple = p.find("Apple question?").unwrap();
        assert!(zebra < apple);
    }

    #[test]
    fn three_mentor_questions() {
        assert_eq!(mentor_questions(&plan()).len(), 3);
    }
}
