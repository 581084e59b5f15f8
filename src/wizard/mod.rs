use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use tracing::debug;

use crate::agent;
use crate::errors::{MentorshipGenerationError, PlanGenerationError, PrototypeGenerationError};
use crate::plan::{Category, GradeLevel, Plan};
use crate::provider::CompletionClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Step {
    #[default]
    Ideate,
    Plan,
    Mentor,
    Prototype,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Ideate, Step::Plan, Step::Mentor, Step::Prototype];

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Ideate => Some(Step::Plan),
            Step::Plan => Some(Step::Mentor),
            Step::Mentor => Some(Step::Prototype),
            Step::Prototype => None,
        }
    }

    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn requires_plan(self) -> bool {
        self != Step::Ideate
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Ideate => "Ideate",
            Step::Plan => "Plan",
            Step::Mentor => "Mentor",
            Step::Prototype => "Prototype",
        })
    }
}

/// Question to answer mapping that keeps question order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    entries: Vec<(String, String)>,
}

impl Answers {
    /// Insert or replace in place; a new question goes last.
    pub fn insert(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        let question = question.into();
        let answer = answer.into();
        match self.entries.iter_mut().find(|(q, _)| *q == question) {
            Some((_, a)) => *a = answer,
            None => self.entries.push((question, answer)),
        }
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.entries.iter().find(|(q, _)| q == question).map(|(_, a)| a.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(q, a)| (q.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<Q: Into<String>, A: Into<String>> FromIterator<(Q, A)> for Answers {
    fn from_iter<I: IntoIterator<Item = (Q, A)>>(iter: I) -> Self {
        let mut out = Answers::default();
        for (q, a) in iter {
            out.insert(q, a);
        }
        out
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (q, a) in self.iter() {
            map.serialize_entry(q, a)?;
        }
        map.end()
    }
}

/// One session's progress through Ideate → Plan → Mentor → Prototype.
///
/// Transitions only move forward one step at a time. Any step past Ideate
/// needs a plan; a transition that would break that is refused and leaves
/// the state untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    step: Step,
    plan: Option<Plan>,
    answers: Answers,
    category: Option<Category>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Progress bar value for the current step.
    pub fn progress(&self) -> u8 {
        match self.step {
            Step::Ideate => 25,
            Step::Plan => 50,
            Step::Mentor => 75,
            Step::Prototype => 100,
        }
    }

    /// Move to `target` if it is the immediate successor and its guard holds.
    pub fn advance_to(&mut self, target: Step) -> bool {
        let allowed = self.step.next() == Some(target) && (!target.requires_plan() || self.plan.is_some());
        if allowed {
            debug!(from = %self.step, to = %target, "wizard transition");
            self.step = target;
        } else {
            debug!(from = %self.step, to = %target, has_plan = self.plan.is_some(), "wizard transition refused");
        }
        allowed
    }

    /// Ideate only: generate a plan and move to the Plan step.
    ///
    /// Returns `Ok(false)` without calling the model when not at Ideate.
    /// On error nothing is stored, so the same step can be resubmitted.
    pub async fn submit_idea(
        &mut self,
        client: &dyn CompletionClient,
        idea: &str,
        grade: GradeLevel,
        category: Category,
    ) -> Result<bool, PlanGenerationError> {
        if self.step != Step::Ideate {
            return Ok(false);
        }
        let plan = agent::architect::generate_plan(client, idea, grade, category).await?;
        self.plan = Some(plan);
        self.category = Some(category);
        Ok(self.advance_to(Step::Plan))
    }

    /// Mentor only: record answers and move to the Prototype step.
    pub fn submit_answers(&mut self, answers: Answers) -> bool {
        if self.step != Step::Mentor || self.plan.is_none() {
            return false;
        }
        self.answers = answers;
        self.advance_to(Step::Prototype)
    }

    /// Advice on the stored plan and answers; `None` before the Prototype step.
    pub async fn mentorship(
        &self,
        client: &dyn CompletionClient,
    ) -> Option<Result<String, MentorshipGenerationError>> {
        let plan = self.plan.as_ref().filter(|_| self.step == Step::Prototype)?;
        Some(agent::mentor::generate_mentorship(client, plan, &self.answers).await)
    }

    /// Landing page for the stored plan; `None` before the Prototype step.
    pub async fn prototype(
        &self,
        client: &dyn CompletionClient,
    ) -> Option<Result<String, PrototypeGenerationError>> {
        let plan = self.plan.as_ref().filter(|_| self.step == Step::Prototype)?;
        Some(agent::forge::generate_prototype(client, plan).await)
    }

    pub fn start_over(&mut self) {
        debug!(from = %self.step, "wizard reset");
        *self = Self::default();
    }
}
