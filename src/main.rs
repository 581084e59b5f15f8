use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use uuid::Uuid;

mod agent;
mod cli;
mod config;
mod errors;
mod export;
mod log;
mod plan;
mod prompt;
mod provider;
mod sanitize;
mod ux;
mod wire;
mod wizard;

use plan::{Category, GradeLevel};
use provider::{CompletionClient, DynClient};
use wizard::{Answers, Step, WizardState};

struct IdeaInput {
    idea: String,
    grade: GradeLevel,
    category: Category,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    log::init_tracing(args.debug);

    let mut cfg = config::Config::load(args.config.as_deref())?;
    if let Some(m) = &args.model { cfg.model = m.clone(); }
    if let Some(u) = &args.base_url { cfg.base_url = u.clone(); }
    if let Some(o) = &args.out { cfg.output_dir = o.clone(); }
    cfg.save_transcripts |= args.save_transcripts;

    // Missing API key is fatal before the wizard starts.
    let base = provider::make_client(&cfg)?;
    let session = Uuid::new_v4();
    let client: DynClient = if cfg.save_transcripts {
        let rec = log::RecordingClient::new(base, &cfg.transcript_dir, session);
        info!(dir = %rec.dir().display(), "saving transcripts");
        Box::new(rec)
    } else {
        base
    };
    info!(%session, model = %cfg.model, "session started");

    ux::banner();
    let mut state = WizardState::new();
    run_wizard(&mut state, client.as_ref(), &args, &cfg).await
}

async fn run_wizard(
    state: &mut WizardState,
    client: &dyn CompletionClient,
    args: &cli::Args,
    cfg: &config::Config,
) -> Result<()> {
    let mut last_idea: Option<IdeaInput> = None;
    let mut mentored = false;

    loop {
        ux::show_stepper(state);
        match state.step() {
            Step::Ideate => {
                let Some(input) = collect_idea(args, last_idea.as_ref()) else { return Ok(()) };
                let pb = ux::spinner("🤖 AI is generating your startup plan...");
                let res = state.submit_idea(client, &input.idea, input.grade, input.category).await;
                pb.finish_and_clear();
                last_idea = Some(input);
                match res {
                    Ok(_) => ux::success("Startup plan generated successfully!"),
                    Err(e) => {
                        ux::show_error("Error generating plan", &e);
                        if args.yes || !ux::confirm("Try again?", false) {
                            bail!(e);
                        }
                    }
                }
            }
            Step::Plan => {
                if let Some(p) = state.plan() {
                    ux::show_plan(p, state.category());
                }
                if !ux::confirm("Proceed to Mentorship?", args.yes) || !state.advance_to(Step::Mentor) {
                    return Ok(());
                }
            }
            Step::Mentor => {
                let Some(plan) = state.plan() else { return Ok(()) };
                let mut answers = Answers::default();
                for q in prompt::mentor_questions(plan) {
                    let prev = state.answers().get(&q).map(str::to_string);
                    let a = if args.yes { prev.unwrap_or_default() } else {
                        match ux::ask(&q, prev.as_deref()) {
                            Some(a) => a,
                            None => return Ok(()),
                        }
                    };
                    answers.insert(q, a);
                }
                if !ux::confirm("Proceed to Prototype?", args.yes) || !state.submit_answers(answers) {
                    return Ok(());
                }
            }
            Step::Prototype => {
                if !mentored {
                    let pb = ux::spinner("🧭 Your mentor is reviewing your answers...");
                    let res = state.mentorship(client).await;
                    pb.finish_and_clear();
                    match res {
                        Some(Ok(advice)) => ux::show_advice(&advice),
                        Some(Err(e)) => ux::show_error("Error generating mentorship advice", &e),
                        None => {}
                    }
                    mentored = true;
                }

                let pb = ux::spinner("🔨 Forging your prototype...");
                let res = state.prototype(client).await;
                pb.finish_and_clear();
                match res {
                    Some(Ok(html)) => {
                        if let Some(p) = state.plan() {
                            ux::show_prototype(&p.name, &html);
                            let plan_path = export::write_plan(&cfg.output_dir, p)?;
                            ux::success(&format!("Plan saved to {}", plan_path.display()));
                        }
                        let path = export::write_prototype(&cfg.output_dir, &html)?;
                        ux::success(&format!("📥 {} ({}) saved to {}", export::PROTOTYPE_FILE, export::PROTOTYPE_MIME, path.display()));
                    }
                    Some(Err(e)) => {
                        ux::show_error("Error generating prototype", &e);
                        if !args.yes && ux::confirm("Try again?", false) {
                            continue;
                        }
                        bail!(e);
                    }
                    None => {}
                }

                if args.yes || !ux::confirm("🔄 Start over?", false) {
                    return Ok(());
                }
                state.start_over();
                mentored = false;
            }
        }
    }
}

/// Step 1 inputs. CLI flags fill them on the first pass; later passes re-ask
/// with the previous answers as defaults. `None` means the user closed stdin.
fn collect_idea(args: &cli::Args, last: Option<&IdeaInput>) -> Option<IdeaInput> {
    if last.is_none() {
        if let (Some(idea), Some(grade), Some(category)) = (&args.idea, args.grade_level(), args.category) {
            if !idea.trim().is_empty() {
                return Some(IdeaInput { idea: idea.clone(), grade, category });
            }
        }
    }

    let default_idea = last.map(|l| l.idea.as_str()).or(args.idea.as_deref());
    let idea = loop {
        let s = ux::ask("Idea", default_idea)?;
        if !s.trim().is_empty() {
            break s;
        }
        println!("Describe your idea clearly.");
    };
    let grade = ux::ask_grade(last.map(|l| l.grade).or(args.grade_level()).unwrap_or_default())?;
    let category = ux::ask_category(last.map(|l| l.category).or(args.category).unwrap_or(Category::App))?;
    Some(IdeaInput { idea, grade, category })
}
