use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::plan::{Category, GradeLevel, Plan};
use crate::wizard::{Step, WizardState};

pub fn banner() {
    println!("\n{}", "🚀 Startup Architect".bold());
    println!("{}", "Plan, mentor, and prototype your idea.".dimmed());
}

pub fn stepper(state: &WizardState) -> String {
    let steps = Step::ALL
        .iter()
        .map(|s| {
            let label = format!("{} • {}", s.number(), s);
            if *s == state.step() {
                format!("[{}]", label).magenta().bold().to_string()
            } else {
                format!(" {} ", label).dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let filled = usize::from(state.progress()) / 5;
    format!("{}{} {:>3}%\n{}", "█".repeat(filled), "░".repeat(20 - filled), state.progress(), steps)
}

pub fn show_stepper(state: &WizardState) {
    println!("\n{}\n", stepper(state));
}

pub fn plan_card(plan: &Plan, category: Option<Category>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", plan.name.bold()));
    if let Some(c) = category {
        out.push_str(&format!("{} {}\n", "[Category]".magenta().bold(), c));
    }
    out.push_str(&format!("{} {}\n", "[Audience]".cyan().bold(), plan.audience));
    out.push_str(&format!("{} {}\n", "[Revenue]".cyan().bold(), plan.revenue));
    out.push_str(&format!("{} {}\n", "[Problem]".green().bold(), plan.problem));
    out.push_str(&format!("\n{}\n", "Features".bold()));
    for f in &plan.features {
        out.push_str(&format!("  • {}\n", f));
    }
    out.push_str(&format!("\n{}\n", "Roadmap".bold()));
    for (i, r) in plan.roadmap.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, r));
    }
    out
}

pub fn show_plan(plan: &Plan, category: Option<Category>) {
    println!("{}", plan_card(plan, category));
}

pub fn show_advice(advice: &str) {
    println!("\n{}\n{}\n", "Mentor says".yellow().bold(), advice);
}

pub fn show_prototype(name: &str, html: &str) {
    println!("\n{}", format!("🚀 {} Landing Page", name).bold());
    println!("{}", html.dimmed());
}

pub fn show_error(context: &str, err: &dyn std::error::Error) {
    eprintln!("{} {}: {}", "❌".red(), context.red().bold(), err);
}

pub fn success(msg: &str) {
    println!("{} {}", "✅".green(), msg);
}

/// Spinner shown while a generator waits on the model.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn confirm(prompt: &str, auto: bool) -> bool {
    if auto {
        println!("{} [y/N]: y (auto)", prompt);
        return true;
    }
    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();
    match read_line(&mut io::stdin().lock()) {
        Some(s) => is_yes(&s),
        None => false,
    }
}

/// Prompt for one line of text. Returns `None` on EOF.
pub fn ask(label: &str, default: Option<&str>) -> Option<String> {
    match default {
        Some(d) => print!("{} [{}]: ", label.bold(), d),
        None => print!("{}: ", label.bold()),
    }
    let _ = io::stdout().flush();
    let line = read_line(&mut io::stdin().lock())?;
    let line = line.trim();
    match (line.is_empty(), default) {
        (true, Some(d)) => Some(d.to_string()),
        _ => Some(line.to_string()),
    }
}

pub fn ask_grade(default: GradeLevel) -> Option<GradeLevel> {
    loop {
        let raw = ask(&format!("Grade ({}-{})", GradeLevel::MIN, GradeLevel::MAX), Some(&default.to_string()))?;
        match parse_grade(&raw) {
            Some(g) => return Some(g),
            None => println!("{}", "Please enter a whole number from 6 to 12.".yellow()),
        }
    }
}

pub fn ask_category(default: Category) -> Option<Category> {
    for (i, c) in Category::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, c);
    }
    let default_choice = Category::ALL.iter().position(|c| *c == default).unwrap_or(0) + 1;
    loop {
        let raw = ask("Category", Some(&default_choice.to_string()))?;
        match parse_category(&raw) {
            Some(c) => return Some(c),
            None => println!("{}", "Pick 1, 2 or 3 (or type the name).".yellow()),
        }
    }
}

fn read_line(input: &mut impl BufRead) -> Option<String> {
    let mut s = String::new();
    match input.read_line(&mut s) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(s),
    }
}

fn is_yes(s: &str) -> bool {
    let ans = s.trim().to_lowercase();
    ans == "y" || ans == "yes"
}

fn parse_grade(raw: &str) -> Option<GradeLevel> {
    raw.trim().parse::<u8>().ok().and_then(GradeLevel::new)
}

fn parse_category(raw: &str) -> Option<Category> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Category::ALL.get(i).copied());
    }
    Category::ALL.iter().copied().find(|c| c.label().eq_ignore_ascii_case(raw))
}
