use regex::Regex;
use std::sync::LazyLock;

static REASONING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("static regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static regex"));
static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*```[A-Za-z]*[ \t]*\r?\n?").expect("static regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?[ \t]*```\s*\z").expect("static regex"));

/// Clean a raw model reply into plain text.
///
/// Drops every `<think>...</think>` span (each opener pairs with the nearest
/// following closer), then any remaining tag-like `<...>` substring, then
/// trims. Idempotent.
pub fn sanitize(raw: &str) -> String {
    let no_reasoning = REASONING.replace_all(raw, "");
    TAG.replace_all(&no_reasoning, "").trim().to_string()
}

/// Drop reasoning spans only, keeping all other markup intact.
pub fn strip_reasoning(raw: &str) -> String {
    REASONING.replace_all(raw, "").trim().to_string()
}

/// Remove the first ```` ```lang ```` fence that opens a line and a trailing
/// ```` ``` ```` fence, if present. Text before the opening fence is kept.
pub fn strip_code_fences(text: &str) -> String {
    let s = OPENING_FENCE.replace(text, "");
    TRAILING_FENCE.replace(&s, "").trim().to_string()
}
