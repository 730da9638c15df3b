use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^\w\s.,!?-]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Cleans text pulled out of an HTML page.
///
/// Drops everything except word characters, whitespace and `. , ! ? -`,
/// then collapses whitespace runs to a single space and trims the ends.
/// Removal happens first so that a dropped symbol between two spaces does
/// not leave a double space behind, which keeps the function idempotent.
pub fn clean_text(text: &str) -> String {
    let kept = DISALLOWED.replace_all(text, "");
    WHITESPACE.replace_all(&kept, " ").trim().to_string()
}
