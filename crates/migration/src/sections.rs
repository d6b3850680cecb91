use crate::error::Section;
use regex::Regex;
use std::sync::OnceLock;

fn up_pattern() -> &'static Regex {
    static UP: OnceLock<Regex> = OnceLock::new();
    UP.get_or_init(|| compile(r"(?is)--\s*up:begin(.*?)--\s*up:end"))
}

fn down_pattern() -> &'static Regex {
    static DOWN: OnceLock<Regex> = OnceLock::new();
    DOWN.get_or_init(|| compile(r"(?is)--\s*down:begin(.*?)--\s*down:end"))
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("section pattern is a valid regex")
}

/// Body between the `-- <section>:begin` and the first following `-- <section>:end` marker.
pub fn extract_section(content: &str, section: Section) -> Option<&str> {
    let pattern = match section {
        Section::Up => up_pattern(),
        Section::Down => down_pattern(),
    };

    pattern
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
