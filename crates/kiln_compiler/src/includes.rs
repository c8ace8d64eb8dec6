//! Scraping include notes from Slang's diagnostic stream.
//!
//! With `-output-includes`, Slang prints one note per included file:
//!
//! ```text
//! (0): note: include 'C:/engine/shaders/shared/lights.slang'
//! ```
//!
//! Lines that do not start with the note prefix, or whose path is not
//! quoted, are ignored.

use kiln_cache::DependencyManifest;

/// Prefix of an include note.
pub const INCLUDE_NOTE_PREFIX: &str = "(0): note: include";

/// Extracts the included path from one diagnostic line.
pub fn parse_include_line(line: &str) -> Option<&str> {
    let quoted = line.strip_prefix(INCLUDE_NOTE_PREFIX)?.trim();
    let quote = quoted.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let path = quoted[1..].strip_suffix(quote)?;
    (!path.is_empty()).then_some(path)
}

/// Collects every included path in `diagnostics` into a manifest.
pub fn scrape_includes(diagnostics: &str) -> DependencyManifest {
    diagnostics.lines().filter_map(parse_include_line).collect()
}
