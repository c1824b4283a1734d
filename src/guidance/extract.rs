//! Extraction of the commit-message section from a contributing guide.

/// Stop collecting once the captured section grows past this many characters.
pub const MAX_SECTION_CHARS: usize = 1500;

/// Extract the commit message conventions section from markdown text.
///
/// The section starts at the first heading whose text mentions "commit"
/// together with "message" or "format", and runs until the next heading of
/// the same or a shallower level (or end of document). Returns an empty
/// string when no such heading exists.
pub fn extract_commit_section(content: &str) -> String {
    let mut section = String::new();
    let mut section_chars = 0;
    let mut section_level: Option<usize> = None;

    for line in content.lines() {
        let level = heading_level(line);

        match (section_level, level) {
            (None, Some(level)) if is_commit_heading(line) => {
                section_level = Some(level);
            }
            (None, _) => continue,
            (Some(current), Some(level)) if level <= current => break,
            (Some(_), _) => {}
        }

        section.push_str(line);
        section.push('\n');
        section_chars += line.chars().count() + 1;

        if section_chars > MAX_SECTION_CHARS {
            break;
        }
    }

    section.trim().to_string()
}

/// Markdown heading level: the number of `#` in the line's first word.
fn heading_level(line: &str) -> Option<usize> {
    if !line.starts_with('#') {
        return None;
    }
    let marker = line.split(' ').next().unwrap_or_default();
    Some(marker.chars().filter(|c| *c == '#').count())
}

fn is_commit_heading(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("commit") && (lower.contains("message") || lower.contains("format"))
}
