//! Collection of commit guidance from well-known repository files.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::extract::extract_commit_section;

/// Contributing guide, scanned for a commit message section.
pub const CONTRIBUTING_FILE: &str = "CONTRIBUTING.md";

/// Assistant instruction files, in priority order. Only the first one found is used.
pub const INSTRUCTIONS_FILES: [&str; 3] = [
    ".github/copilot-instructions.md",
    ".copilot-instructions.md",
    "copilot-instructions.md",
];

/// Commit message template (as used by `commit.template`).
pub const TEMPLATE_FILE: &str = ".gitmessage";

pub const CONTRIBUTING_LABEL: &str = "Repository Contributing Guidelines:";
pub const TEMPLATE_LABEL: &str = "Repository Commit Template:";

/// Gather commit guidance from the repository rooted at `root`.
///
/// Reads `CONTRIBUTING.md` (commit section only), the first assistant
/// instructions file, and `.gitmessage`. Missing or unreadable files are
/// skipped. Returns an empty string when nothing was found.
pub fn collect_guidelines(root: &Path) -> String {
    let mut guidelines = String::new();

    if let Some(content) = read_optional(root, CONTRIBUTING_FILE) {
        let section = extract_commit_section(&content);
        if section.is_empty() {
            debug!("{} has no commit message section", CONTRIBUTING_FILE);
        } else {
            push_block(&mut guidelines, Some(CONTRIBUTING_LABEL), &section);
        }
    }

    if let Some(content) = INSTRUCTIONS_FILES
        .iter()
        .find_map(|name| read_optional(root, name))
    {
        push_block(&mut guidelines, None, &content);
    }

    if let Some(content) = read_optional(root, TEMPLATE_FILE) {
        push_block(&mut guidelines, Some(TEMPLATE_LABEL), &content);
    }

    guidelines.truncate(guidelines.trim_end().len());
    guidelines
}

fn push_block(out: &mut String, label: Option<&str>, content: &str) {
    if content.trim().is_empty() {
        return;
    }
    if let Some(label) = label {
        out.push_str(label);
        out.push('\n');
    }
    out.push_str(content);
    out.push_str("\n\n");
}

fn read_optional(root: &Path, name: &str) -> Option<String> {
    let path = root.join(name);
    match fs::read_to_string(&path) {
        Ok(content) => {
            debug!("Using commit guidance from {}", path.display());
            Some(content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            debug!("Skipping unreadable {}: {}", path.display(), e);
            None
        }
    }
}
