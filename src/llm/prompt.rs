//! Prompt construction for commit message generation.

/// Build the prompt for a staged diff with no repository guidance.
pub fn build_prompt(diff: &str) -> String {
    build_prompt_with_guidance(diff, "")
}

/// Build the prompt for a staged diff, adding repository guidance when present.
///
/// Empty guidance produces exactly the same prompt as [`build_prompt`]; any
/// other guidance is embedded verbatim.
pub fn build_prompt_with_guidance(diff: &str, guidance: &str) -> String {
    let guidance_section = if guidance.is_empty() {
        String::new()
    } else {
        format!(
            r#"5. Follows the repository-specific commit guidelines below; where they conflict with the rules above, the repository guidelines take precedence

Repository-specific guidelines:
{guidance}
"#
        )
    };

    format!(
        r#"You are a helpful assistant that generates clear, concise git commit messages following conventional commit format.

Based on the following git diff, generate a commit message that:
1. Uses conventional commit format (e.g., "feat:", "fix:", "docs:", "refactor:", etc.)
2. Has a clear, concise subject line (max 50 characters)
3. Optionally includes a body with more details if the change is complex
4. Focuses on WHAT changed and WHY, not HOW
{guidance_section}
Git diff:
{diff}

Generate only the commit message, without any additional explanation, commentary, or markdown code fences."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DIFF: &str = "diff --git a/a.txt b/a.txt\n+hello";

    #[test]
    fn test_empty_guidance_matches_plain_prompt() {
        for diff in ["", SAMPLE_DIFF, "  \n"] {
            assert_eq!(build_prompt_with_guidance(diff, ""), build_prompt(diff));
        }
    }

    #[test]
    fn test_whitespace_guidance_is_still_embedded() {
        let prompt = build_prompt_with_guidance(SAMPLE_DIFF, "\t");
        assert!(prompt.contains("Repository-specific guidelines:\n\t\n"));
        assert_ne!(prompt, build_prompt(SAMPLE_DIFF));
    }

    #[test]
    fn test_prompt_includes_diff_and_conventional_format() {
        let prompt = build_prompt(SAMPLE_DIFF);
        assert!(prompt.contains(SAMPLE_DIFF));
        assert!(prompt.contains("conventional commit format"));
        assert!(prompt.contains("max 50 characters"));
        assert!(!prompt.contains("Repository Contributing Guidelines"));
        assert!(!prompt.contains("Repository Commit Template"));
        assert!(!prompt.contains("Repository-specific guidelines"));
    }

    #[test]
    fn test_prompt_forbids_commentary_and_fences() {
        let prompt = build_prompt(SAMPLE_DIFF);
        assert!(prompt.contains("Generate only the commit message"));
        assert!(prompt.contains("markdown code fences"));
    }

    #[test]
    fn test_guidance_is_embedded_verbatim() {
        let guidance = "Repository Commit Template:\n[JIRA-123] type: subject";
        let prompt = build_prompt_with_guidance(SAMPLE_DIFF, guidance);
        assert!(prompt.contains(SAMPLE_DIFF));
        assert!(prompt.contains(guidance));
        assert!(prompt.contains("repository-specific commit guidelines"));
    }

    #[test]
    fn test_guidance_precedes_diff() {
        let prompt = build_prompt_with_guidance(SAMPLE_DIFF, "Use gitmoji.");
        let guidance_pos = prompt.find("Use gitmoji.").unwrap();
        let diff_pos = prompt.find(SAMPLE_DIFF).unwrap();
        assert!(guidance_pos < diff_pos);
    }
}
