//! Interactive configuration wizard for `git-auto-commit configure`.

use dialoguer::{Input, Password, Select};

use crate::config::provider::{
    AzureSettings, ClaudeSettings, DEFAULT_CLAUDE_MODEL, DEFAULT_GITHUB_MODEL,
    DEFAULT_OPENAI_MODEL, GitHubSettings, OpenAiSettings, ProviderKind, ProviderSettings,
};
use crate::error::ConfigError;

/// Source of answers for the configuration wizard.
///
/// The terminal implementation uses dialoguer; tests supply scripted answers.
pub trait Prompter {
    /// Pick one of `items`, returning its index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize, ConfigError>;

    /// Read a line of free text. `default` is used when the answer is empty.
    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, ConfigError>;

    /// Read a secret without echoing it.
    fn secret(&mut self, prompt: &str) -> Result<String, ConfigError>;
}

/// Prompter backed by the terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize, ConfigError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(ConfigError::PromptFailed)
    }

    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, ConfigError> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(ConfigError::PromptFailed)
    }

    fn secret(&mut self, prompt: &str) -> Result<String, ConfigError> {
        Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(ConfigError::PromptFailed)
    }
}

/// Menu label for each provider, in [`ProviderKind::ALL`] order.
fn menu_label(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "OpenAI (native)",
        ProviderKind::Azure => "OpenAI (Azure)",
        ProviderKind::Claude => "Anthropic Claude",
        ProviderKind::GitHub => "GitHub Models",
    }
}

/// Ask for a provider and its credentials.
pub fn prompt_settings<P: Prompter>(prompter: &mut P) -> Result<ProviderSettings, ConfigError> {
    let labels: Vec<&str> = ProviderKind::ALL.iter().map(|k| menu_label(*k)).collect();
    let choice = prompter.select("Select AI provider", &labels)?;
    let kind = ProviderKind::ALL
        .get(choice)
        .copied()
        .ok_or(ConfigError::InvalidSelection(choice))?;

    let settings = match kind {
        ProviderKind::OpenAi => ProviderSettings::OpenAi(OpenAiSettings {
            api_key: answer(prompter.secret("OpenAI API key")?),
            model: model_answer(prompter, DEFAULT_OPENAI_MODEL)?,
        }),
        ProviderKind::Azure => ProviderSettings::Azure(AzureSettings {
            endpoint: answer(prompter.text("Azure OpenAI endpoint", None)?),
            api_key: answer(prompter.secret("Azure OpenAI API key")?),
            deployment: answer(prompter.text("Deployment name", None)?),
        }),
        ProviderKind::Claude => ProviderSettings::Claude(ClaudeSettings {
            api_key: answer(prompter.secret("Anthropic API key")?),
            model: model_answer(prompter, DEFAULT_CLAUDE_MODEL)?,
        }),
        ProviderKind::GitHub => ProviderSettings::GitHub(GitHubSettings {
            token: answer(prompter.secret("GitHub token")?),
            model: model_answer(prompter, DEFAULT_GITHUB_MODEL)?,
        }),
    };

    settings.validate()?;
    Ok(settings)
}

fn answer(raw: String) -> String {
    raw.trim().to_string()
}

fn model_answer<P: Prompter>(prompter: &mut P, default: &str) -> Result<String, ConfigError> {
    let model = answer(prompter.text("Model", Some(default))?);
    if model.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(model)
    }
}
