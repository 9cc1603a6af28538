use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.clause-checkr/config.toml`.
///
/// Every section and key is optional; missing values take the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub model: ModelConfig,
    pub llm: LlmConfig,
    pub risk: RiskConfig,
}

/// Pipeline sizing and input limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum number of clauses analyzed concurrently.
    pub workers: usize,
    /// Documents larger than this are rejected before analysis.
    pub max_document_bytes: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            max_document_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Clause classification model endpoint. Without an endpoint the classifier
/// runs on keyword heuristics only.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

/// LLM collaborator settings and per-analyzer switches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Use the LLM for clause summaries.
    pub summaries: bool,
    /// Ask the LLM when no risk keyword matches.
    pub risk_fallback: bool,
    /// Ask the LLM when no duty-verb pattern matches.
    pub obligation_fallback: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
            temperature: 0.3,
            max_tokens: 300,
            summaries: true,
            risk_fallback: false,
            obligation_fallback: false,
        }
    }
}

/// Keyword tiers for the risk scorer. Matching is case-insensitive substring.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub high: Vec<String>,
    pub medium: Vec<String>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        let high = [
            "indemnify",
            "hold harmless",
            "penalty",
            "termination without cause",
            "liquidated damages",
            "waiver of rights",
        ];
        let medium = [
            "non-compete",
            "non-solicitation",
            "exclusive",
            "binding arbitration",
            "governing law",
            "dispute resolution",
            "late fees",
        ];

        Self {
            high: high.iter().map(|s| s.to_string()).collect(),
            medium: medium.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.clause-checkr/config.toml`
/// 3. `~/.config/clause-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".clause-checkr").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("clause-checkr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}
