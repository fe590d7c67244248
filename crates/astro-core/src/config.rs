//! Configuration management
//!
//! Settings are resolved in this order of precedence:
//! 1. Environment variables
//! 2. `astro-brief.toml` configuration file
//! 3. Default values
//!
//! `${VAR_NAME}` inside the configuration file is expanded from the environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "astro-brief.toml";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the static pages and their assets
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Maximum accepted request body (audio + image upload)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Allowed CORS origins. `None` means permissive.
    #[serde(default)]
    pub allowed_origins: Option<Vec<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            templates_dir: default_templates_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            allowed_origins: None,
        }
    }
}

/// Gemini (generative language) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Models tried in order until one produces a usable reply
    #[serde(default = "default_gemini_models")]
    pub models: Vec<String>,

    /// Base URL of the generative language API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            models: default_gemini_models(),
            base_url: default_gemini_base_url(),
        }
    }
}

/// Deepgram (speech-to-text) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepgramConfig {
    /// API key
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Base URL of the Deepgram API
    #[serde(default = "default_deepgram_base_url")]
    pub base_url: String,

    /// Recognition model
    #[serde(default = "default_deepgram_model")]
    pub model: String,

    /// Punctuation and number formatting
    #[serde(default = "default_true")]
    pub smart_format: bool,
}

impl Default for DeepgramConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_deepgram_base_url(),
            model: default_deepgram_model(),
            smart_format: true,
        }
    }
}

/// Murf (text-to-speech) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MurfConfig {
    /// API key
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Streaming synthesis endpoint
    #[serde(default = "default_murf_stream_url")]
    pub stream_url: String,

    /// Voice to use
    #[serde(default = "default_murf_voice_id")]
    pub voice_id: String,

    /// Output audio format
    #[serde(default = "default_murf_format")]
    pub format: String,

    /// Synthesis model
    #[serde(default = "default_murf_model")]
    pub model: String,
}

impl Default for MurfConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            stream_url: default_murf_stream_url(),
            voice_id: default_murf_voice_id(),
            format: default_murf_format(),
            model: default_murf_model(),
        }
    }
}

/// Main configuration for astro-brief
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub deepgram: DeepgramConfig,

    #[serde(default)]
    pub murf: MurfConfig,
}

/// Which vendor API keys are present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStatus {
    pub gemini: bool,
    pub murf: bool,
    pub deepgram: bool,
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G:{} M:{} D:{}", self.gemini, self.murf, self.deepgram)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_gemini_models() -> Vec<String> {
    vec![
        "gemini-1.5-flash".to_string(),
        "gemini-2.0-flash".to_string(),
        "gemini-1.5-pro".to_string(),
    ]
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_deepgram_base_url() -> String {
    "https://api.deepgram.com/v1".to_string()
}

fn default_deepgram_model() -> String {
    "nova-2".to_string()
}

fn default_murf_stream_url() -> String {
    "https://api.murf.ai/v1/speech/stream".to_string()
}

fn default_murf_voice_id() -> String {
    "en-US-ken".to_string()
}

fn default_murf_format() -> String {
    "MP3".to_string()
}

fn default_murf_model() -> String {
    "FALCON".to_string()
}

fn default_true() -> bool {
    true
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Expand `${VAR_NAME}` references from the environment.
    ///
    /// An unset variable expands to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::with_capacity(value.len());
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let mut cfg = Self::from_toml_str(&toml_content)?;
        cfg.apply_env_overrides();

        Ok(cfg)
    }

    /// Parse configuration from TOML text (after `${VAR}` expansion)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);
        toml::from_str(&expanded).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load from the default location.
    ///
    /// Uses `./astro-brief.toml` when present, otherwise environment variables only.
    pub fn load() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Self::from_env()
    }

    /// Load from an explicit path, or from the default location when `None`
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_toml_file(path),
            None => Self::load(),
        }
    }

    /// Load configuration from environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        // Server
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(dir) = get("TEMPLATES_DIR") {
            self.server.templates_dir = dir;
        }
        if let Some(limit) = get("MAX_UPLOAD_BYTES").and_then(|v| v.parse().ok()) {
            self.server.max_upload_bytes = limit;
        }
        if let Some(origins) = get("ALLOWED_ORIGINS") {
            self.server.allowed_origins = Some(split_list(&origins));
        }

        // Gemini
        if let Some(key) = get("GEMINI_API_KEY") {
            self.gemini.api_key = key;
        }
        if let Some(models) = get("GEMINI_MODELS") {
            let models = split_list(&models);
            if !models.is_empty() {
                self.gemini.models = models;
            }
        }
        if let Some(url) = get("GEMINI_BASE_URL") {
            self.gemini.base_url = url;
        }

        // Deepgram
        if let Some(key) = get("DEEPGRAM_API_KEY") {
            self.deepgram.api_key = key;
        }
        if let Some(url) = get("DEEPGRAM_BASE_URL") {
            self.deepgram.base_url = url;
        }
        if let Some(model) = get("DEEPGRAM_MODEL") {
            self.deepgram.model = model;
        }

        // Murf
        if let Some(key) = get("MURF_API_KEY") {
            self.murf.api_key = key;
        }
        if let Some(url) = get("MURF_STREAM_URL") {
            self.murf.stream_url = url;
        }
        if let Some(voice) = get("MURF_VOICE_ID") {
            self.murf.voice_id = voice;
        }
    }

    /// Presence of each vendor API key, for startup logging
    pub fn key_status(&self) -> KeyStatus {
        KeyStatus {
            gemini: !self.gemini.api_key.is_empty(),
            murf: !self.murf.api_key.is_empty(),
            deepgram: !self.deepgram.api_key.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.templates_dir, "templates");
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
        assert!(config.allowed_origins.is_none());
    }

    #[test]
    fn test_vendor_defaults() {
        let config = Config::default();
        assert_eq!(
            config.gemini.models,
            vec!["gemini-1.5-flash", "gemini-2.0-flash", "gemini-1.5-pro"]
        );
        assert_eq!(config.deepgram.model, "nova-2");
        assert!(config.deepgram.smart_format);
        assert_eq!(config.murf.stream_url, "https://api.murf.ai/v1/speech/stream");
        assert_eq!(config.murf.voice_id, "en-US-ken");
        assert_eq!(config.murf.format, "MP3");
        assert_eq!(config.murf.model, "FALCON");
    }

    #[test]
    fn test_expand_env_vars() {
        unsafe {
            std::env::set_var("ASTRO_BRIEF_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${ASTRO_BRIEF_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        let result = Config::expand_env_vars("prefix_${ASTRO_BRIEF_NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("ASTRO_BRIEF_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_passthrough() {
        assert_eq!(Config::expand_env_vars("no_vars_here"), "no_vars_here");
        assert_eq!(Config::expand_env_vars("cost: $5"), "cost: $5");
        assert_eq!(Config::expand_env_vars("${}_content"), "_content");
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
[server]
port = 8080
templates_dir = "/srv/pages"
allowed_origins = ["https://example.com"]

[gemini]
api_key = "g-key"
models = ["gemini-2.0-flash"]

[deepgram]
api_key = "d-key"
smart_format = false

[murf]
api_key = "m-key"
voice_id = "en-UK-hazel"
"#;

        let config = Config::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.templates_dir, "/srv/pages");
        assert_eq!(
            config.server.allowed_origins,
            Some(vec!["https://example.com".to_string()])
        );
        assert_eq!(config.gemini.api_key, "g-key");
        assert_eq!(config.gemini.models, vec!["gemini-2.0-flash"]);
        assert!(!config.deepgram.smart_format);
        assert_eq!(config.deepgram.model, "nova-2");
        assert_eq!(config.murf.voice_id, "en-UK-hazel");
        assert_eq!(config.murf.format, "MP3");
    }

    #[test]
    fn test_toml_empty_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.gemini.models.len(), 3);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_apply_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "9090"),
            ("GEMINI_API_KEY", "g"),
            ("GEMINI_MODELS", "gemini-a, gemini-b ,"),
            ("MURF_API_KEY", ""),
            ("ALLOWED_ORIGINS", "http://a.test,http://b.test"),
        ]);

        let mut config = Config::default();
        config.murf.api_key = "from-file".to_string();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.gemini.api_key, "g");
        assert_eq!(config.gemini.models, vec!["gemini-a", "gemini-b"]);
        // empty values never clear a configured key
        assert_eq!(config.murf.api_key, "from-file");
        assert_eq!(config.server.allowed_origins.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_key_status_display() {
        let mut config = Config::default();
        config.gemini.api_key = "g".to_string();
        config.deepgram.api_key = "d".to_string();

        let status = config.key_status();
        assert!(status.gemini);
        assert!(!status.murf);
        assert_eq!(status.to_string(), "G:true M:false D:true");
    }
}
