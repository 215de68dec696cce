//! Configuration system for quill.
//!
//! Everything is read from the process environment once at startup. The
//! server binary loads a `.env` file first, so the same variables can live
//! there.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::{QuillError, QuillResult};
use crate::traits::LlmConfig;

/// Environment variable holding the LLM service credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

/// DOCX to PDF conversion configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Attempt PDF conversion of corrected documents.
    pub pdf_conversion: bool,
    /// LibreOffice executable used for the conversion.
    pub soffice_bin: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pdf_conversion: true,
            soffice_bin: PathBuf::from("soffice"),
        }
    }
}

/// Main service configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// LLM configuration.
    pub llm: LlmConfig,
    /// HTTP listener configuration.
    pub server: ServerConfig,
    /// Document re-emission configuration.
    pub render: RenderConfig,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> QuillResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> QuillResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|raw| sanitize_api_key(&raw))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                QuillError::Configuration(format!(
                    "LLM API key not found. Set the {} environment variable.",
                    API_KEY_VAR
                ))
            })?;

        let llm = LlmConfig {
            api_key: Some(SecretString::new(api_key)),
            base_url: lookup("OPENAI_BASE_URL").filter(|url| !url.trim().is_empty()),
            ..Default::default()
        };

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: lookup("QUILL_HOST").unwrap_or(defaults.host),
            port: match lookup("QUILL_PORT") {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    QuillError::Configuration(format!(
                        "QUILL_PORT must be a valid port number, got '{}'",
                        raw
                    ))
                })?,
                None => defaults.port,
            },
            max_upload_bytes: match lookup("QUILL_MAX_UPLOAD_MB") {
                Some(raw) => {
                    let mb: usize = raw.trim().parse().map_err(|_| {
                        QuillError::Configuration(format!(
                            "QUILL_MAX_UPLOAD_MB must be a whole number of megabytes, got '{}'",
                            raw
                        ))
                    })?;
                    mb.checked_mul(1024 * 1024).ok_or_else(|| {
                        QuillError::Configuration(format!(
                            "QUILL_MAX_UPLOAD_MB is too large, got '{}'",
                            raw
                        ))
                    })?
                }
                None => defaults.max_upload_bytes,
            },
        };

        let render_defaults = RenderConfig::default();
        let render = RenderConfig {
            pdf_conversion: lookup("QUILL_PDF_CONVERSION")
                .map(|raw| parse_flag(&raw))
                .unwrap_or(render_defaults.pdf_conversion),
            soffice_bin: lookup("QUILL_SOFFICE_BIN")
                .filter(|bin| !bin.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(render_defaults.soffice_bin),
        };

        Ok(Self { llm, server, render })
    }
}

/// Strip the stray leading `=` characters that `KEY==value` style `.env`
/// lines leave on the credential.
pub fn sanitize_api_key(raw: &str) -> String {
    raw.trim_start_matches('=').to_string()
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
