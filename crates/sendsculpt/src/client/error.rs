use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SendSculptError {
    #[error("SendSculpt client misconfigured: {0}")]
    Configuration(String),

    #[error("Failed to load SendSculpt configuration")]
    Config(#[from] config::ConfigError),

    #[error("Invalid send request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Attachment '{filename}' must specify content, content_bytes, or file_path")]
    AttachmentContent { filename: String },

    #[error("Failed to read attachment file {path:?}")]
    AttachmentFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize send request")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request to SendSculpt failed")]
    Transport(#[from] reqwest::Error),

    #[error("SendSculpt API error [{status}]: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to deserialize SendSculpt response: {body}")]
    ResponseParse {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl SendSculptError {
    /// HTTP status returned by the API, if this is an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            SendSculptError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SendSculptError::Validation(_))
    }
}

/// One variant per request rule, checked in declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'to' field is required and cannot be empty")]
    MissingTo,

    #[error("'subject' field is required")]
    MissingSubject,

    #[error("'from_email' field is required")]
    MissingFromEmail,

    #[error("template_data and template_id must be provided together")]
    TemplateDataWithoutId,

    #[error("template_id and body_html/body_text cannot be provided together")]
    TemplateWithBody,
}
