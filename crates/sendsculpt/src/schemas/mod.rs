pub mod implementation;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// One outbound email. Built by the caller, consumed by `SendSculptClient::send_email`.
#[derive(Clone, Debug, Default)]
pub struct SendEmailRequest {
    pub to: Vec<String>,
    pub subject: String,
    pub from_email: String,
    pub body_html: Option<String>,
    pub body_text: Option<String>,
    pub cc: Option<Vec<String>>,
    pub bcc: Option<Vec<String>>,
    pub template_id: Option<String>,
    pub template_data: Option<BTreeMap<String, serde_json::Value>>,
    pub reply_to: Option<Vec<String>>,
    pub attachments: Option<Vec<Attachment>>,
    pub sender_name: Option<String>,
    // Overwritten by the client on every send.
    pub environment: Option<String>,
}

/// Any of the three content slots may be set; `Attachment::source` picks one.
#[derive(Clone, Debug, Default)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub content: Option<String>,
    pub content_bytes: Option<Vec<u8>>,
    pub file_path: Option<PathBuf>,
}

/// The content source an attachment resolves from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentContent<'a> {
    Base64(&'a str),
    Bytes(&'a [u8]),
    File(&'a Path),
}

#[derive(Serialize, Debug)]
pub struct AttachmentPayload<'a> {
    pub filename: &'a str,
    pub content: String,
    pub mime_type: &'a str,
}

/// Wire body for `POST /send`.
#[derive(Serialize, Debug)]
pub struct SendEmailPayload<'a> {
    pub to: &'a [String],
    pub subject: &'a str,
    pub from_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_data: Option<&'a BTreeMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentPayload<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<&'a str>,
}

/// 2xx body from `POST /send`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SendEmailResponse {
    pub message_id: String,
    pub status: String,
}
