use std::{collections::BTreeMap, fs, path::PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::client::error::SendSculptError;
use crate::schemas::{
    Attachment, AttachmentContent, AttachmentPayload, SendEmailPayload, SendEmailRequest,
};

impl SendEmailRequest {
    pub fn new<I, S>(to: I, subject: impl Into<String>, from_email: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            to: to.into_iter().map(Into::into).collect(),
            subject: subject.into(),
            from_email: from_email.into(),
            ..Default::default()
        }
    }

    pub fn with_body_html(mut self, body_html: impl Into<String>) -> Self {
        self.body_html = Some(body_html.into());
        self
    }

    pub fn with_body_text(mut self, body_text: impl Into<String>) -> Self {
        self.body_text = Some(body_text.into());
        self
    }

    pub fn with_cc<I, S>(mut self, cc: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cc = Some(cc.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_bcc<I, S>(mut self, bcc: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bcc = Some(bcc.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_reply_to<I, S>(mut self, reply_to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reply_to = Some(reply_to.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn with_template_data(mut self, template_data: BTreeMap<String, serde_json::Value>) -> Self {
        self.template_data = Some(template_data);
        self
    }

    /// Adds one template variable. A repeated key replaces the earlier value.
    pub fn with_template_var(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.template_data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments
            .get_or_insert_with(Vec::new)
            .push(attachment);
        self
    }

    pub fn with_sender_name(mut self, sender_name: impl Into<String>) -> Self {
        self.sender_name = Some(sender_name.into());
        self
    }

    /// Build the wire body, resolving every attachment's content.
    ///
    /// Attachment files are read here, once per call.
    pub fn to_payload(&self) -> Result<SendEmailPayload<'_>, SendSculptError> {
        let attachments = match &self.attachments {
            Some(attachments) => Some(
                attachments
                    .iter()
                    .map(Attachment::to_payload)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        Ok(SendEmailPayload {
            to: &self.to,
            subject: &self.subject,
            from_email: &self.from_email,
            body_html: self.body_html.as_deref(),
            body_text: self.body_text.as_deref(),
            cc: self.cc.as_deref(),
            bcc: self.bcc.as_deref(),
            template_id: self.template_id.as_deref(),
            template_data: self.template_data.as_ref(),
            reply_to: self.reply_to.as_deref(),
            attachments,
            sender_name: self.sender_name.as_deref(),
            environment: self.environment.as_deref(),
        })
    }
}

impl Attachment {
    pub fn from_base64(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn from_bytes(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        content_bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            content_bytes: Some(content_bytes.into()),
            ..Default::default()
        }
    }

    pub fn from_path(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            file_path: Some(file_path.into()),
            ..Default::default()
        }
    }

    /// Pick the content source: base64 text, then raw bytes, then file path.
    /// Empty or blank slots are skipped.
    pub fn source(&self) -> Result<AttachmentContent<'_>, SendSculptError> {
        if let Some(content) = self.content.as_deref()
            && !content.trim().is_empty()
        {
            return Ok(AttachmentContent::Base64(content));
        }

        if let Some(bytes) = self.content_bytes.as_deref()
            && !bytes.is_empty()
        {
            return Ok(AttachmentContent::Bytes(bytes));
        }

        if let Some(path) = self.file_path.as_deref()
            && !path.to_string_lossy().trim().is_empty()
        {
            return Ok(AttachmentContent::File(path));
        }

        Err(SendSculptError::AttachmentContent {
            filename: self.filename.clone(),
        })
    }

    /// Base64 text for the `content` field on the wire.
    pub fn resolve_content(&self) -> Result<String, SendSculptError> {
        self.source()?.resolve()
    }

    fn to_payload(&self) -> Result<AttachmentPayload<'_>, SendSculptError> {
        Ok(AttachmentPayload {
            filename: &self.filename,
            content: self.resolve_content()?,
            mime_type: &self.mime_type,
        })
    }
}

impl AttachmentContent<'_> {
    pub fn resolve(&self) -> Result<String, SendSculptError> {
        match *self {
            AttachmentContent::Base64(content) => Ok(content.to_string()),
            AttachmentContent::Bytes(bytes) => Ok(BASE64.encode(bytes)),
            AttachmentContent::File(path) => {
                let bytes = fs::read(path).map_err(|source| SendSculptError::AttachmentFile {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(BASE64.encode(bytes))
            }
        }
    }
}
