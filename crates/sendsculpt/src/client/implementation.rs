use std::{fmt, time::Duration};

use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
    redirect::Policy,
};
use tracing::debug;

use crate::client::{
    API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_ENVIRONMENT, SendSculptClient,
    error::{SendSculptError, ValidationError},
};
use crate::config::SendSculptConfig;
use crate::schemas::{SendEmailRequest, SendEmailResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

impl fmt::Debug for SendSculptClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendSculptClient")
            .field("api_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SendSculptClient {
    /// Client for the `live` environment.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SendSculptError> {
        Self::with_environment(api_key, DEFAULT_ENVIRONMENT)
    }

    /// A blank environment falls back to `live`; any other value is sent as-is.
    pub fn with_environment(
        api_key: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self, SendSculptError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SendSculptError::Configuration(
                "API key cannot be empty".to_string(),
            ));
        }

        let environment = environment.into();
        let environment = if environment.trim().is_empty() {
            DEFAULT_ENVIRONMENT.to_string()
        } else {
            environment
        };

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            // A 3xx is returned as-is; the key header must never follow a Location.
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            api_key,
            environment,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    pub fn from_config(cfg: &SendSculptConfig) -> Result<Self, SendSculptError> {
        let client = Self::with_environment(
            cfg.api_key.clone(),
            cfg.environment.clone().unwrap_or_default(),
        )?;

        match cfg.base_url.as_deref() {
            Some(base_url) if !base_url.trim().is_empty() => Ok(client.with_base_url(base_url)),
            _ => Ok(client),
        }
    }

    /// Point the client at another origin. Trailing slashes are dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the request rules in order; the first violation is returned.
    pub fn validate(request: &SendEmailRequest) -> Result<(), ValidationError> {
        if request.to.is_empty() {
            return Err(ValidationError::MissingTo);
        }
        if request.subject.trim().is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        if request.from_email.trim().is_empty() {
            return Err(ValidationError::MissingFromEmail);
        }

        let has_template_id = !is_blank(request.template_id.as_deref());

        if let Some(template_data) = &request.template_data
            && !template_data.is_empty()
            && !has_template_id
        {
            return Err(ValidationError::TemplateDataWithoutId);
        }

        if has_template_id
            && (!is_blank(request.body_html.as_deref()) || !is_blank(request.body_text.as_deref()))
        {
            return Err(ValidationError::TemplateWithBody);
        }

        Ok(())
    }

    /// Validate, serialize and POST one email to `{base_url}/send`.
    ///
    /// Nothing is retried. A status of 400 or above becomes `SendSculptError::Api`
    /// carrying the raw response body.
    #[tracing::instrument(
        name = "sendsculpt.send_email",
        skip_all,
        fields(recipients = request.to.len(), environment = %self.environment)
    )]
    pub async fn send_email(
        &self,
        request: &SendEmailRequest,
    ) -> Result<SendEmailResponse, SendSculptError> {
        Self::validate(request)?;
        debug!("Request validated");

        let mut payload = request.to_payload()?;
        payload.environment = Some(self.environment.as_str());

        debug!(
            attachments = payload.attachments.as_ref().map_or(0, Vec::len),
            "Payload built"
        );

        let body = serde_json::to_vec(&payload)?;

        let res = self
            .client
            .post(format!("{}/send", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = res.status().as_u16();
        let text = res.text().await?;

        debug!(status, "SendSculpt responded");

        if status >= 400 {
            return Err(SendSculptError::Api { status, body: text });
        }

        match serde_json::from_str::<SendEmailResponse>(&text) {
            Ok(response) => Ok(response),
            Err(source) => Err(SendSculptError::ResponseParse { source, body: text }),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
