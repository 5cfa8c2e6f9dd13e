//! Client for the SendSculpt transactional email API.
//!
//! ```no_run
//! use sendsculpt::{SendEmailRequest, SendSculptClient};
//!
//! # async fn run() -> Result<(), sendsculpt::SendSculptError> {
//! let client = SendSculptClient::with_environment("my-api-key", "sandbox")?;
//! let request = SendEmailRequest::new(["ada@example.com"], "Hello", "noreply@example.com")
//!     .with_body_text("Hi Ada");
//!
//! let response = client.send_email(&request).await?;
//! println!("{} {}", response.message_id, response.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod schemas;

pub use client::{
    SendSculptClient,
    error::{SendSculptError, ValidationError},
};
pub use crate::config::SendSculptConfig;
pub use schemas::{Attachment, AttachmentContent, SendEmailRequest, SendEmailResponse};
