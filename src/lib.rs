//! Typed Rust client for the Aliyun Dysmsapi short-message HTTP API.
//!
//! The design is layered: a domain layer of strong types, a signer module
//! implementing the RPC signature v1.0 pipeline (canonical query string,
//! string-to-sign, HMAC-SHA1), a transport layer for wire-format quirks, and
//! a small client layer orchestrating signed GET requests.
//!
//! A remote `Code != "OK"` is returned as data, not as an error: the API
//! reports business outcomes (throttling, unapproved template, bad numbers)
//! in the response body, and callers branch on [`SendSmsResponse::code`].
//! Acceptance is not delivery — pair [`DysmsClient::send_sms`] with
//! [`DysmsClient::query_send_details`] to learn the carrier outcome.
//!
//! ```rust,no_run
//! use dysms::{Credentials, DysmsClient, RawPhoneNumber, SendSms, SignName, TemplateCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dysms::DysmsError> {
//!     let client = DysmsClient::new(Credentials::new("key-id", "key-secret")?);
//!     let request = SendSms::to_one(
//!         RawPhoneNumber::new("13800000000")?,
//!         SignName::new("Acme")?,
//!         TemplateCode::new("SMS_153055065")?,
//!         None,
//!     )?;
//!     let response = client.send_sms(request).await?;
//!     if let Some(biz_id) = &response.biz_id {
//!         println!("accepted, receipt id {}", biz_id.as_str());
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod signer;
mod transport;

pub use client::{Credentials, DysmsClient, DysmsClientBuilder, DysmsError};
pub use domain::{
    AccessKeyId, AccessKeySecret, BizId, CurrentPage, KnownResponseCode, KnownSendStatus, PageSize,
    PhoneNumber, QuerySendDetails, QuerySendDetailsResponse, RawPhoneNumber, ResponseCode,
    SendDate, SendDetail, SendSms, SendSmsResponse, SendStatusCode, SignName, TemplateCode,
    TemplateParam, ValidationError,
};
pub use signer::{canonicalize, percent_encode, sign, string_to_sign};
