//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{QuerySendDetails, SEND_SMS_MAX_RECIPIENTS, SendSms};
pub use response::{QuerySendDetailsResponse, SendDetail, SendSmsResponse};
pub use validation::ValidationError;
pub use value::{
    AccessKeyId, AccessKeySecret, BizId, CurrentPage, KnownResponseCode, KnownSendStatus, PageSize,
    PhoneNumber, RawPhoneNumber, ResponseCode, SendDate, SendStatusCode, SignName, TemplateCode,
    TemplateParam,
};
