use crate::domain::value::{BizId, ResponseCode, SendStatusCode};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Typed `SendSms` response.
///
/// `code.is_ok()` means the API accepted the submission; delivery is only
/// known later via `QuerySendDetails`. A non-`OK` code is data, not an error:
/// inspect it to branch on business outcomes.
pub struct SendSmsResponse {
    pub code: ResponseCode,
    pub message: String,
    pub request_id: String,
    /// Receipt id for later delivery queries; populated only when `code` is `OK`.
    pub biz_id: Option<BizId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Typed `QuerySendDetails` response.
pub struct QuerySendDetailsResponse {
    pub code: ResponseCode,
    pub message: String,
    pub request_id: String,
    /// Total matching records across all pages; populated only when `code` is `OK`.
    pub total_count: Option<u64>,
    /// Delivery records in the order the API returned them; empty unless `code` is `OK`.
    pub details: Vec<SendDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One per-recipient delivery record from `QuerySendDetails`.
pub struct SendDetail {
    pub template_code: String,
    /// Carrier receipt time; absent while the receipt is still pending.
    pub receive_date: Option<String>,
    pub phone_number: String,
    pub content: String,
    pub send_status: SendStatusCode,
    pub send_date: Option<String>,
    /// Carrier error code; meaningful when the status is failed.
    pub err_code: Option<String>,
}
