use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Aliyun access key identifier (`AccessKeyId`).
///
/// Invariant: non-empty after trimming.
pub struct AccessKeyId(String);

impl AccessKeyId {
    /// Query parameter name used by Dysmsapi (`AccessKeyId`).
    pub const FIELD: &'static str = "AccessKeyId";

    /// Create a validated [`AccessKeyId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Aliyun access key secret.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The secret only keys the request signature; it is never sent on the wire,
/// and the `Debug` output redacts it.
pub struct AccessKeySecret(String);

impl AccessKeySecret {
    /// Create a validated [`AccessKeySecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty {
                field: "AccessKeySecret",
            });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessKeySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKeySecret(****)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Registered SMS sign name (`SignName`).
///
/// Invariant: non-empty after trimming. The value must be approved for your
/// Aliyun account.
pub struct SignName(String);

impl SignName {
    /// Query parameter name used by Dysmsapi (`SignName`).
    pub const FIELD: &'static str = "SignName";

    /// Create a validated [`SignName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sign name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Approved message template code (`TemplateCode`), e.g. `SMS_153055065`.
///
/// Invariant: non-empty after trimming.
pub struct TemplateCode(String);

impl TemplateCode {
    /// Query parameter name used by Dysmsapi (`TemplateCode`).
    pub const FIELD: &'static str = "TemplateCode";

    /// Create a validated [`TemplateCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated template code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Template placeholder values as a JSON object string (`TemplateParam`),
/// e.g. `{"code":"1234"}`.
///
/// Invariant: non-empty. The value is passed through verbatim; Dysmsapi
/// validates it against the template server-side.
pub struct TemplateParam(String);

impl TemplateParam {
    /// Query parameter name used by Dysmsapi (`TemplateParam`).
    pub const FIELD: &'static str = "TemplateParam";

    /// Create a validated [`TemplateParam`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the JSON string as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Receipt identifier (`BizId`) returned by `SendSms`.
///
/// Invariant: non-empty after trimming. Used later to narrow
/// `QuerySendDetails` to one submission.
pub struct BizId(String);

impl BizId {
    /// Query parameter name used by Dysmsapi (`BizId`).
    pub const FIELD: &'static str = "BizId";

    /// Create a validated [`BizId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated receipt id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to Dysmsapi.
///
/// Invariant: non-empty after trimming. This type does not normalize; if you
/// want E.164 parsing, go through [`PhoneNumber`] and convert it into
/// [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Query parameter name used by `SendSms` (`PhoneNumbers`).
    pub const SEND_FIELD: &'static str = "PhoneNumbers";
    /// Query parameter name used by `QuerySendDetails` (`PhoneNumber`).
    pub const QUERY_FIELD: &'static str = "PhoneNumber";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::SEND_FIELD,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Dysmsapi.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert a parsed phone number into the wire form.
    ///
    /// Dysmsapi does not accept a leading `+`, so the E.164 representation is
    /// used with the plus sign stripped (e.g. `8613800000000`).
    fn from(value: PhoneNumber) -> Self {
        let digits = value
            .e164
            .strip_prefix('+')
            .unwrap_or(&value.e164)
            .to_owned();
        Self(digits)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit
    /// country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::SEND_FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Send date filter for `QuerySendDetails` (`SendDate`).
///
/// Invariant: exactly eight digits forming a valid `YYYYMMDD` calendar date.
pub struct SendDate(String);

impl SendDate {
    /// Query parameter name used by Dysmsapi (`SendDate`).
    pub const FIELD: &'static str = "SendDate";

    /// Create a validated [`SendDate`] from a `YYYYMMDD` string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        let valid = trimmed.len() == 8
            && trimmed.bytes().all(|b| b.is_ascii_digit())
            && chrono::NaiveDate::parse_from_str(trimmed, "%Y%m%d").is_ok();
        if !valid {
            return Err(ValidationError::InvalidSendDate {
                input: value.clone(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Create a [`SendDate`] for a calendar date.
    pub fn from_date(date: chrono::NaiveDate) -> Self {
        Self(date.format("%Y%m%d").to_string())
    }

    /// Borrow the `YYYYMMDD` value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Page size for `QuerySendDetails` (`PageSize`).
///
/// Invariant: `1..=50`.
pub struct PageSize(u32);

impl PageSize {
    /// Query parameter name used by Dysmsapi (`PageSize`).
    pub const FIELD: &'static str = "PageSize";

    /// Minimum allowed page size.
    pub const MIN: u32 = 1;
    /// Maximum allowed page size.
    pub const MAX: u32 = 50;

    /// Create a validated page size.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::PageSizeOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying page size.
    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// One-based page index for `QuerySendDetails` (`CurrentPage`).
///
/// Invariant: `>= 1`.
pub struct CurrentPage(u32);

impl CurrentPage {
    /// Query parameter name used by Dysmsapi (`CurrentPage`).
    pub const FIELD: &'static str = "CurrentPage";

    /// Minimum allowed page index.
    pub const MIN: u32 = 1;

    /// Create a validated page index.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value < Self::MIN {
            return Err(ValidationError::CurrentPageOutOfRange {
                min: Self::MIN,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying page index.
    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Remote response code (`Code`).
///
/// The literal string is preserved as-is even when the code is unknown to
/// this crate. `OK` means the API accepted the call; it does not mean the
/// message was delivered.
pub struct ResponseCode(String);

impl ResponseCode {
    /// The literal code Dysmsapi returns on acceptance.
    pub const OK: &'static str = "OK";

    /// Construct a response code from the remote string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the code as provided by Dysmsapi.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the API accepted the call.
    pub fn is_ok(&self) -> bool {
        self.0 == Self::OK
    }

    /// Map this code to a known variant, if one exists.
    pub fn known_kind(&self) -> Option<KnownResponseCode> {
        KnownResponseCode::from_code(&self.0)
    }

    /// Returns `true` if this code signals flow-control throttling.
    pub fn is_throttled(&self) -> bool {
        matches!(
            self.known_kind(),
            Some(kind) if kind.is_throttled()
        )
    }

    /// Returns `true` if this code represents an authentication/authorization error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.known_kind(),
            Some(kind) if kind.is_auth_error()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known Dysmsapi response codes supported by this crate.
///
/// Unknown codes are preserved as [`ResponseCode`] and return `None` from
/// [`KnownResponseCode::from_code`].
pub enum KnownResponseCode {
    Ok,
    SignatureDoesNotMatch,
    SignatureNonceUsed,
    InvalidTimestampExpired,
    RamPermissionDeny,
    OutOfService,
    ProductUnsubscribe,
    AccountNotExists,
    AccountAbnormal,
    SmsTemplateIllegal,
    SmsSignatureIllegal,
    InvalidParameters,
    MobileNumberIllegal,
    MobileCountOverLimit,
    TemplateMissingParameters,
    BusinessLimitControl,
    InvalidJsonParam,
    BlackKeyControlLimit,
    ParamLengthLimit,
    AmountNotEnough,
    ThrottlingUser,
    SystemError,
}

impl KnownResponseCode {
    /// Convert a raw Dysmsapi code string into a known variant.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "OK" => Self::Ok,
            "SignatureDoesNotMatch" => Self::SignatureDoesNotMatch,
            "SignatureNonceUsed" => Self::SignatureNonceUsed,
            "InvalidTimeStamp.Expired" => Self::InvalidTimestampExpired,
            "isp.RAM_PERMISSION_DENY" => Self::RamPermissionDeny,
            "isv.OUT_OF_SERVICE" => Self::OutOfService,
            "isv.PRODUCT_UN_SUBSCRIPT" | "isv.PRODUCT_UNSUBSCRIBE" => Self::ProductUnsubscribe,
            "isv.ACCOUNT_NOT_EXISTS" => Self::AccountNotExists,
            "isv.ACCOUNT_ABNORMAL" => Self::AccountAbnormal,
            "isv.SMS_TEMPLATE_ILLEGAL" => Self::SmsTemplateIllegal,
            "isv.SMS_SIGNATURE_ILLEGAL" => Self::SmsSignatureIllegal,
            "isv.INVALID_PARAMETERS" => Self::InvalidParameters,
            "isv.MOBILE_NUMBER_ILLEGAL" => Self::MobileNumberIllegal,
            "isv.MOBILE_COUNT_OVER_LIMIT" => Self::MobileCountOverLimit,
            "isv.TEMPLATE_MISSING_PARAMETERS" => Self::TemplateMissingParameters,
            "isv.BUSINESS_LIMIT_CONTROL" => Self::BusinessLimitControl,
            "isv.INVALID_JSON_PARAM" => Self::InvalidJsonParam,
            "isv.BLACK_KEY_CONTROL_LIMIT" => Self::BlackKeyControlLimit,
            "isv.PARAM_LENGTH_LIMIT" => Self::ParamLengthLimit,
            "isv.AMOUNT_NOT_ENOUGH" => Self::AmountNotEnough,
            "Throttling.User" => Self::ThrottlingUser,
            "isp.SYSTEM_ERROR" => Self::SystemError,
            _ => return None,
        })
    }

    /// Whether this code signals flow-control throttling.
    pub fn is_throttled(self) -> bool {
        matches!(self, Self::BusinessLimitControl | Self::ThrottlingUser)
    }

    /// Whether this code indicates invalid credentials or missing permissions.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::SignatureDoesNotMatch | Self::RamPermissionDeny | Self::AccountNotExists
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Per-recipient delivery status code (`SendStatus`) from `QuerySendDetails`.
///
/// This value is preserved as-is even when unknown to this crate.
pub struct SendStatusCode(i64);

impl SendStatusCode {
    /// Construct a send status from its integer representation.
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Dysmsapi.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Map this code to a known delivery status, if one exists.
    pub fn known_kind(self) -> Option<KnownSendStatus> {
        KnownSendStatus::from_code(self.0)
    }

    /// Returns `true` once the carrier confirmed delivery.
    pub fn is_delivered(self) -> bool {
        self.known_kind() == Some(KnownSendStatus::Succeeded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known delivery statuses reported by `QuerySendDetails`.
pub enum KnownSendStatus {
    /// 1 — the carrier has not reported a receipt yet.
    AwaitingReceipt,
    /// 2 — delivery failed; `err_code` carries the carrier error.
    Failed,
    /// 3 — delivered to the handset.
    Succeeded,
}

impl KnownSendStatus {
    /// Convert a raw integer status into a known variant.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => Self::AwaitingReceipt,
            2 => Self::Failed,
            3 => Self::Succeeded,
            _ => return None,
        })
    }
}
