use crate::domain::validation::ValidationError;
use crate::domain::value::{
    BizId, CurrentPage, PageSize, RawPhoneNumber, SendDate, SignName, TemplateCode, TemplateParam,
};

pub const SEND_SMS_MAX_RECIPIENTS: usize = 1000;

#[derive(Debug, Clone)]
/// A `SendSms` request: one template rendered for up to
/// [`SEND_SMS_MAX_RECIPIENTS`] recipients.
pub struct SendSms {
    phone_numbers: Vec<RawPhoneNumber>,
    sign_name: SignName,
    template_code: TemplateCode,
    template_param: Option<TemplateParam>,
}

impl SendSms {
    /// Create a validated request.
    ///
    /// `template_param` carries the JSON placeholder values when the template
    /// has any.
    pub fn new(
        phone_numbers: Vec<RawPhoneNumber>,
        sign_name: SignName,
        template_code: TemplateCode,
        template_param: Option<TemplateParam>,
    ) -> Result<Self, ValidationError> {
        if phone_numbers.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::SEND_FIELD,
            });
        }
        if phone_numbers.len() > SEND_SMS_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: SEND_SMS_MAX_RECIPIENTS,
                actual: phone_numbers.len(),
            });
        }
        Ok(Self {
            phone_numbers,
            sign_name,
            template_code,
            template_param,
        })
    }

    /// Convenience constructor for a single recipient.
    pub fn to_one(
        phone_number: RawPhoneNumber,
        sign_name: SignName,
        template_code: TemplateCode,
        template_param: Option<TemplateParam>,
    ) -> Result<Self, ValidationError> {
        Self::new(vec![phone_number], sign_name, template_code, template_param)
    }

    pub fn phone_numbers(&self) -> &[RawPhoneNumber] {
        &self.phone_numbers
    }

    pub fn sign_name(&self) -> &SignName {
        &self.sign_name
    }

    pub fn template_code(&self) -> &TemplateCode {
        &self.template_code
    }

    pub fn template_param(&self) -> Option<&TemplateParam> {
        self.template_param.as_ref()
    }
}

#[derive(Debug, Clone)]
/// A `QuerySendDetails` request: one page of delivery receipts for a single
/// phone number on a single calendar day, optionally narrowed to one
/// submission via its [`BizId`].
pub struct QuerySendDetails {
    phone_number: RawPhoneNumber,
    send_date: SendDate,
    page_size: PageSize,
    current_page: CurrentPage,
    biz_id: Option<BizId>,
}

impl QuerySendDetails {
    /// Create a request; all fields carry their own validation.
    pub fn new(
        phone_number: RawPhoneNumber,
        send_date: SendDate,
        page_size: PageSize,
        current_page: CurrentPage,
        biz_id: Option<BizId>,
    ) -> Self {
        Self {
            phone_number,
            send_date,
            page_size,
            current_page,
            biz_id,
        }
    }

    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }

    pub fn send_date(&self) -> &SendDate {
        &self.send_date
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn current_page(&self) -> CurrentPage {
        self.current_page
    }

    pub fn biz_id(&self) -> Option<&BizId> {
        self.biz_id.as_ref()
    }
}
