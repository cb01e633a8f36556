use serde::Deserialize;

use super::{ACTION_FIELD, TransportError};
use crate::domain::{
    BizId, CurrentPage, PageSize, QuerySendDetails, QuerySendDetailsResponse, RawPhoneNumber,
    ResponseCode, SendDate, SendDetail, SendStatusCode,
};

const ACTION: &str = "QuerySendDetails";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct QuerySendDetailsJsonResponse {
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    request_id: String,
    #[serde(default)]
    total_count: Option<TransportCount>,
    #[serde(rename = "SmsSendDetailDTOs", default)]
    sms_send_detail_dtos: Option<SendDetailDtos>,
}

#[derive(Debug, Clone, Deserialize)]
struct SendDetailDtos {
    #[serde(rename = "SmsSendDetailDTO", default)]
    sms_send_detail_dto: Vec<SendDetailDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendDetailDto {
    #[serde(default)]
    template_code: String,
    #[serde(default)]
    receive_date: Option<String>,
    #[serde(default)]
    phone_num: String,
    #[serde(default)]
    content: String,
    send_status: i64,
    #[serde(default)]
    send_date: Option<String>,
    #[serde(default)]
    err_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// `TotalCount` arrives as a JSON string in some responses and as a number in
/// others; accept both.
enum TransportCount {
    String(String),
    Number(serde_json::Number),
}

impl TransportCount {
    fn into_count(self) -> Option<u64> {
        match self {
            Self::String(value) => value.trim().parse().ok(),
            Self::Number(value) => value.as_u64(),
        }
    }
}

pub fn encode_query_send_details_params(request: &QuerySendDetails) -> Vec<(String, String)> {
    let mut params = vec![
        (ACTION_FIELD.to_owned(), ACTION.to_owned()),
        (
            RawPhoneNumber::QUERY_FIELD.to_owned(),
            request.phone_number().raw().to_owned(),
        ),
        (
            SendDate::FIELD.to_owned(),
            request.send_date().as_str().to_owned(),
        ),
        (
            PageSize::FIELD.to_owned(),
            request.page_size().value().to_string(),
        ),
        (
            CurrentPage::FIELD.to_owned(),
            request.current_page().value().to_string(),
        ),
    ];

    if let Some(biz_id) = request.biz_id() {
        params.push((BizId::FIELD.to_owned(), biz_id.as_str().to_owned()));
    }

    params
}

pub fn decode_query_send_details_json_response(
    json: &str,
) -> Result<QuerySendDetailsResponse, TransportError> {
    let parsed: QuerySendDetailsJsonResponse = serde_json::from_str(json)?;
    let code = ResponseCode::new(parsed.code);

    let (total_count, details) = if code.is_ok() {
        let details = parsed
            .sms_send_detail_dtos
            .map(|dtos| {
                dtos.sms_send_detail_dto
                    .into_iter()
                    .map(|dto| SendDetail {
                        template_code: dto.template_code,
                        receive_date: dto.receive_date,
                        phone_number: dto.phone_num,
                        content: dto.content,
                        send_status: SendStatusCode::new(dto.send_status),
                        send_date: dto.send_date,
                        err_code: dto.err_code,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let total_count = parsed.total_count.and_then(TransportCount::into_count);
        (total_count, details)
    } else {
        (None, Vec::new())
    };

    Ok(QuerySendDetailsResponse {
        code,
        message: parsed.message,
        request_id: parsed.request_id,
        total_count,
        details,
    })
}
