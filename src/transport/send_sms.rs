use serde::Deserialize;

use super::{ACTION_FIELD, TransportError};
use crate::domain::{
    BizId, RawPhoneNumber, ResponseCode, SendSms, SendSmsResponse, SignName, TemplateCode,
    TemplateParam,
};

const ACTION: &str = "SendSms";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendSmsJsonResponse {
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    request_id: String,
    #[serde(default)]
    biz_id: Option<String>,
}

pub fn encode_send_sms_params(request: &SendSms) -> Vec<(String, String)> {
    let mut params = vec![
        (ACTION_FIELD.to_owned(), ACTION.to_owned()),
        (
            RawPhoneNumber::SEND_FIELD.to_owned(),
            request
                .phone_numbers()
                .iter()
                .map(RawPhoneNumber::raw)
                .collect::<Vec<_>>()
                .join(","),
        ),
        (
            SignName::FIELD.to_owned(),
            request.sign_name().as_str().to_owned(),
        ),
        (
            TemplateCode::FIELD.to_owned(),
            request.template_code().as_str().to_owned(),
        ),
    ];

    if let Some(template_param) = request.template_param() {
        params.push((
            TemplateParam::FIELD.to_owned(),
            template_param.as_str().to_owned(),
        ));
    }

    params
}

pub fn decode_send_sms_json_response(json: &str) -> Result<SendSmsResponse, TransportError> {
    let parsed: SendSmsJsonResponse = serde_json::from_str(json)?;
    let code = ResponseCode::new(parsed.code);

    // Only an accepted call carries a receipt id; blank values are treated
    // as absent rather than rejected.
    let biz_id = if code.is_ok() {
        parsed.biz_id.and_then(|value| BizId::new(value).ok())
    } else {
        None
    };

    Ok(SendSmsResponse {
        code,
        message: parsed.message,
        request_id: parsed.request_id,
        biz_id,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::SignName;

    use super::*;

    fn request(template_param: Option<&str>) -> SendSms {
        SendSms::new(
            vec![
                RawPhoneNumber::new("13800000000").unwrap(),
                RawPhoneNumber::new("13900000000").unwrap(),
            ],
            SignName::new("Acme").unwrap(),
            TemplateCode::new("SMS_153055065").unwrap(),
            template_param.map(|raw| TemplateParam::new(raw).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn encode_send_sms_joins_phone_numbers_with_commas() {
        let params = encode_send_sms_params(&request(Some(r#"{"code":"1234"}"#)));
        assert_eq!(
            params,
            vec![
                ("Action".to_owned(), "SendSms".to_owned()),
                (
                    "PhoneNumbers".to_owned(),
                    "13800000000,13900000000".to_owned()
                ),
                ("SignName".to_owned(), "Acme".to_owned()),
                ("TemplateCode".to_owned(), "SMS_153055065".to_owned()),
                ("TemplateParam".to_owned(), r#"{"code":"1234"}"#.to_owned()),
            ]
        );
    }

    #[test]
    fn encode_send_sms_omits_absent_template_param() {
        let params = encode_send_sms_params(&request(None));
        assert!(!params.iter().any(|(key, _)| key == "TemplateParam"));
    }

    #[test]
    fn decode_accepted_response_carries_biz_id() {
        let json = r#"{"Code":"OK","Message":"OK","RequestId":"r1","BizId":"b1"}"#;
        let response = decode_send_sms_json_response(json).unwrap();
        assert!(response.code.is_ok());
        assert_eq!(response.message, "OK");
        assert_eq!(response.request_id, "r1");
        assert_eq!(response.biz_id.as_ref().map(BizId::as_str), Some("b1"));
    }

    #[test]
    fn decode_rejected_response_has_no_biz_id() {
        let json = r#"
        {
          "Code": "isv.BUSINESS_LIMIT_CONTROL",
          "Message": "触发分钟级流控Permits:1",
          "RequestId": "r2"
        }
        "#;
        let response = decode_send_sms_json_response(json).unwrap();
        assert!(!response.code.is_ok());
        assert_eq!(response.code.as_str(), "isv.BUSINESS_LIMIT_CONTROL");
        assert_eq!(response.request_id, "r2");
        assert_eq!(response.biz_id, None);
    }

    #[test]
    fn decode_accepted_response_without_biz_id_stays_absent() {
        let json = r#"{"Code":"OK","Message":"OK","RequestId":"r3"}"#;
        let response = decode_send_sms_json_response(json).unwrap();
        assert!(response.code.is_ok());
        assert_eq!(response.biz_id, None);
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let err = decode_send_sms_json_response("{ not json }").unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }
}
