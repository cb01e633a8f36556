//! Client layer: builds signed request URLs, performs the HTTP call, and maps
//! transport payloads into domain responses.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use reqwest::header::CONTENT_TYPE;
use uuid::Uuid;

use crate::domain::{
    AccessKeyId, AccessKeySecret, QuerySendDetails, QuerySendDetailsResponse, SendSms,
    SendSmsResponse, ValidationError,
};
use crate::signer;

const DEFAULT_ENDPOINT: &str = "https://dysmsapi.aliyuncs.com";

const API_VERSION: &str = "2017-05-25";
const FORMAT: &str = "JSON";
const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const SIGNATURE_VERSION: &str = "1.0";
const HTTP_METHOD: &str = "GET";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            // Dysmsapi expects this header even though a GET carries no body.
            let response = self
                .client
                .get(url)
                .header(CONTENT_TYPE, "application/json")
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Aliyun access key pair used to sign every request.
///
/// Immutable once constructed and owned by the client; the secret never
/// leaves the signing step and is redacted from `Debug` output.
pub struct Credentials {
    access_key_id: AccessKeyId,
    access_key_secret: AccessKeySecret,
}

impl Credentials {
    /// Create validated credentials.
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            access_key_id: AccessKeyId::new(access_key_id)?,
            access_key_secret: AccessKeySecret::new(access_key_secret)?,
        })
    }

    /// The public key identifier sent as `AccessKeyId`.
    pub fn access_key_id(&self) -> &AccessKeyId {
        &self.access_key_id
    }

    fn secret(&self) -> &AccessKeySecret {
        &self.access_key_secret
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`DysmsClient`].
///
/// A remote `Code != "OK"` is deliberately NOT represented here: the API
/// reports business outcomes (throttling, bad template, bad signature) as
/// data, so those come back as a normal response for the caller to inspect.
pub enum DysmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected JSON shape.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[source] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`DysmsClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct DysmsClientBuilder {
    credentials: Credentials,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl DysmsClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the Dysmsapi endpoint URL (e.g. a regional endpoint).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`DysmsClient`].
    pub fn build(self) -> Result<DysmsClient, DysmsError> {
        let endpoint = url::Url::parse(&self.endpoint)
            .map_err(DysmsError::InvalidEndpoint)?
            .to_string();
        let endpoint = endpoint.trim_end_matches('/').to_owned();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| DysmsError::Transport(Box::new(err)))?;

        Ok(DysmsClient {
            credentials: self.credentials,
            endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Dysmsapi client.
///
/// Each call builds a fresh parameter set (timestamp and nonce included),
/// signs it, and performs one GET against the endpoint — no retries, no
/// shared mutable state, so one client can serve concurrent callers.
///
/// By default it talks to `https://dysmsapi.aliyuncs.com`.
pub struct DysmsClient {
    credentials: Credentials,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for DysmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DysmsClient")
            .field("credentials", &self.credentials)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl DysmsClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`DysmsClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> DysmsClientBuilder {
        DysmsClientBuilder::new(credentials)
    }

    /// Submit a templated message to one or more recipients.
    ///
    /// `Ok` with `response.code.is_ok()` means the API accepted the
    /// submission and `biz_id` identifies it; acceptance does not imply
    /// delivery. A non-`OK` code is still `Ok(response)` — check the code.
    ///
    /// Errors:
    /// - [`DysmsError::Transport`] for network failures,
    /// - [`DysmsError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`DysmsError::Parse`] when the body is not the expected JSON.
    pub async fn send_sms(&self, request: SendSms) -> Result<SendSmsResponse, DysmsError> {
        let body = self
            .call(crate::transport::encode_send_sms_params(&request))
            .await?;

        let parsed = crate::transport::decode_send_sms_json_response(&body)
            .map_err(|err| DysmsError::Parse(Box::new(err)))?;

        if !parsed.code.is_ok() {
            tracing::warn!(
                code = parsed.code.as_str(),
                message = %parsed.message,
                request_id = %parsed.request_id,
                "SendSms rejected by Dysmsapi"
            );
        }

        Ok(parsed)
    }

    /// Fetch one page of delivery receipts for a phone number and day.
    ///
    /// On an accepted call, `details` preserves the order the API returned
    /// and `total_count` covers all pages. A non-`OK` code is still
    /// `Ok(response)` with no count and no details.
    ///
    /// Errors: same taxonomy as [`DysmsClient::send_sms`].
    pub async fn query_send_details(
        &self,
        request: QuerySendDetails,
    ) -> Result<QuerySendDetailsResponse, DysmsError> {
        let body = self
            .call(crate::transport::encode_query_send_details_params(&request))
            .await?;

        let parsed = crate::transport::decode_query_send_details_json_response(&body)
            .map_err(|err| DysmsError::Parse(Box::new(err)))?;

        if !parsed.code.is_ok() {
            tracing::warn!(
                code = parsed.code.as_str(),
                message = %parsed.message,
                request_id = %parsed.request_id,
                "QuerySendDetails rejected by Dysmsapi"
            );
        }

        Ok(parsed)
    }

    /// Sign the parameters, perform the GET, and enforce the HTTP-level
    /// success contract. Returns the raw response body.
    async fn call(&self, operation_params: Vec<(String, String)>) -> Result<String, DysmsError> {
        let query = self.signed_query(operation_params);
        let url = format!("{}/?{}", self.endpoint, query);

        let response = self.http.get(&url).await.map_err(DysmsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(DysmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }

    /// Build the full query string: canonical parameters followed by the
    /// `Signature` pair, which is always last and never part of its own
    /// signing input.
    fn signed_query(&self, operation_params: Vec<(String, String)>) -> String {
        let mut params = self.common_params();
        params.extend(operation_params);

        let canonical = signer::canonicalize(&params);
        let string_to_sign = signer::string_to_sign(HTTP_METHOD, &canonical);
        let signature = signer::sign(&string_to_sign, self.credentials.secret().as_str());

        format!(
            "{canonical}&Signature={}",
            signer::percent_encode(&signature)
        )
    }

    /// The fixed RPC parameters present on every call. Timestamp and nonce
    /// are generated fresh here, once per request.
    fn common_params(&self) -> Vec<(String, String)> {
        vec![
            (
                AccessKeyId::FIELD.to_owned(),
                self.credentials.access_key_id().as_str().to_owned(),
            ),
            ("Format".to_owned(), FORMAT.to_owned()),
            ("Version".to_owned(), API_VERSION.to_owned()),
            (
                "Timestamp".to_owned(),
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("SignatureNonce".to_owned(), Uuid::new_v4().to_string()),
            ("SignatureMethod".to_owned(), SIGNATURE_METHOD.to_owned()),
            ("SignatureVersion".to_owned(), SIGNATURE_VERSION.to_owned()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::{
        BizId, CurrentPage, PageSize, RawPhoneNumber, SendDate, SignName, TemplateCode,
        TemplateParam,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_url(&self) -> Option<String> {
            self.state.lock().unwrap().last_url.clone()
        }
    }

    impl HttpTransport for FakeTransport {
        fn get<'a>(
            &'a self,
            url: &'a str,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    fn make_client(transport: FakeTransport) -> DysmsClient {
        DysmsClient {
            credentials: Credentials::new("testid", "testsecret").unwrap(),
            endpoint: "https://example.invalid".to_owned(),
            http: Arc::new(transport),
        }
    }

    fn send_request() -> SendSms {
        SendSms::new(
            vec![
                RawPhoneNumber::new("13800000000").unwrap(),
                RawPhoneNumber::new("13900000000").unwrap(),
            ],
            SignName::new("Acme").unwrap(),
            TemplateCode::new("SMS_153055065").unwrap(),
            Some(TemplateParam::new(r#"{"code":"1234"}"#).unwrap()),
        )
        .unwrap()
    }

    fn query_request() -> QuerySendDetails {
        QuerySendDetails::new(
            RawPhoneNumber::new("13800000000").unwrap(),
            SendDate::new("20240131").unwrap(),
            PageSize::new(10).unwrap(),
            CurrentPage::new(1).unwrap(),
            None,
        )
    }

    fn captured_params(url: &str) -> Vec<(String, String)> {
        url::Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    #[tokio::test]
    async fn send_sms_builds_a_verifiable_signed_url() {
        let json = r#"{"Code":"OK","Message":"OK","RequestId":"r1","BizId":"b1"}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let response = client.send_sms(send_request()).await.unwrap();
        assert!(response.code.is_ok());
        assert_eq!(response.biz_id.as_ref().map(BizId::as_str), Some("b1"));

        let url = transport.last_url().unwrap();
        assert!(url.starts_with("https://example.invalid/?"));

        let params = captured_params(&url);
        assert_param(&params, "AccessKeyId", "testid");
        assert_param(&params, "Action", "SendSms");
        assert_param(&params, "Format", "JSON");
        assert_param(&params, "Version", "2017-05-25");
        assert_param(&params, "SignatureMethod", "HMAC-SHA1");
        assert_param(&params, "SignatureVersion", "1.0");
        assert_param(&params, "PhoneNumbers", "13800000000,13900000000");
        assert_param(&params, "SignName", "Acme");
        assert_param(&params, "TemplateCode", "SMS_153055065");
        assert_param(&params, "TemplateParam", r#"{"code":"1234"}"#);
        assert!(params.iter().any(|(k, _)| k == "Timestamp"));
        assert!(params.iter().any(|(k, _)| k == "SignatureNonce"));

        // The signature must be the last parameter and must verify against
        // the other parameters exactly as sent.
        let (last_key, sent_signature) = params.last().unwrap();
        assert_eq!(last_key, "Signature");

        let unsigned: Vec<(String, String)> = params
            .iter()
            .filter(|(key, _)| key != "Signature")
            .cloned()
            .collect();
        let canonical = signer::canonicalize(&unsigned);
        let expected = signer::sign(&signer::string_to_sign("GET", &canonical), "testsecret");
        assert_eq!(sent_signature, &expected);
    }

    #[tokio::test]
    async fn send_sms_generates_fresh_nonce_per_call() {
        let json = r#"{"Code":"OK","Message":"OK","RequestId":"r1","BizId":"b1"}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        client.send_sms(send_request()).await.unwrap();
        let first = captured_params(&transport.last_url().unwrap());

        client.send_sms(send_request()).await.unwrap();
        let second = captured_params(&transport.last_url().unwrap());

        let nonce = |params: &[(String, String)]| {
            params
                .iter()
                .find(|(key, _)| key == "SignatureNonce")
                .map(|(_, value)| value.clone())
                .unwrap()
        };
        assert_ne!(nonce(&first), nonce(&second));
    }

    #[tokio::test]
    async fn send_sms_returns_remote_rejection_as_data() {
        let json = r#"
        {
          "Code": "isv.BUSINESS_LIMIT_CONTROL",
          "Message": "触发分钟级流控Permits:1",
          "RequestId": "r2"
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport);

        let response = client.send_sms(send_request()).await.unwrap();
        assert!(!response.code.is_ok());
        assert!(response.code.is_throttled());
        assert_eq!(response.request_id, "r2");
        assert_eq!(response.biz_id, None);
    }

    #[tokio::test]
    async fn send_sms_maps_non_success_http_status() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(transport);

        let err = client.send_sms(send_request()).await.unwrap_err();
        assert!(matches!(
            err,
            DysmsError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn send_sms_maps_empty_http_body_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(transport);

        let err = client.send_sms(send_request()).await.unwrap_err();
        assert!(matches!(
            err,
            DysmsError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn send_sms_maps_invalid_json_to_parse_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(transport);

        let err = client.send_sms(send_request()).await.unwrap_err();
        assert!(matches!(err, DysmsError::Parse(_)));
    }

    #[tokio::test]
    async fn query_send_details_builds_signed_url_and_parses_details() {
        let json = r#"
        {
          "Code": "OK",
          "Message": "OK",
          "RequestId": "r1",
          "TotalCount": 1,
          "SmsSendDetailDTOs": {
            "SmsSendDetailDTO": [
              {
                "TemplateCode": "SMS_153055065",
                "ReceiveDate": "2024-01-31 12:00:05",
                "PhoneNum": "13800000000",
                "Content": "[Acme] your code is 1234",
                "SendStatus": 3,
                "SendDate": "2024-01-31 12:00:00",
                "ErrCode": "DELIVERED"
              }
            ]
          }
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let response = client.query_send_details(query_request()).await.unwrap();
        assert!(response.code.is_ok());
        assert_eq!(response.total_count, Some(1));
        assert_eq!(response.details.len(), 1);
        assert_eq!(response.details[0].phone_number, "13800000000");
        assert!(response.details[0].send_status.is_delivered());

        let params = captured_params(&transport.last_url().unwrap());
        assert_param(&params, "Action", "QuerySendDetails");
        assert_param(&params, "PhoneNumber", "13800000000");
        assert_param(&params, "SendDate", "20240131");
        assert_param(&params, "PageSize", "10");
        assert_param(&params, "CurrentPage", "1");

        let unsigned: Vec<(String, String)> = params
            .iter()
            .filter(|(key, _)| key != "Signature")
            .cloned()
            .collect();
        let canonical = signer::canonicalize(&unsigned);
        let expected = signer::sign(&signer::string_to_sign("GET", &canonical), "testsecret");
        assert_param(&params, "Signature", &expected);
    }

    #[tokio::test]
    async fn query_send_details_returns_remote_rejection_as_data() {
        let json = r#"
        {
          "Code": "isv.MOBILE_NUMBER_ILLEGAL",
          "Message": "手机号码格式错误",
          "RequestId": "r2"
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport);

        let response = client.query_send_details(query_request()).await.unwrap();
        assert!(!response.code.is_ok());
        assert_eq!(response.total_count, None);
        assert!(response.details.is_empty());
    }

    #[test]
    fn credentials_constructors_validate_inputs() {
        assert!(Credentials::new("   ", "secret").is_err());
        assert!(Credentials::new("testid", "").is_err());
        assert!(Credentials::new("testid", "testsecret").is_ok());
    }

    #[test]
    fn builder_endpoint_override_is_applied_and_validated() {
        let client = DysmsClient::builder(Credentials::new("testid", "testsecret").unwrap())
            .endpoint("https://dysmsapi.ap-southeast-1.aliyuncs.com/")
            .build()
            .unwrap();
        assert_eq!(client.endpoint, "https://dysmsapi.ap-southeast-1.aliyuncs.com");

        let err = DysmsClient::builder(Credentials::new("testid", "testsecret").unwrap())
            .endpoint("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, DysmsError::InvalidEndpoint(_)));
    }
}
