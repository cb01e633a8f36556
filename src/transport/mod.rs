//! Transport layer: wire-format details (query parameter encoding and JSON
//! response decoding).

mod query_send_details;
mod send_sms;

pub use query_send_details::{
    decode_query_send_details_json_response, encode_query_send_details_params,
};
pub use send_sms::{decode_send_sms_json_response, encode_send_sms_params};

/// Query parameter name carrying the fixed action of each operation.
pub const ACTION_FIELD: &str = "Action";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}
