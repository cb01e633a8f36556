use std::io;

use dysms::{BizId, Credentials, CurrentPage, DysmsClient, PageSize, QuerySendDetails, RawPhoneNumber, SendDate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let key_id = std::env::var("DYSMS_ACCESS_KEY_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "DYSMS_ACCESS_KEY_ID environment variable is required",
        )
    })?;
    let key_secret = std::env::var("DYSMS_ACCESS_KEY_SECRET").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "DYSMS_ACCESS_KEY_SECRET environment variable is required",
        )
    })?;
    let phone_raw = std::env::var("DYSMS_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "DYSMS_PHONE environment variable is required",
        )
    })?;
    let send_date = std::env::var("DYSMS_SEND_DATE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "DYSMS_SEND_DATE environment variable is required (YYYYMMDD)",
        )
    })?;
    let biz_id = std::env::var("DYSMS_BIZ_ID").ok();

    let client = DysmsClient::new(Credentials::new(key_id, key_secret)?);
    let request = QuerySendDetails::new(
        RawPhoneNumber::new(phone_raw)?,
        SendDate::new(send_date)?,
        PageSize::new(10)?,
        CurrentPage::new(1)?,
        biz_id.map(BizId::new).transpose()?,
    );

    let response = client.query_send_details(request).await?;
    println!(
        "code: {}, message: {}, total_count: {:?}",
        response.code.as_str(),
        response.message,
        response.total_count
    );
    for detail in &response.details {
        println!(
            "  {} status={:?} sent={:?} received={:?} err={:?}",
            detail.phone_number,
            detail.send_status.known_kind(),
            detail.send_date,
            detail.receive_date,
            detail.err_code
        );
    }

    Ok(())
}
