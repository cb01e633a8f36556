use std::io;

use dysms::{Credentials, DysmsClient, RawPhoneNumber, SendSms, SignName, TemplateCode, TemplateParam};

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
    let sign_name = std::env::var("DYSMS_SIGN_NAME").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "DYSMS_SIGN_NAME environment variable is required",
        )
    })?;
    let template_code = std::env::var("DYSMS_TEMPLATE_CODE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "DYSMS_TEMPLATE_CODE environment variable is required",
        )
    })?;
    let template_param = std::env::var("DYSMS_TEMPLATE_PARAM").ok();

    let client = DysmsClient::new(Credentials::new(key_id, key_secret)?);
    let request = SendSms::to_one(
        RawPhoneNumber::new(phone_raw)?,
        SignName::new(sign_name)?,
        TemplateCode::new(template_code)?,
        template_param.map(TemplateParam::new).transpose()?,
    )?;

    let response = client.send_sms(request).await?;
    println!(
        "code: {}, message: {}, request_id: {}, biz_id: {:?}",
        response.code.as_str(),
        response.message,
        response.request_id,
        response.biz_id
    );

    Ok(())
}
