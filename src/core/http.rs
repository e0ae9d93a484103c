use std::time::Duration;

use reqwest::{
    Client,
    Response,
};

use crate::core::HanasuError;

pub fn http_client() -> Result<Client, HanasuError> {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .map_err(|e| HanasuError::Custom(format!("HTTP client build failed: {e}")))
}

/// GET a URL and return the body as text. Non-success responses surface
/// the status text rather than the body.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, HanasuError> {
    let resp = client.get(url).send().await?;
    let resp = ensure_success(resp)?;
    Ok(resp.text().await?)
}

pub fn ensure_success(resp: Response) -> Result<Response, HanasuError> {
    if !resp.status().is_success() {
        return Err(HanasuError::Http {
            status: resp.status().to_string(),
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}
