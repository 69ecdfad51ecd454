//! HTTP response status handling for archive downloads.

use crate::error::FetchError;

/// Longest response body kept in a status error message.
const MAX_ERROR_BODY: usize = 512;

/// Return the response unchanged on success, otherwise [`FetchError::Status`]
/// with the status code and a truncated response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let url = resp.url().to_string();
    let mut message = resp.text().await.unwrap_or_default();
    if message.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        message.truncate(cut);
    }

    Err(FetchError::Status {
        url,
        status: status.as_u16(),
        message,
    })
}
