//! Status handling and bounded body reads for PokeAPI responses.
//!
//! PokeAPI answers an unknown name or id with `404 Not Found` and a short
//! plain-text body; that becomes [`SourceError::Status`] so the pipeline can
//! report the upstream status to the caller. Bodies are read chunk by chunk
//! and never buffered past a fixed cap.

use crate::error::SourceError;

/// Largest successful lookup body accepted. Full pokemon documents are a few
/// hundred kilobytes.
pub const MAX_BODY: usize = 4 * 1024 * 1024;

/// Bytes of a failed lookup's body kept for the error.
const MAX_ERROR_BODY: usize = 512;

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Turn a non-success lookup response into a [`SourceError`].
///
/// `429` becomes [`SourceError::RateLimited`]; every other failure, including
/// the `404` for an unknown pokemon, becomes [`SourceError::Status`] carrying
/// the first [`MAX_ERROR_BODY`] bytes of the body.
pub async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited {
            retry_after_secs: retry_after_secs(&resp),
        });
    }
    let body = error_excerpt(resp).await;
    tracing::debug!(status = status.as_u16(), %body, "PokeAPI lookup failed");
    Err(SourceError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Read a successful body, failing once it passes `limit` bytes.
pub async fn read_body(mut resp: reqwest::Response, limit: usize) -> Result<Vec<u8>, SourceError> {
    let too_large = SourceError::BodyTooLarge { limit };
    let declared = resp.content_length().unwrap_or(0);
    if !usize::try_from(declared).is_ok_and(|len| len <= limit) {
        return Err(too_large);
    }

    let mut body = Vec::with_capacity(usize::try_from(declared).unwrap_or(0));
    while let Some(chunk) = resp.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(too_large);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Up to [`MAX_ERROR_BODY`] bytes of the body as text. Read errors end the
/// excerpt early instead of replacing the status error.
async fn error_excerpt(mut resp: reqwest::Response) -> String {
    let mut bytes = Vec::new();
    while bytes.len() < MAX_ERROR_BODY {
        match resp.chunk().await {
            Ok(Some(chunk)) => {
                let take = chunk.len().min(MAX_ERROR_BODY - bytes.len());
                bytes.extend_from_slice(&chunk[..take]);
            }
            Ok(None) | Err(_) => break,
        }
    }
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}

fn retry_after_secs(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pokeapi_reply(status: u16, headers: &[(&str, &str)], body: impl Into<String>) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        reqwest::Response::from(builder.body(body.into()).unwrap())
    }

    #[tokio::test]
    async fn unknown_pokemon_keeps_404_and_body() {
        let resp = pokeapi_reply(404, &[("content-type", "text/plain")], "Not Found");
        let err = check_status(resp).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.code(), dex_core::errors::ErrorCode::ApiError);
        assert!(
            matches!(&err, SourceError::Status { status: 404, body } if body == "Not Found"),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn upstream_outage_excerpt_stops_at_cap() {
        // Multi-byte characters straddle the cap; the excerpt must stay valid UTF-8.
        let resp = pokeapi_reply(503, &[], "é".repeat(MAX_ERROR_BODY));
        let err = check_status(resp).await.unwrap_err();

        let SourceError::Status { status, body } = err else {
            panic!("expected a status error");
        };
        assert_eq!(status, 503);
        assert!(body.len() <= MAX_ERROR_BODY);
        assert!(body.starts_with("éé"));
    }

    #[tokio::test]
    async fn rate_limit_uses_retry_after() {
        let resp = pokeapi_reply(429, &[("retry-after", "30")], "");
        let err = check_status(resp).await.unwrap_err();
        assert!(matches!(err, SourceError::RateLimited { retry_after_secs: 30 }));
        assert_eq!(err.status(), Some(429));
    }

    #[tokio::test]
    async fn rate_limit_without_usable_retry_after_waits_a_minute() {
        for headers in [&[][..], &[("retry-after", "Wed, 21 Oct 2015 07:28:00 GMT")][..]] {
            let err = check_status(pokeapi_reply(429, headers, "")).await.unwrap_err();
            assert!(matches!(
                err,
                SourceError::RateLimited {
                    retry_after_secs: DEFAULT_RETRY_AFTER_SECS
                }
            ));
        }
    }

    #[tokio::test]
    async fn lookup_body_is_returned_whole_under_the_cap() {
        let doc = r#"{"id":132,"name":"ditto"}"#;
        let resp = check_status(pokeapi_reply(200, &[], doc)).await.unwrap();
        assert_eq!(read_body(resp, MAX_BODY).await.unwrap(), doc.as_bytes());
    }

    #[tokio::test]
    async fn oversized_lookup_body_is_rejected() {
        let resp = pokeapi_reply(200, &[], "x".repeat(64));
        let err = read_body(resp, 16).await.unwrap_err();
        assert!(matches!(err, SourceError::BodyTooLarge { limit: 16 }));
        assert_eq!(err.code(), dex_core::errors::ErrorCode::ApiError);
    }
}
