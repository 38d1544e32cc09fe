//! Response classification and decoding.
//!
//! [`classify`] maps a [`RawResponse`] to success or one of the named error
//! classes. It never fails on a well-formed response: an error body that is
//! not JSON still becomes [`Error::HttpError`] with whatever text was sent.

use crate::error::ApiErrorBody;
use crate::rate_limit::RateLimitInfo;
use crate::transport::RawResponse;
use crate::{Error, Result};
use http::StatusCode;
use serde::de::DeserializeOwned;

/// Classifies `response` by status code.
///
/// | Status      | Result                                              |
/// |-------------|-----------------------------------------------------|
/// | 2xx         | `Ok(())`                                            |
/// | 401         | [`Error::AuthenticationRequired`]                   |
/// | 403         | [`Error::InvalidApiKey`]                            |
/// | 429         | [`Error::RateLimitExceeded`]                        |
/// | anything else | [`Error::Api`] if the body is a structured API error, else [`Error::HttpError`] |
///
/// # Examples
///
/// ```
/// use http::{HeaderMap, StatusCode};
/// use srcom::transport::RawResponse;
/// use srcom::{validate, Error};
///
/// let response = RawResponse {
///     status: StatusCode::NOT_FOUND,
///     headers: HeaderMap::new(),
///     body: br#"{"status": 404, "message": "Game not found."}"#.to_vec(),
/// };
///
/// match validate::classify(&response) {
///     Err(Error::Api(body)) => assert_eq!(body.message, "Game not found."),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
pub fn classify(response: &RawResponse) -> Result<()> {
    let status = response.status;
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(Error::AuthenticationRequired),
        StatusCode::FORBIDDEN => Err(Error::InvalidApiKey),
        StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimitExceeded {
            rate_limit: RateLimitInfo::from_headers(&response.headers),
        }),
        _ => match serde_json::from_slice::<ApiErrorBody>(&response.body) {
            Ok(body) => Err(Error::Api(body)),
            Err(_) => {
                let text = response.text();
                Err(Error::HttpError {
                    status,
                    message: (!text.is_empty()).then_some(text),
                })
            }
        },
    }
}

/// Decodes a successful body into `T`.
///
/// Failures keep both the decoder message and the raw body.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Decoding {
        message: e.to_string(),
        raw_response: String::from_utf8_lossy(body).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Data;
    use http::HeaderMap;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn every_2xx_is_success() {
        for status in [200, 201, 204, 299] {
            assert!(classify(&response(status, "")).is_ok(), "status {status}");
        }
    }

    #[test]
    fn auth_and_rate_limit_statuses_are_named() {
        assert!(matches!(
            classify(&response(401, "{}")),
            Err(Error::AuthenticationRequired)
        ));
        assert!(matches!(
            classify(&response(403, "")),
            Err(Error::InvalidApiKey)
        ));
        assert!(matches!(
            classify(&response(429, "slow down")),
            Err(Error::RateLimitExceeded { .. })
        ));
    }

    #[test]
    fn named_statuses_win_over_structured_bodies() {
        let body = r#"{"status": 401, "message": "You must authenticate."}"#;
        assert!(matches!(
            classify(&response(401, body)),
            Err(Error::AuthenticationRequired)
        ));
    }

    #[test]
    fn rate_limit_headers_are_captured() {
        let mut raw = response(429, "");
        raw.headers.insert("retry-after", "30".parse().unwrap());

        match classify(&raw) {
            Err(Error::RateLimitExceeded { rate_limit }) => {
                assert_eq!(
                    rate_limit.retry_after,
                    Some(std::time::Duration::from_secs(30))
                );
            }
            other => panic!("expected RateLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn structured_error_body() {
        let body = r#"{
            "status": 400,
            "message": "The submitted run is invalid.",
            "errors": ["times: at least one time is required"],
            "links": [{"rel": "support", "uri": "https://github.com/speedruncomorg/api/issues"}]
        }"#;

        match classify(&response(400, body)) {
            Err(Error::Api(api)) => {
                assert_eq!(api.status, 400);
                assert_eq!(api.errors.unwrap().len(), 1);
                assert_eq!(api.links.unwrap()[0].rel.as_deref(), Some("support"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn unstructured_bodies_fall_back_to_http_error() {
        match classify(&response(502, "<html>Bad Gateway</html>")) {
            Err(Error::HttpError { status, message }) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(message.as_deref(), Some("<html>Bad Gateway</html>"));
            }
            other => panic!("expected HttpError, got {other:?}"),
        }

        match classify(&response(500, "")) {
            Err(Error::HttpError { message, .. }) => assert_eq!(message, None),
            other => panic!("expected HttpError, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_error_body_is_lossy() {
        let raw = RawResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            headers: HeaderMap::new(),
            body: vec![0x66, 0x6f, 0xff, 0x6f],
        };
        match classify(&raw) {
            Err(Error::HttpError { message, .. }) => {
                assert_eq!(message.as_deref(), Some("fo\u{fffd}o"));
            }
            other => panic!("expected HttpError, got {other:?}"),
        }
    }

    #[test]
    fn decode_failure_keeps_raw_body() {
        let err = decode::<Data<u32>>(br#"{"data": "#).unwrap_err();
        match err {
            Error::Decoding {
                message,
                raw_response,
            } => {
                assert!(message.contains("EOF"));
                assert_eq!(raw_response, r#"{"data": "#);
            }
            other => panic!("expected Decoding, got {other:?}"),
        }
    }
}
