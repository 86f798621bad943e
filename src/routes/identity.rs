//! Caller identification for mutating endpoints.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

const IDENTITY_HEADER: &str = "x-jury-id";
const IDENTITY_COOKIE: &str = "jury_id";

/// Identity of the jury member or organizer making the request.
///
/// Resolved from the `x-jury-id` header, falling back to the `jury_id`
/// cookie set by the dashboard frontend. Requests without either are
/// rejected with 401 before any handler runs.
#[derive(Debug, Clone)]
pub struct JuryIdentity(pub String);

impl<S> FromRequestParts<S> for JuryIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(value) = header_value(parts, IDENTITY_HEADER) {
            return Ok(JuryIdentity(value));
        }
        if let Some(value) = cookie_value(parts, IDENTITY_COOKIE) {
            return Ok(JuryIdentity(value));
        }
        Err(AppError::Unauthorized("missing jury identity".into()))
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    let header = parts.headers.get(axum::http::header::COOKIE)?;
    let raw = header.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_owned())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with(header: &str, value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .header(header, value)
            .body(())
            .expect("request")
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn header_wins_over_cookie_and_blank_values_are_rejected() {
        let mut parts = parts_with(IDENTITY_HEADER, "3");
        let identity = JuryIdentity::from_request_parts(&mut parts, &())
            .await
            .expect("identity");
        assert_eq!(identity.0, "3");

        let mut parts = parts_with("cookie", "theme=dark; jury_id=5");
        let identity = JuryIdentity::from_request_parts(&mut parts, &())
            .await
            .expect("identity");
        assert_eq!(identity.0, "5");

        let mut parts = parts_with("cookie", "jury_id=");
        assert!(
            JuryIdentity::from_request_parts(&mut parts, &())
                .await
                .is_err()
        );
    }
}
