//! Authorization for the scheduled-publish trigger.
//!
//! Outside production every caller is trusted. In production the request
//! must carry the scheduler's marker header or the configured shared secret
//! as a bearer token. This is a best-effort gate, not authentication.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::CronError;
use crate::state::AppState;

/// Header the external scheduler attaches to its invocations.
pub const CRON_TRIGGER_HEADER: &str = "x-cron-trigger";

/// Marker extractor: present only when the trigger is authorized.
#[derive(Debug, Clone, Copy)]
pub struct CronTrigger;

impl FromRequestParts<AppState> for CronTrigger {
    type Rejection = CronError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let config = &state.config;
        if is_authorized_trigger(
            &parts.headers,
            config.is_production(),
            config.cron_secret.as_deref(),
        ) {
            Ok(CronTrigger)
        } else {
            tracing::warn!("Rejected unauthorized cron trigger");
            Err(CronError::Unauthorized)
        }
    }
}

/// Decide whether a trigger request may run the publisher.
pub fn is_authorized_trigger(
    headers: &HeaderMap,
    is_production: bool,
    cron_secret: Option<&str>,
) -> bool {
    if !is_production {
        return true;
    }

    if headers.contains_key(CRON_TRIGGER_HEADER) {
        return true;
    }

    match cron_secret {
        Some(secret) => headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == secret),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn development_trusts_everyone() {
        assert!(is_authorized_trigger(&HeaderMap::new(), false, None));
        assert!(is_authorized_trigger(&HeaderMap::new(), false, Some("s3cret")));
    }

    #[test]
    fn production_rejects_bare_request() {
        assert!(!is_authorized_trigger(&HeaderMap::new(), true, None));
        assert!(!is_authorized_trigger(&HeaderMap::new(), true, Some("s3cret")));
    }

    #[test]
    fn production_accepts_marker_header() {
        let h = headers(&[(CRON_TRIGGER_HEADER, "1")]);
        assert!(is_authorized_trigger(&h, true, None));
    }

    #[test]
    fn production_accepts_matching_secret() {
        let h = headers(&[("authorization", "Bearer s3cret")]);
        assert!(is_authorized_trigger(&h, true, Some("s3cret")));
    }

    #[test]
    fn production_rejects_wrong_secret() {
        let h = headers(&[("authorization", "Bearer nope")]);
        assert!(!is_authorized_trigger(&h, true, Some("s3cret")));
    }

    #[test]
    fn bearer_is_ignored_without_configured_secret() {
        let h = headers(&[("authorization", "Bearer anything")]);
        assert!(!is_authorized_trigger(&h, true, None));
    }
}
