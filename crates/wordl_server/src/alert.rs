//! Client alert headers.
//!
//! The admin UI shows a toast for every mutation based on two headers:
//!
//! ```text
//! X-wordlApp-alert: wordlApp.categoryWord.created
//! X-wordlApp-params: 1
//! ```
//!
//! Rejected requests carry `X-wordlApp-error: error.<key>` instead.

use crate::error::{ServerError, ServerResult};
use axum::http::header::{HeaderMap, HeaderName, HeaderValue};

/// Builds alert headers for one application name.
#[derive(Debug, Clone)]
pub struct Alerts {
    application: String,
    alert: HeaderName,
    params: HeaderName,
    error: HeaderName,
}

impl Alerts {
    /// Creates alert headers prefixed with `application`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidConfig`] if the name cannot appear in a
    /// header name.
    pub fn new(application: &str) -> ServerResult<Self> {
        let name = |suffix: &str| {
            HeaderName::from_bytes(format!("x-{application}-{suffix}").as_bytes()).map_err(|_| {
                ServerError::InvalidConfig(format!("bad application name: {application:?}"))
            })
        };

        Ok(Self {
            application: application.to_string(),
            alert: name("alert")?,
            params: name("params")?,
            error: name("error")?,
        })
    }

    /// Headers for a created record.
    pub fn created(&self, entity: &str, param: &str) -> HeaderMap {
        self.alert(entity, "created", param)
    }

    /// Headers for an updated record.
    pub fn updated(&self, entity: &str, param: &str) -> HeaderMap {
        self.alert(entity, "updated", param)
    }

    /// Headers for a deleted record.
    pub fn deleted(&self, entity: &str, param: &str) -> HeaderMap {
        self.alert(entity, "deleted", param)
    }

    /// Headers for a rejected request.
    pub fn failure(&self, entity: &str, error_key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(&mut headers, &self.error, &format!("error.{error_key}"));
        insert(&mut headers, &self.params, entity);
        headers
    }

    fn alert(&self, entity: &str, action: &str, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(
            &mut headers,
            &self.alert,
            &format!("{}.{entity}.{action}", self.application),
        );
        insert(&mut headers, &self.params, param);
        headers
    }
}

fn insert(headers: &mut HeaderMap, name: &HeaderName, value: &str) {
    // Values come from entity names and ids; anything else is dropped.
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name.clone(), value);
    }
}
