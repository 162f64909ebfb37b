// src/contact/relay.rs
use crate::core::constants::VERSION;
use crate::core::prelude::*;
use std::future::Future;
use std::pin::Pin;

pub type RelayFuture<'a> = Pin<Box<dyn Future<Output = Result<u16>> + Send + 'a>>;

/// Delivers form fields to a third-party endpoint and reports the HTTP status.
/// Transport failures are errors; any status code is a response.
pub trait FormRelay: Send + Sync {
    fn post<'a>(&'a self, endpoint: &'a str, fields: &'a [(String, String)]) -> RelayFuture<'a>;
}

/// Form-encoded POST with `Accept: application/json`. One attempt, no retry.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: reqwest::Client,
}

impl HttpRelay {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("portfolio-i18n/{}", VERSION))
            .build()
            .map_err(|e| AppError::Relay(e.to_string()))?;
        Ok(Self { client })
    }
}

impl FormRelay for HttpRelay {
    fn post<'a>(&'a self, endpoint: &'a str, fields: &'a [(String, String)]) -> RelayFuture<'a> {
        Box::pin(async move {
            let response = self
                .client
                .post(endpoint)
                .header(reqwest::header::ACCEPT, "application/json")
                .form(fields)
                .send()
                .await
                .map_err(|e| AppError::Relay(e.to_string()))?;

            let status = response.status();
            log::debug!("Form relay {} answered {}", endpoint, status);
            Ok(status.as_u16())
        })
    }
}
