// src/contact/mod.rs - CONTACT FORM SUBMISSION
pub mod relay;

pub use relay::{FormRelay, HttpRelay};

use crate::core::prelude::*;
use crate::i18n::Resolver;
use serde::Serialize;

pub const REQUIRED_FIELDS: &[&str] = &["name", "email", "message"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Idle,
    Sending,
    Sent,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl FormStatus {
    pub fn idle() -> Self {
        Self {
            kind: StatusKind::Idle,
            message: String::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    action: String,
    contact_email: String,
    fields: Vec<(String, String)>,
    status: FormStatus,
    submitting: bool,
}

impl ContactForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            contact_email: String::new(),
            fields: Vec::new(),
            status: FormStatus::idle(),
            submitting: false,
        }
    }

    /// Address offered in the failure message.
    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = email.into();
        self
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn with_fields(mut self, fields: Vec<(String, String)>) -> Self {
        for (name, value) in fields {
            self.set_field(&name, &value);
        }
        self
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// While true the submit control is disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Clears values, keeps field names.
    pub fn reset(&mut self) {
        for (_, value) in self.fields.iter_mut() {
            value.clear();
        }
    }

    pub fn validate(&self) -> Result<()> {
        for name in REQUIRED_FIELDS {
            if self.value(name).map_or(true, |v| v.trim().is_empty()) {
                return Err(AppError::Validation(format!("Field '{}' is required", name)));
            }
        }
        if let Some(email) = self.value("email") {
            let valid = email
                .trim()
                .split_once('@')
                .is_some_and(|(user, host)| !user.is_empty() && host.contains('.'));
            if !valid {
                return Err(AppError::Validation(format!("Invalid email '{}'", email)));
            }
        }
        Ok(())
    }

    /// Marks the form invalid without contacting the relay.
    pub fn reject(&mut self, resolver: &mut Resolver, lang: Language) -> &FormStatus {
        self.status = FormStatus {
            kind: StatusKind::Error,
            message: resolver.resolve(lang, "contact.status.invalid"),
        };
        &self.status
    }

    /// Sends the form once. Success clears the values; any failure keeps them
    /// for a manual retry and shows the localized error. The submit control
    /// is enabled again in both cases.
    pub async fn submit<R: FormRelay + ?Sized>(
        &mut self,
        relay: &R,
        resolver: &mut Resolver,
        lang: Language,
    ) -> &FormStatus {
        self.submitting = true;
        self.status = FormStatus {
            kind: StatusKind::Sending,
            message: resolver.resolve(lang, "contact.status.sending"),
        };
        log::info!("Submitting contact form to {}", self.action);

        let delivered = match relay.post(&self.action, &self.fields).await {
            Ok(code) if (200..300).contains(&code) => true,
            Ok(code) => {
                log::warn!("Contact relay rejected submission: HTTP {}", code);
                false
            }
            Err(e) => {
                log::warn!("Contact relay unreachable: {}", e);
                false
            }
        };

        self.status = if delivered {
            self.reset();
            FormStatus {
                kind: StatusKind::Sent,
                message: resolver.resolve(lang, "contact.status.sent"),
            }
        } else {
            FormStatus {
                kind: StatusKind::Error,
                message: resolver.resolve_with(
                    lang,
                    "contact.status.error",
                    &[("email", self.contact_email.as_str())],
                ),
            }
        };
        self.submitting = false;
        &self.status
    }
}
