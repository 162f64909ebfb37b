// src/server/cookies.rs - PREFERENCES CARRIED IN COOKIES
use crate::core::constants::{STORAGE_KEY_ACCENT, STORAGE_KEY_LANG, STORAGE_KEY_THEME};
use crate::lang::PreferenceStore;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};
use std::collections::BTreeMap;

pub const PREFERENCE_KEYS: &[&str] = &[STORAGE_KEY_THEME, STORAGE_KEY_ACCENT, STORAGE_KEY_LANG];
const MAX_AGE_DAYS: i64 = 365;

/// Reads preference cookies from the request; changed values are written
/// back as `Set-Cookie` on the response.
#[derive(Debug, Default, Clone)]
pub struct CookieStore {
    values: BTreeMap<String, String>,
    changed: BTreeMap<String, String>,
}

impl CookieStore {
    pub fn from_request(req: &HttpRequest) -> Self {
        let values = PREFERENCE_KEYS
            .iter()
            .filter_map(|&key| req.cookie(key).map(|c| (key.to_string(), c.value().to_string())))
            .collect();
        Self {
            values,
            changed: BTreeMap::new(),
        }
    }

    pub fn apply(&self, response: &mut HttpResponseBuilder) {
        for (key, value) in &self.changed {
            response.cookie(
                Cookie::build(key.clone(), value.clone())
                    .path("/")
                    .same_site(SameSite::Lax)
                    .max_age(CookieDuration::days(MAX_AGE_DAYS))
                    .finish(),
            );
        }
    }
}

impl PreferenceStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.values.get(key).map(String::as_str) != Some(value) {
            self.values.insert(key.to_string(), value.to_string());
            self.changed.insert(key.to_string(), value.to_string());
        }
    }
}
