use std::any::Any;

use tablero_states::{State, state_assign_impl};
use ustr::Ustr;

/// Backend location, stored in `StateCtx` so commands can read it from their
/// snapshot instead of reaching for globals.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
        }
    }

    /// Canonical base for API calls. Empty base means same-origin (web builds
    /// served next to the backend).
    pub fn api_url(&self) -> Ustr {
        Ustr::from(self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else {
                "http://localhost:3000".to_string()
            },
        }
    }
}

impl State for AppConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_strips_trailing_slash() {
        let config = AppConfig::new("http://localhost:3000/");
        assert_eq!(config.api_url(), Ustr::from("http://localhost:3000"));
    }

    #[test]
    fn empty_base_means_same_origin() {
        let config = AppConfig::new("");
        assert_eq!(config.api_url(), Ustr::from(""));
    }
}
