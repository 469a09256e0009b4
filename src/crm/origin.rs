//! Backend origin resolution.
//!
//! The origin is looked up on every request rather than captured when the
//! client is built, so the value can change under a running process.

pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

pub trait OriginSource: Send + Sync {
    fn origin(&self) -> Option<String>;
}

impl<F> OriginSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn origin(&self) -> Option<String> {
        self()
    }
}

/// Reads the origin from the process environment.
#[derive(Debug, Clone)]
pub struct EnvOrigin {
    pub keys: Vec<&'static str>,
}

impl Default for EnvOrigin {
    fn default() -> Self {
        Self {
            keys: vec!["API_URL", "VITE_API_URL"],
        }
    }
}

impl OriginSource for EnvOrigin {
    fn origin(&self) -> Option<String> {
        self.keys
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct FixedOrigin(pub String);

impl OriginSource for FixedOrigin {
    fn origin(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

pub fn resolve(source: &dyn OriginSource) -> String {
    let origin = source
        .origin()
        .filter(|origin| !origin.is_empty())
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_owned());
    origin.trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_local_default() {
        let unset = || None;
        assert_eq!(resolve(&unset), DEFAULT_ORIGIN);

        let empty = || Some(String::new());
        assert_eq!(resolve(&empty), DEFAULT_ORIGIN);
    }

    #[test]
    fn trims_trailing_slash() {
        let origin = FixedOrigin("https://crm.example.com/".into());
        assert_eq!(resolve(&origin), "https://crm.example.com");
    }

    #[test]
    fn env_origin_prefers_first_set_key() {
        let origin = EnvOrigin {
            keys: vec!["CRM_ADMIN_TEST_UNSET_ORIGIN", "CRM_ADMIN_TEST_ORIGIN"],
        };
        std::env::set_var("CRM_ADMIN_TEST_ORIGIN", "http://backend:4000");
        assert_eq!(resolve(&origin), "http://backend:4000");
        std::env::remove_var("CRM_ADMIN_TEST_ORIGIN");
        assert_eq!(resolve(&origin), DEFAULT_ORIGIN);
    }
}
