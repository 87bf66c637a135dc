//! Environment configuration
//!
//! All configuration is environment-variable based. `CLIENT_ID`,
//! `CLIENT_SECRET`, and `MONGO_URI` are required and missing values are
//! fatal at startup. The redirect URI defaults to the local callback for
//! the configured port; deployments behind a public hostname override it
//! with `REDIRECT_URI`.

use common::{Error, Result, Secret};
use hubspot_auth::{DEFAULT_SCOPE, normalize_scopes};

/// Default HTTP port, matching the registered local callback.
const DEFAULT_PORT: u16 = 3000;

/// Default database name for the `tokens` collection.
const DEFAULT_DB_NAME: &str = "hubspot_oauth";

/// Service configuration resolved from the environment.
#[derive(Debug)]
pub struct Config {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub mongo_uri: Secret<String>,
    pub db_name: String,
    /// Space-delimited, already normalized
    pub scope: String,
    pub port: u16,
    pub redirect_uri: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let client_id = required("CLIENT_ID")?;
        let client_secret =
            Secret::from_env("CLIENT_SECRET").ok_or(Error::MissingEnv("CLIENT_SECRET"))?;
        let mongo_uri = Secret::from_env("MONGO_URI").ok_or(Error::MissingEnv("MONGO_URI"))?;

        let db_name = optional("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let scope = match optional("SCOPE") {
            Some(raw) => {
                let scope = normalize_scopes(&raw);
                if scope.is_empty() {
                    return Err(Error::Config("SCOPE must not be empty".into()));
                }
                scope
            }
            None => DEFAULT_SCOPE.to_string(),
        };

        let port = match optional("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got: {raw}")))?,
            None => DEFAULT_PORT,
        };

        let redirect_uri = optional("REDIRECT_URI")
            .unwrap_or_else(|| format!("http://localhost:{port}/oauth-callback"));

        Ok(Self {
            client_id,
            client_secret,
            mongo_uri,
            db_name,
            scope,
            port,
            redirect_uri,
        })
    }
}

fn required(var: &'static str) -> Result<String> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(Error::MissingEnv(var))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize tests that mutate environment variables, preventing
    /// data races when tests run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// SAFETY: Callers must hold ENV_MUTEX to prevent concurrent env mutation.
    unsafe fn set_env(key: &str, val: &str) {
        unsafe { std::env::set_var(key, val) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    /// Reset to a minimal valid environment.
    unsafe fn set_required() {
        unsafe {
            set_env("CLIENT_ID", "client-1");
            set_env("CLIENT_SECRET", "secret-1");
            set_env("MONGO_URI", "mongodb://localhost:27017");
            for var in ["DB_NAME", "SCOPE", "PORT", "REDIRECT_URI"] {
                remove_env(var);
            }
        }
    }

    #[test]
    fn defaults_apply_when_optionals_unset() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_required() };

        let config = Config::from_env().unwrap();
        assert_eq!(config.client_id, "client-1");
        assert_eq!(config.client_secret.expose(), "secret-1");
        assert_eq!(config.db_name, "hubspot_oauth");
        assert_eq!(config.scope, "crm.objects.contacts.read");
        assert_eq!(config.port, 3000);
        assert_eq!(config.redirect_uri, "http://localhost:3000/oauth-callback");
    }

    #[test]
    fn missing_required_var_names_the_variable() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_required() };
        unsafe { remove_env("CLIENT_ID") };

        let err = Config::from_env().unwrap_err();
        assert!(
            err.to_string().contains("CLIENT_ID"),
            "error must name the missing variable, got: {err}"
        );
    }

    #[test]
    fn blank_required_var_counts_as_missing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_required() };
        unsafe { set_env("CLIENT_SECRET", "   ") };

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("CLIENT_SECRET"));
    }

    #[test]
    fn scope_is_normalized_from_delimited_lists() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_required() };
        unsafe { set_env("SCOPE", "crm.objects.contacts.read,crm.objects.deals.read") };

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.scope,
            "crm.objects.contacts.read crm.objects.deals.read"
        );
    }

    #[test]
    fn percent_encoded_scope_is_normalized() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_required() };
        unsafe { set_env("SCOPE", "a.read%20b.read") };

        let config = Config::from_env().unwrap();
        assert_eq!(config.scope, "a.read b.read");
    }

    #[test]
    fn custom_port_feeds_default_redirect_uri() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_required() };
        unsafe { set_env("PORT", "8088") };

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8088);
        assert_eq!(config.redirect_uri, "http://localhost:8088/oauth-callback");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_required() };
        unsafe { set_env("PORT", "not-a-port") };

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn redirect_uri_override_wins_over_port_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_required() };
        unsafe {
            set_env("PORT", "8088");
            set_env("REDIRECT_URI", "https://app.example.com/oauth-callback");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.redirect_uri, "https://app.example.com/oauth-callback");
    }

    #[test]
    fn custom_db_name_is_used() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_required() };
        unsafe { set_env("DB_NAME", "install_flow") };

        let config = Config::from_env().unwrap();
        assert_eq!(config.db_name, "install_flow");
    }
}
