use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://localhost:5001/".to_string()
}
fn default_api_version() -> String {
    "api/v1/".to_string()
}
fn default_client_id() -> String {
    "spa".to_string()
}
fn default_scope() -> String {
    "api offline_access".to_string()
}
fn default_timeout() -> u64 {
    30
}

/// Top-level access-layer configuration.
///
/// `endpoint` and `api_version` must keep their trailing slash; absolute
/// URLs are built by plain concatenation (`endpoint + api_version + path`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API host, e.g. `https://api.example.com/`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Versioned resource prefix appended to the endpoint.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// OAuth client identifier for the password/refresh grants.
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Scope requested at login.
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            client_id: default_client_id(),
            client_secret: String::new(),
            scope: default_scope(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Absolute URL for a relative resource path.
    #[must_use]
    pub fn resource_url(&self, path: &str) -> String {
        format!("{}{}{}", self.endpoint, self.api_version, path)
    }

    /// Absolute URL of the identity endpoint.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}connect/token", self.endpoint)
    }

    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(ApiConfig::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from a file path, merged with defaults and
    /// `APIBRIDGE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &std::path::Path) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Env, Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(ApiConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("APIBRIDGE_"))
            .extract()
    }
}
