//! Client credentials for the ad service, loaded from a `.env` file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

/// Env key holding the OAuth client id.
pub const CLIENT_ID_KEY: &str = "ADCRAFT_CLIENT_ID";

/// Env key holding the OAuth client secret.
pub const CLIENT_SECRET_KEY: &str = "ADCRAFT_CLIENT_SECRET";

/// Client id used when none is configured; accepted by the mock service.
const DEMO_CLIENT_ID: &str = "demo_client";

/// Client secret used when none is configured; accepted by the mock service.
const DEMO_CLIENT_SECRET: &str = "demo_secret";

/// OAuth client credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl ClientCredentials {
    /// Demo credentials for running against the mock service.
    pub fn demo() -> Self {
        Self {
            client_id: DEMO_CLIENT_ID.to_owned(),
            client_secret: DEMO_CLIENT_SECRET.to_owned(),
        }
    }

    /// Resolve credentials from key-value sources in priority order.
    ///
    /// Each key is taken from the first source that has a non-blank value;
    /// missing keys fall back to the demo credentials.
    pub fn resolve(sources: &[&BTreeMap<String, String>]) -> Self {
        let lookup = |key: &str| {
            sources
                .iter()
                .find_map(|vars| vars.get(key).filter(|v| !v.trim().is_empty()).cloned())
        };
        let demo = Self::demo();
        Self {
            client_id: lookup(CLIENT_ID_KEY).unwrap_or(demo.client_id),
            client_secret: lookup(CLIENT_SECRET_KEY).unwrap_or(demo.client_secret),
        }
    }
}

/// Read every key-value pair from a `.env` file.
///
/// A missing file yields an empty map.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn read_env_file(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let mut vars = BTreeMap::new();
    if !path.exists() {
        debug!(path = %path.display(), "no credentials file");
        return Ok(vars);
    }

    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("failed to read credentials at {}", path.display()))?;
    for item in iter {
        let (key, value) = item.with_context(|| {
            format!(
                "failed to parse key-value entry in credentials file {}",
                path.display()
            )
        })?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Load client credentials: `.env` file first, then the process environment.
///
/// # Errors
///
/// Returns an error if the `.env` file exists but is malformed.
pub fn load_client_credentials(env_file: &Path) -> anyhow::Result<ClientCredentials> {
    let file_vars = read_env_file(env_file)?;
    let process_vars: BTreeMap<String, String> = [CLIENT_ID_KEY, CLIENT_SECRET_KEY]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_owned(), v)))
        .collect();
    Ok(ClientCredentials::resolve(&[&file_vars, &process_vars]))
}
