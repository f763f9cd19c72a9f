use crate::clients::errors::{Error, Result};

/// Environment variable holding the Spotify application client id.
pub const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
/// Environment variable holding the Spotify application client secret.
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";
/// Environment variable holding the OAuth redirect URI.
pub const REDIRECT_URI_VAR: &str = "SPOTIFY_REDIRECT_URI";
/// Environment variable holding the account that will own the playlist.
pub const USERNAME_VAR: &str = "SPOTIFY_USERNAME";

/// Credentials and account settings, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub username: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("username", &self.username)
            .finish()
    }
}

impl Config {
    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Every value is required. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    Error::ConfigurationError(format!(
                        "Missing {key} in environment variables. Check README.MD for details."
                    ))
                })
        };

        Ok(Config {
            client_id: require(CLIENT_ID_VAR)?,
            client_secret: require(CLIENT_SECRET_VAR)?,
            redirect_uri: require(REDIRECT_URI_VAR)?,
            username: require(USERNAME_VAR)?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (CLIENT_ID_VAR, "client-id".to_string()),
            (CLIENT_SECRET_VAR, "client-secret".to_string()),
            (REDIRECT_URI_VAR, "http://127.0.0.1:8888/callback".to_string()),
            (USERNAME_VAR, "listener".to_string()),
        ])
    }

    pub(crate) fn test_config() -> Config {
        let env = full_env();
        Config::from_lookup(|k| env.get(k).cloned()).unwrap()
    }

    #[test]
    fn test_from_lookup_reads_all_values() {
        let config = test_config();
        assert_eq!(config.client_id, "client-id");
        assert_eq!(config.client_secret, "client-secret");
        assert_eq!(config.redirect_uri, "http://127.0.0.1:8888/callback");
        assert_eq!(config.username, "listener");
    }

    #[test]
    fn test_each_missing_value_is_a_configuration_error() {
        for missing in [CLIENT_ID_VAR, CLIENT_SECRET_VAR, REDIRECT_URI_VAR, USERNAME_VAR] {
            let mut env = full_env();
            env.remove(missing);
            let err = Config::from_lookup(|k| env.get(k).cloned()).unwrap_err();
            match err {
                Error::ConfigurationError(msg) => assert!(msg.contains(missing), "{msg}"),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_blank_value_is_missing() {
        let mut env = full_env();
        env.insert(USERNAME_VAR, "   ".to_string());
        assert!(matches!(
            Config::from_lookup(|k| env.get(k).cloned()),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("client-secret"));
        assert!(rendered.contains("listener"));
    }
}
