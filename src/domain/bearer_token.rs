use secrecy::{ExposeSecret, Secret};

/// Credential returned by a successful login.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(transparent)]
pub struct BearerToken(Secret<String>);

impl BearerToken {
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
