use crate::domain::ReservedDomain;
use validator::ValidateEmail;

/// An address the pre-suite cleanup is guaranteed to reach.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct SyntheticEmail(String);

impl SyntheticEmail {
    pub fn parse(s: String, domain: &ReservedDomain) -> Result<SyntheticEmail, String> {
        if !s.validate_email() {
            return Err(format!("{} is not a valid email address.", s));
        }
        if !domain.owns(&s) {
            return Err(format!("{} is not under the reserved domain {}.", s, domain));
        }
        Ok(Self(s))
    }

    /// Builds `local@domain` without re-validating. `local` must be a
    /// non-empty run of ASCII alphanumerics and dots.
    pub(crate) fn from_local_part(local: &str, domain: &ReservedDomain) -> SyntheticEmail {
        Self(format!("{}@{}", local, domain))
    }
}

impl AsRef<str> for SyntheticEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SyntheticEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
