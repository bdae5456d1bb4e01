/// Mail domain owned by the test suite.
///
/// Every synthetic user lives under it and the pre-suite cleanup deletes
/// everything that matches it, so parsing refuses anything that could turn
/// into a wider SQL `LIKE` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedDomain(String);

pub const DEFAULT_RESERVED_DOMAIN: &str = "papito.dev";

impl ReservedDomain {
    pub fn parse(s: String) -> Result<ReservedDomain, String> {
        let is_empty_label = s.split('.').any(|label| label.is_empty());
        let has_forbidden_characters = s
            .chars()
            .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.'));

        if !s.contains('.') || is_empty_label || has_forbidden_characters {
            Err(format!("{} is not a valid reserved test domain.", s))
        } else {
            Ok(Self(s))
        }
    }

    /// `LIKE` pattern matching every address under this domain.
    pub fn email_pattern(&self) -> String {
        format!("%@{}", self.0)
    }

    pub fn owns(&self, email: &str) -> bool {
        email
            .rsplit_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain == self.0)
    }
}

impl Default for ReservedDomain {
    fn default() -> Self {
        Self(DEFAULT_RESERVED_DOMAIN.to_string())
    }
}

impl AsRef<str> for ReservedDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReservedDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
