//! Expected answers for the API's known defects.
//!
//! Some routes currently answer with the wrong status or an inconsistent
//! message. Tests ask the [`Contract`] what to expect instead of hard-coding
//! either the intended or the observed value, so one configuration switch
//! turns the suite from a bug report into a regression guard.

use reqwest::StatusCode;

#[derive(serde::Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContractMode {
    /// Assert what the API is supposed to do. Known defects fail.
    #[default]
    Intended,
    /// Assert what the API does today. Known defects pass.
    Observed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub status: StatusCode,
    /// `None` means any message is acceptable, as long as one is present.
    pub message: Option<String>,
}

impl Expectation {
    fn new(status: StatusCode, message: Option<&str>) -> Self {
        Self {
            status,
            message: message.map(str::to_string),
        }
    }

    /// Compare against an actual answer, describing every mismatch.
    pub fn check(&self, status: StatusCode, message: Option<&str>) -> Result<(), String> {
        let mut mismatches = Vec::new();
        if status != self.status {
            mismatches.push(format!("expected status {}, got {}", self.status, status));
        }
        match (&self.message, message) {
            (_, None) => mismatches.push("the response carries no message".to_string()),
            (Some(expected), Some(actual)) if expected != actual => mismatches.push(format!(
                "expected message {:?}, got {:?}",
                expected, actual
            )),
            _ => {}
        }
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(mismatches.join("; "))
        }
    }

    #[track_caller]
    pub fn assert_matches(&self, status: StatusCode, message: Option<&str>) {
        if let Err(e) = self.check(status, message) {
            panic!("Response does not match the contract: {}", e);
        }
    }
}

/// Which JWT parsing failure a malformed token triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedToken {
    /// Fewer or more than three dot-separated segments.
    WrongSegmentCount,
    /// Three segments, but the header is not base64.
    UndecodableHeader,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Contract {
    mode: ContractMode,
}

impl Contract {
    pub fn new(mode: ContractMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ContractMode {
        self.mode
    }

    /// Deleting an id that was never created. Today: 400 instead of 404.
    pub fn delete_missing_link(&self) -> Expectation {
        match self.mode {
            ContractMode::Intended => {
                Expectation::new(StatusCode::NOT_FOUND, Some("Link não encontrado"))
            }
            ContractMode::Observed => Expectation::new(StatusCode::BAD_REQUEST, None),
        }
    }

    /// Deleting another user's link. Today: 400, and no ownership check.
    pub fn delete_foreign_link(&self) -> Expectation {
        match self.mode {
            ContractMode::Intended => Expectation::new(StatusCode::FORBIDDEN, Some("Forbidden")),
            ContractMode::Observed => Expectation::new(StatusCode::BAD_REQUEST, None),
        }
    }

    /// A request without a token. Status is right, the message is not.
    pub fn missing_token(&self) -> Expectation {
        match self.mode {
            ContractMode::Intended => {
                Expectation::new(StatusCode::UNAUTHORIZED, Some("Token not provided"))
            }
            ContractMode::Observed => Expectation::new(
                StatusCode::UNAUTHORIZED,
                Some("Use o formato: Bearer <token>"),
            ),
        }
    }

    /// A token the JWT library cannot parse. The API leaks the library's
    /// error text; the intended contract only pins the status.
    pub fn malformed_token(&self, kind: MalformedToken) -> Expectation {
        match self.mode {
            ContractMode::Intended => Expectation::new(StatusCode::UNAUTHORIZED, None),
            ContractMode::Observed => {
                let message = match kind {
                    MalformedToken::WrongSegmentCount => {
                        "token is malformed: token contains an invalid number of segments"
                    }
                    MalformedToken::UndecodableHeader => {
                        "token is malformed: could not base64 decode header: \
                        illegal base64 data at input byte 4"
                    }
                };
                Expectation::new(StatusCode::UNAUTHORIZED, Some(message))
            }
        }
    }
}
