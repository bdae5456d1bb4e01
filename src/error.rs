use crate::identifier::IdentifierError;
use reqwest::StatusCode;

/// Everything that can go wrong inside the harness itself.
///
/// An API answering with an unexpected status is *not* one of these: that is
/// what test assertions are for. `UnexpectedStatus` only shows up where the
/// harness needs a success to carry on, e.g. while building a fixture.
#[derive(thiserror::Error)]
pub enum HarnessError {
    #[error("The request could not be sent or its response could not be read.")]
    Transport(#[from] reqwest::Error),
    #[error("The response body (status {status}) is not valid JSON.")]
    InvalidJson {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
    #[error("The response body (status {status}) does not match the `{expected}` schema.")]
    UnexpectedShape {
        status: StatusCode,
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Expected a successful response, got {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("Failed to set up the `{name}` fixture.")]
    Fixture {
        name: &'static str,
        #[source]
        source: Box<HarnessError>,
    },
    #[error("Fixture dependency cycle: {}", .chain.join(" -> "))]
    FixtureCycle { chain: Vec<&'static str> },
    #[error("The `{name}` fixture already exists in this scope and cannot be replaced.")]
    FixtureAlreadyResolved { name: &'static str },
    #[error("Failed to tear down the `{name}` fixture.")]
    Teardown {
        name: &'static str,
        #[source]
        source: Box<HarnessError>,
    },
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
