use glabtools_core::outcome::Outcome;

/// Everything an operation can fail with. Display strings double as the
/// user-facing messages in the structured `Outcome`, so their wording is
/// part of the contract.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Owner role is not supported for projects")]
    OwnerOnProject,

    #[error("API request failed with status {status}: {body}")]
    UserLookupFailed { status: u16, body: String },

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Target '{0}' not found")]
    TargetNotFound(String),

    #[error("Failed to modify permission: {status} - {body}")]
    MembershipRejected { status: u16, body: String },

    #[error("Error: {status} - {body}")]
    ListingFailed { status: u16, body: String },

    #[error("Error: Invalid JSON response")]
    MalformedResponse,

    #[error("Error: year must be a 4-digit number, got '{0}'")]
    YearNotNumeric(String),

    #[error("Invalid year: {year}. Must be 4 digits and between 2010 and {latest}")]
    YearOutOfRange { year: i32, latest: i32 },

    #[error("Aborted after {0} pages without reaching the end of the listing")]
    PageLimitExceeded(u32),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// The structured body callers receive. Validation failures keep their
    /// individual messages; everything else collapses to one message.
    pub fn outcome(&self) -> Outcome {
        match self {
            Error::Validation(errors) => Outcome::invalid(errors.clone()),
            other => Outcome::failure(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::MalformedResponse
        } else if err.is_timeout() || err.is_connect() || err.is_request() {
            Error::Network(err.to_string())
        } else {
            Error::Unexpected(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_failure_carries_status_and_body() {
        let err = Error::ListingFailed {
            status: 401,
            body: "401 Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Error: 401 - 401 Unauthorized");
    }

    #[test]
    fn test_validation_outcome_keeps_individual_messages() {
        let err = Error::Validation(vec![
            "Username cannot be empty".to_string(),
            "GITLAB_TOKEN environment variable is not set".to_string(),
        ]);
        assert_eq!(
            err.outcome(),
            Outcome::invalid(vec![
                "Username cannot be empty".to_string(),
                "GITLAB_TOKEN environment variable is not set".to_string(),
            ])
        );
    }

    #[test]
    fn test_other_errors_collapse_to_one_message() {
        let err = Error::UserNotFound("dev1".to_string());
        assert_eq!(err.outcome(), Outcome::failure("User 'dev1' not found"));
    }
}
