use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stage of the hiring process an application is at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JobStatus {
    Applied,
    Interview,
    Offer,
    Accepted,
    RejectedOffer,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "status `{0}` is not valid. Valid statuses are: Applied, Interview, Offer, Accepted, \"Rejected Offer\" and Rejected"
)]
pub struct StatusError(pub String);

impl JobStatus {
    pub const ALL: [JobStatus; 6] = [
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Offer,
        JobStatus::Accepted,
        JobStatus::RejectedOffer,
        JobStatus::Rejected,
    ];

    /// Stored and displayed form
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interview => "Interview",
            JobStatus::Offer => "Offer",
            JobStatus::Accepted => "Accepted",
            JobStatus::RejectedOffer => "Rejected Offer",
            JobStatus::Rejected => "Rejected",
        }
    }
}

/// Trim and title-case every word: `"  rejected OFFER "` becomes `"Rejected Offer"`.
pub fn canonicalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for JobStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = canonicalize(s);
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == canonical)
            .ok_or_else(|| StatusError(s.to_string()))
    }
}

impl TryFrom<String> for JobStatus {
    type Error = StatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_any_casing() {
        for input in ["applied", "APPLIED", "Applied", "  aPPlied "] {
            assert_eq!(input.parse::<JobStatus>(), Ok(JobStatus::Applied));
        }
    }

    #[test]
    fn parses_the_two_word_status() {
        assert_eq!("rejected offer".parse(), Ok(JobStatus::RejectedOffer));
        assert_eq!("REJECTED   OFFER".parse(), Ok(JobStatus::RejectedOffer));
        assert_eq!(JobStatus::RejectedOffer.to_string(), "Rejected Offer");
    }

    #[test]
    fn rejects_unknown_statuses() {
        assert_eq!(
            "Pending".parse::<JobStatus>(),
            Err(StatusError("Pending".to_string()))
        );
        assert!("".parse::<JobStatus>().is_err());
    }

    #[test]
    fn every_status_round_trips_through_its_text() {
        for status in JobStatus::ALL {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
    }

    #[test]
    fn json_reads_loose_casing_and_writes_canonical_text() {
        let status: JobStatus = serde_json::from_str("\"interview\"").unwrap();
        assert_eq!(status, JobStatus::Interview);
        assert_eq!(
            serde_json::to_string(&JobStatus::RejectedOffer).unwrap(),
            "\"Rejected Offer\""
        );
        assert!(serde_json::from_str::<JobStatus>("\"hired\"").is_err());
    }
}
