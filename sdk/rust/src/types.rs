//! Dashboard API payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Credentials posted to `/admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token issued by the API on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEnvelope {
    pub access_token: String,
    pub token_type: String,
}

/// Review workflow state of a survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyState {
    Pending,
    Accepted,
    Rejected,
}

impl SurveyState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SurveyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurveyState {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(SdkError::InvalidArgument(format!(
                "unknown survey state {:?} (expected pending, accepted or rejected)",
                other
            ))),
        }
    }
}

/// The three ordered visit stages. The API addresses them by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SurveyKind {
    Initial = 1,
    FollowUp = 2,
    Final = 3,
}

impl SurveyKind {
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl FromStr for SurveyKind {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "initial" => Ok(Self::Initial),
            "2" | "follow-up" | "followup" => Ok(Self::FollowUp),
            "3" | "final" => Ok(Self::Final),
            other => Err(SdkError::InvalidArgument(format!(
                "unknown survey kind {:?} (expected 1-3, initial, follow-up or final)",
                other
            ))),
        }
    }
}

/// Body of a survey state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub state: SurveyState,
    pub state_reason: Option<String>,
}

/// Query filters for the extensionist listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtensionistFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A binary export relayed by the gateway.
#[derive(Debug, Clone)]
pub struct Download {
    pub content_type: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Pull the file name out of a `Content-Disposition` value.
pub fn file_name_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
