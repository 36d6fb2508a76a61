use std::fmt;

/// Play Console release track.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    #[default]
    Internal,
    Alpha,
    Beta,
    Production,
}

impl Track {
    pub fn as_str(self) -> &'static str {
        match self {
            Track::Internal => "internal",
            Track::Alpha => "alpha",
            Track::Beta => "beta",
            Track::Production => "production",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of the release placed on the track.
///
/// Apps that have never shipped to production only accept `draft`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum ReleaseStatus {
    #[default]
    Draft,
    Completed,
    Halted,
    #[value(name = "inProgress")]
    InProgress,
}

impl ReleaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseStatus::Draft => "draft",
            ReleaseStatus::Completed => "completed",
            ReleaseStatus::Halted => "halted",
            ReleaseStatus::InProgress => "inProgress",
        }
    }

    /// Statuses that apply to a fraction of users and therefore need `userFraction`.
    pub fn is_staged_rollout(self) -> bool {
        matches!(self, ReleaseStatus::InProgress | ReleaseStatus::Halted)
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
