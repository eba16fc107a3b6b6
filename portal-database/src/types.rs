use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Review-workflow state of a research, distinct from its progress status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    OnHold,
    UnderReview,
    Published,
    Draft,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
            ApprovalStatus::OnHold => "On hold",
            ApprovalStatus::UnderReview => "Under review",
            ApprovalStatus::Published => "Published",
            ApprovalStatus::Draft => "Draft",
        }
    }
}

impl Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ApprovalStatus::Pending),
            "Approved" => Ok(ApprovalStatus::Approved),
            "Rejected" => Ok(ApprovalStatus::Rejected),
            "On hold" => Ok(ApprovalStatus::OnHold),
            "Under review" => Ok(ApprovalStatus::UnderReview),
            "Published" => Ok(ApprovalStatus::Published),
            "Draft" => Ok(ApprovalStatus::Draft),
            other => Err(format!("Unknown approval status: {}", other)),
        }
    }
}

/// Caller-supplied progress state of the work itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStatus {
    Ongoing,
    Completed,
    Published,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Ongoing => "ongoing",
            ProgressStatus::Completed => "completed",
            ProgressStatus::Published => "published",
        }
    }
}

impl Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(ProgressStatus::Ongoing),
            "completed" => Ok(ProgressStatus::Completed),
            "published" => Ok(ProgressStatus::Published),
            other => Err(format!("Unknown progress status: {}", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstitutionStatus {
    Active,
    Inactive,
}

impl InstitutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstitutionStatus::Active => "Active",
            InstitutionStatus::Inactive => "Inactive",
        }
    }
}

impl Display for InstitutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Maintained,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Maintained => "Maintained",
            PaymentStatus::Overdue => "Overdue",
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_status_round_trips() {
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
            ApprovalStatus::OnHold,
            ApprovalStatus::UnderReview,
            ApprovalStatus::Published,
            ApprovalStatus::Draft,
        ] {
            assert_eq!(status.as_str().parse::<ApprovalStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_approval_status_is_rejected() {
        assert!("Archived".parse::<ApprovalStatus>().is_err());
    }

    #[test]
    fn progress_status_round_trips() {
        for status in [
            ProgressStatus::Ongoing,
            ProgressStatus::Completed,
            ProgressStatus::Published,
        ] {
            assert_eq!(status.as_str().parse::<ProgressStatus>(), Ok(status));
        }
        assert!("finished".parse::<ProgressStatus>().is_err());
    }
}
