use crate::error::{AppError, Res};
use serde::{Deserialize, Serialize};

/// Account role. Students apply to jobs, recruiters own companies and post
/// jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Recruiter => "recruiter",
        }
    }

    pub fn parse(value: &str) -> Res<Self> {
        match value {
            "student" => Ok(Role::Student),
            "recruiter" => Ok(Role::Recruiter),
            _ => Err(AppError::BadRequest(format!("Unknown role: {}", value))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application lifecycle. `Pending` is the initial state; `Accepted` and
/// `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Parses a client-supplied status. Input is lowercased first, so
    /// `"Accepted"` and `"accepted"` are the same transition.
    pub fn parse(value: &str) -> Res<Self> {
        match value.to_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(AppError::BadRequest(format!("Unknown status: {}", other))),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        assert_eq!(Role::parse("student").unwrap(), Role::Student);
        assert_eq!(Role::parse("recruiter").unwrap(), Role::Recruiter);
        assert_eq!(Role::Recruiter.as_str(), "recruiter");
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::parse("admin").is_err());
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(
            ApplicationStatus::parse("Accepted").unwrap(),
            ApplicationStatus::Accepted
        );
        assert_eq!(
            ApplicationStatus::parse("REJECTED").unwrap(),
            ApplicationStatus::Rejected
        );
        assert_eq!(ApplicationStatus::parse("Accepted").unwrap().as_str(), "accepted");
    }

    #[test]
    fn out_of_range_status_is_rejected() {
        assert!(ApplicationStatus::parse("withdrawn").is_err());
        assert!(ApplicationStatus::parse("").is_err());
    }
}
