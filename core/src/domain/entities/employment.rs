//! Employment record entity owned by an employee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contractual form of an employment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl EmploymentType {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
            Self::Contract => "contract",
            Self::Freelance => "freelance",
            Self::Internship => "internship",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full_time" => Some(Self::FullTime),
            "part_time" => Some(Self::PartTime),
            "contract" => Some(Self::Contract),
            "freelance" => Some(Self::Freelance),
            "internship" => Some(Self::Internship),
            _ => None,
        }
    }
}

/// Current standing of an employment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Current,
    Ended,
    OnLeave,
}

impl EmploymentStatus {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Ended => "ended",
            Self::OnLeave => "on_leave",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "current" => Some(Self::Current),
            "ended" => Some(Self::Ended),
            "on_leave" => Some(Self::OnLeave),
            _ => None,
        }
    }
}

/// Employment record entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employment {
    /// Unique identifier for the employment record
    pub id: Uuid,

    /// Owning employee
    pub employee_id: Uuid,

    /// Company name
    pub company_name: String,

    /// Company website
    pub company_website: Option<String>,

    /// Company location
    pub company_location: Option<String>,

    /// Job title
    pub job_title: String,

    /// Department within the company
    pub department: Option<String>,

    /// Contractual form
    pub employment_type: EmploymentType,

    /// Current standing
    pub employment_status: EmploymentStatus,

    /// Start of the employment
    pub start_date: DateTime<Utc>,

    /// End of the employment, if ended
    pub end_date: Option<DateTime<Utc>>,

    /// Salary range as free text
    pub salary_range: Option<String>,

    /// Benefits description
    pub benefits: Option<String>,

    /// Role description
    pub job_description: Option<String>,

    /// Manager name
    pub manager_name: Option<String>,

    /// Manager email
    pub manager_email: Option<String>,

    /// Whether this record has been verified
    pub is_verified: bool,

    /// How the record was verified (e.g. "hr_email", "document_upload")
    pub verification_method: Option<String>,

    /// When the record was verified
    pub verification_date: Option<DateTime<Utc>>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last updated
    pub updated_at: Option<DateTime<Utc>>,
}

impl Employment {
    /// Creates a new employment record in the `Current` state
    pub fn new(
        employee_id: Uuid,
        company_name: String,
        job_title: String,
        employment_type: EmploymentType,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            company_name,
            company_website: None,
            company_location: None,
            job_title,
            department: None,
            employment_type,
            employment_status: EmploymentStatus::Current,
            start_date,
            end_date: None,
            salary_range: None,
            benefits: None,
            job_description: None,
            manager_name: None,
            manager_email: None,
            is_verified: false,
            verification_method: None,
            verification_date: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Marks the employment as ended at the given date
    pub fn end(&mut self, end_date: DateTime<Utc>) {
        self.employment_status = EmploymentStatus::Ended;
        self.end_date = Some(end_date);
        self.updated_at = Some(Utc::now());
    }

    /// Marks the employment as the current one
    pub fn set_current(&mut self) {
        self.employment_status = EmploymentStatus::Current;
        self.end_date = None;
        self.updated_at = Some(Utc::now());
    }

    /// Checks if the employment is currently active
    pub fn is_current(&self) -> bool {
        self.employment_status == EmploymentStatus::Current
    }
}
