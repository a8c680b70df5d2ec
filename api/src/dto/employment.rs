//! Employment request DTOs.
//!
//! Responses use the `Employment` entity directly; it carries nothing the
//! owning employee may not see.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use sl_core::domain::entities::employment::{EmploymentStatus, EmploymentType};
use sl_core::services::employment::{CreateEmploymentInput, UpdateEmploymentInput};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEmploymentRequest {
    #[validate(length(min = 1, max = 255))]
    pub company_name: String,

    #[validate(length(min = 1, max = 255))]
    pub job_title: String,

    pub employment_type: EmploymentType,

    pub start_date: DateTime<Utc>,

    #[validate(url)]
    pub company_website: Option<String>,

    #[validate(length(max = 255))]
    pub company_location: Option<String>,

    #[validate(length(max = 255))]
    pub department: Option<String>,

    #[validate(length(max = 64))]
    pub salary_range: Option<String>,

    #[validate(length(max = 2000))]
    pub benefits: Option<String>,

    #[validate(length(max = 4000))]
    pub job_description: Option<String>,

    #[validate(length(max = 255))]
    pub manager_name: Option<String>,

    #[validate(email)]
    pub manager_email: Option<String>,
}

impl From<CreateEmploymentRequest> for CreateEmploymentInput {
    fn from(request: CreateEmploymentRequest) -> Self {
        Self {
            company_name: request.company_name,
            job_title: request.job_title,
            employment_type: request.employment_type,
            start_date: request.start_date,
            company_website: request.company_website,
            company_location: request.company_location,
            department: request.department,
            salary_range: request.salary_range,
            benefits: request.benefits,
            job_description: request.job_description,
            manager_name: request.manager_name,
            manager_email: request.manager_email,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEmploymentRequest {
    #[validate(length(min = 1, max = 255))]
    pub company_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub job_title: Option<String>,

    pub employment_type: Option<EmploymentType>,

    pub employment_status: Option<EmploymentStatus>,

    pub end_date: Option<DateTime<Utc>>,

    #[validate(url)]
    pub company_website: Option<String>,

    #[validate(length(max = 255))]
    pub company_location: Option<String>,

    #[validate(length(max = 255))]
    pub department: Option<String>,

    #[validate(length(max = 64))]
    pub salary_range: Option<String>,

    #[validate(length(max = 4000))]
    pub job_description: Option<String>,

    #[validate(length(max = 255))]
    pub manager_name: Option<String>,

    #[validate(email)]
    pub manager_email: Option<String>,
}

impl From<UpdateEmploymentRequest> for UpdateEmploymentInput {
    fn from(request: UpdateEmploymentRequest) -> Self {
        Self {
            company_name: request.company_name,
            job_title: request.job_title,
            employment_type: request.employment_type,
            employment_status: request.employment_status,
            end_date: request.end_date,
            company_website: request.company_website,
            company_location: request.company_location,
            department: request.department,
            salary_range: request.salary_range,
            job_description: request.job_description,
            manager_name: request.manager_name,
            manager_email: request.manager_email,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndEmploymentRequest {
    pub end_date: Option<DateTime<Utc>>,
}
