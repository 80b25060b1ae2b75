use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub is_approved: bool,
}

/// Body of event create and update calls.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub name: String,
    pub category: Option<String>,
    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    #[serde(default, alias = "approved")]
    pub is_approved: bool,
}

impl EventRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Event name is required".to_string()));
        }
        if let (Some(start), Some(end)) = (self.start_date_time, self.end_date_time) {
            if end < start {
                return Err(AppError::Validation(
                    "Event cannot end before it starts".to_string(),
                ));
            }
        }
        Ok(())
    }
}
