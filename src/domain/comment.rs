use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub announcement_id: i64,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub author: String,
    pub text: String,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<()> {
        if self.author.trim().is_empty() {
            return Err(AppError::Validation("Comment author is required".to_string()));
        }
        if self.text.trim().is_empty() {
            return Err(AppError::Validation("Comment text is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Relative age such as "2 hours ago".
    pub formatted_timestamp: String,
}

impl CommentDto {
    pub fn from_comment(comment: Comment, now: DateTime<Utc>) -> Self {
        Self {
            id: comment.id,
            formatted_timestamp: format_time_ago(comment.timestamp, now),
            author: comment.author,
            text: comment.text,
            timestamp: comment.timestamp,
        }
    }
}

/// Human readable age of `then` relative to `now`.
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();

    if seconds < 60 {
        return "Just now".to_string();
    }

    let (amount, unit) = if seconds < 3600 {
        (seconds / 60, "minute")
    } else if seconds < 86400 {
        (seconds / 3600, "hour")
    } else {
        (seconds / 86400, "day")
    };

    format!("{} {}{} ago", amount, unit, if amount > 1 { "s" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_time_ago() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now, now), "Just now");
        assert_eq!(format_time_ago(now - Duration::seconds(59), now), "Just now");
        assert_eq!(format_time_ago(now - Duration::seconds(60), now), "1 minute ago");
        assert_eq!(format_time_ago(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_time_ago(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(format_time_ago(now - Duration::hours(23), now), "23 hours ago");
        assert_eq!(format_time_ago(now - Duration::hours(24), now), "1 day ago");
        assert_eq!(format_time_ago(now - Duration::days(3), now), "3 days ago");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now + Duration::minutes(10), now), "Just now");
    }
}
