//! Site content entities: roles, members, events, projects and news.
//!
//! Every entity carries a UUID v7 id. Create/update request types mirror the
//! admin forms: optional text fields arrive as strings and are normalised so
//! that blank values are stored as `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Generate a new time-sortable entity id.
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

/// A member role ("Başkan", "Yazılım Ekibi", ...).
///
/// Lower `weight` sorts first on the members page and in the chat context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub weight: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub weight: i64,
}

/// CSS focal point used when cropping a member portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ImagePosition {
    #[serde(rename = "object-center")]
    #[default]
    Center,
    #[serde(rename = "object-top")]
    Top,
    #[serde(rename = "object-bottom")]
    Bottom,
    #[serde(rename = "object-left")]
    Left,
    #[serde(rename = "object-right")]
    Right,
    #[serde(rename = "object-left-top")]
    LeftTop,
    #[serde(rename = "object-right-top")]
    RightTop,
    #[serde(rename = "object-left-bottom")]
    LeftBottom,
    #[serde(rename = "object-right-bottom")]
    RightBottom,
}

impl fmt::Display for ImagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match self {
            ImagePosition::Center => "object-center",
            ImagePosition::Top => "object-top",
            ImagePosition::Bottom => "object-bottom",
            ImagePosition::Left => "object-left",
            ImagePosition::Right => "object-right",
            ImagePosition::LeftTop => "object-left-top",
            ImagePosition::RightTop => "object-right-top",
            ImagePosition::LeftBottom => "object-left-bottom",
            ImagePosition::RightBottom => "object-right-bottom",
        };
        f.write_str(class)
    }
}

impl FromStr for ImagePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "object-center" => Ok(ImagePosition::Center),
            "object-top" => Ok(ImagePosition::Top),
            "object-bottom" => Ok(ImagePosition::Bottom),
            "object-left" => Ok(ImagePosition::Left),
            "object-right" => Ok(ImagePosition::Right),
            "object-left-top" => Ok(ImagePosition::LeftTop),
            "object-right-top" => Ok(ImagePosition::RightTop),
            "object-left-bottom" => Ok(ImagePosition::LeftBottom),
            "object-right-bottom" => Ok(ImagePosition::RightBottom),
            other => Err(format!("invalid image position: '{other}'")),
        }
    }
}

/// A club member as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub role_id: Uuid,
    pub image: Option<String>,
    pub image_position: ImagePosition,
    pub bio: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read model: a member joined with its role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberWithRole {
    #[serde(flatten)]
    pub member: Member,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub role_id: Uuid,
    pub image: Option<String>,
    pub image_position: Option<ImagePosition>,
    pub bio: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

/// Partial update. `Some("")` on an optional text field clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub role_id: Option<Uuid>,
    pub image: Option<String>,
    pub image_position: Option<ImagePosition>,
    pub bio: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

/// A club event. `link` is the external registration URL, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub date: DateTime<Utc>,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event is still upcoming at `now` (inclusive).
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date >= now
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub date: DateTime<Utc>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub link: Option<String>,
}

/// A showcased project. `content` is the long-form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub thumbnail: Option<String>,
}

/// A news article. `date` is the publication date shown on the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub thumbnail: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub thumbnail: Option<String>,
    /// Defaults to the creation time.
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub thumbnail: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// One block of a project/news body: plain text or an inline image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Image { alt: String, src: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_position_roundtrip_display() {
        let pos: ImagePosition = "object-left-top".parse().unwrap();
        assert_eq!(pos, ImagePosition::LeftTop);
        assert_eq!(pos.to_string(), "object-left-top");
    }

    #[test]
    fn test_image_position_default_is_center() {
        assert_eq!(ImagePosition::default().to_string(), "object-center");
    }

    #[test]
    fn test_image_position_serde_uses_css_class() {
        let json = serde_json::to_string(&ImagePosition::RightBottom).unwrap();
        assert_eq!(json, "\"object-right-bottom\"");
        let parsed: ImagePosition = serde_json::from_str("\"object-top\"").unwrap();
        assert_eq!(parsed, ImagePosition::Top);
    }

    #[test]
    fn test_invalid_image_position() {
        assert!("object-middle".parse::<ImagePosition>().is_err());
    }

    #[test]
    fn test_event_is_upcoming_inclusive() {
        let now = Utc::now();
        let event = Event {
            id: new_id(),
            title: "Kickoff".to_string(),
            description: "Season start".to_string(),
            image: None,
            date: now,
            link: None,
            created_at: now,
            updated_at: now,
        };
        assert!(event.is_upcoming(now));
        assert!(!event.is_upcoming(now + chrono::Duration::seconds(1)));
    }
}
