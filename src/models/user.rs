use super::{Color, Link, Names};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered speedrun.com account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct User {
    pub id: String,
    pub names: Names,
    pub weblink: String,
    #[serde(default)]
    pub name_style: Option<NameStyle>,
    pub role: UserRole,
    #[serde(default, with = "crate::dates::option")]
    pub signup: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub twitch: Option<SocialLink>,
    #[serde(default)]
    pub hitbox: Option<SocialLink>,
    #[serde(default)]
    pub youtube: Option<SocialLink>,
    #[serde(default)]
    pub twitter: Option<SocialLink>,
    #[serde(default)]
    pub speedrunslive: Option<SocialLink>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Banned,
    User,
    Trusted,
    Moderator,
    Admin,
    Programmer,
}

/// How the site colours a user's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NameStyle {
    pub style: NameStyleKind,
    /// Set for `solid`.
    #[serde(default)]
    pub color: Option<Color>,
    /// Set for `gradient`.
    #[serde(default)]
    pub color_from: Option<Color>,
    #[serde(default)]
    pub color_to: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyleKind {
    Solid,
    Gradient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub country: Option<LocationArea>,
    #[serde(default)]
    pub region: Option<LocationArea>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArea {
    /// e.g. `de`, `us/ca`
    pub code: String,
    pub names: Names,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub uri: String,
}

/// A runner without an account, identified only by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// An entry from the authenticated user's notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(with = "crate::dates")]
    pub created: DateTime<Utc>,
    pub status: NotificationStatus,
    pub text: String,
    pub item: NotificationItem,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Read,
    Unread,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub rel: NotificationItemKind,
    pub uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationItemKind {
    Post,
    Run,
    Game,
    Guide,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn decodes_user_with_fractional_signup() {
        let user: User = serde_json::from_str(
            r##"{
                "id": "zxzno3jq",
                "names": {"international": "cheese", "japanese": null},
                "weblink": "https://www.speedrun.com/user/cheese",
                "name-style": {
                    "style": "gradient",
                    "color-from": {"light": "#E44141", "dark": "#E44141"},
                    "color-to": {"light": "#FFB3F3", "dark": "#FFB3F3"}
                },
                "role": "user",
                "signup": "2014-06-27T09:21:17.482Z",
                "location": {"country": {"code": "de", "names": {"international": "Germany"}}},
                "twitch": {"uri": "https://www.twitch.tv/cheese05"},
                "hitbox": null,
                "links": []
            }"##,
        )
        .unwrap();

        assert_eq!(user.role, UserRole::User);
        let style = user.name_style.unwrap();
        assert_eq!(style.style, NameStyleKind::Gradient);
        assert!(style.color.is_none());
        assert_eq!(
            user.signup.map(|signup| signup.date_naive()),
            NaiveDate::from_ymd_opt(2014, 6, 27)
        );
        assert_eq!(user.location.unwrap().country.unwrap().code, "de");
    }

    #[test]
    fn decodes_notification() {
        let notification: Notification = serde_json::from_str(
            r#"{
                "id": "n1",
                "created": "2021-06-16T08:15:42Z",
                "status": "unread",
                "text": "Your run has been verified.",
                "item": {"rel": "run", "uri": "https://www.speedrun.com/sm64/run/90y6pm7e"},
                "links": []
            }"#,
        )
        .unwrap();

        assert_eq!(notification.status, NotificationStatus::Unread);
        assert_eq!(notification.item.rel, NotificationItemKind::Run);
    }
}
