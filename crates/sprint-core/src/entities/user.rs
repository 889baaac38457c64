//! User entity - an account that owns and works on tasks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Contact details shown on a profile. Missing keys fall back to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub avatar_url: String,
    pub phone_number: String,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub country: String,
    pub city: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Display settings; unknown or missing keys take the defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub theme: Theme,
    pub timezone: String,
    pub items_per_page: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            timezone: "UTC".to_string(),
            items_per_page: 20,
        }
    }
}

/// User account. The password hash lives only in the persistence layer,
/// so serializing a `User` never leaks credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub profile: UserProfile,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new non-admin user
    pub fn new(id: Snowflake, email: String, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            first_name,
            last_name,
            is_admin: false,
            profile: UserProfile::default(),
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn set_names(&mut self, first_name: Option<String>, last_name: Option<String>) {
        if let Some(first) = first_name {
            self.first_name = first;
        }
        if let Some(last) = last_name {
            self.last_name = last;
        }
        self.updated_at = Utc::now();
    }

    pub fn set_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
        self.updated_at = Utc::now();
    }

    /// Replace whichever of profile and preferences are given
    pub fn set_settings(
        &mut self,
        profile: Option<UserProfile>,
        preferences: Option<UserPreferences>,
    ) {
        if let Some(profile) = profile {
            self.profile = profile;
        }
        if let Some(preferences) = preferences {
            self.preferences = preferences;
        }
        self.updated_at = Utc::now();
    }

    /// Record that the credentials changed
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            Snowflake::new(1),
            "ada@example.com".to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
        )
    }

    #[test]
    fn test_new_user_is_not_admin() {
        let user = user();
        assert!(!user.is_admin);
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_set_names_keeps_missing_fields() {
        let mut user = user();
        let before = user.updated_at;
        user.set_names(None, Some("Byron".to_string()));
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Byron");
        assert!(user.updated_at >= before);
    }

    #[test]
    fn test_partial_preferences_take_defaults() {
        let prefs: UserPreferences = serde_json::from_value(serde_json::json!({"theme": "dark"})).unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.timezone, "UTC");
        assert_eq!(prefs.items_per_page, 20);

        let profile: UserProfile =
            serde_json::from_value(serde_json::json!({"address": {"city": "London"}})).unwrap();
        assert_eq!(profile.address.city, "London");
        assert!(profile.avatar_url.is_empty());
    }

    #[test]
    fn test_set_settings_replaces_only_given_parts() {
        let mut user = user();
        let profile = UserProfile {
            phone_number: "555-0100".to_string(),
            ..Default::default()
        };
        user.set_settings(Some(profile.clone()), None);
        assert_eq!(user.profile, profile);
        assert_eq!(user.preferences, UserPreferences::default());
    }

    #[test]
    fn test_snapshot_has_no_password_field() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["id"], "1");
        assert_eq!(json["preferences"]["theme"], "light");
    }
}
