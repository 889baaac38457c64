//! User database model

use chrono::{DateTime, Utc};
use sprint_core::entities::{UserPreferences, UserProfile};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub profile: Json<UserProfile>,
    pub preferences: Json<UserPreferences>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
