//! User entity <-> model mapper

use sprint_core::entities::User;
use sprint_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            is_admin: model.is_admin,
            profile: model.profile.0,
            preferences: model.preferences.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
