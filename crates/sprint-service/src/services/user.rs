//! User service
//!
//! Handles profile reads and updates, password changes, and the
//! administrator-only account management operations.

use sprint_common::auth::{hash_password, validate_password_strength, verify_password};
use sprint_core::entities::User;
use sprint_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    page_window, AdminUpdateUserRequest, ChangePasswordRequest, PagedResponse,
    UpdateProfileRequest, UserListQuery, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, query: UserListQuery) -> ServiceResult<PagedResponse<UserResponse>> {
        let window = page_window(query.page, query.limit);
        let (users, total) = self.ctx.user_repo().list(window).await?;

        Ok(PagedResponse::new(
            users.iter().map(UserResponse::from).collect(),
            window,
            total,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.find(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Update the caller's own names, profile and preferences
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.find(user_id).await?;
        user.set_names(request.first_name, request.last_name);
        user.set_settings(request.profile, request.preferences);
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "Profile updated");
        Ok(UserResponse::from(&user))
    }

    /// Administrator update of any profile field and the admin flag
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: Snowflake,
        request: AdminUpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.find(user_id).await?;
        user.set_names(request.first_name, request.last_name);
        user.set_settings(request.profile, request.preferences);
        if let Some(is_admin) = request.is_admin {
            user.set_admin(is_admin);
        }
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, is_admin = user.is_admin, "User updated");
        Ok(UserResponse::from(&user))
    }

    /// Replace the caller's password after checking the current one.
    /// Returns the account as it stands afterwards.
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<UserResponse> {
        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !verify_password(&request.current_password, &current_hash)? {
            warn!(user_id = %user_id, "Password change rejected: wrong current password");
            return Err(ServiceError::validation("Current password is incorrect"));
        }
        validate_password_strength(&request.new_password)?;

        let new_hash = hash_password(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password_hash(user_id, &new_hash)
            .await?;

        info!(user_id = %user_id, "Password changed");
        let user = self.find(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.user_repo().delete(user_id).await?;
        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    async fn find(&self, user_id: Snowflake) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{LoginRequest, SignupRequest};
    use crate::services::testing::Fixture;
    use crate::services::AuthService;
    use sprint_core::entities::{Theme, UserPreferences, UserProfile};

    #[tokio::test]
    async fn test_profile_update_keeps_missing_names() {
        let fx = Fixture::new();
        let user = fx.user("ada@example.com", false).await;

        let updated = UserService::new(&fx.ctx)
            .update_profile(
                user.id,
                UpdateProfileRequest {
                    first_name: Some("Augusta".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Augusta");
        assert_eq!(updated.last_name, "User");
        assert_eq!(updated.preferences.timezone, "UTC");
    }

    #[tokio::test]
    async fn test_profile_update_stores_settings() {
        let fx = Fixture::new();
        let user = fx.user("ada@example.com", false).await;
        let preferences = UserPreferences {
            theme: Theme::Dark,
            timezone: "Europe/London".to_string(),
            items_per_page: 50,
        };

        UserService::new(&fx.ctx)
            .update_profile(
                user.id,
                UpdateProfileRequest {
                    preferences: Some(preferences.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = fx.ctx.user_repo().find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.preferences, preferences);
        assert_eq!(stored.profile, UserProfile::default());
    }

    #[tokio::test]
    async fn test_change_password() {
        let fx = Fixture::new();
        let auth = AuthService::new(&fx.ctx);
        let signed_up = auth
            .signup(SignupRequest {
                email: "ada@example.com".to_string(),
                password: "Sprint2024".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            })
            .await
            .unwrap();
        let service = UserService::new(&fx.ctx);

        let err = service
            .change_password(
                signed_up.user.id,
                ChangePasswordRequest {
                    current_password: "Wrong12345".to_string(),
                    new_password: "Sprint2025".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);

        service
            .change_password(
                signed_up.user.id,
                ChangePasswordRequest {
                    current_password: "Sprint2024".to_string(),
                    new_password: "Sprint2025".to_string(),
                },
            )
            .await
            .unwrap();

        let login = |password: &str| LoginRequest {
            email: "ada@example.com".to_string(),
            password: password.to_string(),
        };
        assert!(auth.login(login("Sprint2024")).await.is_err());
        assert_eq!(auth.login(login("Sprint2025")).await.unwrap().user.id, signed_up.user.id);
    }

    #[tokio::test]
    async fn test_admin_can_promote() {
        let fx = Fixture::new();
        let user = fx.user("grace@example.com", false).await;

        let updated = UserService::new(&fx.ctx)
            .update_user(
                user.id,
                AdminUpdateUserRequest {
                    is_admin: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_admin);
    }

    #[tokio::test]
    async fn test_list_is_paged() {
        let fx = Fixture::new();
        for i in 0..3 {
            fx.user(&format!("user{i}@example.com"), false).await;
        }

        let page = UserService::new(&fx.ctx)
            .list_users(UserListQuery {
                page: Some(2),
                limit: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.data.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let fx = Fixture::new();
        let err = UserService::new(&fx.ctx)
            .delete_user(Snowflake::new(404))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_USER");
    }
}
