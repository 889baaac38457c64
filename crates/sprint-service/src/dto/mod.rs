//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    page_window, AddTimeRequest, AdminUpdateUserRequest, AuditLogListQuery, ChangePasswordRequest,
    CreateAuditLogRequest, CreateCommentRequest, CreateProjectRequest, CreateTagRequest,
    CreateTaskRequest, CreateTimeEntryRequest, LoginRequest, ProjectListQuery, SignupRequest,
    TaskListQuery, TimeEntryListQuery, TimePerDayQuery, UpdateProfileRequest,
    UpdateProjectRequest, UpdateProjectStatusRequest, UpdateTagRequest, UpdateTaskRequest,
    UpdateTaskStatusRequest, UserListQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

pub use responses::{
    ActorSummary, AdminStatsResponse, AuditLogResponse, AuthResponse, CommentResponse,
    DailyMinutesResponse, HealthChecks, HealthResponse, MessageResponse, PagedResponse,
    ProjectResponse, ReadinessResponse, TagResponse, TaskResponse, TimeEntryResponse,
    UserResponse, UserStatsResponse,
};
