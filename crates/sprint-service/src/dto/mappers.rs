//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use sprint_core::entities::{AuditRecord, Comment, Project, Tag, Task, TimeEntry, User};
use sprint_core::traits::{DailyMinutes, EntityCounts, TaskStatusCounts};

use super::responses::{
    ActorSummary, AdminStatsResponse, AuditLogResponse, CommentResponse, DailyMinutesResponse,
    ProjectResponse, TagResponse, TaskResponse, TimeEntryResponse, UserResponse,
    UserStatsResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_admin: user.is_admin,
            profile: user.profile.clone(),
            preferences: user.preferences.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            start_date: project.start_date,
            end_date: project.end_date,
            created_by: project.created_by,
            member_ids: project.member_ids.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            total_minutes: task.total_minutes,
            project_id: task.project_id,
            assigned_to: task.assigned_to,
            created_by: task.created_by,
            tag_ids: task.tag_ids.clone(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            task_id: comment.task_id,
            author_id: comment.author_id,
            text: comment.text.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<&TimeEntry> for TimeEntryResponse {
    fn from(entry: &TimeEntry) -> Self {
        Self {
            id: entry.id,
            task_id: entry.task_id,
            user_id: entry.user_id,
            minutes: entry.minutes,
            start_time: entry.start_time,
            end_time: entry.end_time,
            notes: entry.notes.clone(),
            created_at: entry.created_at,
        }
    }
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            color: tag.color.clone(),
            description: tag.description.clone(),
            created_by: tag.created_by,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}

impl From<AuditRecord> for AuditLogResponse {
    fn from(record: AuditRecord) -> Self {
        Self {
            id: record.id,
            actor_id: record.actor_id,
            actor: None,
            action: record.action,
            entity_type: record.entity_type,
            entity_id: record.entity_id,
            before: record.before,
            after: record.after,
            metadata: record.metadata,
            created_at: record.created_at,
        }
    }
}

impl From<&User> for ActorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<EntityCounts> for AdminStatsResponse {
    fn from(counts: EntityCounts) -> Self {
        Self {
            users: counts.users,
            tags: counts.tags,
            projects: counts.projects,
            tasks: counts.tasks,
        }
    }
}

impl From<TaskStatusCounts> for UserStatsResponse {
    fn from(counts: TaskStatusCounts) -> Self {
        Self {
            todo: counts.todo,
            in_progress: counts.in_progress,
            done: counts.done,
        }
    }
}

impl From<DailyMinutes> for DailyMinutesResponse {
    fn from(day: DailyMinutes) -> Self {
        Self {
            date: day.date,
            total_minutes: day.total_minutes,
        }
    }
}
