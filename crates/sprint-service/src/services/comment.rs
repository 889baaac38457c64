//! Comment service

use sprint_core::entities::Comment;
use sprint_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(task_id = %request.task_id))]
    pub async fn create_comment(
        &self,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        if self.ctx.task_repo().find_by_id(request.task_id).await?.is_none() {
            return Err(DomainError::TaskNotFound(request.task_id).into());
        }

        let comment = Comment::new(
            self.ctx.generate_id(),
            request.task_id,
            author_id,
            request.text,
        );
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, "Comment created");
        Ok(CommentResponse::from(&comment))
    }

    /// Comments on a task, oldest first
    #[instrument(skip(self))]
    pub async fn list_for_task(&self, task_id: Snowflake) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.ctx.comment_repo().list_by_task(task_id).await?;
        Ok(comments.iter().map(CommentResponse::from).collect())
    }

    /// Only the author or an administrator may delete a comment
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Snowflake,
        user_id: Snowflake,
        is_admin: bool,
    ) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        if !is_admin && !comment.is_author(user_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        self.ctx.comment_repo().delete(comment_id).await?;
        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}
