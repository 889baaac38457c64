//! Tag service

use sprint_core::entities::Tag;
use sprint_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateTagRequest, TagResponse, UpdateTagRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct TagService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TagService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_tag(
        &self,
        creator_id: Snowflake,
        request: CreateTagRequest,
    ) -> ServiceResult<TagResponse> {
        let mut tag = Tag::new(self.ctx.generate_id(), request.name.trim().to_string(), creator_id);
        if let Some(color) = request.color {
            tag.color = color.to_uppercase();
        }
        tag.description = request.description;

        self.ctx.tag_repo().create(&tag).await?;

        info!(tag_id = %tag.id, "Tag created");
        Ok(TagResponse::from(&tag))
    }

    /// All tags by name
    #[instrument(skip(self))]
    pub async fn list_tags(&self) -> ServiceResult<Vec<TagResponse>> {
        let tags = self.ctx.tag_repo().list().await?;
        Ok(tags.iter().map(TagResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_tag(&self, tag_id: Snowflake) -> ServiceResult<TagResponse> {
        let tag = self.find(tag_id).await?;
        Ok(TagResponse::from(&tag))
    }

    #[instrument(skip(self, request))]
    pub async fn update_tag(
        &self,
        tag_id: Snowflake,
        request: UpdateTagRequest,
    ) -> ServiceResult<TagResponse> {
        let mut tag = self.find(tag_id).await?;
        if let Some(name) = request.name {
            tag.name = name.trim().to_string();
        }
        if let Some(color) = request.color {
            tag.color = color.to_uppercase();
        }
        if let Some(description) = request.description {
            tag.description = Some(description);
        }
        tag.touch();

        self.ctx.tag_repo().update(&tag).await?;

        info!(tag_id = %tag_id, "Tag updated");
        Ok(TagResponse::from(&tag))
    }

    /// Delete a tag and detach it from every task
    #[instrument(skip(self))]
    pub async fn delete_tag(&self, tag_id: Snowflake) -> ServiceResult<()> {
        self.ctx.tag_repo().delete(tag_id).await?;
        info!(tag_id = %tag_id, "Tag deleted");
        Ok(())
    }

    async fn find(&self, tag_id: Snowflake) -> ServiceResult<Tag> {
        Ok(self
            .ctx
            .tag_repo()
            .find_by_id(tag_id)
            .await?
            .ok_or(DomainError::TagNotFound(tag_id))?)
    }
}
