//! Genre service
//!
//! Anyone may browse genres; adding and removing them is an admin task.

use gamestore_core::entities::Genre;
use gamestore_core::{DomainError, GenreId, Page, PageWindow, Session};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::AddGenreRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Genre service
pub struct GenreService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GenreService<'a> {
    /// Create a new GenreService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_genres(&self, page: u32) -> ServiceResult<Page<Genre>> {
        let total = self.ctx.genre_repo().count().await?;
        let Some(window) = PageWindow::resolve(total, self.ctx.catalog().page_size, page) else {
            return Ok(Page::empty());
        };

        let genres = self
            .ctx
            .genre_repo()
            .list(window.limit, window.offset)
            .await?;
        Ok(window.into_page(genres))
    }

    #[instrument(skip(self, session, request), fields(name = %request.name))]
    pub async fn add_genre(&self, session: &Session, request: AddGenreRequest) -> ServiceResult<Genre> {
        session.require_admin()?;
        request.validate()?;

        let genre = Genre::new(self.ctx.generate_id(), request.name.trim().to_string());
        self.ctx.genre_repo().create(&genre).await?;

        info!(genre_id = %genre.id, "Genre added");
        Ok(genre)
    }

    /// Soft-delete a genre; games keep their association rows but stop
    /// listing it
    #[instrument(skip(self, session))]
    pub async fn remove_genre(&self, session: &Session, id: GenreId) -> ServiceResult<()> {
        session.require_admin()?;
        if self.ctx.genre_repo().find_by_id(id).await?.is_none() {
            return Err(DomainError::GenreNotFound(id).into());
        }

        self.ctx.genre_repo().delete(id).await?;

        info!(genre_id = %id, "Genre removed");
        Ok(())
    }
}
