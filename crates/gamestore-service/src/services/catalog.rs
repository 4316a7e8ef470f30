//! Catalog service
//!
//! Browsing plus the ownership-checked mutations of games. Removal follows
//! `can_mutate_game` (admins or the owning developer); edits and genre
//! replacement follow `can_edit_game` (owning developer only).

use gamestore_core::entities::{Game, GameDetails};
use gamestore_core::policy::{can_edit_game, can_mutate_game};
use gamestore_core::{
    DeveloperId, DomainError, GameId, GenreId, Money, Page, PageWindow, Role, Session,
};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AddGameRequest, UpdateGameRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Catalog service
pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    /// Create a new CatalogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of the catalog; out of range pages are clamped
    #[instrument(skip(self))]
    pub async fn list_games(&self, page: u32) -> ServiceResult<Page<Game>> {
        self.list_page(None, page).await
    }

    /// One page of a developer's games
    #[instrument(skip(self))]
    pub async fn list_developer_games(
        &self,
        developer_id: DeveloperId,
        page: u32,
    ) -> ServiceResult<Page<Game>> {
        self.list_page(Some(developer_id), page).await
    }

    #[instrument(skip(self))]
    pub async fn game_details(&self, id: GameId) -> ServiceResult<GameDetails> {
        self.ctx
            .game_repo()
            .find_details(id)
            .await?
            .ok_or_else(|| DomainError::GameNotFound(id).into())
    }

    /// Current price, used as the snapshot when a game is added to a cart
    #[instrument(skip(self))]
    pub async fn game_price(&self, id: GameId) -> ServiceResult<Money> {
        Ok(self.find_game(id).await?.price)
    }

    /// Add a game to the catalog
    ///
    /// Developers add games to their own catalog; admins must name the
    /// developer in the request.
    #[instrument(skip(self, session, request), fields(title = %request.title))]
    pub async fn add_game(&self, session: &Session, request: AddGameRequest) -> ServiceResult<Game> {
        request.validate()?;

        let developer_id = match session.role {
            Role::Developer => {
                let own = session.require_developer()?;
                if request.developer_id.is_some_and(|requested| requested != own) {
                    warn!(developer_id = %own, "Add game denied: foreign developer");
                    return Err(DomainError::PermissionDenied(
                        "developers can only add their own games".to_string(),
                    )
                    .into());
                }
                own
            }
            Role::Admin => request.developer_id.ok_or_else(|| {
                DomainError::InvalidInput("developer id is required".to_string())
            })?,
            Role::User => {
                return Err(DomainError::PermissionDenied(format!(
                    "{} accounts cannot add games",
                    session.role
                ))
                .into());
            }
        };

        if self
            .ctx
            .developer_repo()
            .find_by_id(developer_id)
            .await?
            .is_none()
        {
            return Err(DomainError::DeveloperNotFound(developer_id).into());
        }

        let price = parse_price(&request.price)?;
        let game = Game::new(
            self.ctx.generate_id(),
            developer_id,
            request.title.trim().to_string(),
            price,
            request.release_date,
        );
        self.ctx.game_repo().create(&game).await?;

        info!(game_id = %game.id, developer_id = %developer_id, "Game added");
        Ok(game)
    }

    /// Edit title, price or release date; owning developer only
    #[instrument(skip(self, session, request))]
    pub async fn update_game(
        &self,
        session: &Session,
        id: GameId,
        request: UpdateGameRequest,
    ) -> ServiceResult<Game> {
        request.validate()?;
        let mut game = self.find_game(id).await?;
        ensure_can_edit(session, &game)?;

        if let Some(title) = request.title {
            game.title = title.trim().to_string();
        }
        if let Some(price) = request.price {
            game.price = parse_price(&price)?;
        }
        if request.release_date.is_some() {
            game.release_date = request.release_date;
        }

        self.ctx.game_repo().update(&game).await?;

        info!(game_id = %id, "Game updated");
        Ok(game)
    }

    /// Soft-delete a game; admins or the owning developer
    #[instrument(skip(self, session))]
    pub async fn remove_game(&self, session: &Session, id: GameId) -> ServiceResult<()> {
        let game = self.find_game(id).await?;
        if !can_mutate_game(session.role, session.developer_id, game.developer_id) {
            warn!(game_id = %id, role = %session.role, "Remove game denied");
            return Err(DomainError::NotGameOwner(id).into());
        }

        self.ctx.game_repo().delete(id).await?;

        info!(game_id = %id, "Game removed");
        Ok(())
    }

    /// Replace the whole genre set of a game; all or nothing
    #[instrument(skip(self, session))]
    pub async fn replace_genres(
        &self,
        session: &Session,
        id: GameId,
        genre_ids: &[GenreId],
    ) -> ServiceResult<()> {
        let game = self.find_game(id).await?;
        ensure_can_edit(session, &game)?;

        self.ctx.game_repo().replace_genres(id, genre_ids).await?;

        info!(game_id = %id, genres = genre_ids.len(), "Game genres replaced");
        Ok(())
    }

    /// Whether `developer_id` owns the live game `id`
    #[instrument(skip(self))]
    pub async fn is_game_owned_by(&self, developer_id: DeveloperId, id: GameId) -> ServiceResult<bool> {
        let game = self.ctx.game_repo().find_by_id(id).await?;
        Ok(game.is_some_and(|g| g.is_owned_by(developer_id)))
    }

    async fn find_game(&self, id: GameId) -> ServiceResult<Game> {
        self.ctx
            .game_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::GameNotFound(id).into())
    }

    async fn list_page(&self, developer_id: Option<DeveloperId>, page: u32) -> ServiceResult<Page<Game>> {
        let total = self.ctx.game_repo().count(developer_id).await?;
        let Some(window) = PageWindow::resolve(total, self.ctx.catalog().page_size, page) else {
            return Ok(Page::empty());
        };

        let games = self
            .ctx
            .game_repo()
            .list(developer_id, window.limit, window.offset)
            .await?;
        Ok(window.into_page(games))
    }
}

fn ensure_can_edit(session: &Session, game: &Game) -> Result<(), DomainError> {
    if can_edit_game(session.role, session.developer_id, game.developer_id) {
        return Ok(());
    }

    warn!(game_id = %game.id, role = %session.role, "Edit game denied");
    if session.role == Role::Developer {
        Err(DomainError::NotGameOwner(game.id))
    } else {
        Err(DomainError::PermissionDenied(format!(
            "{} accounts cannot edit games",
            session.role
        )))
    }
}

fn parse_price(raw: &str) -> Result<Money, DomainError> {
    Money::parse(raw).map_err(|e| DomainError::InvalidInput(e.to_string()))
}
