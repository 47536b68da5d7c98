//! User (renter) management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        page::{Page, PageFilter},
        user::{CreateUser, UpdateUser, User},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Paged, filtered listing
    pub async fn get_all(&self, filter: &PageFilter) -> AppResult<Page<User>> {
        let page = self.repository.users.search(filter).await?;
        if page.items.is_empty() {
            return Err(AppError::NotFound("No users found.".to_string()));
        }
        Ok(page)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository
            .users
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))
    }

    pub async fn create(&self, user: CreateUser) -> AppResult<User> {
        user.validate()?;
        self.repository.users.create(&user).await
    }

    pub async fn update(&self, id: i32, user: UpdateUser) -> AppResult<User> {
        user.validate()?;

        if self.repository.users.get(id).await?.is_none() {
            return Err(AppError::NotFound("User not found.".to_string()));
        }

        self.repository.users.update(id, &user).await
    }

    /// Delete a user. Users with rental history stay, closed or not, so the
    /// history keeps its reference.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.users.get(id).await?.is_none() {
            return Err(AppError::NotFound("User not found.".to_string()));
        }
        if self.repository.users.has_rentals(id).await? {
            return Err(AppError::BadRequest(
                "User has rentals and cannot be deleted.".to_string(),
            ));
        }

        self.repository.users.delete(id).await
    }
}
