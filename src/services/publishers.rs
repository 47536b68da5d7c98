//! Publisher management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        page::{Page, PageFilter},
        publisher::{CreatePublisher, Publisher, UpdatePublisher},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct PublishersService {
    repository: Repository,
}

impl PublishersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Paged, filtered listing
    pub async fn get_all(&self, filter: &PageFilter) -> AppResult<Page<Publisher>> {
        let page = self.repository.publishers.search(filter).await?;
        if page.items.is_empty() {
            return Err(AppError::NotFound("No publishers found.".to_string()));
        }
        Ok(page)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Publisher> {
        self.repository
            .publishers
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Publisher not found.".to_string()))
    }

    pub async fn create(&self, publisher: CreatePublisher) -> AppResult<Publisher> {
        publisher.validate()?;
        self.repository.publishers.create(&publisher).await
    }

    pub async fn update(&self, id: i32, publisher: UpdatePublisher) -> AppResult<Publisher> {
        publisher.validate()?;

        if self.repository.publishers.get(id).await?.is_none() {
            return Err(AppError::NotFound("Publisher not found.".to_string()));
        }

        self.repository.publishers.update(id, &publisher).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.publishers.get(id).await?.is_none() {
            return Err(AppError::NotFound("Publisher not found.".to_string()));
        }
        if self.repository.publishers.has_books(id).await? {
            return Err(AppError::BadRequest(
                "Publisher has books and cannot be deleted.".to_string(),
            ));
        }

        self.repository.publishers.delete(id).await
    }
}
