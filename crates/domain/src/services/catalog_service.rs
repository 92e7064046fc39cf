use crate::entities::{Book, Category};
use crate::errors::StoreError;
use crate::repositories::{BookFilter, BookRepository, CategoryRepository};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Full-field admin edit, the shape the back office submits.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub cover_image: String,
    pub category: String,
    pub stock: i64,
    pub author: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bestseller: bool,
}

/// Catalog browsing, admin book management, reviews, and the curated
/// category list.
pub struct CatalogService {
    book_repository: Arc<dyn BookRepository>,
    category_repository: Arc<dyn CategoryRepository>,
}

impl CatalogService {
    pub fn new(
        book_repository: Arc<dyn BookRepository>,
        category_repository: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            book_repository,
            category_repository,
        }
    }

    pub async fn get_books(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        self.book_repository.find_filtered(filter).await
    }

    pub async fn get_book_by_id(&self, id: Uuid) -> Result<Book, StoreError> {
        match self.book_repository.find_by_id(id).await? {
            Some(book) => Ok(book),
            None => Err(StoreError::BookNotFound),
        }
    }

    /// Admin create: inserts a placeholder record the back office edits
    /// afterwards.
    pub async fn create_book(&self) -> Result<Book, StoreError> {
        let book = Book::sample();
        self.book_repository.save(&book).await
    }

    pub async fn update_book(&self, id: Uuid, changes: BookUpdate) -> Result<Book, StoreError> {
        let mut book = self.get_book_by_id(id).await?;

        book.title = changes.title;
        book.price = changes.price;
        book.description = changes.description;
        book.cover_image = changes.cover_image;
        book.category = changes.category;
        book.stock = changes.stock;
        book.author = changes.author;
        book.featured = changes.featured;
        book.bestseller = changes.bestseller;
        book.updated_at = Utc::now();

        book.validate()?;
        self.book_repository.update(&book).await
    }

    pub async fn delete_book(&self, id: Uuid) -> Result<(), StoreError> {
        self.get_book_by_id(id).await?;
        self.book_repository.delete(id).await
    }

    /// Appends a customer review and persists the recomputed rating.
    pub async fn add_review(
        &self,
        book_id: Uuid,
        user_id: Uuid,
        user_name: String,
        rating: f64,
        comment: String,
    ) -> Result<Book, StoreError> {
        let mut book = self.get_book_by_id(book_id).await?;
        book.add_review(user_id, user_name, rating, comment)?;
        self.book_repository.update(&book).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.category_repository.find_all().await
    }

    pub async fn create_category(
        &self,
        name: String,
        description: String,
    ) -> Result<Category, StoreError> {
        let category = Category::new(name, description);
        category.validate()?;

        if self
            .category_repository
            .find_by_name(&category.name)
            .await?
            .is_some()
        {
            return Err(StoreError::ValidationError(
                "Category already exists".to_string(),
            ));
        }

        self.category_repository.save(&category).await
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<(), StoreError> {
        match self.category_repository.find_by_id(id).await? {
            Some(_) => self.category_repository.delete(id).await,
            None => Err(StoreError::CategoryNotFound),
        }
    }
}
