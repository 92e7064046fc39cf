use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StoreError;

/// A single customer review embedded in a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user: Uuid,
    pub name: String,
    pub rating: f64,
    pub comment: String,
}

/// Core catalog entity. `rating` and `review_count` are derived from
/// `reviews` and recomputed on every append, never set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub rating: f64,
    pub review_count: i64,
    pub cover_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    pub featured: bool,
    pub bestseller: bool,
    pub reviews: Vec<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(title: String, author: String, description: String, price: f64, category: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            author,
            description,
            price,
            category,
            stock: 0,
            rating: 0.0,
            review_count: 0,
            cover_image: String::new(),
            original_price: None,
            genre: None,
            isbn: None,
            pages: None,
            language: None,
            published_date: None,
            featured: false,
            bestseller: false,
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Placeholder record an admin creates first and edits afterwards.
    pub fn sample() -> Self {
        let mut book = Book::new(
            "Sample name".to_string(),
            "Sample Author".to_string(),
            "Sample description".to_string(),
            0.0,
            "Sample category".to_string(),
        );
        book.cover_image = "/images/sample.jpg".to_string();
        book
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::ValidationError("Title cannot be empty".to_string()));
        }
        if self.author.trim().is_empty() {
            return Err(StoreError::ValidationError("Author cannot be empty".to_string()));
        }
        if self.price < 0.0 {
            return Err(StoreError::ValidationError("Price cannot be negative".to_string()));
        }
        if self.stock < 0 {
            return Err(StoreError::ValidationError("Stock cannot be negative".to_string()));
        }
        Ok(())
    }

    /// Appends a review and recomputes the derived rating fields.
    /// A user may review a given book only once.
    pub fn add_review(&mut self, user: Uuid, name: String, rating: f64, comment: String) -> Result<(), StoreError> {
        if !(1.0..=5.0).contains(&rating) {
            return Err(StoreError::ValidationError("Rating must be between 1 and 5".to_string()));
        }
        if self.reviews.iter().any(|r| r.user == user) {
            return Err(StoreError::ValidationError("Book already reviewed".to_string()));
        }

        self.reviews.push(Review { user, name, rating, comment });
        self.review_count = self.reviews.len() as i64;
        self.rating = self.reviews.iter().map(|r| r.rating).sum::<f64>() / self.reviews.len() as f64;
        self.updated_at = Utc::now();
        Ok(())
    }
}
