use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Book, BookFilter, BookRepository, Review, StoreError};
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

// Database model - separate from domain entity
#[derive(Debug, FromRow)]
struct BookModel {
    id: String,
    title: String,
    author: String,
    description: String,
    price: f64,
    category: String,
    stock: i64,
    rating: f64,
    review_count: i64,
    cover_image: String,
    original_price: Option<f64>,
    genre: Option<String>,
    isbn: Option<String>,
    pages: Option<i64>,
    language: Option<String>,
    published_date: Option<String>,
    featured: bool,
    bestseller: bool,
    reviews: Json<Vec<Review>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookModel> for Book {
    type Error = StoreError;

    fn try_from(model: BookModel) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|e| StoreError::RepositoryError(format!("invalid book id: {}", e)))?;
        Ok(Book {
            id,
            title: model.title,
            author: model.author,
            description: model.description,
            price: model.price,
            category: model.category,
            stock: model.stock,
            rating: model.rating,
            review_count: model.review_count,
            cover_image: model.cover_image,
            original_price: model.original_price,
            genre: model.genre,
            isbn: model.isbn,
            pages: model.pages,
            language: model.language,
            published_date: model.published_date,
            featured: model.featured,
            bestseller: model.bestseller,
            reviews: model.reviews.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        let model = sqlx::query_as::<_, BookModel>("SELECT * FROM books WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        model.map(Book::try_from).transpose()
    }

    async fn find_filtered(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let mut sql = String::from("SELECT * FROM books");
        let mut clauses = Vec::new();
        if filter.keyword.is_some() {
            clauses.push("LOWER(title) LIKE ?");
        }
        if filter.category.is_some() {
            clauses.push("category = ?");
        }
        if filter.featured.is_some() {
            clauses.push("featured = ?");
        }
        if filter.bestseller.is_some() {
            clauses.push("bestseller = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, BookModel>(&sql);
        if let Some(keyword) = &filter.keyword {
            query = query.bind(format!("%{}%", keyword.to_lowercase()));
        }
        if let Some(category) = &filter.category {
            query = query.bind(category.clone());
        }
        if let Some(featured) = filter.featured {
            query = query.bind(featured);
        }
        if let Some(bestseller) = filter.bestseller {
            query = query.bind(bestseller);
        }

        let models = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        models.into_iter().map(Book::try_from).collect()
    }

    async fn save(&self, book: &Book) -> Result<Book, StoreError> {
        sqlx::query(
            "INSERT INTO books (id, title, author, description, price, category, stock, \
             rating, review_count, cover_image, original_price, genre, isbn, pages, language, \
             published_date, featured, bestseller, reviews, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(book.id.to_string())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.price)
        .bind(&book.category)
        .bind(book.stock)
        .bind(book.rating)
        .bind(book.review_count)
        .bind(&book.cover_image)
        .bind(book.original_price)
        .bind(&book.genre)
        .bind(&book.isbn)
        .bind(book.pages)
        .bind(&book.language)
        .bind(&book.published_date)
        .bind(book.featured)
        .bind(book.bestseller)
        .bind(Json(&book.reviews))
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        Ok(book.clone())
    }

    async fn update(&self, book: &Book) -> Result<Book, StoreError> {
        let result = sqlx::query(
            "UPDATE books SET title = ?, author = ?, description = ?, price = ?, category = ?, \
             stock = ?, rating = ?, review_count = ?, cover_image = ?, original_price = ?, \
             genre = ?, isbn = ?, pages = ?, language = ?, published_date = ?, featured = ?, \
             bestseller = ?, reviews = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.price)
        .bind(&book.category)
        .bind(book.stock)
        .bind(book.rating)
        .bind(book.review_count)
        .bind(&book.cover_image)
        .bind(book.original_price)
        .bind(&book.genre)
        .bind(&book.isbn)
        .bind(book.pages)
        .bind(&book.language)
        .bind(&book.published_date)
        .bind(book.featured)
        .bind(book.bestseller)
        .bind(Json(&book.reviews))
        .bind(book.updated_at)
        .bind(book.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::BookNotFound);
        }
        Ok(book.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    async fn repository() -> SqliteBookRepository {
        let database = Database::connect("sqlite::memory:").await.unwrap();
        SqliteBookRepository::new(database.get_pool())
    }

    fn book(title: &str, category: &str, featured: bool) -> Book {
        let mut book = Book::new(
            title.to_string(),
            "Author".to_string(),
            "Description".to_string(),
            199.0,
            category.to_string(),
        );
        book.featured = featured;
        book.stock = 4;
        book
    }

    #[tokio::test]
    async fn save_and_reload_round_trips_reviews() {
        let repo = repository().await;
        let mut stored = book("Dune", "Science Fiction", false);
        stored
            .add_review(Uuid::new_v4(), "A".to_string(), 4.0, "good".to_string())
            .unwrap();
        repo.save(&stored).await.unwrap();

        let loaded = repo.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, stored.id);
        assert_eq!(loaded.title, "Dune");
        assert_eq!(loaded.stock, 4);
        assert_eq!(loaded.reviews, stored.reviews);
        assert_eq!(loaded.rating, 4.0);
    }

    #[tokio::test]
    async fn filters_combine_keyword_category_and_flags() {
        let repo = repository().await;
        repo.save(&book("Dune", "Science Fiction", true)).await.unwrap();
        repo.save(&book("Dune Messiah", "Science Fiction", false))
            .await
            .unwrap();
        repo.save(&book("Emma", "Classics", true)).await.unwrap();

        let by_keyword = repo
            .find_filtered(&BookFilter {
                keyword: Some("dune".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_keyword.len(), 2);

        let featured_scifi = repo
            .find_filtered(&BookFilter {
                category: Some("Science Fiction".to_string()),
                featured: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(featured_scifi.len(), 1);
        assert_eq!(featured_scifi[0].title, "Dune");

        let everything = repo.find_filtered(&BookFilter::default()).await.unwrap();
        assert_eq!(everything.len(), 3);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn update_of_missing_book_is_not_found() {
        let repo = repository().await;
        let err = repo.update(&book("Ghost", "None", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::BookNotFound));
    }
}
