//! Demo fixtures for an empty store: a starter catalog, two accounts,
//! and the launch promo codes.

use chrono::{Duration, Utc};
use domain::{Book, Category, Offer, StoreError, User};

use crate::StoreApp;

const DEMO_PASSWORD: &str = "123456";

pub(crate) async fn run(app: &StoreApp) -> Result<(), StoreError> {
    if app.book_repository.count().await? > 0 {
        return Ok(());
    }

    let books = catalog();
    for book in &books {
        app.book_repository.save(book).await?;
    }

    let mut names: Vec<&str> = books.iter().map(|book| book.category.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    let category_count = names.len();
    for name in names {
        app.category_repository
            .save(&Category::new(name.to_string(), String::new()))
            .await?;
    }

    // Both demo accounts share one hash; bcrypt is too slow to run twice
    // for identical passwords.
    let password_hash = bcrypt::hash(DEMO_PASSWORD, bcrypt::DEFAULT_COST)
        .map_err(|e| StoreError::Internal(e.to_string()))?;
    let mut admin = User::new(
        "Admin User".to_string(),
        "admin@example.com".to_string(),
        password_hash.clone(),
    );
    admin.is_admin = true;
    app.user_repository.save(&admin).await?;

    let customer = User::new(
        "John Doe".to_string(),
        "user@example.com".to_string(),
        password_hash,
    );
    app.user_repository.save(&customer).await?;

    for offer in offers() {
        app.offer_repository.save(&offer).await?;
    }

    tracing::info!(
        "seeded empty store: {} books, {} categories, 2 users, 2 offers",
        books.len(),
        category_count
    );
    Ok(())
}

fn offers() -> Vec<Offer> {
    let next_year = Utc::now() + Duration::days(365);
    vec![
        Offer::new(
            "WELCOME10".to_string(),
            10.0,
            next_year,
            "Welcome offer: 10% off".to_string(),
        ),
        Offer::new(
            "BOOKLOVER".to_string(),
            15.0,
            next_year,
            "Special offer for book lovers: 15% off".to_string(),
        ),
    ]
}

fn catalog() -> Vec<Book> {
    let mut midnight = base(
        "The Midnight Library",
        "Matt Haig",
        "Between life and death there is a library, and within that library, \
         the shelves go on forever. Every book provides a chance to try another \
         life you could have lived.",
        499.0,
        "Fiction",
        45,
    );
    detail(
        &mut midnight,
        "Contemporary Fiction",
        "photo-1544947950-fa07a98d237f",
        "2020-08-13",
        "978-0525559474",
        304,
    );
    midnight.original_price = Some(699.0);
    midnight.featured = true;
    midnight.bestseller = true;

    let mut habits = base(
        "Atomic Habits",
        "James Clear",
        "No matter your goals, Atomic Habits offers a proven framework for \
         improving every day. Learn how tiny changes in behavior will add up \
         to remarkable results.",
        399.0,
        "Self-Help",
        120,
    );
    detail(
        &mut habits,
        "Personal Development",
        "photo-1589829085413-56de8ae18c73",
        "2018-10-16",
        "978-0735211292",
        320,
    );
    habits.original_price = Some(599.0);
    habits.featured = true;
    habits.bestseller = true;

    let mut patient = base(
        "The Silent Patient",
        "Alex Michaelides",
        "Alicia Berenson's life is seemingly perfect. Until one evening, her \
         husband Gabriel returns home late from work, and Alicia shoots him \
         five times in the face.",
        349.0,
        "Mystery",
        67,
    );
    detail(
        &mut patient,
        "Psychological Thriller",
        "photo-1543002588-bfa74002ed7e",
        "2019-02-05",
        "978-1250301697",
        336,
    );
    patient.original_price = Some(499.0);
    patient.featured = true;

    let mut wings = base(
        "Wings of Fire",
        "APJ Abdul Kalam",
        "An autobiography of one of India's most distinguished scientists and \
         the man who led India's missile program. A story of determination \
         and courage.",
        299.0,
        "Biography",
        89,
    );
    detail(
        &mut wings,
        "Autobiography",
        "photo-1512820790803-83ca734da794",
        "1999-01-01",
        "978-8173711466",
        180,
    );
    wings.bestseller = true;

    let mut alchemist = base(
        "The Alchemist",
        "Paulo Coelho",
        "A magical fable about following your dream, this international \
         bestseller has inspired millions of readers around the world.",
        299.0,
        "Fiction",
        156,
    );
    detail(
        &mut alchemist,
        "Philosophical Fiction",
        "photo-1476275466078-4007374efbbe",
        "1988-01-01",
        "978-0062315007",
        208,
    );
    alchemist.original_price = Some(399.0);
    alchemist.bestseller = true;

    let mut sapiens = base(
        "Sapiens",
        "Yuval Noah Harari",
        "A brief history of humankind. How did our species succeed in the \
         battle for dominance? Why did our ancestors come together to create \
         cities and kingdoms?",
        599.0,
        "Non-Fiction",
        78,
    );
    detail(
        &mut sapiens,
        "History",
        "photo-1524578271613-d550eacf6090",
        "2011-01-01",
        "978-0062316097",
        464,
    );
    sapiens.original_price = Some(799.0);
    sapiens.featured = true;

    let mut hail_mary = base(
        "Project Hail Mary",
        "Andy Weir",
        "Ryland Grace is the sole survivor on a desperate, last-chance \
         mission. If he fails, humanity and the earth itself will perish.",
        449.0,
        "Science Fiction",
        56,
    );
    detail(
        &mut hail_mary,
        "Hard Science Fiction",
        "photo-1614544048536-0d28caf77f41",
        "2021-05-04",
        "978-0593135204",
        496,
    );
    hail_mary.original_price = Some(599.0);
    hail_mary.featured = true;

    let mut potter = base(
        "Harry Potter and the Sorcerer's Stone",
        "J.K. Rowling",
        "Harry Potter has no idea how famous he is. The first book in the \
         beloved Harry Potter series.",
        399.0,
        "Children's",
        234,
    );
    detail(
        &mut potter,
        "Fantasy",
        "photo-1618666012174-83b441c0bc76",
        "1997-06-26",
        "978-0590353427",
        309,
    );
    potter.bestseller = true;

    vec![
        midnight, habits, patient, wings, alchemist, sapiens, hail_mary, potter,
    ]
}

fn base(
    title: &str,
    author: &str,
    description: &str,
    price: f64,
    category: &str,
    stock: i64,
) -> Book {
    let mut book = Book::new(
        title.to_string(),
        author.to_string(),
        description.to_string(),
        price,
        category.to_string(),
    );
    book.stock = stock;
    book.language = Some("English".to_string());
    book
}

fn detail(book: &mut Book, genre: &str, cover: &str, published: &str, isbn: &str, pages: i64) {
    book.genre = Some(genre.to_string());
    book.cover_image = format!(
        "https://images.unsplash.com/{}?w=400&h=600&fit=crop",
        cover
    );
    book.published_date = Some(published.to_string());
    book.isbn = Some(isbn.to_string());
    book.pages = Some(pages);
}
