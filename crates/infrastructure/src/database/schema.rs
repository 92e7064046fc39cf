// Database schema for the storefront. Ids are uuid strings, timestamps
// are RFC 3339 text, and nested documents (reviews, order items,
// addresses) are JSON columns.

pub(crate) const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS books (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        description TEXT NOT NULL,
        price REAL NOT NULL,
        category TEXT NOT NULL,
        stock INTEGER NOT NULL,
        rating REAL NOT NULL,          -- derived from reviews
        review_count INTEGER NOT NULL, -- derived from reviews
        cover_image TEXT NOT NULL,
        original_price REAL,
        genre TEXT,
        isbn TEXT,
        pages INTEGER,
        language TEXT,
        published_date TEXT,
        featured INTEGER NOT NULL,
        bestseller INTEGER NOT NULL,
        reviews TEXT NOT NULL,         -- JSON array of reviews
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        is_admin INTEGER NOT NULL,
        address TEXT,                  -- JSON document, optional
        wishlist TEXT NOT NULL,        -- JSON array of book ids
        reset_token_hash TEXT,
        reset_token_expires TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS orders (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        order_items TEXT NOT NULL,     -- JSON array of purchased lines
        shipping_address TEXT NOT NULL, -- JSON document
        payment_method TEXT NOT NULL,
        payment_result TEXT,           -- JSON document, set on verification
        items_price REAL NOT NULL,
        tax_price REAL NOT NULL,
        shipping_price REAL NOT NULL,
        total_price REAL NOT NULL,
        status TEXT NOT NULL,
        is_paid INTEGER NOT NULL,
        is_delivered INTEGER NOT NULL,
        paid_at TEXT,
        delivered_at TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders (user_id)",
    "CREATE TABLE IF NOT EXISTS offers (
        id TEXT PRIMARY KEY,
        code TEXT NOT NULL UNIQUE,
        discount_percentage REAL NOT NULL,
        expiration_date TEXT NOT NULL,
        description TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS subscribers (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS messages (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        subject TEXT NOT NULL,
        body TEXT NOT NULL,
        is_read INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
];
