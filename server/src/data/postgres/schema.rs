//! PostgreSQL schema definitions
//!
//! Mirrors the SQLite schema with native BIGSERIAL keys.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL for PostgreSQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at BIGINT NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at BIGINT NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms BIGINT,
    success BOOLEAN NOT NULL DEFAULT TRUE
);

-- =============================================================================
-- 1. Users
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE CHECK(length(username) >= 1 AND length(username) <= 80),
    email TEXT NOT NULL UNIQUE CHECK(length(email) <= 120),
    password_hash TEXT NOT NULL,
    created_at BIGINT NOT NULL
);

-- =============================================================================
-- 2. Recipes (tools, ingredients and taste hold JSON string arrays)
-- =============================================================================
CREATE TABLE IF NOT EXISTS recipes (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 255),
    description TEXT,
    image_url TEXT,
    time BIGINT,
    cuisine TEXT,
    difficulty TEXT,
    tools TEXT,
    ingredients TEXT,
    taste TEXT
);

CREATE INDEX IF NOT EXISTS idx_recipes_time ON recipes(time);
CREATE INDEX IF NOT EXISTS idx_recipes_name_lower ON recipes(LOWER(name));

-- =============================================================================
-- 3. Favorites
-- =============================================================================
CREATE TABLE IF NOT EXISTS favorites (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    recipe_id BIGINT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
    created_at BIGINT NOT NULL,
    UNIQUE(user_id, recipe_id)
);

CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id);
"#;
