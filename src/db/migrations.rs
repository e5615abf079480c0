pub fn run_migrations(conn: &rusqlite::Connection) -> anyhow::Result<()> {
    // Ensure schema_version table exists
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);
         INSERT INTO schema_version SELECT 0 WHERE NOT EXISTS (SELECT 1 FROM schema_version);",
    )?;

    let version = schema_version(conn)?;

    if version < 1 {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS portfolio_items (
                id          TEXT PRIMARY KEY,
                media_type  TEXT NOT NULL CHECK (media_type IN ('photo', 'video')),
                category    TEXT NOT NULL,
                embed_url   TEXT NOT NULL,
                full_url    TEXT,
                title       TEXT,
                created_at  TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS portfolio_categories (
                id             INTEGER PRIMARY KEY,
                slug           TEXT NOT NULL UNIQUE,
                display_label  TEXT NOT NULL,
                thumbnail_url  TEXT,
                display_order  INTEGER NOT NULL DEFAULT 0
            );
            CREATE INDEX IF NOT EXISTS idx_items_category_created
                ON portfolio_items(category, created_at);
            UPDATE schema_version SET version = 1;
            ",
        )?;
    }

    if version < 2 {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                id             INTEGER PRIMARY KEY,
                email          TEXT NOT NULL UNIQUE,
                password_hash  TEXT NOT NULL,
                is_admin       INTEGER NOT NULL DEFAULT 0,
                created_at     TEXT NOT NULL
            );
            UPDATE schema_version SET version = 2;
            ",
        )?;
    }

    Ok(())
}

pub fn schema_version(conn: &rusqlite::Connection) -> anyhow::Result<u32> {
    let version: u32 = conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
        row.get(0)
    })?;
    Ok(version)
}
