use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS assets (
            id TEXT PRIMARY KEY,
            symbol TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS price_history (
            asset_id TEXT NOT NULL,
            date TEXT NOT NULL,
            open REAL NOT NULL,
            high REAL NOT NULL,
            low REAL NOT NULL,
            close REAL NOT NULL,
            volume REAL,
            PRIMARY KEY (asset_id, date)
        );

        CREATE TABLE IF NOT EXISTS daily_indicators (
            asset_id TEXT NOT NULL,
            date TEXT NOT NULL,
            sma_7 REAL,
            sma_14 REAL,
            PRIMARY KEY (asset_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_price_history_date ON price_history(date);
        CREATE INDEX IF NOT EXISTS idx_daily_indicators_date ON daily_indicators(date);
        "
    ).map_err(|e| format!("Migration failed: {e}"))
}
