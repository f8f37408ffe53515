use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use crate::config::DatabaseSettings;
use crate::error::AppError;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;
pub type PgPooledConnection = PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn builder(settings: &DatabaseSettings) -> r2d2::Builder<ConnectionManager<PgConnection>> {
    Pool::builder()
        .max_size(settings.pool_size)
        .connection_timeout(Duration::from_secs(settings.timeout_seconds))
}

/// Builds the pool and waits until it holds its first connection.
pub fn init_pool(settings: &DatabaseSettings) -> Result<PgPool, AppError> {
    let manager = ConnectionManager::<PgConnection>::new(&settings.url);
    Ok(builder(settings).build(manager)?)
}

/// Builds the pool without connecting; connections are opened on first use.
pub fn lazy_pool(settings: &DatabaseSettings) -> PgPool {
    let manager = ConnectionManager::<PgConnection>::new(&settings.url);
    builder(settings).build_unchecked(manager)
}

pub fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| AppError::Migration(e.to_string()))?;
    for version in applied {
        tracing::info!(%version, "applied migration");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use std::path::Path;

    #[test]
    fn every_down_migration_drops_what_up_creates() {
        let created = Regex::new(r"(?i)CREATE TABLE (?:IF NOT EXISTS )?(\w+)").unwrap();
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
        let mut checked = 0;
        for entry in std::fs::read_dir(dir).unwrap() {
            let migration = entry.unwrap().path();
            let up = std::fs::read_to_string(migration.join("up.sql")).unwrap();
            let down = std::fs::read_to_string(migration.join("down.sql")).unwrap();
            for table in created.captures_iter(&up).map(|c| c[1].to_string()) {
                let dropped = Regex::new(&format!(r"(?i)DROP TABLE (?:IF EXISTS )?{table}\s*;")).unwrap();
                assert!(dropped.is_match(&down), "{} does not drop {table}", migration.display());
                checked += 1;
            }
        }
        assert!(checked >= 9);
    }
}
