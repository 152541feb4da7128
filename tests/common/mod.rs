//! Shared helpers for integration tests.

use globetrotter::db::{DbPool, establish_connection_pool, run_migrations};
use tempfile::TempDir;

/// Migrated SQLite database in a temporary directory that is removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
