use diary_models::db::{config::DbConfig, connection::DbConnection, connection::MIGRATIONS};
use diesel_migrations::MigrationHarness;

pub struct DBTestContext {
    pub db: DbConnection,
}

impl DBTestContext {
    pub fn from_env() -> Self {
        let config = DbConfig::from_env().expect("Env Variable 'DATABASE_URL' missing");
        let db = DbConnection::new(&config)
            .expect("Cannot connect to database")
            .setup()
            .expect("Failed to run database migrations");
        Self { db }
    }
}

impl Drop for DBTestContext {
    fn drop(&mut self) {
        self.db
            .pool
            .get()
            .expect("Cannot get a connection to revert migrations")
            .revert_all_migrations(MIGRATIONS)
            .expect("Failed to revert changes to db");
    }
}
