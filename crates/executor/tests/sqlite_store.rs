use assert_matches::assert_matches;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;
use std::fs;
use std::path::{Path, PathBuf};
use strata_contracts::{ApplyOptions, MigrationStore};
use strata_core::{MigrateError, Migrator, MigratorConfig, Operation};
use strata_executor::{Backend, BodyStep, ExecutorError, SqliteStore, Store};
use strata_migration::{checksum, Migration};
use tempfile::TempDir;

struct Fixture {
    _tmp: TempDir,
    db: PathBuf,
    migrations: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("app.db");
        let migrations = tmp.path().join("migrations");
        fs::create_dir(&migrations).unwrap();
        Self {
            _tmp: tmp,
            db,
            migrations,
        }
    }

    fn write(&self, id: i64, name: &str, up: &str, down: &str) {
        let content = format!("-- up:begin\n{up}\n-- up:end\n-- down:begin\n{down}\n-- down:end\n");
        fs::write(self.migrations.join(format!("{id}.{name}.sql")), content).unwrap();
    }

    async fn store(&self) -> Store {
        Store::Sqlite(SqliteStore::from_connection(open(&self.db).await))
    }

    async fn run(&self, development: bool) -> Result<strata_core::RunReport, MigrateError> {
        let config = MigratorConfig::new(&self.migrations).with_development(development);
        Migrator::new(config, self.store().await).execute().await
    }

    async fn tracking_rows(&self) -> Vec<(i64, String, String)> {
        let mut conn = open(&self.db).await;
        sqlx::query_as("SELECT id, name, checksum FROM \"migrations\" ORDER BY id")
            .fetch_all(&mut conn)
            .await
            .unwrap()
    }

    async fn table_exists(&self, table: &str) -> bool {
        let mut conn = open(&self.db).await;
        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table)
                .fetch_optional(&mut conn)
                .await
                .unwrap();
        row.is_some()
    }

    async fn columns(&self, table: &str) -> Vec<String> {
        let mut conn = open(&self.db).await;
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info(?) ORDER BY cid")
            .bind(table)
            .fetch_all(&mut conn)
            .await
            .unwrap();
        rows.into_iter().map(|r| r.0).collect()
    }
}

async fn open(path: &Path) -> SqliteConnection {
    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .unwrap()
}

fn seed(fx: &Fixture) {
    fx.write(
        1,
        "create_users",
        "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL);",
        "DROP TABLE users;",
    );
    fx.write(
        2,
        "create_posts",
        "CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL);\nCREATE INDEX posts_user ON posts (user_id);",
        "DROP INDEX posts_user;\nDROP TABLE posts;",
    );
    fx.write(
        3,
        "seed_users",
        "INSERT INTO users (email) VALUES ('a@example.com');",
        "DELETE FROM users;",
    );
}

#[tokio::test]
async fn applies_series_and_records_checksums() {
    let fx = Fixture::new();
    seed(&fx);

    let report = fx.run(false).await.unwrap();
    assert_eq!(report.applied, vec![1, 2, 3]);

    assert!(fx.table_exists("users").await);
    assert!(fx.table_exists("posts").await);

    let rows = fx.tracking_rows().await;
    let ids: Vec<i64> = rows.iter().map(|r| r.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(rows[1].1, "create_posts");

    let loaded = strata_migration::load_migrations(&fx.migrations).unwrap();
    for (row, m) in rows.iter().zip(&loaded) {
        assert_eq!(row.2, checksum(&m.up, &m.down));
    }
}

#[tokio::test]
async fn second_run_is_a_noop() {
    let fx = Fixture::new();
    seed(&fx);
    fx.run(false).await.unwrap();

    let report = fx.run(false).await.unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(fx.tracking_rows().await.len(), 3);
}

#[tokio::test]
async fn production_refuses_edited_migration() {
    let fx = Fixture::new();
    seed(&fx);
    fx.run(false).await.unwrap();
    let before = fx.tracking_rows().await;

    fx.write(
        2,
        "create_posts",
        "CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL, title TEXT);\nCREATE INDEX posts_user ON posts (user_id);",
        "DROP INDEX posts_user;\nDROP TABLE posts;",
    );

    let err = fx.run(false).await.unwrap_err();
    assert_matches!(err, MigrateError::ChecksumMismatch { id: 2 });
    assert_eq!(fx.tracking_rows().await, before);
    assert_eq!(fx.columns("posts").await, vec!["id", "user_id"]);
}

#[tokio::test]
async fn development_replays_edited_migration() {
    let fx = Fixture::new();
    seed(&fx);
    fx.run(true).await.unwrap();

    fx.write(
        2,
        "create_posts",
        "CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL, title TEXT);\nCREATE INDEX posts_user ON posts (user_id);",
        "DROP INDEX posts_user;\nDROP TABLE posts;",
    );
    fx.write(4, "create_tags", "CREATE TABLE tags (name TEXT);", "DROP TABLE tags;");

    let report = fx.run(true).await.unwrap();
    assert_eq!(report.reverted, vec![3, 2]);
    assert_eq!(report.applied, vec![2, 3, 4]);
    assert_eq!(fx.columns("posts").await, vec!["id", "user_id", "title"]);

    let replayed = fx.tracking_rows().await;
    let fresh = Fixture::new();
    for entry in fs::read_dir(&fx.migrations).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), fresh.migrations.join(entry.file_name())).unwrap();
    }
    fresh.run(true).await.unwrap();
    assert_eq!(replayed, fresh.tracking_rows().await);
}

#[tokio::test]
async fn failed_body_rolls_back_the_whole_migration() {
    let fx = Fixture::new();
    fx.write(1, "ok", "CREATE TABLE a (id INTEGER);", "DROP TABLE a;");
    fx.write(
        2,
        "broken",
        "CREATE TABLE b (id INTEGER);\nINSERT INTO missing_table VALUES (1);",
        "DROP TABLE b;",
    );
    fx.write(3, "never", "CREATE TABLE c (id INTEGER);", "DROP TABLE c;");

    let err = fx.run(false).await.unwrap_err();
    assert_matches!(err, MigrateError::Execution { id: 2, operation: Operation::Apply, .. });

    assert!(fx.table_exists("a").await);
    assert!(!fx.table_exists("b").await);
    assert!(!fx.table_exists("c").await);
    let ids: Vec<i64> = fx.tracking_rows().await.iter().map(|r| r.0).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn development_catches_broken_down_body() {
    let fx = Fixture::new();
    fx.write(1, "users", "CREATE TABLE users (id INTEGER);", "DROP TABLE user_typo;");

    let err = fx.run(true).await.unwrap_err();
    let (id, source) = match err {
        MigrateError::Execution { id, source, .. } => (id, source),
        other => panic!("expected execution error, got {other:?}"),
    };
    assert_eq!(id, 1);
    let source = source.downcast::<ExecutorError>().unwrap();
    assert_matches!(
        *source,
        ExecutorError::StatementExecutionFailed { migration_id: 1, step: BodyStep::VerifyDown, .. }
    );
    assert!(!fx.table_exists("users").await);

    // Production does not run the check, so the same file applies.
    fx.run(false).await.unwrap();
    assert!(fx.table_exists("users").await);
}

#[tokio::test]
async fn rejects_unquotable_table_name() {
    let fx = Fixture::new();
    seed(&fx);

    let config = MigratorConfig::new(&fx.migrations).with_table_name("migrations; DROP TABLE users");
    let err = Migrator::new(config, fx.store().await).execute().await.unwrap_err();
    assert_matches!(err, MigrateError::AppliedState { .. });
}

#[tokio::test]
async fn revert_removes_row_and_effect() {
    let fx = Fixture::new();
    let mut store = fx.store().await;
    let migration = Migration::new(1, "t", "1.t.sql", "CREATE TABLE t (id INTEGER);", "DROP TABLE t;");

    assert!(store.list_migrations("migrations").await.unwrap().is_empty());
    store
        .apply_migration("migrations", &migration, ApplyOptions::default())
        .await
        .unwrap();

    let applied = store.list_migrations("migrations").await.unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].checksum, migration.checksum);

    store.revert_migration("migrations", &applied[0]).await.unwrap();
    assert!(store.list_migrations("migrations").await.unwrap().is_empty());
    store.close().await.unwrap();

    assert!(!fx.table_exists("t").await);
}

#[tokio::test]
async fn closed_session_rejects_calls() {
    let fx = Fixture::new();
    let mut store = fx.store().await;
    store.close().await.unwrap();

    let err = store.list_migrations("migrations").await.unwrap_err();
    assert_eq!(err, ExecutorError::SessionClosed);
}

#[tokio::test]
async fn store_connects_from_sqlite_url() {
    let fx = Fixture::new();
    seed(&fx);
    let url = format!("sqlite://{}", fx.db.display());

    let store = Store::connect(&url).await.unwrap();
    assert_eq!(store.backend(), Backend::Sqlite);
    let report = Migrator::new(MigratorConfig::new(&fx.migrations), store)
        .execute()
        .await
        .unwrap();
    assert_eq!(report.applied, vec![1, 2, 3]);
}

#[tokio::test]
async fn migrator_runs_on_a_spawned_task() {
    let fx = Fixture::new();
    seed(&fx);
    let config = MigratorConfig::new(&fx.migrations).with_development(true);
    let migrator = Migrator::new(config, fx.store().await);

    let report = tokio::spawn(async move {
        let mut migrator = migrator;
        migrator.execute().await
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(report.applied, vec![1, 2, 3]);
    assert_eq!(fx.tracking_rows().await.len(), 3);
}
