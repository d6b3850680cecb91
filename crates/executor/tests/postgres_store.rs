//! Runs against a live server only when `STRATA_TEST_POSTGRES_URL` is set.

use assert_matches::assert_matches;
use std::time::{SystemTime, UNIX_EPOCH};
use strata_contracts::{ApplyOptions, MigrationStore};
use strata_executor::{Backend, BodyStep, ExecutorError, Store};
use strata_migration::Migration;

async fn connect() -> Option<Store> {
    let url = std::env::var("STRATA_TEST_POSTGRES_URL").ok()?;
    let store = Store::connect(&url).await.unwrap();
    assert_eq!(store.backend(), Backend::Postgres);
    Some(store)
}

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("{prefix}_{}_{nanos}", std::process::id())
}

#[tokio::test]
async fn apply_and_revert_round_trip() {
    let Some(mut store) = connect().await else {
        return;
    };
    let table = unique("strata_tracking");
    let target = unique("strata_target");
    let migration = Migration::new(
        1,
        "target",
        "1.target.sql",
        format!("CREATE TABLE {target} (id BIGINT);\nINSERT INTO {target} VALUES (1);"),
        format!("DROP TABLE {target};"),
    );

    assert!(store.list_migrations(&table).await.unwrap().is_empty());
    store
        .apply_migration(&table, &migration, ApplyOptions { verify_reversibility: true })
        .await
        .unwrap();

    let applied = store.list_migrations(&table).await.unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].checksum, migration.checksum);

    store.revert_migration(&table, &applied[0]).await.unwrap();
    assert!(store.list_migrations(&table).await.unwrap().is_empty());
    store.close().await.unwrap();
}

#[tokio::test]
async fn failed_body_leaves_no_row() {
    let Some(mut store) = connect().await else {
        return;
    };
    let table = unique("strata_tracking");
    let migration = Migration::new(1, "broken", "1.broken.sql", "SELECT * FROM strata_no_such_table;", "SELECT 1;");

    let err = store
        .apply_migration(&table, &migration, ApplyOptions::default())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ExecutorError::StatementExecutionFailed { migration_id: 1, step: BodyStep::Up, .. }
    );
    assert!(store.list_migrations(&table).await.unwrap().is_empty());
    store.close().await.unwrap();
}
