use rusqlite::Connection;
use solidref_core::db::migrations::{apply_migrations, latest_version};
use solidref_core::db::{open_index_in_memory, DbError};

#[test]
fn open_index_in_memory_applies_all_migrations() {
    let conn = open_index_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "entries");
    assert_table_exists(&conn, "entries_fts");
}

#[test]
fn migrating_an_open_index_again_keeps_latest_version() {
    let mut conn = open_index_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn entries_reject_unknown_principle_and_kind() {
    let conn = open_index_in_memory().unwrap();

    let bad_principle = conn.execute(
        "INSERT INTO entries (principle, principle_order, kind, title, body)
         VALUES ('XYZ', 0, 'principle', 't', 'b');",
        [],
    );
    assert!(bad_principle.is_err());

    let bad_kind = conn.execute(
        "INSERT INTO entries (principle, principle_order, kind, title, body)
         VALUES ('SRP', 0, 'unknown', 't', 'b');",
        [],
    );
    assert!(bad_kind.is_err());
}

#[test]
fn index_only_keeps_insert_trigger() {
    let conn = open_index_in_memory().unwrap();
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'trigger' ORDER BY name;")
        .unwrap();
    let triggers: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(triggers, vec!["entries_ai".to_string()]);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
