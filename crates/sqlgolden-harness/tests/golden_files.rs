use std::path::PathBuf;
use std::process::Command;

use sqlgolden_harness::{
    ComparisonOrder, GoldenCheck, GoldenError, GoldenStore, QueryRecorder, RecordingConnection,
    check_golden, init_test_logging, save_to_file,
};
use sqlgolden_types::SqlValue;

fn testdata() -> GoldenStore {
    GoldenStore::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata"))
}

fn run_user_crud(db: &RecordingConnection) {
    db.execute_batch("create table users (id integer primary key, name text, age integer)")
        .unwrap();
    db.execute(
        "insert into users (name, age) values (?, ?)",
        &["jinzhu".into(), SqlValue::Integer(18)],
    )
    .unwrap();
    db.execute(
        "update users set age = ? where name = ?",
        &[SqlValue::Integer(19), "jinzhu".into()],
    )
    .unwrap();
    let rows = db
        .query_strings(
            "select name, age from users where age > ? order by id limit 10",
            &[SqlValue::Integer(10)],
        )
        .unwrap();
    assert_eq!(rows, vec![vec!["jinzhu".to_owned(), "19".to_owned()]]);
    db.execute("delete from users where id = ?", &[SqlValue::Integer(1)])
        .unwrap();
}

#[test]
fn sqlite_session_matches_checked_in_golden() {
    init_test_logging();
    let db = RecordingConnection::open_in_memory(QueryRecorder::new()).unwrap();
    run_user_crud(&db);

    let check = check_golden(
        db.sink(),
        &testdata(),
        "user_crud.golden.sql",
        ComparisonOrder::Ordered,
        false,
    )
    .unwrap_or_else(|err| panic!("{err}"));
    assert!(matches!(check, GoldenCheck::Matched(report) if report.keys_match));
}

#[test]
fn unordered_golden_ignores_statement_order() {
    let recorder = QueryRecorder::new();
    recorder.record_capture(
        "SELECT * FROM users WHERE id = ?",
        &[SqlValue::Integer(1)],
    );
    recorder.record_capture(
        "SELECT * FROM posts WHERE user_id = ?",
        &[SqlValue::Integer(1)],
    );

    let store = testdata();
    let check = check_golden(
        &recorder,
        &store,
        "unordered_lookups.golden.sql",
        ComparisonOrder::Unordered,
        false,
    )
    .unwrap_or_else(|err| panic!("{err}"));
    assert!(matches!(check, GoldenCheck::Matched(report) if report.keys_match));

    let err = check_golden(
        &recorder,
        &store,
        "unordered_lookups.golden.sql",
        ComparisonOrder::Ordered,
        false,
    )
    .unwrap_err();
    let GoldenError::Mismatch { diagnostics, .. } = err else {
        panic!("expected mismatch");
    };
    assert!(diagnostics.contains("actual differences"));
}

#[test]
fn separate_recorders_are_isolated() {
    let first = RecordingConnection::open_in_memory(QueryRecorder::new()).unwrap();
    let second = RecordingConnection::open_in_memory(QueryRecorder::new()).unwrap();
    run_user_crud(&first);
    second.execute_batch("SELECT 1").unwrap();
    assert_eq!(first.sink().len(), 5);
    assert_eq!(second.sink().snapshot(), vec!["SELECT 1".to_owned()]);
}

#[test]
fn record_update_verify_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = GoldenStore::new(dir.path());
    let db = RecordingConnection::open_in_memory(QueryRecorder::new()).unwrap();
    run_user_crud(&db);

    let err = check_golden(db.sink(), &store, "crud.golden.sql", ComparisonOrder::Ordered, false)
        .unwrap_err();
    assert!(err.is_missing_reference());

    let updated = check_golden(
        db.sink(),
        &store,
        "nested/dir/crud.golden.sql",
        ComparisonOrder::Ordered,
        true,
    )
    .unwrap();
    assert_eq!(updated, GoldenCheck::Updated(dir.path().join("crud.golden.sql")));
    assert!(
        check_golden(db.sink(), &store, "crud.golden.sql", ComparisonOrder::Ordered, false).is_ok()
    );

    let expected = std::fs::read_to_string(testdata().resolve("user_crud.golden.sql")).unwrap();
    assert_eq!(store.load("crud.golden.sql").unwrap(), Some(expected));
}

#[test]
fn compare_tool_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = QueryRecorder::new();
    recorder.record_sql("select * from users where id = 1");
    let actual = dir.path().join("actual.sql");
    save_to_file(&recorder, &actual).unwrap();

    let same = dir.path().join("same.sql");
    std::fs::write(&same, "SELECT * FROM `users` WHERE `id`=1;").unwrap();
    let formatted = dir.path().join("formatted.sql");
    std::fs::write(&formatted, "SELECT * FROM users WHERE (id=1);").unwrap();

    let tool = env!("CARGO_BIN_EXE_sqlgolden-compare");
    let status = |reference: &PathBuf, extra: &[&str]| {
        Command::new(tool)
            .arg("--reference")
            .arg(reference)
            .arg("--actual")
            .arg(&actual)
            .args(extra)
            .output()
            .unwrap()
    };

    assert_eq!(status(&same, &[]).status.code(), Some(0));

    let mismatch = status(&formatted, &[]);
    assert_eq!(mismatch.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&mismatch.stdout);
    assert!(stdout.contains("only in formatting"));

    let json = status(&formatted, &["--json"]);
    let value: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    assert_eq!(value["pass"], false);
    assert_eq!(value["report"]["keys_match"], true);

    let missing = dir.path().join("missing.sql");
    assert_eq!(status(&missing, &[]).status.code(), Some(2));

    let usage = Command::new(tool).arg("--bogus").output().unwrap();
    assert_eq!(usage.status.code(), Some(2));
}
