//! Behavioral tests for the in-memory store.

use chrono::TimeZone;

use super::*;
use crate::domain::forecast::Temperature;
use crate::domain::specification::SummaryContainsSpecification;

fn sample_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn midnight(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn sample_user(email: &str) -> User {
    User::new(email.to_owned(), "hash".to_owned(), sample_instant())
}

fn sample_forecast(day: u32, celsius: i32, summary: &str) -> Forecast {
    Forecast::new(
        midnight(day),
        Temperature::from_celsius(celsius),
        summary,
        sample_instant(),
    )
}

async fn commit_users(store: &MemoryStore, users: Vec<User>) {
    let repository = store.user_repository();
    let unit_of_work = store.unit_of_work();
    unit_of_work.begin_transaction().await.expect("begin");
    for user in users {
        repository.add(user).await.expect("stage");
    }
    unit_of_work.save().await.expect("flush");
    unit_of_work.commit_transaction().await.expect("commit");
}

async fn commit_forecasts(store: &MemoryStore, forecasts: Vec<Forecast>) {
    let repository = store.forecast_repository();
    let unit_of_work = store.unit_of_work();
    unit_of_work.begin_transaction().await.expect("begin");
    for forecast in forecasts {
        repository.add(forecast).await.expect("stage");
    }
    unit_of_work.save().await.expect("flush");
    unit_of_work.commit_transaction().await.expect("commit");
}

#[tokio::test]
async fn staged_rows_are_invisible_to_reads() {
    let store = MemoryStore::new();
    let repository = store.user_repository();

    repository
        .add(sample_user("user@example.com"))
        .await
        .expect("staging needs no transaction");

    assert!(repository.get_all().await.expect("read").is_empty());
    assert!(repository
        .get_by_email("user@example.com")
        .await
        .expect("read")
        .is_none());
}

#[tokio::test]
async fn save_outside_a_transaction_is_a_misuse_fault() {
    let store = MemoryStore::new();

    let fault = store
        .unit_of_work()
        .save()
        .await
        .expect_err("flushing without a transaction is misuse");

    assert!(matches!(fault, StoreError::Transaction { .. }));
}

#[tokio::test]
async fn opening_a_second_transaction_is_a_misuse_fault() {
    let store = MemoryStore::new();
    let unit_of_work = store.unit_of_work();
    unit_of_work.begin_transaction().await.expect("first begin");

    let fault = unit_of_work
        .begin_transaction()
        .await
        .expect_err("a nested begin is misuse");

    assert!(matches!(fault, StoreError::Transaction { .. }));
    unit_of_work.rollback_transaction().await.expect("rollback");
}

#[tokio::test]
async fn committed_rows_read_back_in_insertion_order_on_every_read() {
    let store = MemoryStore::new();
    commit_users(
        &store,
        vec![
            sample_user("first@example.com"),
            sample_user("second@example.com"),
        ],
    )
    .await;

    let repository = store.user_repository();
    let first_read: Vec<_> = repository
        .get_all()
        .await
        .expect("read")
        .into_iter()
        .map(|user| user.email().to_owned())
        .collect();
    let second_read: Vec<_> = repository
        .get_all()
        .await
        .expect("read")
        .into_iter()
        .map(|user| user.email().to_owned())
        .collect();
    assert_eq!(first_read, ["first@example.com", "second@example.com"]);
    assert_eq!(second_read, first_read);
}

#[tokio::test]
async fn save_reports_the_affected_count_across_tables() {
    let store = MemoryStore::new();
    let unit_of_work = store.unit_of_work();
    unit_of_work.begin_transaction().await.expect("begin");
    store
        .user_repository()
        .add(sample_user("user@example.com"))
        .await
        .expect("stage user");
    store
        .forecast_repository()
        .add(sample_forecast(11, 20, "Mild"))
        .await
        .expect("stage forecast");
    store
        .forecast_repository()
        .add(sample_forecast(12, 25, "Warm"))
        .await
        .expect("stage forecast");

    let affected = unit_of_work.save().await.expect("flush");

    assert_eq!(affected, 3);
    unit_of_work.commit_transaction().await.expect("commit");
}

#[tokio::test]
async fn rollback_discards_staged_and_flushed_rows() {
    let store = MemoryStore::new();
    let repository = store.user_repository();
    let unit_of_work = store.unit_of_work();
    unit_of_work.begin_transaction().await.expect("begin");
    repository
        .add(sample_user("flushed@example.com"))
        .await
        .expect("stage");
    unit_of_work.save().await.expect("flush");
    repository
        .add(sample_user("staged@example.com"))
        .await
        .expect("stage");

    unit_of_work.rollback_transaction().await.expect("rollback");

    assert!(repository.get_all().await.expect("read").is_empty());
}

#[tokio::test]
async fn commit_applies_flushed_rows_and_keeps_unsaved_rows_staged() {
    let store = MemoryStore::new();
    let repository = store.user_repository();
    let unit_of_work = store.unit_of_work();
    unit_of_work.begin_transaction().await.expect("begin");
    repository
        .add(sample_user("flushed@example.com"))
        .await
        .expect("stage");
    unit_of_work.save().await.expect("flush");
    repository
        .add(sample_user("unsaved@example.com"))
        .await
        .expect("stage");
    unit_of_work.commit_transaction().await.expect("commit");

    let emails: Vec<_> = repository
        .get_all()
        .await
        .expect("read")
        .into_iter()
        .map(|user| user.email().to_owned())
        .collect();
    assert_eq!(emails, ["flushed@example.com"]);

    // The unsaved row is still staged and flushes with the next transaction.
    unit_of_work.begin_transaction().await.expect("begin again");
    assert_eq!(unit_of_work.save().await.expect("flush"), 1);
    unit_of_work.commit_transaction().await.expect("commit");
    assert_eq!(repository.get_all().await.expect("read").len(), 2);
}

#[tokio::test]
async fn a_duplicate_email_fails_the_flush() {
    let store = MemoryStore::new();
    commit_users(&store, vec![sample_user("taken@example.com")]).await;
    let unit_of_work = store.unit_of_work();
    unit_of_work.begin_transaction().await.expect("begin");
    store
        .user_repository()
        .add(sample_user("taken@example.com"))
        .await
        .expect("stage");

    let fault = unit_of_work
        .save()
        .await
        .expect_err("the unique email constraint must hold");

    assert_eq!(
        fault.to_string(),
        "store constraint violated: duplicate user email: taken@example.com"
    );
    unit_of_work.rollback_transaction().await.expect("rollback");
}

#[tokio::test]
async fn duplicate_emails_within_one_batch_fail_the_flush() {
    let store = MemoryStore::new();
    let repository = store.user_repository();
    let unit_of_work = store.unit_of_work();
    unit_of_work.begin_transaction().await.expect("begin");
    repository
        .add(sample_user("twice@example.com"))
        .await
        .expect("stage");
    repository
        .add(sample_user("twice@example.com"))
        .await
        .expect("stage");

    let fault = unit_of_work
        .save()
        .await
        .expect_err("the unique email constraint must hold within a batch");

    assert!(matches!(fault, StoreError::Constraint { .. }));
    unit_of_work.rollback_transaction().await.expect("rollback");
}

#[tokio::test]
async fn idle_commit_and_rollback_are_no_ops() {
    let store = MemoryStore::new();
    let unit_of_work = store.unit_of_work();

    unit_of_work
        .commit_transaction()
        .await
        .expect("an idle commit is tolerated");
    unit_of_work
        .rollback_transaction()
        .await
        .expect("an idle rollback is tolerated");
}

#[tokio::test]
async fn a_dropped_unit_of_work_rolls_the_open_transaction_back() {
    let store = MemoryStore::new();
    let repository = store.user_repository();
    {
        let unit_of_work = store.unit_of_work();
        unit_of_work.begin_transaction().await.expect("begin");
        repository
            .add(sample_user("abandoned@example.com"))
            .await
            .expect("stage");
        unit_of_work.save().await.expect("flush");
    }

    assert!(repository.get_all().await.expect("read").is_empty());

    // The store accepts a fresh transaction afterwards.
    let unit_of_work = store.unit_of_work();
    unit_of_work
        .begin_transaction()
        .await
        .expect("a new transaction opens");
    unit_of_work.rollback_transaction().await.expect("rollback");
}

#[tokio::test]
async fn get_by_id_reads_committed_rows_only() {
    let store = MemoryStore::new();
    let repository = store.user_repository();
    let committed = sample_user("committed@example.com");
    let committed_id = *committed.id();
    commit_users(&store, vec![committed]).await;

    let staged = sample_user("staged@example.com");
    let staged_id = *staged.id();
    repository.add(staged).await.expect("stage");

    let found = repository
        .get_by_id(&committed_id)
        .await
        .expect("read")
        .expect("the committed row is visible");
    assert_eq!(found.email(), "committed@example.com");
    assert!(repository
        .get_by_id(&staged_id)
        .await
        .expect("read")
        .is_none());
}

#[tokio::test]
async fn the_upcoming_week_query_is_inclusive_at_both_ends() {
    let store = MemoryStore::new();
    commit_forecasts(
        &store,
        vec![
            sample_forecast(9, 10, "Cool"),
            sample_forecast(10, 15, "Mild"),
            sample_forecast(17, 20, "Warm"),
            sample_forecast(18, 25, "Hot"),
        ],
    )
    .await;

    let window: Vec<_> = store
        .forecast_repository()
        .get_upcoming_week(midnight(10))
        .await
        .expect("query")
        .into_iter()
        .map(|forecast| forecast.date())
        .collect();
    assert_eq!(window, [midnight(10), midnight(17)]);
}

#[tokio::test]
async fn the_temperature_range_query_is_inclusive_at_both_ends() {
    let store = MemoryStore::new();
    commit_forecasts(
        &store,
        vec![
            sample_forecast(11, 10, "Cool"),
            sample_forecast(12, 15, "Mild"),
            sample_forecast(13, 25, "Warm"),
            sample_forecast(14, 30, "Hot"),
        ],
    )
    .await;

    let readings: Vec<_> = store
        .forecast_repository()
        .get_by_temperature_range(15, 25)
        .await
        .expect("query")
        .into_iter()
        .map(|forecast| forecast.temperature().celsius())
        .collect();
    assert_eq!(readings, [15, 25]);
}

#[tokio::test]
async fn summary_search_matches_case_insensitively() {
    let store = MemoryStore::new();
    commit_forecasts(
        &store,
        vec![
            sample_forecast(11, 22, "Warm"),
            sample_forecast(12, 35, "Sweltering"),
            sample_forecast(13, 24, "warm breeze"),
        ],
    )
    .await;

    let matches = store
        .forecast_repository()
        .find_by_specification(&SummaryContainsSpecification::new("WARM"))
        .await
        .expect("query");
    assert_eq!(matches.len(), 2);
}

#[tokio::test]
async fn a_poisoned_store_reports_a_connection_fault() {
    let store = MemoryStore::new();
    let repository = store.user_repository();
    let state = Arc::clone(&store.state);
    std::thread::spawn(move || {
        let _guard = state.lock().expect("first lock");
        panic!("poison the store mutex");
    })
    .join()
    .expect_err("the poisoning thread panics");

    let fault = repository
        .get_all()
        .await
        .expect_err("a poisoned mutex is a connection fault");
    assert!(matches!(fault, StoreError::Connection { .. }));
}
