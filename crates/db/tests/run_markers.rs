//! Run-marker transaction behavior against a live database.
//!
//! Ignored by default; run with `cargo test -- --ignored` and a
//! `DATABASE_URL` pointing at a disposable PostgreSQL instance.

use boostline_core::period::EvaluationPeriod;
use boostline_core::types::DbId;
use boostline_db::repositories::ProgressionRunRepo;
use boostline_db::DbPool;

async fn test_pool() -> DbPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = boostline_db::create_pool(&url)
        .await
        .expect("Failed to connect to database");
    boostline_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

async fn insert_program(pool: &DbPool, title: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO boost_programs (title, tiers_enabled, auto_tier_progression) \
         VALUES ($1, TRUE, TRUE) RETURNING id",
    )
    .bind(title)
    .fetch_one(pool)
    .await
    .expect("Failed to insert program")
}

async fn delete_program(pool: &DbPool, id: DbId) {
    sqlx::query("DELETE FROM boost_programs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to delete program");
}

#[tokio::test]
#[ignore]
async fn aborted_pass_releases_the_run_marker() {
    let pool = test_pool().await;
    let program_id = insert_program(&pool, "marker rollback").await;
    let period = EvaluationPeriod { year: 2099, month: 1 };

    // A pass that claims the marker but fails before completing rolls
    // the claim back along with everything else.
    let mut tx = pool.begin().await.unwrap();
    assert!(ProgressionRunRepo::try_begin(&mut tx, program_id, period)
        .await
        .unwrap());
    tx.rollback().await.unwrap();

    // The period must be claimable again; a stranded marker here would
    // leave the program's creators unevaluated forever.
    let mut tx = pool.begin().await.unwrap();
    assert!(
        ProgressionRunRepo::try_begin(&mut tx, program_id, period)
            .await
            .unwrap(),
        "rolled-back pass left the period claimed"
    );
    tx.rollback().await.unwrap();

    delete_program(&pool, program_id).await;
}

#[tokio::test]
#[ignore]
async fn committed_pass_blocks_a_second_claim() {
    let pool = test_pool().await;
    let program_id = insert_program(&pool, "marker committed").await;
    let period = EvaluationPeriod { year: 2099, month: 2 };

    let mut tx = pool.begin().await.unwrap();
    assert!(ProgressionRunRepo::try_begin(&mut tx, program_id, period)
        .await
        .unwrap());
    ProgressionRunRepo::complete(&mut tx, program_id, period, 0)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    assert!(
        !ProgressionRunRepo::try_begin(&mut tx, program_id, period)
            .await
            .unwrap(),
        "completed period was claimed a second time"
    );
    tx.rollback().await.unwrap();

    delete_program(&pool, program_id).await;
}
