mod common;

use common::{Harness, MemoryScores};
use skimmly_core::rewards::{ClickOutcome, RewardBoard, ScoreBoard};
use skimmly_core::{CoreError, PortError, RewardCard, ScoreSnapshot};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn board(scores: &Arc<MemoryScores>) -> RewardBoard {
    RewardBoard::new(
        scores.clone(),
        vec![RewardCard::new("ten", 10), RewardCard::new("twenty", 20)],
    )
}

#[tokio::test]
async fn click_adds_points_once() {
    let scores = Arc::new(MemoryScores::with_total(Some(5)));
    let board = board(&scores);

    let first = board.click("ten").await.unwrap();
    let second = board.click("ten").await.unwrap();

    assert_eq!(first, ClickOutcome::Awarded { total: 15 });
    assert_eq!(second, ClickOutcome::Ignored);
    assert_eq!(scores.total(), Some(15));
    assert!(board.cards().iter().any(|c| c.id == "ten" && c.consumed));
    assert!(board.cards().iter().any(|c| c.id == "twenty" && !c.consumed));
}

#[tokio::test]
async fn sequential_clicks_accumulate() {
    let scores = Arc::new(MemoryScores::with_total(Some(0)));
    let board = board(&scores);

    board.click("ten").await.unwrap();
    board.click("twenty").await.unwrap();

    assert_eq!(scores.total(), Some(30));
}

#[tokio::test]
async fn overlapping_clicks_can_lose_an_update() {
    let scores = Arc::new(MemoryScores::with_total(Some(0)));
    // Both reads observe 0 before either write happens.
    scores.gate_reads(2);
    let board = board(&scores);

    let (ten, twenty) = tokio::join!(board.click("ten"), board.click("twenty"));
    let ten = ten.unwrap();
    let twenty = twenty.unwrap();

    assert_eq!(ten, ClickOutcome::Awarded { total: 10 });
    assert_eq!(twenty, ClickOutcome::Awarded { total: 20 });
    let total = scores.total().unwrap();
    assert!(total == 10 || total == 20, "lost update expected, got {total}");
    assert_ne!(total, 30);
    assert!(board.cards().iter().all(|c| c.consumed));
}

#[tokio::test]
async fn missing_document_leaves_card_unclaimed() {
    let scores = Arc::new(MemoryScores::with_total(None));
    let board = board(&scores);

    let result = board.click("ten").await;

    assert!(matches!(result, Err(CoreError::Port(PortError::NotFound(_)))));
    assert!(board.cards().iter().all(|c| !c.consumed));
    assert!(scores.writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn out_of_range_total_leaves_card_unclaimed() {
    let scores = Arc::new(MemoryScores::with_total(Some(i64::MAX - 5)));
    let board = board(&scores);

    let result = board.click("ten").await;

    assert!(matches!(result, Err(CoreError::Port(PortError::Unexpected(_)))));
    assert!(board.cards().iter().all(|c| !c.consumed));
    assert!(scores.writes.lock().unwrap().is_empty());
    assert_eq!(scores.total(), Some(i64::MAX - 5));
}

#[tokio::test]
async fn unknown_card_is_an_error() {
    let scores = Arc::new(MemoryScores::with_total(Some(0)));
    let board = board(&scores);

    assert!(matches!(
        board.click("fifty").await,
        Err(CoreError::UnknownCard(id)) if id == "fifty"
    ));
}

#[tokio::test]
async fn score_board_follows_live_snapshots() {
    let harness = Harness::new();
    let mut score = ScoreBoard::new(harness.scores.clone());
    assert_eq!(score.total(), None);

    harness.scores.publish();
    assert_eq!(score.next_snapshot().await, Some(ScoreSnapshot::Present(0)));
    assert_eq!(score.total(), Some(0));

    let board = RewardBoard::new(harness.scores.clone(), vec![RewardCard::new("ten", 10)]);
    board.click("ten").await.unwrap();
    assert_eq!(score.next_snapshot().await, Some(ScoreSnapshot::Present(10)));
    assert_eq!(score.total(), Some(10));
}

#[tokio::test]
async fn score_board_creates_missing_document() {
    let scores = Arc::new(MemoryScores::with_total(None));
    let mut score = ScoreBoard::new(scores.clone());

    scores.publish();
    assert_eq!(score.next_snapshot().await, Some(ScoreSnapshot::Missing));
    assert_eq!(scores.creates.load(Ordering::SeqCst), 1);

    // The create publishes a fresh snapshot with the zeroed total.
    assert_eq!(score.next_snapshot().await, Some(ScoreSnapshot::Present(0)));
    assert_eq!(score.total(), Some(0));
}

#[tokio::test]
async fn score_board_sync_applies_current_snapshot() {
    let scores = Arc::new(MemoryScores::with_total(Some(42)));
    scores.publish();
    let mut score = ScoreBoard::new(scores.clone());

    score.sync().await;

    assert_eq!(score.total(), Some(42));
}
