//! crates/skimmly_core/src/rewards.rs
//!
//! Reward cards and the live shared score.
//!
//! A click reads the score, adds the card's points and writes the sum back.
//! The two steps are separate calls to the store, so clicks that overlap
//! (on this page or in another viewer) can overwrite each other's increment.

use crate::domain::RewardCard;
use crate::error::{CoreError, CoreResult};
use crate::ports::{PortError, ScoreSnapshot, ScoreStore};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The card was already claimed this session.
    Ignored,
    Awarded { total: i64 },
}

pub struct RewardBoard {
    scores: Arc<dyn ScoreStore>,
    cards: Mutex<Vec<RewardCard>>,
}

impl RewardBoard {
    pub fn new(scores: Arc<dyn ScoreStore>, cards: Vec<RewardCard>) -> Self {
        Self {
            scores,
            cards: Mutex::new(cards),
        }
    }

    pub fn cards(&self) -> Vec<RewardCard> {
        self.lock().clone()
    }

    pub async fn click(&self, card_id: &str) -> CoreResult<ClickOutcome> {
        let points = {
            let cards = self.lock();
            let card = cards
                .iter()
                .find(|card| card.id == card_id)
                .ok_or_else(|| CoreError::UnknownCard(card_id.to_string()))?;
            if card.consumed {
                debug!("Card {} already claimed", card_id);
                return Ok(ClickOutcome::Ignored);
            }
            card.points
        };

        let total = match self.award(points).await {
            Ok(total) => total,
            Err(e) => {
                error!("Error updating score: {}", e);
                return Err(e.into());
            }
        };

        if let Some(card) = self.lock().iter_mut().find(|card| card.id == card_id) {
            card.consumed = true;
        }
        info!("Card {} added {} points, total {}", card_id, points, total);
        Ok(ClickOutcome::Awarded { total })
    }

    async fn award(&self, points: i64) -> Result<i64, PortError> {
        let current = self
            .scores
            .read_total()
            .await?
            .ok_or_else(|| PortError::NotFound("score document".to_string()))?;
        let total = current.checked_add(points).ok_or_else(|| {
            PortError::Unexpected(format!("score {} + {} is out of range", current, points))
        })?;
        self.scores.write_total(total).await?;
        Ok(total)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RewardCard>> {
        self.cards.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Mirrors the live score subscription into a displayed total.
pub struct ScoreBoard {
    scores: Arc<dyn ScoreStore>,
    receiver: watch::Receiver<Option<ScoreSnapshot>>,
    total: Option<i64>,
}

impl ScoreBoard {
    pub fn new(scores: Arc<dyn ScoreStore>) -> Self {
        let receiver = scores.subscribe();
        Self {
            scores,
            receiver,
            total: None,
        }
    }

    /// The last total observed, `None` before the first snapshot.
    pub fn total(&self) -> Option<i64> {
        self.total
    }

    /// Applies whatever snapshot is currently held by the subscription.
    pub async fn sync(&mut self) {
        let snapshot = *self.receiver.borrow_and_update();
        if let Some(snapshot) = snapshot {
            self.apply(snapshot).await;
        }
    }

    /// Waits for the next snapshot and applies it. Returns `None` once the
    /// store stops publishing.
    pub async fn next_snapshot(&mut self) -> Option<ScoreSnapshot> {
        loop {
            self.receiver.changed().await.ok()?;
            let snapshot = *self.receiver.borrow_and_update();
            if let Some(snapshot) = snapshot {
                self.apply(snapshot).await;
                return Some(snapshot);
            }
        }
    }

    async fn apply(&mut self, snapshot: ScoreSnapshot) {
        match snapshot {
            ScoreSnapshot::Present(total) => self.total = Some(total),
            ScoreSnapshot::Missing => {
                info!("Score document missing, creating it");
                if let Err(e) = self.scores.create(0).await {
                    error!("Failed to create score document: {}", e);
                }
            }
        }
    }
}
