//! Data-store seam
//!
//! Persistence is an external collaborator. The engine only ever issues the
//! three read queries below; adapters own the sign-convention normalization
//! documented on [`Transaction::amount`](crate::models::Transaction).

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::{Emotion, Goal, GoalStatus, Transaction};

/// Optional date bounds for a list query (inclusive on both ends)
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn since(from: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Read-only queries the engine issues against user data
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_transactions(&self, user_id: &str, range: DateRange)
        -> Result<Vec<Transaction>>;

    async fn list_active_goals(&self, user_id: &str) -> Result<Vec<Goal>>;

    async fn list_emotions(&self, user_id: &str, range: DateRange) -> Result<Vec<Emotion>>;
}

/// In-memory store, used by tests and embedded deployments
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
    goals: RwLock<Vec<Goal>>,
    emotions: RwLock<Vec<Emotion>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_transaction(&self, tx: Transaction) {
        self.transactions
            .write()
            .expect("transaction lock poisoned")
            .push(tx);
    }

    pub fn add_goal(&self, goal: Goal) {
        self.goals.write().expect("goal lock poisoned").push(goal);
    }

    pub fn add_emotion(&self, emotion: Emotion) {
        self.emotions
            .write()
            .expect("emotion lock poisoned")
            .push(emotion);
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list_transactions(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<Transaction>> {
        let transactions = self
            .transactions
            .read()
            .map_err(|_| Error::Store("transaction lock poisoned".to_string()))?;
        Ok(transactions
            .iter()
            .filter(|t| t.user_id == user_id && range.contains(t.date))
            .cloned()
            .collect())
    }

    async fn list_active_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        let goals = self
            .goals
            .read()
            .map_err(|_| Error::Store("goal lock poisoned".to_string()))?;
        Ok(goals
            .iter()
            .filter(|g| g.user_id == user_id && g.status == GoalStatus::Active)
            .cloned()
            .collect())
    }

    async fn list_emotions(&self, user_id: &str, range: DateRange) -> Result<Vec<Emotion>> {
        let emotions = self
            .emotions
            .read()
            .map_err(|_| Error::Store("emotion lock poisoned".to_string()))?;
        Ok(emotions
            .iter()
            .filter(|e| e.user_id == user_id && range.contains(e.date))
            .cloned()
            .collect())
    }
}
