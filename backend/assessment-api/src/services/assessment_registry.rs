use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::ServiceError;
use crate::engine::{InlineCheck, Quiz, SessionStatus};

enum Assessment {
    Quiz(Arc<Mutex<Quiz>>),
    Inline(Arc<Mutex<InlineCheck>>),
}

impl Assessment {
    // An entry whose lock is held is in use, never finished.
    fn is_finished(&self) -> bool {
        match self {
            Assessment::Quiz(quiz) => quiz
                .try_lock()
                .is_ok_and(|quiz| quiz.status() == SessionStatus::Completed),
            Assessment::Inline(check) => check
                .try_lock()
                .is_ok_and(|check| check.status() == SessionStatus::Completed),
        }
    }
}

struct Entry {
    assessment: Assessment,
    /// Milliseconds since the registry epoch of the last lookup.
    last_touched: AtomicU64,
}

impl Entry {
    fn last_touched(&self) -> u64 {
        self.last_touched.load(Ordering::Relaxed)
    }

    fn touch(&self, at: u64) {
        self.last_touched.fetch_max(at, Ordering::Relaxed);
    }
}

/// In-memory home of every live assessment. Entries are independent: each has
/// its own lock and the map lock is only held to look one up.
///
/// Learners often leave without discarding, so room is reclaimed on insert:
/// entries idle past `idle_timeout` are dropped, and when the map is still
/// full the least recently used finished assessment gives way.
pub struct AssessmentRegistry {
    entries: RwLock<HashMap<Uuid, Entry>>,
    max_active: usize,
    idle_timeout: Duration,
    epoch: Instant,
}

impl AssessmentRegistry {
    pub fn new(max_active: usize, idle_timeout: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_active,
            idle_timeout,
            epoch: Instant::now(),
        }
    }

    pub async fn insert_quiz(&self, quiz: Quiz) -> Result<Uuid, ServiceError> {
        self.insert(Assessment::Quiz(Arc::new(Mutex::new(quiz))), Instant::now())
            .await
    }

    pub async fn insert_inline_check(&self, check: InlineCheck) -> Result<Uuid, ServiceError> {
        self.insert(Assessment::Inline(Arc::new(Mutex::new(check))), Instant::now())
            .await
    }

    pub async fn quiz(&self, id: Uuid) -> Result<Arc<Mutex<Quiz>>, ServiceError> {
        let entries = self.entries.read().await;
        if let Some(entry) = entries.get(&id) {
            if let Assessment::Quiz(quiz) = &entry.assessment {
                entry.touch(self.millis(Instant::now()));
                return Ok(quiz.clone());
            }
        }
        Err(ServiceError::NotFound(format!("Quiz {}", id)))
    }

    pub async fn inline_check(&self, id: Uuid) -> Result<Arc<Mutex<InlineCheck>>, ServiceError> {
        let entries = self.entries.read().await;
        if let Some(entry) = entries.get(&id) {
            if let Assessment::Inline(check) = &entry.assessment {
                entry.touch(self.millis(Instant::now()));
                return Ok(check.clone());
            }
        }
        Err(ServiceError::NotFound(format!("Inline check {}", id)))
    }

    pub async fn remove_quiz(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut entries = self.entries.write().await;
        if !matches!(entries.get(&id).map(|e| &e.assessment), Some(Assessment::Quiz(_))) {
            return Err(ServiceError::NotFound(format!("Quiz {}", id)));
        }
        entries.remove(&id);
        Ok(())
    }

    pub async fn remove_inline_check(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut entries = self.entries.write().await;
        if !matches!(entries.get(&id).map(|e| &e.assessment), Some(Assessment::Inline(_))) {
            return Err(ServiceError::NotFound(format!("Inline check {}", id)));
        }
        entries.remove(&id);
        Ok(())
    }

    pub async fn active_count(&self) -> usize {
        self.entries.read().await.len()
    }

    pub fn capacity(&self) -> usize {
        self.max_active
    }

    fn millis(&self, at: Instant) -> u64 {
        u64::try_from(at.saturating_duration_since(self.epoch).as_millis()).unwrap_or(u64::MAX)
    }

    async fn insert(&self, assessment: Assessment, now: Instant) -> Result<Uuid, ServiceError> {
        let now_ms = self.millis(now);
        let idle_ms = u64::try_from(self.idle_timeout.as_millis()).unwrap_or(u64::MAX);

        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| now_ms.saturating_sub(entry.last_touched()) < idle_ms);
        let expired = before - entries.len();
        if expired > 0 {
            tracing::info!("Dropped {} idle assessments", expired);
        }

        if entries.len() >= self.max_active {
            let oldest_finished = entries
                .iter()
                .filter(|(_, entry)| entry.assessment.is_finished())
                .min_by_key(|(_, entry)| entry.last_touched())
                .map(|(id, _)| *id);

            match oldest_finished {
                Some(evicted) => {
                    entries.remove(&evicted);
                    tracing::info!("Evicted finished assessment {} to make room", evicted);
                }
                None => {
                    tracing::warn!(
                        "Rejecting new assessment: {} active (limit {})",
                        entries.len(),
                        self.max_active
                    );
                    return Err(ServiceError::CapacityExceeded(self.max_active));
                }
            }
        }

        let id = Uuid::new_v4();
        entries.insert(
            id,
            Entry {
                assessment,
                last_touched: AtomicU64::new(now_ms),
            },
        );
        Ok(id)
    }
}
