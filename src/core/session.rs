//! Session registry
//!
//! One `Orchestrator` per session id. Sessions share nothing; each turn runs
//! on the blocking pool so model calls never stall the async runtime.
//! Sessions live until `end_session`; there is no idle eviction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::core::orchestrator::Orchestrator;
use crate::error::SessionError;
use crate::types::{ConversationTurn, Reply};

/// Builds a fresh orchestrator for a new session
pub type OrchestratorFactory = Box<dyn Fn() -> Orchestrator + Send + Sync>;

/// Registry of live conversation sessions
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<Orchestrator>>>>,
    factory: OrchestratorFactory,
    counter: AtomicU64,
}

impl SessionRegistry {
    /// Create registry; `factory` is called once per new session
    pub fn new(factory: impl Fn() -> Orchestrator + Send + Sync + 'static) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            factory: Box::new(factory),
            counter: AtomicU64::new(0),
        }
    }

    /// Start a session, returns its id
    pub async fn create_session(&self) -> String {
        let session_id = self.generate_session_id();
        let orchestrator = (self.factory)();

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), Arc::new(Mutex::new(orchestrator)));

        tracing::info!(session_id = %session_id, active = sessions.len(), "Session created");
        session_id
    }

    /// Run one turn in a session
    pub async fn respond(&self, session_id: &str, user_input: &str) -> Result<Reply, SessionError> {
        let session = self.get(session_id).await?;
        let input = user_input.to_string();

        tokio::task::spawn_blocking(move || {
            let mut orchestrator = session.blocking_lock();
            orchestrator.respond(&input).map_err(SessionError::from)
        })
        .await
        .map_err(|e| SessionError::Worker(e.to_string()))?
    }

    /// Turns remembered by a session, oldest first
    ///
    /// Waits for an in-flight turn in the same session to finish.
    pub async fn history(&self, session_id: &str) -> Result<Vec<ConversationTurn>, SessionError> {
        let session = self.get(session_id).await?;
        let orchestrator = session.lock().await;
        Ok(orchestrator.history().turns().cloned().collect())
    }

    /// Drop a session; false if it did not exist
    pub async fn end_session(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(session_id).is_some();
        if removed {
            tracing::info!(session_id, active = sessions.len(), "Session ended");
        }
        removed
    }

    /// Number of live sessions
    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn get(&self, session_id: &str) -> Result<Arc<Mutex<Orchestrator>>, SessionError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Generate session ID
    fn generate_session_id(&self) -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("session_{:x}_{}", nanos, seq)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::core::generation::TextGenerator;
    use crate::core::knowledge::InMemoryKnowledgeStore;
    use crate::core::sentiment::LexiconSentimentScorer;
    use crate::error::GenerationError;
    use crate::types::Strategy;

    struct ReplyGenerator(&'static str);

    impl TextGenerator for ReplyGenerator {
        fn generate(&self, prompt: &str, _config: &GenerationConfig) -> Result<String, GenerationError> {
            Ok(format!("{} {}", prompt, self.0))
        }
    }

    struct SlowGenerator(std::time::Duration);

    impl TextGenerator for SlowGenerator {
        fn generate(&self, prompt: &str, _config: &GenerationConfig) -> Result<String, GenerationError> {
            std::thread::sleep(self.0);
            Ok(format!("{} take your time.", prompt))
        }
    }

    struct DownGenerator;

    impl TextGenerator for DownGenerator {
        fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> Result<String, GenerationError> {
            Err(GenerationError::Timeout(30_000))
        }
    }

    fn registry() -> SessionRegistry {
        SessionRegistry::new(|| {
            Orchestrator::new(
                Box::new(ReplyGenerator("i hear you.")),
                Box::new(InMemoryKnowledgeStore::new()),
                Box::new(LexiconSentimentScorer::new()),
            )
        })
    }

    #[tokio::test]
    async fn test_create_and_respond() {
        let registry = registry();
        let id = registry.create_session().await;

        let reply = registry.respond(&id, "My partner and I keep fighting").await.unwrap();
        assert_eq!(reply.text, "I hear you.");
        assert_eq!(reply.strategy, Strategy::RelationshipFocused);
        assert_eq!(registry.history(&id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_isolated() {
        let registry = registry();
        let a = registry.create_session().await;
        let b = registry.create_session().await;
        assert_ne!(a, b);

        registry.respond(&a, "one").await.unwrap();
        registry.respond(&a, "two").await.unwrap();
        registry.respond(&b, "three").await.unwrap();

        assert_eq!(registry.history(&a).await.unwrap().len(), 2);
        let b_history = registry.history(&b).await.unwrap();
        assert_eq!(b_history.len(), 1);
        assert_eq!(b_history[0].user, "three");
        assert_eq!(registry.active_sessions().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let registry = registry();
        let result = registry.respond("session_missing", "hello").await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
        assert!(!registry.end_session("session_missing").await);
    }

    #[tokio::test]
    async fn test_generation_error_surfaces() {
        let registry = SessionRegistry::new(|| {
            Orchestrator::new(
                Box::new(DownGenerator),
                Box::new(InMemoryKnowledgeStore::new()),
                Box::new(LexiconSentimentScorer::new()),
            )
        });
        let id = registry.create_session().await;

        let result = registry.respond(&id, "hello").await;
        assert!(matches!(
            result,
            Err(SessionError::Generation(GenerationError::Timeout(30_000)))
        ));
        assert!(registry.history(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_end_session() {
        let registry = registry();
        let id = registry.create_session().await;
        assert!(registry.end_session(&id).await);
        assert_eq!(registry.active_sessions().await, 0);
        assert!(matches!(registry.history(&id).await, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_history_waits_without_blocking_runtime() {
        use std::time::{Duration, Instant};

        let registry = Arc::new(SessionRegistry::new(|| {
            Orchestrator::new(
                Box::new(SlowGenerator(Duration::from_millis(800))),
                Box::new(InMemoryKnowledgeStore::new()),
                Box::new(LexiconSentimentScorer::new()),
            )
        }));
        let id = registry.create_session().await;

        let turn = {
            let registry = registry.clone();
            let id = id.clone();
            tokio::spawn(async move { registry.respond(&id, "hello").await })
        };
        // Let the turn reach the blocking pool and take the session lock
        tokio::time::sleep(Duration::from_millis(100)).await;

        let started = Instant::now();
        let read = tokio::time::timeout(Duration::from_millis(100), registry.history(&id)).await;
        assert!(read.is_err(), "history should still be waiting on the turn");
        assert!(started.elapsed() < Duration::from_millis(500));

        let reply = turn.await.unwrap().unwrap();
        assert_eq!(reply.text, "Take your time.");
        assert_eq!(registry.history(&id).await.unwrap().len(), 1);
    }
}
