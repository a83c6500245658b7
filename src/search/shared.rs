//! Async access to one search engine from many tasks.
//!
//! [`SharedSearchEngine`] holds the engine behind a tokio mutex. A call keeps
//! the lock for its whole build, correct and rank sequence, so concurrent
//! callers are serialized and never observe each other's vocabulary. The CPU
//! work runs on tokio's blocking pool.

use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::Mutex;
use tokio::task;

use crate::error::{Result, SpellsiftError};
use crate::search::engine::{SearchEngine, SearchOutcome};
use crate::spelling::corrector::QueryCorrection;

/// A cloneable async handle to a [`SearchEngine`].
#[derive(Debug, Clone)]
pub struct SharedSearchEngine {
    engine: Arc<Mutex<SearchEngine>>,
    deadline: Option<Duration>,
}

impl SharedSearchEngine {
    pub fn new(engine: SearchEngine) -> Self {
        SharedSearchEngine {
            engine: Arc::new(Mutex::new(engine)),
            deadline: None,
        }
    }

    /// Bound every call, lock wait included, by `deadline`.
    ///
    /// On expiry the call returns [`SpellsiftError::Timeout`]; work already
    /// running on the blocking pool finishes in the background and then
    /// releases the engine.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Index `corpus`, correct `query` and rank, as one exclusive operation.
    pub async fn search(
        &self,
        query: impl Into<String>,
        corpus: Vec<String>,
    ) -> Result<SearchOutcome> {
        let query = query.into();
        self.run(move |engine| engine.search(&query, &corpus)).await
    }

    /// Rebuild the index, returning the vocabulary size.
    pub async fn build_index(&self, corpus: Vec<String>) -> Result<usize> {
        self.run(move |engine| {
            engine.build_index(&corpus);
            engine.vocabulary().len()
        })
        .await
    }

    /// Correct a query against the current index.
    pub async fn correct_query(&self, query: impl Into<String>) -> Result<String> {
        let query = query.into();
        self.run(move |engine| engine.correct_query(&query)).await
    }

    pub async fn correct_query_detailed(
        &self,
        query: impl Into<String>,
    ) -> Result<QueryCorrection> {
        let query = query.into();
        self.run(move |engine| engine.correct_query_detailed(&query))
            .await
    }

    async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SearchEngine) -> T + Send + 'static,
        T: Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        let work = async move {
            let mut guard = engine.lock_owned().await;
            task::spawn_blocking(move || operation(&mut *guard))
                .await
                .map_err(|e| SpellsiftError::task(e.to_string()))
        };

        match self.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, work).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Search exceeded deadline of {deadline:?}");
                    Err(SpellsiftError::timeout(format!(
                        "search exceeded {}ms",
                        deadline.as_millis()
                    )))
                }
            },
            None => work.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::spelling::suggest::SpellCorrect;

    struct SlowSpeller(Duration);

    impl SpellCorrect for SlowSpeller {
        fn correct(&self, word: &str) -> Result<String> {
            thread::sleep(self.0);
            Ok(word.to_string())
        }
    }

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[tokio::test]
    async fn test_shared_search() {
        let shared = SharedSearchEngine::new(SearchEngine::default());
        let outcome = shared
            .search("avengrs", corpus(&["The Avengers (2019) 1080p", "KGF Chapter 2"]))
            .await
            .unwrap();

        assert_eq!(outcome.corrected_query, "avengers");
        assert_eq!(outcome.matches[0].text, "The Avengers (2019) 1080p");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_searches_are_isolated() {
        let shared = SharedSearchEngine::new(SearchEngine::default());

        let mut handles = Vec::new();
        for i in 0..8 {
            let shared = shared.clone();
            handles.push(tokio::spawn(async move {
                let (query, docs) = if i % 2 == 0 {
                    ("Avangers", corpus(&["The Avengers (2019) 1080p"]))
                } else {
                    ("Avangers", corpus(&["Avalanche documentary"]))
                };
                (i, shared.search(query, docs).await.unwrap())
            }));
        }

        for handle in handles {
            let (i, outcome) = handle.await.unwrap();
            if i % 2 == 0 {
                assert_eq!(outcome.corrected_query, "Avengers");
                assert_eq!(outcome.len(), 1);
            } else {
                assert_eq!(outcome.corrected_query, "Avangers");
                assert!(outcome.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_build_then_correct() {
        let shared = SharedSearchEngine::new(SearchEngine::default());
        let size = shared
            .build_index(corpus(&["The Avengers (2019) 1080p"]))
            .await
            .unwrap();
        assert_eq!(size, 1);

        assert_eq!(shared.correct_query("AVANGERS").await.unwrap(), "AVENGERS");
        let detail = shared.correct_query_detailed("AVANGERS").await.unwrap();
        assert!(detail.is_changed());
    }

    #[tokio::test]
    async fn test_deadline_expires() {
        let engine = SearchEngine::default().with_speller(Arc::new(SlowSpeller(
            Duration::from_millis(300),
        )));
        let shared = SharedSearchEngine::new(engine).with_deadline(Duration::from_millis(20));

        let result = shared.search("avengers", corpus(&["The Avengers"])).await;
        assert!(matches!(result, Err(SpellsiftError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_deadline_not_hit() {
        let shared = SharedSearchEngine::new(SearchEngine::default())
            .with_deadline(Duration::from_secs(30));
        assert_eq!(shared.deadline(), Some(Duration::from_secs(30)));

        let outcome = shared
            .search("avatar", corpus(&["Avatar 2009 720p BluRay"]))
            .await
            .unwrap();
        assert_eq!(outcome.len(), 1);
    }
}
