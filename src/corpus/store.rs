use std::{path::PathBuf, sync::Arc};

use crate::corpus::{Corpus, CorpusError};

#[derive(Debug)]
pub enum LoadOutcome {
    Cached,
    Loaded { entries: usize },
    /// The corpus handed out alongside this outcome is empty.
    Failed(CorpusError),
}

#[derive(Debug)]
pub struct CorpusLoad {
    pub corpus: Arc<Corpus>,
    pub outcome: LoadOutcome,
}

/// Loads the corpus on first use and keeps it until `invalidate` is called.
///
/// A failed load is cached as an empty corpus so the error is reported once
/// rather than on every turn.
#[derive(Debug)]
pub struct CorpusStore {
    path: PathBuf,
    cached: Option<Arc<Corpus>>,
}

impl CorpusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    pub fn get(&mut self) -> CorpusLoad {
        if let Some(corpus) = &self.cached {
            return CorpusLoad {
                corpus: Arc::clone(corpus),
                outcome: LoadOutcome::Cached,
            };
        }

        let (corpus, outcome) = match Corpus::load(&self.path) {
            Ok(corpus) => {
                let entries = corpus.len();
                (corpus, LoadOutcome::Loaded { entries })
            }
            Err(err) => (Corpus::empty(), LoadOutcome::Failed(err)),
        };

        let corpus = Arc::new(corpus);
        self.cached = Some(Arc::clone(&corpus));

        CorpusLoad { corpus, outcome }
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
