//! Background model-set loading.
//!
//! Each request spawns a worker thread that loads the set and reports back
//! over a channel; the UI polls once per frame. Requests carry a
//! monotonically increasing generation so that when the user changes the
//! selection while a load is still in flight, the stale result is dropped
//! on receipt: last-started wins.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use fp_model::ModelKey;

use crate::model_service::{ModelSet, load_model_set};

#[derive(Debug)]
pub enum LoaderMessage {
    Loaded { generation: u64, set: ModelSet },
}

pub struct LoaderWorker {
    results_tx: Sender<LoaderMessage>,
    results_rx: Receiver<LoaderMessage>,
    next_generation: u64,
    applied_generation: u64,
}

impl Default for LoaderWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderWorker {
    pub fn new() -> LoaderWorker {
        let (results_tx, results_rx) = channel();
        LoaderWorker {
            results_tx,
            results_rx,
            next_generation: 0,
            applied_generation: 0,
        }
    }

    /// Start loading a selection in the background. Returns the request's
    /// generation number.
    pub fn request(&mut self, data_dir: PathBuf, selections: Vec<ModelKey>) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        let tx = self.results_tx.clone();
        thread::spawn(move || {
            let set = load_model_set(&data_dir, &selections);
            let _ = tx.send(LoaderMessage::Loaded { generation, set });
        });
        generation
    }

    /// Drain finished loads and return the newest applicable result, if
    /// any. Results older than one already applied are discarded.
    pub fn poll(&mut self) -> Option<ModelSet> {
        let mut latest = None;
        while let Ok(LoaderMessage::Loaded { generation, set }) = self.results_rx.try_recv() {
            if let Some(set) = self.accept(generation, set) {
                latest = Some(set);
            }
        }
        latest
    }

    /// Whether a request is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.applied_generation < self.next_generation
    }

    fn accept(&mut self, generation: u64, set: ModelSet) -> Option<ModelSet> {
        if generation <= self.applied_generation {
            tracing::debug!(generation, "discarding stale model load");
            return None;
        }
        self.applied_generation = generation;
        Some(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> ModelSet {
        ModelSet {
            models: Vec::new(),
            title: title.to_string(),
        }
    }

    #[test]
    fn in_order_results_apply() {
        let mut worker = LoaderWorker::new();
        worker.next_generation = 2;
        assert!(worker.accept(1, titled("one")).is_some());
        assert!(worker.accept(2, titled("two")).is_some());
        assert_eq!(worker.applied_generation, 2);
        assert!(!worker.is_loading());
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut worker = LoaderWorker::new();
        worker.next_generation = 2;
        // the newer request finished first
        assert!(worker.accept(2, titled("two")).is_some());
        assert!(worker.accept(1, titled("one")).is_none());
        assert_eq!(worker.applied_generation, 2);
    }

    #[test]
    fn poll_returns_newest_of_a_burst() {
        let mut worker = LoaderWorker::new();
        worker.next_generation = 3;
        worker
            .results_tx
            .send(LoaderMessage::Loaded {
                generation: 1,
                set: titled("one"),
            })
            .unwrap();
        worker
            .results_tx
            .send(LoaderMessage::Loaded {
                generation: 3,
                set: titled("three"),
            })
            .unwrap();
        worker
            .results_tx
            .send(LoaderMessage::Loaded {
                generation: 2,
                set: titled("two"),
            })
            .unwrap();

        let set = worker.poll().unwrap();
        assert_eq!(set.title, "three");
        assert!(worker.poll().is_none());
    }
}
