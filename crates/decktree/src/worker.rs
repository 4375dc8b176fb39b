//! # Off-thread Filtering
//!
//! A filter request is a self-contained value: the source forest (cheap `Arc`
//! clones), the normalized pattern, the build context and the sequence number the
//! presenter issued for it. [`FilterRequest::run`] is a pure function, so it can run
//! anywhere; [`FilterWorker`] runs it on tokio's blocking pool and hands the tagged
//! [`FilterOutcome`] back over a channel.
//!
//! The worker does not decide which outcome wins. Outcomes arrive in completion
//! order, and the presenter discards any whose sequence number is not the latest
//! it issued.
//!
//! `submit` must be called from within a tokio runtime.

use crate::error::{DeckError, Result};
use crate::filter::{filter, NameMatcher};
use crate::flatten::{flatten, BuildContext};
use crate::model::DeckForest;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub seq: u64,
    pub source: DeckForest,
    pub matcher: NameMatcher,
    pub ctx: BuildContext,
}

impl FilterRequest {
    /// Filters the source forest and flattens the result into display rows.
    pub fn run(&self) -> FilterOutcome {
        let filtered = filter(&self.source, &self.matcher);
        let rows = flatten(&filtered, &self.ctx).visible;
        FilterOutcome {
            seq: self.seq,
            pattern: self.matcher.pattern().to_string(),
            result: Ok(rows),
        }
    }
}

#[derive(Debug)]
pub struct FilterOutcome {
    pub seq: u64,
    pub pattern: String,
    /// Display rows, or why they could not be computed.
    pub result: Result<DeckForest>,
}

impl FilterOutcome {
    pub fn failed(seq: u64, pattern: impl Into<String>, error: DeckError) -> Self {
        Self {
            seq,
            pattern: pattern.into(),
            result: Err(error),
        }
    }
}

pub struct FilterWorker {
    tx: mpsc::UnboundedSender<FilterOutcome>,
    rx: mpsc::UnboundedReceiver<FilterOutcome>,
    in_flight: usize,
}

impl Default for FilterWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterWorker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn submit(&mut self, request: FilterRequest) {
        let tx = self.tx.clone();
        self.in_flight += 1;
        tracing::debug!(seq = request.seq, pattern = request.matcher.pattern(), "filter submitted");

        tokio::spawn(async move {
            let seq = request.seq;
            let pattern = request.matcher.pattern().to_string();
            let outcome = match tokio::task::spawn_blocking(move || request.run()).await {
                Ok(outcome) => outcome,
                // The computation panicked or was cancelled
                Err(err) => FilterOutcome::failed(seq, pattern, DeckError::Filter(err.to_string())),
            };
            // The receiver lives as long as the worker; nothing to do if it is gone
            let _ = tx.send(outcome);
        });
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// The next completed outcome, or `None` when nothing is in flight.
    pub async fn next(&mut self) -> Option<FilterOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let outcome = self.rx.recv().await;
        if outcome.is_some() {
            self.in_flight -= 1;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::model::{forest, DeckNode};

    fn request(seq: u64, pattern: &str) -> FilterRequest {
        FilterRequest {
            seq,
            source: forest(vec![
                DeckNode::new(1, "Math"),
                DeckNode::new(2, "Science")
                    .with_children(vec![DeckNode::new(3, "Science::Physics")]),
            ]),
            matcher: NameMatcher::new(Some(pattern), Locale::Invariant),
            ctx: BuildContext::default(),
        }
    }

    #[test]
    fn test_run_filters_then_flattens() {
        let outcome = request(4, "phys").run();
        assert_eq!(outcome.seq, 4);
        assert_eq!(outcome.pattern, "phys");

        let ids: Vec<_> = outcome.result.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_worker_delivers_every_outcome() {
        let mut worker = FilterWorker::new();
        worker.submit(request(1, "m"));
        worker.submit(request(2, "s"));
        assert_eq!(worker.in_flight(), 2);

        let mut seqs = Vec::new();
        while let Some(outcome) = worker.next().await {
            assert!(outcome.result.is_ok());
            seqs.push(outcome.seq);
        }
        seqs.sort();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(worker.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_next_without_requests_is_none() {
        let mut worker = FilterWorker::new();
        assert!(worker.next().await.is_none());
    }
}
