//! Background analysis calls.
//!
//! Each `submit` spawns its own thread running the blocking client, so the
//! window keeps drawing while a request is in flight. Finished calls are
//! collected by `poll` in the order they *arrive*, which is not necessarily
//! the order they were issued. There is no cancellation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::analysis::{AnalysisClient, AnalysisResult};
use crate::error::Error;
use crate::vars::VarMap;

/// A finished analysis call.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Id returned by `submit`, in issuance order.
    pub id: u64,
    pub result: Result<Vec<AnalysisResult>, Error>,
}

/// Anything that can answer an analysis request. The HTTP client in
/// production, a canned responder in tests.
pub trait Analyzer: Send + Sync + 'static {
    fn analyze(&self, image: &str, variables: &VarMap) -> Result<Vec<AnalysisResult>, Error>;
}

impl Analyzer for AnalysisClient {
    fn analyze(&self, image: &str, variables: &VarMap) -> Result<Vec<AnalysisResult>, Error> {
        AnalysisClient::analyze(self, image, variables)
    }
}

pub struct AnalysisWorker<A: Analyzer> {
    analyzer: Arc<A>,
    result_tx: Sender<AnalysisOutcome>,
    result_rx: Receiver<AnalysisOutcome>,
    next_id: u64,
    in_flight: usize,
}

impl<A: Analyzer> AnalysisWorker<A> {
    pub fn new(analyzer: A) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self { analyzer: Arc::new(analyzer), result_tx, result_rx, next_id: 0, in_flight: 0 }
    }

    /// Start one analysis in the background and return its id.
    pub fn submit(&mut self, image: String, variables: VarMap) -> Result<u64, Error> {
        let id = self.next_id;
        let analyzer = self.analyzer.clone();
        let tx = self.result_tx.clone();

        thread::Builder::new()
            .name(format!("analysis-{id}"))
            .spawn(move || {
                // a panicking analyzer still answers, so in_flight always drains
                let result = panic::catch_unwind(AssertUnwindSafe(|| analyzer.analyze(&image, &variables)))
                    .unwrap_or_else(|payload| {
                        let msg = panic_message(&*payload);
                        Err(Error::Worker(format!("analysis thread panicked: {msg}")))
                    });
                // receiver gone means the app is shutting down
                let _ = tx.send(AnalysisOutcome { id, result });
            })
            .map_err(|e| Error::Worker(format!("spawn analysis thread: {e}")))?;

        self.next_id += 1;
        self.in_flight += 1;
        tracing::info!(id, in_flight = self.in_flight, "analysis submitted");
        Ok(id)
    }

    /// Drain every finished call without blocking.
    pub fn poll(&mut self) -> Vec<AnalysisOutcome> {
        let mut done = Vec::new();
        loop {
            match self.result_rx.try_recv() {
                Ok(outcome) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    done.push(outcome);
                }
                // the worker keeps its own sender, so Disconnected cannot happen here
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        done
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[cfg(test)]
    pub(crate) fn analyzer(&self) -> &A {
        &self.analyzer
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
#[path = "worker_test.rs"]
mod tests;
