//! Running a search on a background thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::game::Quoridor;

use super::alphabeta::{AlphaBeta, SearchOutcome};
use super::SearchConfig;

/// State of a background search as seen from [`SearchHandle::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPoll {
    Pending,
    Ready(SearchOutcome),
    /// Cancelled, out of time, or no turn to make.
    Abandoned,
}

/// Owner's side of a search running on its own thread.
///
/// Dropping the handle cancels the search.
#[derive(Debug)]
pub struct SearchHandle {
    stop: Arc<AtomicBool>,
    rx: Receiver<Option<SearchOutcome>>,
    thread: Option<JoinHandle<()>>,
    result: Option<Option<SearchOutcome>>,
}

impl SearchHandle {
    /// Checks for a result without blocking.
    pub fn poll(&mut self) -> SearchPoll {
        if self.result.is_none() {
            match self.rx.try_recv() {
                Ok(outcome) => self.result = Some(outcome),
                Err(TryRecvError::Empty) => return SearchPoll::Pending,
                // the worker died without reporting
                Err(TryRecvError::Disconnected) => self.result = Some(None),
            }
        }
        match &self.result {
            Some(Some(outcome)) => SearchPoll::Ready(outcome.clone()),
            _ => SearchPoll::Abandoned,
        }
    }

    /// Asks the search to stop. It unwinds at its next check and reports no
    /// turn.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Blocks until the search finishes.
    pub fn wait(mut self) -> Option<SearchOutcome> {
        let outcome = match self.result.take() {
            Some(outcome) => outcome,
            None => self.rx.recv().ok().flatten(),
        };
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        outcome
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop.store(true, Ordering::Relaxed);
        }
    }
}

/// Searches `game` on a new thread, calling `on_done` there with the
/// outcome before it is made available to the handle.
///
/// `game` should be a [`Quoridor::copy`]; the live game is never touched.
pub fn request_move_with<F>(mut game: Quoridor, config: SearchConfig, on_done: F) -> SearchHandle
where
    F: FnOnce(Option<SearchOutcome>) + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();
    let worker_stop = stop.clone();

    let thread = thread::spawn(move || {
        let mut search = AlphaBeta::with_stop(config, worker_stop.clone());
        let outcome = search
            .search(&mut game)
            .filter(|_| !worker_stop.load(Ordering::Relaxed));
        if outcome.is_none() {
            debug!(nodes = search.stats().nodes, "search produced no turn");
        }
        on_done(outcome.clone());
        // the handle may already be gone
        let _ = tx.send(outcome);
    });

    SearchHandle {
        stop,
        rx,
        thread: Some(thread),
        result: None,
    }
}

/// Searches `game` on a new thread with a full configuration.
pub fn spawn_search(game: Quoridor, config: SearchConfig) -> SearchHandle {
    request_move_with(game, config, |_| {})
}

/// Searches `game` on a new thread `depth` plies deep, giving up after
/// `deadline` if one is set.
pub fn request_move(game: Quoridor, depth: usize, deadline: Option<Duration>) -> SearchHandle {
    let config = SearchConfig {
        depth,
        deadline,
        ..SearchConfig::default()
    };
    spawn_search(game, config)
}
