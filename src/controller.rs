//! Query lifecycle: `Idle -> Loading -> {Success, Error}`, re-entering `Loading`
//! on every accepted submission.
//!
//! Each accepted submission is stamped with a [`Generation`]. Only the response
//! carrying the most recently issued generation is applied; anything older is
//! dropped, so overlapping queries can't overwrite newer results.

use std::fmt;

use crate::error::{QueryError, TransportError};
use crate::models::{FilterSnapshot, QueryRequest, QueryResponse, ResultSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    Loading,
    Success,
    Error(QueryError),
}

/// A request that passed validation and is waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: Generation,
    pub request: QueryRequest,
}

/// What a settled response means for the rest of the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Superseded by a newer submission (or already settled). Ignore it.
    Stale,
    Success { results: ResultSet, page: usize },
    Failed(QueryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryController {
    phase: QueryPhase,
    issued: u64,
    pending: Option<Generation>,
}

impl Default for QueryController {
    fn default() -> Self {
        QueryController {
            phase: QueryPhase::Idle,
            issued: 0,
            pending: None,
        }
    }
}

impl QueryController {
    pub fn phase(&self) -> &QueryPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == QueryPhase::Loading
    }

    pub fn pending(&self) -> Option<Generation> {
        self.pending
    }

    /// Validates `text` and, if it is usable, moves to `Loading` and issues a ticket.
    ///
    /// Empty text (after trimming) fails with [`QueryError::EmptyQuery`] and leaves
    /// the controller exactly as it was.
    pub fn submit(
        &mut self,
        text: &str,
        filters: &FilterSnapshot,
        page: usize,
        page_size: usize,
    ) -> Result<Ticket, QueryError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        self.issued += 1;
        let generation = Generation(self.issued);
        self.pending = Some(generation);
        self.phase = QueryPhase::Loading;

        Ok(Ticket {
            generation,
            request: QueryRequest {
                query: query.to_string(),
                filters: filters.clone(),
                page: page.max(1),
                page_size: page_size.max(1),
            },
        })
    }

    /// Applies the outcome of the request stamped `generation`.
    pub fn settle(
        &mut self,
        generation: Generation,
        outcome: Result<QueryResponse, TransportError>,
    ) -> Settlement {
        if self.pending != Some(generation) {
            tracing::debug!(%generation, latest = self.issued, "Discarding stale query response");
            return Settlement::Stale;
        }
        self.pending = None;

        let settlement = match outcome {
            Ok(response) if response.success => Settlement::Success {
                results: ResultSet::new(response.results.unwrap_or_default()),
                page: response.page.filter(|&p| p > 0).unwrap_or(1),
            },
            Ok(response) => Settlement::Failed(QueryError::application(response.error)),
            Err(e) => Settlement::Failed(QueryError::Transport(e)),
        };

        self.phase = match &settlement {
            Settlement::Failed(e) => {
                tracing::warn!(%generation, error = %e, "Query failed");
                QueryPhase::Error(e.clone())
            }
            _ => QueryPhase::Success,
        };
        settlement
    }

    /// Drops any in-flight request and returns to `Idle`.
    ///
    /// The generation counter keeps counting, so responses to requests issued
    /// before the reset are recognised as stale when they arrive.
    pub fn reset(&mut self) {
        self.phase = QueryPhase::Idle;
        self.pending = None;
    }
}
