#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use carkg_frontend::app::Screen;
use carkg_frontend::backend::SearchBackend;
use carkg_frontend::error::TransportError;
use carkg_frontend::models::{QueryRequest, QueryResponse, ResultItem};
use tokio::sync::{oneshot, watch};

pub fn items(names: &[&str]) -> Vec<ResultItem> {
    names.iter().map(|n| ResultItem::named(*n)).collect()
}

/// Answers with pre-scripted outcomes, in order, and records every request.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    outcomes: Arc<Mutex<VecDeque<Result<QueryResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<QueryRequest>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new(outcomes: impl IntoIterator<Item = Result<QueryResponse, TransportError>>) -> Self {
        ScriptedBackend {
            outcomes: Arc::new(Mutex::new(outcomes.into_iter().collect())),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SearchBackend for ScriptedBackend {
    fn search(
        &self,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<QueryResponse, TransportError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response left".to_string())));
        async move { outcome }
    }
}

/// Holds each request open until the test releases the answer for its query text.
#[derive(Clone, Default)]
pub struct GatedBackend {
    gates: Arc<Mutex<HashMap<String, oneshot::Receiver<QueryResponse>>>>,
}

impl GatedBackend {
    pub fn gate(&self, query: &str) -> oneshot::Sender<QueryResponse> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(query.to_string(), rx);
        tx
    }
}

impl SearchBackend for GatedBackend {
    fn search(
        &self,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<QueryResponse, TransportError>> + Send {
        let gate = self.gates.lock().unwrap().remove(&request.query);
        async move {
            match gate {
                Some(rx) => rx
                    .await
                    .map_err(|_| TransportError::Request("gate dropped".to_string())),
                None => Err(TransportError::Request("no gate for query".to_string())),
            }
        }
    }
}

/// Waits (bounded) for a published screen matching `pred`.
pub async fn wait_for_screen(
    rx: &mut watch::Receiver<Screen>,
    pred: impl FnMut(&Screen) -> bool,
) -> Screen {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(pred))
        .await
        .expect("timed out waiting for screen")
        .expect("event loop stopped")
        .clone()
}
