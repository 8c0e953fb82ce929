//! The single event loop that owns the [`App`].
//!
//! UI actions arrive over one channel, backend answers over another. Each
//! backend request runs in its own task and reports back with the generation
//! it was issued under, so the loop itself never waits on the network. After
//! every event the loop publishes a fresh [`Screen`] through a watch channel.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::app::{App, FilterEdit, Screen};
use crate::backend::SearchBackend;
use crate::controller::{Generation, Ticket};
use crate::error::{DispatchError, QueryError, TransportError};
use crate::modal::Modal;
use crate::models::QueryResponse;
use crate::render::ViewMode;

/// Things a user can do on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Set the query text and submit it (search button, Enter, or a query tag).
    Search(String),
    ApplyFilters(FilterEdit),
    PrevPage,
    NextPage,
    SwitchView(ViewMode),
    /// Retry from the error panel: back to startup state.
    Reload,
    OpenModal(Modal),
    CloseModal,
}

struct Command {
    action: Action,
    reply: oneshot::Sender<Result<(), QueryError>>,
}

struct Answer {
    generation: Generation,
    outcome: Result<QueryResponse, TransportError>,
}

/// Cloneable handle used by the HTTP layer to talk to the loop.
#[derive(Debug, Clone)]
pub struct UiHandle {
    commands: mpsc::UnboundedSender<Command>,
    screen: watch::Receiver<Screen>,
}

impl UiHandle {
    /// Sends `action` and waits until the loop has applied it and published the result.
    pub async fn dispatch(&self, action: Action) -> Result<(), DispatchError> {
        let (reply, done) = oneshot::channel();
        self.commands
            .send(Command { action, reply })
            .map_err(|_| DispatchError::Closed)?;
        done.await.map_err(|_| DispatchError::Closed)??;
        Ok(())
    }

    /// The most recently published screen.
    pub fn screen(&self) -> Screen {
        self.screen.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Screen> {
        self.screen.clone()
    }
}

struct EventLoop<B> {
    app: App,
    backend: Arc<B>,
    answers_tx: mpsc::UnboundedSender<Answer>,
    screen_tx: watch::Sender<Screen>,
}

impl<B: SearchBackend> EventLoop<B> {
    fn handle(&mut self, action: Action) -> Result<(), QueryError> {
        match action {
            Action::Search(text) => {
                let ticket = self.app.search(text)?;
                self.launch(ticket);
            }
            Action::ApplyFilters(edit) => {
                if let Some(ticket) = self.app.apply_filters(edit) {
                    self.launch(ticket);
                }
            }
            Action::PrevPage => {
                self.app.prev_page();
            }
            Action::NextPage => {
                self.app.next_page();
            }
            Action::SwitchView(mode) => self.app.switch_view(mode),
            Action::Reload => self.app.reload(),
            Action::OpenModal(modal) => self.app.open_modal(modal),
            Action::CloseModal => self.app.close_modal(),
        }
        Ok(())
    }

    // The request is the only suspension point; it runs outside the loop.
    fn launch(&self, ticket: Ticket) {
        let backend = Arc::clone(&self.backend);
        let answers = self.answers_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.search(&ticket.request).await;
            if answers
                .send(Answer {
                    generation: ticket.generation,
                    outcome,
                })
                .is_err()
            {
                tracing::debug!(generation = %ticket.generation, "Event loop gone before answer arrived");
            }
        });
    }

    fn publish(&self) {
        self.screen_tx.send_replace(self.app.screen());
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut answers: mpsc::UnboundedReceiver<Answer>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(Command { action, reply }) = command else {
                        tracing::info!("All UI handles dropped, stopping event loop");
                        break;
                    };
                    let result = self.handle(action);
                    self.publish();
                    // the caller may have stopped waiting
                    let _ = reply.send(result);
                }
                Some(Answer { generation, outcome }) = answers.recv() => {
                    self.app.settle(generation, outcome);
                    self.publish();
                }
            }
        }
    }
}

/// Starts the loop with a fresh [`App`] and returns the handle to drive it.
pub fn spawn<B: SearchBackend>(backend: B) -> (UiHandle, JoinHandle<()>) {
    let app = App::new();
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (answers_tx, answers_rx) = mpsc::unbounded_channel();
    let (screen_tx, screen_rx) = watch::channel(app.screen());

    let event_loop = EventLoop {
        app,
        backend: Arc::new(backend),
        answers_tx,
        screen_tx,
    };
    let task = tokio::spawn(event_loop.run(commands_rx, answers_rx));

    (
        UiHandle {
            commands: commands_tx,
            screen: screen_rx,
        },
        task,
    )
}
