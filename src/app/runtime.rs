//! Action execution against the selected backend.
//!
//! The [`Dispatcher`] closes the loop between the pure event handler and the
//! network: it runs each backend [`Action`] through the traced wrapper while a
//! [`PendingGuard`](crate::app::state::PendingGuard) is held, turns the outcome
//! into a completion [`Event`], and applies it to the state.
//!
//! Operation failures never escape as errors. They become
//! [`Event::OperationFailed`] and end up in `last_error`.

use std::ops::ControlFlow;

use tracing::Instrument;

use super::actions::Action;
use super::handler::{handle_event, Event};
use super::state::AppState;
use crate::domain::Result;
use crate::gateway::Gateways;
use crate::traced::TracedOperations;

/// Executes actions through traced gateway calls.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    gateways: Gateways,
    operations: TracedOperations,
}

impl Dispatcher {
    /// Creates a dispatcher over a gateway set and a traced wrapper.
    #[must_use]
    pub const fn new(gateways: Gateways, operations: TracedOperations) -> Self {
        Self {
            gateways,
            operations,
        }
    }

    /// Handles an input event and runs every action it produces.
    ///
    /// Returns `Break` when the user asked to quit.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler. Backend failures are folded
    /// into the state instead.
    pub async fn handle(&self, state: &mut AppState, event: &Event) -> Result<ControlFlow<()>> {
        let (_, actions) = handle_event(state, event)?;

        for action in actions {
            if self.dispatch(state, action).await?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Executes one action and applies its completion event.
    ///
    /// `pending` is true for the whole duration of the backend call and is
    /// cleared on every exit path.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub async fn dispatch(&self, state: &mut AppState, action: Action) -> Result<ControlFlow<()>> {
        if action == Action::Quit {
            return Ok(ControlFlow::Break(()));
        }

        let span = tracing::info_span!("dispatch", action = ?action);
        self.run(state, action).instrument(span).await?;
        Ok(ControlFlow::Continue(()))
    }

    async fn run(&self, state: &mut AppState, action: Action) -> Result<()> {
        let mut pending = state.begin_operation();

        let completion = match action {
            Action::LoadTodos { backend } => self
                .operations
                .list(self.gateways.get(backend))
                .await
                .map(|todos| Event::TodosLoaded { todos }),
            Action::CreateTodo { backend, name } => self
                .operations
                .create(self.gateways.get(backend), &name)
                .await
                .map(|item| Event::TodoCreated { item }),
            Action::DeleteTodo { backend, id } => {
                let outcome = self.operations.delete(self.gateways.get(backend), &id).await;
                outcome.map(|()| Event::TodoDeleted { id })
            }
            Action::Quit => return Ok(()),
        };

        let event = completion.unwrap_or_else(|error| Event::OperationFailed {
            message: error.to_string(),
        });

        let (_, follow_up) = handle_event(&mut pending, &event)?;
        if !follow_up.is_empty() {
            tracing::debug!(?follow_up, "completion produced actions, dropping them");
        }

        Ok(())
    }
}
