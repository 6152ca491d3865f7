// --- File: crates/clinicbook_booking/src/driver.rs ---
//! Runs the effects produced by [`crate::flow::transition`].

use std::collections::VecDeque;

use clinicbook_common::{ContactRecord, ContactSink};
use tracing::{error, info};

use crate::flow::{transition, BookingEvent, BookingSession, Effect, FlowContext, FlowError};

/// Result of dispatching one event, after all its effects have run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOutcome {
    pub session: BookingSession,
    pub redirect: Option<String>,
    /// The contact that was handed to the sink, if any.
    pub submitted: Option<ContactRecord>,
    /// Set when the sink rejected the contact. The booking itself stands.
    pub submission_failed: bool,
}

/// Owns a sink and feeds a session through the flow.
pub struct FlowDriver<S> {
    sink: S,
    context: FlowContext,
}

impl<S> FlowDriver<S>
where
    S: ContactSink,
{
    pub fn new(sink: S, context: FlowContext) -> Self {
        Self { sink, context }
    }

    pub fn context(&self) -> &FlowContext {
        &self.context
    }

    /// Applies `event` and runs every effect that follows from it, including
    /// the delayed advance to the confirmation step.
    pub async fn dispatch(
        &self,
        session: &BookingSession,
        event: BookingEvent,
    ) -> Result<DriverOutcome, FlowError> {
        let first = transition(session, event, &self.context)?;
        let mut outcome = DriverOutcome {
            session: first.session,
            redirect: None,
            submitted: None,
            submission_failed: false,
        };
        let mut pending: VecDeque<Effect> = first.effects.into();

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::Redirect(target) => {
                    outcome.redirect = Some(target);
                }
                Effect::AdvanceAfter(delay) => {
                    tokio::time::sleep(delay).await;
                    let next = transition(
                        &outcome.session,
                        BookingEvent::ConfirmationElapsed,
                        &self.context,
                    )?;
                    outcome.session = next.session;
                    pending.extend(next.effects);
                }
                Effect::SubmitContact(record) => {
                    match self.sink.append_contact(record.clone()).await {
                        Ok(()) => {
                            info!("Submitted contact for booking");
                        }
                        Err(e) => {
                            error!("Failed to submit contact: {}", e);
                            outcome.submission_failed = true;
                        }
                    }
                    outcome.submitted = Some(record);
                }
            }
        }

        Ok(outcome)
    }
}
