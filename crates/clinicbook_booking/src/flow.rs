// --- File: crates/clinicbook_booking/src/flow.rs ---
//! The booking wizard as a pure state machine.
//!
//! A [`BookingSession`] only changes through [`transition`], which takes the
//! current session and one [`BookingEvent`] and returns the next session plus
//! the [`Effect`]s the caller has to carry out. Nothing here performs I/O or
//! waits; see [`crate::driver`] for that.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use clinicbook_common::ContactRecord;
use clinicbook_config::models::BookingConfig;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calendar::today_at_offset;
use crate::models::{ContactInfo, UserType, VisitType};
use crate::phone::format_phone_number;
use crate::scheduling::{SchedulingContext, SchedulingEvent, SchedulingOutcome, SchedulingState};

/// Name submitted for returning patients, who are not asked for one.
pub const RETURNING_PATIENT_NAME: &str = "Returning patient";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("'{event}' is not accepted on step {step}")]
    WrongStep { step: Step, event: &'static str },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Not available: {0}")]
    OptionUnavailable(String),

    #[error("Date not available: {0}")]
    DateUnavailable(NaiveDate),

    #[error("Not ready: {0}")]
    NotReady(&'static str),

    #[error("Booking already confirmed")]
    AlreadyConfirmed,

    #[error("Booking flow has ended")]
    FlowEnded,
}

impl From<FlowError> for clinicbook_common::ClinicbookError {
    fn from(err: FlowError) -> Self {
        clinicbook_common::ClinicbookError::ValidationError(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    UserType = 1,
    ContactInfo = 2,
    VisitType = 3,
    Scheduling = 4,
    Confirmation = 5,
}

impl Step {
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEvent {
    SelectUserType(UserType),
    EditName(String),
    /// Raw input; it is reformatted before being stored.
    EditPhone(String),
    SubmitContact,
    SelectVisitType(VisitType),
    EditOtherRequest(String),
    Schedule(SchedulingEvent),
    /// The confirmation delay has passed.
    ConfirmationElapsed,
}

impl BookingEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BookingEvent::SelectUserType(_) => "select_user_type",
            BookingEvent::EditName(_) => "edit_name",
            BookingEvent::EditPhone(_) => "edit_phone",
            BookingEvent::SubmitContact => "submit_contact",
            BookingEvent::SelectVisitType(_) => "select_visit_type",
            BookingEvent::EditOtherRequest(_) => "edit_other_request",
            BookingEvent::Schedule(event) => event.name(),
            BookingEvent::ConfirmationElapsed => "confirmation_elapsed",
        }
    }
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Leave the flow for another page.
    Redirect(String),
    /// Feed [`BookingEvent::ConfirmationElapsed`] back in after this long.
    AdvanceAfter(Duration),
    SubmitContact(ContactRecord),
}

/// Inputs the transition function needs from the outside world.
#[derive(Debug, Clone)]
pub struct FlowContext {
    pub today: NaiveDate,
    pub question_redirect: String,
    pub confirmation_delay: Duration,
}

impl FlowContext {
    pub fn from_config(config: &BookingConfig) -> Self {
        Self {
            today: today_at_offset(config.utc_offset_hours),
            question_redirect: config.question_redirect.clone(),
            confirmation_delay: Duration::from_millis(config.confirmation_delay_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSession {
    pub step: Step,
    pub user_type: Option<UserType>,
    pub visit_type: Option<VisitType>,
    pub contact: ContactInfo,
    pub other_request: String,
    pub scheduling: SchedulingState,
    /// Set once the visitor has been sent elsewhere.
    pub redirected_to: Option<String>,
}

impl BookingSession {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: Step::UserType,
            user_type: None,
            visit_type: None,
            contact: ContactInfo::default(),
            other_request: String::new(),
            scheduling: SchedulingState::new(today),
            redirected_to: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.redirected_to.is_some() || self.step == Step::Confirmation
    }

    /// The record submitted once the booking is confirmed.
    pub fn contact_record(&self) -> Option<ContactRecord> {
        let name = if self.contact.name.trim().is_empty() && self.user_type != Some(UserType::New)
        {
            RETURNING_PATIENT_NAME
        } else {
            self.contact.name.as_str()
        };
        ContactRecord::new(name, self.contact.phone_number.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: BookingSession,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(session: BookingSession) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }

    fn with(session: BookingSession, effect: Effect) -> Self {
        Self {
            session,
            effects: vec![effect],
        }
    }
}

fn expect_step(session: &BookingSession, step: Step, event: &BookingEvent) -> Result<(), FlowError> {
    if session.step == step {
        Ok(())
    } else {
        Err(FlowError::WrongStep {
            step: session.step,
            event: event.name(),
        })
    }
}

/// Applies one event. A rejected event leaves `session` untouched.
pub fn transition(
    session: &BookingSession,
    event: BookingEvent,
    ctx: &FlowContext,
) -> Result<Transition, FlowError> {
    if session.is_finished() {
        return Err(FlowError::FlowEnded);
    }
    debug!("Booking event '{}' on step {}", event.name(), session.step);

    let mut next = session.clone();
    match event {
        BookingEvent::SelectUserType(user_type) => {
            expect_step(session, Step::UserType, &event)?;
            next.user_type = Some(user_type);
            if user_type == UserType::Question {
                info!("Question selected, redirecting to {}", ctx.question_redirect);
                next.redirected_to = Some(ctx.question_redirect.clone());
                return Ok(Transition::with(
                    next,
                    Effect::Redirect(ctx.question_redirect.clone()),
                ));
            }
            next.step = Step::ContactInfo;
        }
        BookingEvent::EditName(ref name) => {
            expect_step(session, Step::ContactInfo, &event)?;
            next.contact.name = name.clone();
        }
        BookingEvent::EditPhone(ref raw) => {
            expect_step(session, Step::ContactInfo, &event)?;
            next.contact.phone_number = format_phone_number(raw);
        }
        BookingEvent::SubmitContact => {
            expect_step(session, Step::ContactInfo, &event)?;
            if session.user_type == Some(UserType::New) && session.contact.name.trim().is_empty() {
                return Err(FlowError::MissingField("name"));
            }
            if session.contact.phone_number.is_empty() {
                return Err(FlowError::MissingField("phone number"));
            }
            next.step = Step::VisitType;
        }
        BookingEvent::SelectVisitType(visit_type) => {
            expect_step(session, Step::VisitType, &event)?;
            let user_type = session.user_type.ok_or(FlowError::MissingField("user type"))?;
            if !VisitType::offered_to(user_type).contains(&visit_type) {
                return Err(FlowError::OptionUnavailable(format!(
                    "visit type '{}' for {} patients",
                    visit_type, user_type
                )));
            }
            next.visit_type = Some(visit_type);
            next.step = Step::Scheduling;
        }
        BookingEvent::EditOtherRequest(ref text) => {
            if !matches!(session.step, Step::VisitType | Step::Scheduling) {
                return Err(FlowError::WrongStep {
                    step: session.step,
                    event: event.name(),
                });
            }
            if session.user_type != Some(UserType::New) {
                return Err(FlowError::OptionUnavailable(
                    "free-text request for returning patients".to_string(),
                ));
            }
            next.other_request = text.clone();
        }
        BookingEvent::Schedule(ref scheduling_event) => {
            expect_step(session, Step::Scheduling, &event)?;
            let scheduling_ctx = SchedulingContext {
                today: ctx.today,
                user_type: session.user_type.ok_or(FlowError::MissingField("user type"))?,
                visit_type: session.visit_type,
            };
            let (scheduling, outcome) = session
                .scheduling
                .clone()
                .apply(scheduling_event.clone(), &scheduling_ctx)?;
            next.scheduling = scheduling;
            if outcome == SchedulingOutcome::Confirmed {
                info!(
                    "Booking confirmed for {:?} with {:?}",
                    next.scheduling.selected_date,
                    next.scheduling.selected_provider.map(|p| p.name)
                );
                return Ok(Transition::with(
                    next,
                    Effect::AdvanceAfter(ctx.confirmation_delay),
                ));
            }
        }
        BookingEvent::ConfirmationElapsed => {
            expect_step(session, Step::Scheduling, &event)?;
            if !session.scheduling.booking_success {
                return Err(FlowError::NotReady("booking has not been confirmed"));
            }
            next.step = Step::Confirmation;
            return Ok(match next.contact_record() {
                Some(record) => {
                    let effect = Effect::SubmitContact(record);
                    Transition::with(next, effect)
                }
                None => {
                    warn!("Confirmed booking has no usable contact details");
                    Transition::to(next)
                }
            });
        }
    }

    Ok(Transition::to(next))
}
