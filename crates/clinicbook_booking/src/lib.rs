// --- File: crates/clinicbook_booking/src/lib.rs ---
pub mod calendar;
pub mod doc;
pub mod driver;
pub mod flow;
#[cfg(test)]
mod flow_test;
pub mod handlers;
pub mod models;
pub mod payment;
pub mod phone;
pub mod providers;
#[cfg(test)]
mod resolver_proptest;
pub mod routes;
pub mod scheduling;
pub mod slots;

pub use driver::{DriverOutcome, FlowDriver};
pub use flow::{
    transition, BookingEvent, BookingSession, Effect, FlowContext, FlowError, Step, Transition,
};
pub use models::{Provider, UserType, VisitType};
pub use scheduling::SchedulingEvent;
