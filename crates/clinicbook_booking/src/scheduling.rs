// --- File: crates/clinicbook_booking/src/scheduling.rs ---
//! The calendar, slot and provider picker on step 4, including the booking
//! modal and its payment form.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::calendar::{is_past_day, MonthCursor};
use crate::flow::FlowError;
use crate::models::{Provider, UserType, VisitType};
use crate::payment::{PaymentField, PaymentFormDraft};
use crate::providers::providers_for;
use crate::slots::{find_slot, TimeSlot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulingEvent {
    PrevMonth,
    NextMonth,
    SelectDate(NaiveDate),
    /// A slot label such as `"10:30"`.
    SelectSlot(String),
    SelectProvider(u8),
    EditPayment(PaymentField, String),
    CloseModal,
    ConfirmBooking,
}

impl SchedulingEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SchedulingEvent::PrevMonth => "prev_month",
            SchedulingEvent::NextMonth => "next_month",
            SchedulingEvent::SelectDate(_) => "select_date",
            SchedulingEvent::SelectSlot(_) => "select_slot",
            SchedulingEvent::SelectProvider(_) => "select_provider",
            SchedulingEvent::EditPayment(..) => "edit_payment",
            SchedulingEvent::CloseModal => "close_modal",
            SchedulingEvent::ConfirmBooking => "confirm_booking",
        }
    }
}

/// What the patient chose earlier in the flow, plus today's date.
#[derive(Debug, Clone, Copy)]
pub struct SchedulingContext {
    pub today: NaiveDate,
    pub user_type: UserType,
    pub visit_type: Option<VisitType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingOutcome {
    Pending,
    /// The booking was just confirmed; the flow should advance after its delay.
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulingState {
    pub cursor: MonthCursor,
    pub selected_date: Option<NaiveDate>,
    pub selected_slot: Option<TimeSlot>,
    pub available_providers: Vec<Provider>,
    pub selected_provider: Option<Provider>,
    pub show_modal: bool,
    pub payment: PaymentFormDraft,
    pub booking_success: bool,
}

impl SchedulingState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            cursor: MonthCursor::containing(today),
            selected_date: None,
            selected_slot: None,
            available_providers: Vec::new(),
            selected_provider: None,
            show_modal: false,
            payment: PaymentFormDraft::default(),
            booking_success: false,
        }
    }

    fn clear_slot(&mut self) {
        self.selected_slot = None;
        self.available_providers.clear();
        self.selected_provider = None;
        self.show_modal = false;
    }

    fn clear_date(&mut self) {
        self.selected_date = None;
        self.clear_slot();
    }

    /// The payment form is only part of the modal for new patients.
    pub fn payment_required(user_type: UserType) -> bool {
        user_type == UserType::New
    }

    /// Consumes the state and returns the next one. On error the caller keeps
    /// its own copy, so a rejected event changes nothing.
    pub fn apply(
        mut self,
        event: SchedulingEvent,
        ctx: &SchedulingContext,
    ) -> Result<(Self, SchedulingOutcome), FlowError> {
        if self.booking_success {
            return Err(FlowError::AlreadyConfirmed);
        }

        match event {
            SchedulingEvent::PrevMonth => {
                self.cursor = self.cursor.prev();
                self.clear_date();
            }
            SchedulingEvent::NextMonth => {
                self.cursor = self.cursor.next();
                self.clear_date();
            }
            SchedulingEvent::SelectDate(date) => {
                if !self.cursor.contains(date) || is_past_day(date, ctx.today) {
                    return Err(FlowError::DateUnavailable(date));
                }
                self.clear_slot();
                self.selected_date = Some(date);
            }
            SchedulingEvent::SelectSlot(label) => {
                let date = self.selected_date.ok_or(FlowError::MissingField("date"))?;
                let slot = find_slot(&label)
                    .ok_or_else(|| FlowError::UnknownOption(format!("time slot '{label}'")))?;
                let providers = providers_for(date, &slot, ctx.user_type, ctx.visit_type);
                debug!(
                    "{} provider(s) available on {} ({:?}) at {}",
                    providers.len(),
                    date,
                    date.weekday(),
                    slot.label
                );

                self.clear_slot();
                self.selected_slot = Some(slot);
                if let [only] = providers.as_slice() {
                    self.selected_provider = Some(*only);
                    self.show_modal = true;
                }
                self.available_providers = providers;
            }
            SchedulingEvent::SelectProvider(id) => {
                if self.selected_slot.is_none() {
                    return Err(FlowError::MissingField("time slot"));
                }
                let provider = self
                    .available_providers
                    .iter()
                    .copied()
                    .find(|p| p.id == id)
                    .ok_or_else(|| FlowError::OptionUnavailable(format!("provider {id}")))?;
                self.selected_provider = Some(provider);
                self.show_modal = true;
            }
            SchedulingEvent::EditPayment(field, value) => {
                if !self.show_modal || !Self::payment_required(ctx.user_type) {
                    return Err(FlowError::NotReady("payment form is not open"));
                }
                self.payment.set(field, &value);
            }
            SchedulingEvent::CloseModal => {
                self.show_modal = false;
            }
            SchedulingEvent::ConfirmBooking => {
                if !self.show_modal {
                    return Err(FlowError::NotReady("no booking to confirm"));
                }
                if self.selected_provider.is_none() {
                    return Err(FlowError::MissingField("provider"));
                }
                self.show_modal = false;
                self.booking_success = true;
                return Ok((self, SchedulingOutcome::Confirmed));
            }
        }

        Ok((self, SchedulingOutcome::Pending))
    }
}
