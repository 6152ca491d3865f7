// --- File: crates/services/clinicbook_backend/src/wizard.rs ---
//! Line commands and text rendering for the terminal booking wizard.

use chrono::NaiveDate;
use clinicbook_booking::calendar::{month_grid, MonthGrid};
use clinicbook_booking::flow::{transition, BookingEvent, BookingSession, FlowContext, Step};
use clinicbook_booking::models::{UserType, VisitType};
use clinicbook_booking::payment::{expiry_month_options, format_card_number, PaymentField};
use clinicbook_booking::scheduling::{SchedulingEvent, SchedulingState};
use clinicbook_booking::slots::{appointment_duration_minutes, generate_slots};
use clinicbook_config::env_vars::get_plain_env_var;
use std::fmt::Write;
use thiserror::Error;

pub const RELAY_URL_ENV: &str = "RELAY_URL";
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3001";
pub const BOOKING_SUCCESS_NOTICE: &str = "Booking successful! Redirecting...";

/// Where confirmed contacts are posted.
pub fn relay_url() -> String {
    get_plain_env_var(RELAY_URL_ENV).unwrap_or_else(|| DEFAULT_RELAY_URL.to_string())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Nothing entered. {0}")]
    Empty(&'static str),

    #[error("Unknown command '{command}'. {help}")]
    Unknown {
        command: String,
        help: &'static str,
    },

    #[error("{0}")]
    Invalid(String),
}

pub fn help_text(step: Step) -> &'static str {
    match step {
        Step::UserType => "Type: new | returning | question",
        Step::ContactInfo => "Type: name <your name> | phone <number> | next",
        Step::VisitType => "Type one of the listed visit types, or: note <request>",
        Step::Scheduling => {
            "Type: prev | next | date <day or YYYY-MM-DD> | slot <HH:MM> | provider <id> | \
             pay <field> <value> | note <request> | close | confirm"
        }
        Step::Confirmation => "All done.",
    }
}

fn payment_field(name: &str) -> Result<PaymentField, CommandError> {
    serde_json::from_value(serde_json::Value::String(name.to_string())).map_err(|_| {
        CommandError::Invalid(format!(
            "Unknown payment field '{name}'. Fields: first_name, last_name, address, city, \
             state, zipcode, card_number, exp_month, exp_year, cvv"
        ))
    })
}

fn parse_date(arg: &str, scheduling: &SchedulingState) -> Result<NaiveDate, CommandError> {
    if let Ok(day) = arg.parse::<u32>() {
        return NaiveDate::from_ymd_opt(scheduling.cursor.year, scheduling.cursor.month, day)
            .ok_or_else(|| CommandError::Invalid(format!("No day {day} in this month")));
    }
    NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .map_err(|_| CommandError::Invalid(format!("Invalid date '{arg}' (use DD or YYYY-MM-DD)")))
}

/// Turns one line of input into an event for the session's current step.
pub fn parse_command(session: &BookingSession, line: &str) -> Result<BookingEvent, CommandError> {
    let help = help_text(session.step);
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty(help));
    }
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command.to_ascii_lowercase(), arg.trim()),
        None => (line.to_ascii_lowercase(), ""),
    };
    let unknown = || CommandError::Unknown {
        command: command.clone(),
        help,
    };

    let event = match session.step {
        Step::UserType => BookingEvent::SelectUserType(
            command.parse::<UserType>().map_err(|_| unknown())?,
        ),
        Step::ContactInfo => match command.as_str() {
            "name" => BookingEvent::EditName(arg.to_string()),
            "phone" => BookingEvent::EditPhone(arg.to_string()),
            "next" | "submit" => BookingEvent::SubmitContact,
            _ => return Err(unknown()),
        },
        Step::VisitType => match command.as_str() {
            "note" => BookingEvent::EditOtherRequest(arg.to_string()),
            _ => BookingEvent::SelectVisitType(
                command.parse::<VisitType>().map_err(|_| unknown())?,
            ),
        },
        Step::Scheduling => match command.as_str() {
            "note" => BookingEvent::EditOtherRequest(arg.to_string()),
            other => BookingEvent::Schedule(match other {
                "prev" => SchedulingEvent::PrevMonth,
                "next" => SchedulingEvent::NextMonth,
                "date" => SchedulingEvent::SelectDate(parse_date(arg, &session.scheduling)?),
                "slot" => SchedulingEvent::SelectSlot(arg.to_string()),
                "provider" => SchedulingEvent::SelectProvider(arg.parse::<u8>().map_err(|_| {
                    CommandError::Invalid(format!("Invalid provider id '{arg}'"))
                })?),
                "pay" => {
                    let (field, value) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
                    SchedulingEvent::EditPayment(payment_field(field)?, value.trim().to_string())
                }
                "close" => SchedulingEvent::CloseModal,
                "confirm" => SchedulingEvent::ConfirmBooking,
                _ => return Err(unknown()),
            }),
        },
        Step::Confirmation => return Err(unknown()),
    };
    Ok(event)
}

/// What to print while the confirmation delay runs, if `event` confirms the
/// booking. Dispatching only returns once the delay is over.
pub fn confirmation_notice(
    session: &BookingSession,
    event: &BookingEvent,
    ctx: &FlowContext,
) -> Option<&'static str> {
    if session.step != Step::Scheduling {
        return None;
    }
    let next = transition(session, event.clone(), ctx).ok()?;
    next.session
        .scheduling
        .booking_success
        .then_some(BOOKING_SUCCESS_NOTICE)
}

/// A plain-text month, Sunday first. Past days are shown as `--`.
pub fn render_month(grid: &MonthGrid) -> String {
    let mut out = format!("{:^27}\n Su  Mo  Tu  We  Th  Fr  Sa\n", grid.label);
    for week in grid.cells.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "   ".to_string(),
                Some(day) if day.disabled => " --".to_string(),
                Some(day) => format!("{:>3}", day.day),
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

fn render_scheduling(session: &BookingSession, today: NaiveDate, out: &mut String) {
    let scheduling = &session.scheduling;
    if let Ok(grid) = month_grid(scheduling.cursor.year, scheduling.cursor.month, today) {
        out.push_str(&render_month(&grid));
    }

    let Some(date) = scheduling.selected_date else {
        out.push_str("Pick a date.\n");
        return;
    };
    if let Some(user_type) = session.user_type {
        let _ = writeln!(
            out,
            "{}: {} minute appointments",
            date.format("%A, %B %-d"),
            appointment_duration_minutes(user_type)
        );
    }
    let labels: Vec<String> = generate_slots().into_iter().map(|s| s.label).collect();
    let _ = writeln!(out, "Slots: {}", labels.join(" "));

    let Some(slot) = &scheduling.selected_slot else {
        return;
    };
    if scheduling.available_providers.is_empty() {
        let _ = writeln!(out, "No providers available at {}.", slot.label);
        return;
    }
    if scheduling.selected_provider.is_none() {
        out.push_str("Choose a provider:\n");
        for provider in &scheduling.available_providers {
            let _ = writeln!(out, "  {} - {}", provider.id, provider.name);
        }
    }

    if scheduling.show_modal {
        let provider = scheduling
            .selected_provider
            .map(|p| p.name)
            .unwrap_or_default();
        let _ = writeln!(out, "Confirm {} at {} with {}?", date, slot.label, provider);
        if session.user_type == Some(UserType::New) {
            let payment = &scheduling.payment;
            let _ = writeln!(
                out,
                "Card: {} (brand: {}) exp {}/{} cvv {}",
                format_card_number(&payment.card_number),
                payment.card_brand().map(|b| b.name()).unwrap_or("unknown"),
                payment.exp_month,
                payment.exp_year,
                "*".repeat(payment.cvv.len())
            );
            let _ = writeln!(out, "Expiry months: {}", expiry_month_options().join(" "));
        }
    }
}

/// What to show for the current step.
pub fn render(session: &BookingSession, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Step {} of 5", session.step);
    match session.step {
        Step::UserType => out.push_str("Are you a new patient, a returning patient, or do you have a question?\n"),
        Step::ContactInfo => {
            let _ = writeln!(
                out,
                "Name: {}\nPhone: {}",
                session.contact.name, session.contact.phone_number
            );
        }
        Step::VisitType => {
            let options: Vec<&str> = session
                .user_type
                .map(VisitType::offered_to)
                .unwrap_or_default()
                .iter()
                .map(|v| v.as_str())
                .collect();
            let _ = writeln!(out, "Visit types: {}", options.join(" | "));
        }
        Step::Scheduling => render_scheduling(session, today, &mut out),
        Step::Confirmation => out.push_str("Your appointment is booked. Thank you!\n"),
    }
    let _ = writeln!(out, "{}", help_text(session.step));
    out
}
