// File: services/clinicbook_backend/src/bin/booking_wizard.rs
//! Walks through the booking flow on the terminal. Confirmed contacts are
//! posted to the relay at `RELAY_URL`.

use clinicbook_backend::relay_sink::HttpContactSink;
use clinicbook_backend::wizard::{confirmation_notice, parse_command, relay_url, render};
use clinicbook_booking::{BookingSession, FlowContext, FlowDriver};
use clinicbook_common::logging;
use clinicbook_config::load_config;
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = load_config()?;
    let _log_guard = logging::init_from_config(&config.logging);

    let sink = HttpContactSink::new(&relay_url());
    info!("Contacts will be posted to {}", sink.url());
    let driver = FlowDriver::new(sink, FlowContext::from_config(&config.booking));
    let today = driver.context().today;

    let mut session = BookingSession::new(today);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", render(&session, today));

    while !session.is_finished() {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let event = match parse_command(&session, &line) {
            Ok(event) => event,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if let Some(notice) = confirmation_notice(&session, &event, driver.context()) {
            println!("{}", notice);
        }
        match driver.dispatch(&session, event).await {
            Ok(outcome) => {
                if let Some(target) = &outcome.redirect {
                    println!("Redirecting to {}", target);
                }
                if outcome.submission_failed {
                    println!("Your booking stands, but we could not save your contact details.");
                }
                session = outcome.session;
                if outcome.redirect.is_none() {
                    println!("{}", render(&session, today));
                }
            }
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}
