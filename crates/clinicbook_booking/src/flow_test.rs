#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use clinicbook_common::ContactRecord;

    use crate::flow::{
        transition, BookingEvent, BookingSession, Effect, FlowContext, FlowError, Step,
        RETURNING_PATIENT_NAME,
    };
    use crate::models::{UserType, VisitType};
    use crate::scheduling::SchedulingEvent;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn ctx() -> FlowContext {
        FlowContext {
            today: date(2026, 10, 15),
            question_redirect: "/chatbot".to_string(),
            confirmation_delay: Duration::from_secs(1),
        }
    }

    fn apply(session: BookingSession, event: BookingEvent) -> BookingSession {
        transition(&session, event, &ctx())
            .expect("event accepted")
            .session
    }

    fn apply_all(session: BookingSession, events: Vec<BookingEvent>) -> BookingSession {
        events.into_iter().fold(session, apply)
    }

    fn contact_events(name: &str, phone: &str) -> Vec<BookingEvent> {
        vec![
            BookingEvent::EditName(name.to_string()),
            BookingEvent::EditPhone(phone.to_string()),
            BookingEvent::SubmitContact,
        ]
    }

    #[test]
    fn test_new_session_starts_on_user_type() {
        let session = BookingSession::new(ctx().today);
        assert_eq!(session.step, Step::UserType);
        assert_eq!(session.user_type, None);
        assert_eq!(session.visit_type, None);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_question_redirects_and_ends() {
        let session = BookingSession::new(ctx().today);
        let result = transition(
            &session,
            BookingEvent::SelectUserType(UserType::Question),
            &ctx(),
        )
        .unwrap();
        assert_eq!(result.effects, vec![Effect::Redirect("/chatbot".to_string())]);
        assert!(result.session.is_finished());

        let err = transition(&result.session, BookingEvent::SubmitContact, &ctx()).unwrap_err();
        assert_eq!(err, FlowError::FlowEnded);
    }

    #[test]
    fn test_phone_is_formatted_on_every_edit() {
        let session = apply(
            BookingSession::new(ctx().today),
            BookingEvent::SelectUserType(UserType::New),
        );
        let session = apply(session, BookingEvent::EditPhone("555".to_string()));
        assert_eq!(session.contact.phone_number, "(555");
        let session = apply(session, BookingEvent::EditPhone("(555 1".to_string()));
        assert_eq!(session.contact.phone_number, "(555) 1");
    }

    #[test]
    fn test_new_patient_needs_name() {
        let session = apply_all(
            BookingSession::new(ctx().today),
            vec![
                BookingEvent::SelectUserType(UserType::New),
                BookingEvent::EditPhone("5551234567".to_string()),
            ],
        );
        let err = transition(&session, BookingEvent::SubmitContact, &ctx()).unwrap_err();
        assert_eq!(err, FlowError::MissingField("name"));
        assert_eq!(session.step, Step::ContactInfo);
    }

    #[test]
    fn test_returning_patient_needs_only_phone() {
        let session = apply_all(
            BookingSession::new(ctx().today),
            vec![BookingEvent::SelectUserType(UserType::Returning)],
        );
        let err = transition(&session, BookingEvent::SubmitContact, &ctx()).unwrap_err();
        assert_eq!(err, FlowError::MissingField("phone number"));

        let session = apply_all(session, contact_events("", "5551234567"));
        assert_eq!(session.step, Step::VisitType);
    }

    #[test]
    fn test_events_out_of_order_are_rejected() {
        let session = BookingSession::new(ctx().today);
        let err = transition(
            &session,
            BookingEvent::SelectVisitType(VisitType::Hormone),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FlowError::WrongStep {
                step: Step::UserType,
                event: "select_visit_type"
            }
        );
        let err = transition(
            &session,
            BookingEvent::Schedule(SchedulingEvent::NextMonth),
            &ctx(),
        )
        .unwrap_err();
        assert!(matches!(err, FlowError::WrongStep { .. }));
    }

    #[test]
    fn test_other_visit_type_only_for_new_patients() {
        let returning = apply_all(
            BookingSession::new(ctx().today),
            [
                vec![BookingEvent::SelectUserType(UserType::Returning)],
                contact_events("", "5551234567"),
            ]
            .concat(),
        );
        assert!(matches!(
            transition(
                &returning,
                BookingEvent::SelectVisitType(VisitType::Other),
                &ctx()
            ),
            Err(FlowError::OptionUnavailable(_))
        ));

        let new = apply_all(
            BookingSession::new(ctx().today),
            [
                vec![BookingEvent::SelectUserType(UserType::New)],
                contact_events("Jane Doe", "5551234567"),
                vec![
                    BookingEvent::SelectVisitType(VisitType::Other),
                    BookingEvent::EditOtherRequest("Travel vaccines".to_string()),
                ],
            ]
            .concat(),
        );
        assert_eq!(new.step, Step::Scheduling);
        assert_eq!(new.visit_type, Some(VisitType::Other));
        assert_eq!(new.other_request, "Travel vaccines");
    }

    #[test]
    fn test_full_new_patient_flow() {
        let session = apply_all(
            BookingSession::new(ctx().today),
            [
                vec![BookingEvent::SelectUserType(UserType::New)],
                contact_events("Jane Doe", "555-123-4567"),
                vec![
                    BookingEvent::SelectVisitType(VisitType::Weightloss),
                    BookingEvent::Schedule(SchedulingEvent::SelectDate(date(2026, 10, 19))),
                    BookingEvent::Schedule(SchedulingEvent::SelectSlot("10:00".to_string())),
                ],
            ]
            .concat(),
        );
        // new patients always get Provider 1, which opens the modal directly
        assert_eq!(session.scheduling.selected_provider.map(|p| p.id), Some(1));
        assert!(session.scheduling.show_modal);

        let confirmed = transition(
            &session,
            BookingEvent::Schedule(SchedulingEvent::ConfirmBooking),
            &ctx(),
        )
        .unwrap();
        assert_eq!(
            confirmed.effects,
            vec![Effect::AdvanceAfter(Duration::from_secs(1))]
        );
        assert_eq!(confirmed.session.step, Step::Scheduling);

        let done = transition(&confirmed.session, BookingEvent::ConfirmationElapsed, &ctx()).unwrap();
        assert_eq!(done.session.step, Step::Confirmation);
        assert_eq!(
            done.effects,
            vec![Effect::SubmitContact(
                ContactRecord::new("Jane Doe", "(555) 123-4567").unwrap()
            )]
        );
        assert!(done.session.is_finished());
    }

    #[test]
    fn test_returning_patient_submits_placeholder_name() {
        let session = apply_all(
            BookingSession::new(ctx().today),
            [
                vec![BookingEvent::SelectUserType(UserType::Returning)],
                contact_events("", "5551234567"),
            ]
            .concat(),
        );
        let record = session.contact_record().unwrap();
        assert_eq!(record.name, RETURNING_PATIENT_NAME);
        assert_eq!(record.phone, "(555) 123-4567");
    }

    #[test]
    fn test_elapsed_before_confirmation_is_rejected() {
        let session = apply_all(
            BookingSession::new(ctx().today),
            [
                vec![BookingEvent::SelectUserType(UserType::New)],
                contact_events("Jane Doe", "5551234567"),
                vec![BookingEvent::SelectVisitType(VisitType::Hormone)],
            ]
            .concat(),
        );
        let err = transition(&session, BookingEvent::ConfirmationElapsed, &ctx()).unwrap_err();
        assert_eq!(err, FlowError::NotReady("booking has not been confirmed"));
    }
}
