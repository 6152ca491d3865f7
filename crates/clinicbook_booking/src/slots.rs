// --- File: crates/clinicbook_booking/src/slots.rs ---
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::UserType;

/// First bookable hour (inclusive).
pub const BUSINESS_HOURS_START: u8 = 9;
/// Closing hour (exclusive).
pub const BUSINESS_HOURS_END: u8 = 17;
pub const SLOT_INTERVAL_MINUTES: u8 = 30;

pub const NEW_PATIENT_DURATION_MINUTES: u32 = 90;
pub const RETURNING_PATIENT_DURATION_MINUTES: u32 = 40;

/// A fixed time label within business hours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimeSlot {
    pub hour: u8,
    pub minute: u8,
    /// `HH:MM`, zero padded.
    #[cfg_attr(feature = "openapi", schema(example = "09:30"))]
    pub label: String,
}

impl TimeSlot {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour,
            minute,
            label: format!("{:02}:{:02}", hour, minute),
        }
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
    }
}

/// Appointment length for a user type.
///
/// Informational only: it is reported alongside the slots but never used to
/// filter or merge them.
pub fn appointment_duration_minutes(user_type: UserType) -> u32 {
    match user_type {
        UserType::New => NEW_PATIENT_DURATION_MINUTES,
        UserType::Returning | UserType::Question => RETURNING_PATIENT_DURATION_MINUTES,
    }
}

/// Every slot of a business day, 09:00 through 16:30.
///
/// The same sixteen labels every day; there is no conflict detection against
/// earlier bookings.
pub fn generate_slots() -> Vec<TimeSlot> {
    (BUSINESS_HOURS_START..BUSINESS_HOURS_END)
        .flat_map(|hour| {
            (0..60)
                .step_by(usize::from(SLOT_INTERVAL_MINUTES))
                .map(move |minute| TimeSlot::new(hour, minute))
        })
        .collect()
}

/// Looks up a slot by its `HH:MM` label.
pub fn find_slot(label: &str) -> Option<TimeSlot> {
    generate_slots().into_iter().find(|slot| slot.label == label)
}
