// --- File: crates/clinicbook_booking/src/models.rs ---
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::flow::FlowError;

/// Who is booking. The session starts with no user type selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    New,
    Returning,
    /// Not a booking at all; the visitor is sent to the chatbot.
    Question,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::New => "new",
            UserType::Returning => "returning",
            UserType::Question => "question",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(UserType::New),
            "returning" => Ok(UserType::Returning),
            "question" => Ok(UserType::Question),
            other => Err(FlowError::UnknownOption(format!("user type '{other}'"))),
        }
    }
}

/// Category of appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum VisitType {
    Hormone,
    Sexual,
    Weightloss,
    Other,
}

impl VisitType {
    pub const ALL: [VisitType; 4] = [
        VisitType::Hormone,
        VisitType::Sexual,
        VisitType::Weightloss,
        VisitType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitType::Hormone => "hormone",
            VisitType::Sexual => "sexual",
            VisitType::Weightloss => "weightloss",
            VisitType::Other => "other",
        }
    }

    /// Button label shown on the visit-type step.
    pub fn label(&self) -> &'static str {
        match self {
            VisitType::Hormone => "Hormone",
            VisitType::Sexual => "Sexual Medicine",
            VisitType::Weightloss => "Weightloss",
            VisitType::Other => "Other",
        }
    }

    /// Visit types offered to a given user type. "Other" is for new patients only.
    pub fn offered_to(user_type: UserType) -> Vec<VisitType> {
        VisitType::ALL
            .into_iter()
            .filter(|visit| *visit != VisitType::Other || user_type == UserType::New)
            .collect()
    }
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitType {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hormone" => Ok(VisitType::Hormone),
            "sexual" => Ok(VisitType::Sexual),
            "weightloss" => Ok(VisitType::Weightloss),
            "other" => Ok(VisitType::Other),
            other => Err(FlowError::UnknownOption(format!("visit type '{other}'"))),
        }
    }
}

/// A bookable staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Provider {
    pub id: u8,
    pub name: &'static str,
}

/// The full, fixed roster.
pub const PROVIDERS: [Provider; 3] = [
    Provider {
        id: 1,
        name: "Provider 1",
    },
    Provider {
        id: 2,
        name: "Provider 2",
    },
    Provider {
        id: 3,
        name: "Provider 3",
    },
];

pub fn provider_by_id(id: u8) -> Option<Provider> {
    PROVIDERS.iter().copied().find(|p| p.id == id)
}

/// Contact details gathered on step 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    /// Already formatted as `(XXX) XXX-XXXX`.
    pub phone_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_parsing() {
        assert_eq!("new".parse::<UserType>().unwrap(), UserType::New);
        assert_eq!(" Returning ".parse::<UserType>().unwrap(), UserType::Returning);
        assert!("guest".parse::<UserType>().is_err());
    }

    #[test]
    fn test_other_visit_type_only_for_new_patients() {
        assert_eq!(VisitType::offered_to(UserType::New).len(), 4);
        assert!(!VisitType::offered_to(UserType::Returning).contains(&VisitType::Other));
    }

    #[test]
    fn test_roster_is_fixed() {
        assert_eq!(PROVIDERS.len(), 3);
        assert_eq!(provider_by_id(2).map(|p| p.name), Some("Provider 2"));
        assert_eq!(provider_by_id(4), None);
    }
}
