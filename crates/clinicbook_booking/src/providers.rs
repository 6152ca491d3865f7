// --- File: crates/clinicbook_booking/src/providers.rs ---
//! Provider eligibility as an ordered rule table.
//!
//! Rules are evaluated top-down and the first rule whose user and visit
//! matchers both accept the query decides the roster. When no rule matches,
//! nobody is eligible.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{provider_by_id, Provider, UserType, VisitType};
use crate::slots::TimeSlot;

/// Which user types a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMatch {
    Any,
    Is(UserType),
}

/// Which visit types a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitMatch {
    Any,
    OneOf(&'static [VisitType]),
}

/// The providers a matching rule hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roster {
    Fixed(&'static [u8]),
    /// Per weekday; days not listed get nobody.
    ByWeekday(&'static [WeekdayRoster]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayRoster {
    pub weekday: Weekday,
    pub provider_ids: &'static [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityRule {
    pub name: &'static str,
    pub user: UserMatch,
    pub visit: VisitMatch,
    pub roster: Roster,
}

const PROVIDER_1: &[u8] = &[1];
const PROVIDERS_2_AND_3: &[u8] = &[2, 3];
const PROVIDER_3: &[u8] = &[3];

const PROVIDER_1_VISITS: &[VisitType] = &[VisitType::Hormone, VisitType::Sexual];
const WEIGHTLOSS_VISITS: &[VisitType] = &[VisitType::Weightloss];

const WEIGHTLOSS_WEEK: &[WeekdayRoster] = &[
    WeekdayRoster {
        weekday: Weekday::Tue,
        provider_ids: PROVIDERS_2_AND_3,
    },
    WeekdayRoster {
        weekday: Weekday::Thu,
        provider_ids: PROVIDER_3,
    },
];

/// Precedence order matters: new patients always see Provider 1, whatever
/// they booked.
pub const ELIGIBILITY_RULES: &[EligibilityRule] = &[
    EligibilityRule {
        name: "new-patient-intake",
        user: UserMatch::Is(UserType::New),
        visit: VisitMatch::Any,
        roster: Roster::Fixed(PROVIDER_1),
    },
    EligibilityRule {
        name: "hormone-and-sexual-medicine",
        user: UserMatch::Any,
        visit: VisitMatch::OneOf(PROVIDER_1_VISITS),
        roster: Roster::Fixed(PROVIDER_1),
    },
    EligibilityRule {
        name: "weightloss-clinic-days",
        user: UserMatch::Any,
        visit: VisitMatch::OneOf(WEIGHTLOSS_VISITS),
        roster: Roster::ByWeekday(WEIGHTLOSS_WEEK),
    },
];

impl UserMatch {
    fn accepts(&self, user_type: UserType) -> bool {
        match self {
            UserMatch::Any => true,
            UserMatch::Is(expected) => *expected == user_type,
        }
    }
}

impl VisitMatch {
    fn accepts(&self, visit_type: Option<VisitType>) -> bool {
        match (self, visit_type) {
            (VisitMatch::Any, _) => true,
            (VisitMatch::OneOf(allowed), Some(visit)) => allowed.contains(&visit),
            (VisitMatch::OneOf(_), None) => false,
        }
    }
}

impl Roster {
    fn provider_ids(&self, weekday: Weekday) -> &'static [u8] {
        match *self {
            Roster::Fixed(ids) => ids,
            Roster::ByWeekday(days) => days
                .iter()
                .find(|day| day.weekday == weekday)
                .map(|day| day.provider_ids)
                .unwrap_or(&[]),
        }
    }
}

/// The first rule that applies, if any.
pub fn matching_rule(
    user_type: UserType,
    visit_type: Option<VisitType>,
) -> Option<&'static EligibilityRule> {
    ELIGIBILITY_RULES
        .iter()
        .find(|rule| rule.user.accepts(user_type) && rule.visit.accepts(visit_type))
}

/// Providers who can see this patient on this weekday.
pub fn eligible_providers(
    user_type: UserType,
    visit_type: Option<VisitType>,
    weekday: Weekday,
) -> Vec<Provider> {
    matching_rule(user_type, visit_type)
        .map(|rule| {
            rule.roster
                .provider_ids(weekday)
                .iter()
                .filter_map(|id| provider_by_id(*id))
                .collect()
        })
        .unwrap_or_default()
}

/// Providers for a concrete date and slot.
///
/// The slot does not narrow the result; every slot of a day has the same
/// roster.
pub fn providers_for(
    date: NaiveDate,
    _slot: &TimeSlot,
    user_type: UserType,
    visit_type: Option<VisitType>,
) -> Vec<Provider> {
    eligible_providers(user_type, visit_type, date.weekday())
}
