#[cfg(test)]
mod tests {
    use crate::calendar::{days_in_month, month_grid};
    use crate::models::{UserType, VisitType, PROVIDERS};
    use crate::payment::{detect_card_brand, format_card_number, CardBrand};
    use crate::phone::format_phone_number;
    use crate::providers::eligible_providers;
    use chrono::{Datelike, NaiveDate, Weekday};
    use proptest::prelude::*;

    const FULL_PATTERN: &str = "(555) 123-4567";

    fn weekday_strategy() -> impl Strategy<Value = Weekday> {
        (0u8..7).prop_map(|n| match n {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            5 => Weekday::Sat,
            _ => Weekday::Sun,
        })
    }

    fn visit_strategy() -> impl Strategy<Value = Option<VisitType>> {
        prop_oneof![
            Just(None),
            (0usize..4).prop_map(|i| Some(VisitType::ALL[i])),
        ]
    }

    // Replaces every digit of the reference pattern with a placeholder so a
    // formatted value can be compared shape-wise.
    fn shape(value: &str) -> String {
        value
            .chars()
            .map(|c| if c.is_ascii_digit() { '#' } else { c })
            .collect()
    }

    proptest! {
        // Partial input always formats to a prefix of the full pattern
        #[test]
        fn test_phone_format_is_prefix_of_pattern(digits in "[0-9]{0,10}") {
            let formatted = format_phone_number(&digits);
            prop_assert!(shape(FULL_PATTERN).starts_with(&shape(&formatted)));
            let kept: String = formatted.chars().filter(char::is_ascii_digit).collect();
            prop_assert_eq!(kept, digits.clone());
            if digits.len() == 10 {
                prop_assert_eq!(shape(&formatted), shape(FULL_PATTERN));
            }
        }

        // Non-digit noise never changes the result
        #[test]
        fn test_phone_format_ignores_noise(digits in "[0-9]{0,10}", noise in "[a-z()+. -]{0,5}") {
            let noisy = format!("{noise}{digits}{noise}");
            prop_assert_eq!(format_phone_number(&noisy), format_phone_number(&digits));
        }

        // Formatting is idempotent, so re-feeding the field value is safe
        #[test]
        fn test_phone_format_idempotent(input in ".{0,20}") {
            let once = format_phone_number(&input);
            prop_assert_eq!(format_phone_number(&once), once.clone());
        }

        #[test]
        fn test_month_grid_shape(year in 1970i32..2100, month in 1u32..=12) {
            let today = NaiveDate::from_ymd_opt(2026, 10, 16).expect("date");
            let grid = month_grid(year, month, today).expect("grid");
            let days = days_in_month(year, month).expect("days");
            let first = NaiveDate::from_ymd_opt(year, month, 1).expect("first");
            let leading = first.weekday().num_days_from_sunday() as usize;

            prop_assert_eq!(grid.cells.len(), days as usize + leading);
            prop_assert!(grid.cells[..leading].iter().all(Option::is_none));
            let numbers: Vec<u32> = grid.cells[leading..]
                .iter()
                .map(|c| c.as_ref().map(|d| d.day).unwrap_or(0))
                .collect();
            prop_assert_eq!(numbers, (1..=days).collect::<Vec<_>>());
            for cell in grid.cells.iter().flatten() {
                prop_assert_eq!(cell.disabled, cell.date < today);
            }
        }

        #[test]
        fn test_new_patients_only_see_provider_one(
            visit in visit_strategy(),
            weekday in weekday_strategy(),
        ) {
            prop_assert_eq!(eligible_providers(UserType::New, visit, weekday), vec![PROVIDERS[0]]);
        }

        // Eligible providers are always a subset of the roster, without repeats
        #[test]
        fn test_eligibility_within_roster(
            visit in visit_strategy(),
            weekday in weekday_strategy(),
        ) {
            let providers = eligible_providers(UserType::Returning, visit, weekday);
            prop_assert!(providers.len() <= PROVIDERS.len());
            for p in &providers {
                prop_assert!(PROVIDERS.contains(p));
            }
            let mut ids: Vec<u8> = providers.iter().map(|p| p.id).collect();
            ids.dedup();
            prop_assert_eq!(ids.len(), providers.len());
        }

        // Grouping only inserts spaces
        #[test]
        fn test_card_format_keeps_digits(number in "[0-9]{0,19}") {
            let formatted = format_card_number(&number);
            prop_assert_eq!(formatted.replace(' ', ""), number.clone());
            prop_assert!(!formatted.starts_with(' ') && !formatted.ends_with(' '));
            prop_assert!(!formatted.contains("  "));
        }

        #[test]
        fn test_amex_grouping(rest in "[0-9]{13}", second in prop_oneof![Just('4'), Just('7')]) {
            let number = format!("3{second}{rest}");
            prop_assert_eq!(detect_card_brand(&number), Some(CardBrand::Amex));
            let groups: Vec<usize> = format_card_number(&number).split(' ').map(str::len).collect();
            prop_assert_eq!(groups, vec![4, 6, 5]);
        }
    }
}
