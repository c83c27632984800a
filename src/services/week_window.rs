use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::AppError;

/// Weeks ahead of the current week the schedule remains addressable.
pub const FORWARD_SCHEDULING_WEEKS: i64 = 4;

/// Weeks back from the current week an hours record may still be created or
/// edited. Submission and review of existing records are never window-gated.
pub const EDITABLE_PAST_WEEKS: i64 = 8;

/// Best-effort timezone resolution. An unknown or missing identifier degrades
/// to UTC rather than failing the request.
pub fn resolve_timezone(timezone: Option<&str>) -> Tz {
    match timezone {
        Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            log::warn!("Unknown timezone {:?}, falling back to UTC", name);
            Tz::UTC
        }),
        None => Tz::UTC,
    }
}

/// Today's calendar date in the business's local timezone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// The canonical Sunday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn current_week_start(tz: Tz) -> NaiveDate {
    week_start(today_in(tz))
}

/// Week keys must be the canonical Sunday, not an arbitrary day inside it.
pub fn ensure_week_start(date: NaiveDate) -> Result<(), AppError> {
    if week_start(date) == date {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "weekStartDate {} is not a Sunday",
            date
        )))
    }
}

/// Whether a week is visible at all: any past week, bounded ahead.
pub fn is_addressable(week: NaiveDate, today: NaiveDate) -> bool {
    week <= week_start(today) + Duration::weeks(FORWARD_SCHEDULING_WEEKS)
}

/// Whether hours records for this week may still be created or edited.
pub fn is_hours_editable(week: NaiveDate, today: NaiveDate) -> bool {
    let current = week_start(today);
    week >= current - Duration::weeks(EDITABLE_PAST_WEEKS)
        && week <= current + Duration::weeks(FORWARD_SCHEDULING_WEEKS)
}

/// New shifts may only be posted from the current week up to the horizon.
pub fn is_shift_postable(work_date: NaiveDate, today: NaiveDate) -> bool {
    let current = week_start(today);
    let week = week_start(work_date);
    week >= current && week <= current + Duration::weeks(FORWARD_SCHEDULING_WEEKS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_is_the_containing_sunday() {
        // 2024-01-07 was a Sunday
        assert_eq!(week_start(date(2024, 1, 7)), date(2024, 1, 7));
        assert_eq!(week_start(date(2024, 1, 10)), date(2024, 1, 7));
        assert_eq!(week_start(date(2024, 1, 13)), date(2024, 1, 7));
        assert_eq!(week_start(date(2024, 1, 14)), date(2024, 1, 14));
    }

    #[test]
    fn week_start_crosses_month_boundaries() {
        // 2024-03-01 was a Friday; its week started 2024-02-25
        assert_eq!(week_start(date(2024, 3, 1)), date(2024, 2, 25));
    }

    #[test]
    fn ensure_week_start_rejects_non_sundays() {
        assert!(ensure_week_start(date(2024, 1, 7)).is_ok());
        assert!(ensure_week_start(date(2024, 1, 8)).is_err());
    }

    #[test]
    fn editable_window_is_bounded_both_ways() {
        let today = date(2024, 1, 10); // week of 2024-01-07

        assert!(is_hours_editable(date(2024, 1, 7), today));
        // horizon weeks ahead still editable
        assert!(is_hours_editable(date(2024, 2, 4), today));
        // one past the horizon is not
        assert!(!is_hours_editable(date(2024, 2, 11), today));
        // recent past weeks are editable, ancient ones are not
        assert!(is_hours_editable(date(2023, 12, 31), today));
        assert!(!is_hours_editable(date(2023, 10, 1), today));
    }

    #[test]
    fn shift_posting_disallows_past_weeks() {
        let today = date(2024, 1, 10);

        assert!(is_shift_postable(date(2024, 1, 11), today));
        assert!(is_shift_postable(date(2024, 1, 8), today)); // earlier same week
        assert!(!is_shift_postable(date(2024, 1, 6), today)); // previous week
        assert!(!is_shift_postable(date(2024, 2, 15), today)); // past horizon
    }

    #[test]
    fn addressable_allows_any_past_week() {
        let today = date(2024, 1, 10);

        assert!(is_addressable(date(2022, 6, 5), today));
        assert!(is_addressable(date(2024, 2, 4), today));
        assert!(!is_addressable(date(2024, 2, 11), today));
    }

    #[test]
    fn unknown_timezone_falls_back_to_utc() {
        assert_eq!(resolve_timezone(Some("Not/AZone")), Tz::UTC);
        assert_eq!(resolve_timezone(None), Tz::UTC);
        assert_eq!(
            resolve_timezone(Some("America/New_York")),
            chrono_tz::America::New_York
        );
    }
}
