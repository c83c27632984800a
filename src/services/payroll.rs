use std::collections::HashMap;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{Datelike, Duration, NaiveDate};

use crate::database::models::{ConfirmedHoursRecord, HoursSource, ShiftDuration};
use crate::error::AppError;
use crate::services::hours::round_hours;
use crate::services::week_window;

pub fn round_money(value: BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

pub fn gross_pay(total_hours: &BigDecimal, hourly_rate: &BigDecimal) -> BigDecimal {
    round_money(total_hours * hourly_rate)
}

/// Net may go negative; that is surfaced to the caller, never clamped.
pub fn net_pay(
    gross: &BigDecimal,
    bonuses: &BigDecimal,
    advances: &BigDecimal,
    deductions: &BigDecimal,
) -> BigDecimal {
    round_money(gross + bonuses - advances - deductions)
}

/// A missing or non-positive rate is a data-entry gap, not an intentional
/// zero; calculation must refuse rather than produce a zero payment.
pub fn ensure_positive_rate(hourly_rate: &BigDecimal) -> Result<(), AppError> {
    if hourly_rate > &BigDecimal::from(0) {
        Ok(())
    } else {
        Err(AppError::invalid_input("hourlyRate must be positive"))
    }
}

pub fn ensure_non_negative(label: &str, value: &BigDecimal) -> Result<(), AppError> {
    if value < &BigDecimal::from(0) {
        Err(AppError::invalid_input(format!(
            "{} must not be negative",
            label
        )))
    } else {
        Ok(())
    }
}

/// The hours basis chosen for a period, with both totals kept around so the
/// caller can annotate discrepancies.
#[derive(Debug, Clone)]
pub struct ResolvedHours {
    pub total: BigDecimal,
    pub source: HoursSource,
    pub confirmed_total: Option<BigDecimal>,
    pub scheduled_total: Option<BigDecimal>,
}

/// Resolve the payable hours for an inclusive period, day by day: a day
/// covered by an approved confirmation uses the confirmed value, any other
/// day falls back to the posted schedule. The source records whether the
/// result rests on confirmations, schedule, or both.
pub fn resolve_period_hours(
    period_start: NaiveDate,
    period_end: NaiveDate,
    approved: &[ConfirmedHoursRecord],
    scheduled: &[ShiftDuration],
) -> ResolvedHours {
    let by_week: HashMap<NaiveDate, &ConfirmedHoursRecord> = approved
        .iter()
        .map(|record| (record.week_start_date, record))
        .collect();

    let mut scheduled_by_date: HashMap<NaiveDate, BigDecimal> = HashMap::new();
    for shift in scheduled {
        let entry = scheduled_by_date
            .entry(shift.work_date)
            .or_insert_with(|| BigDecimal::from(0));
        *entry = &*entry + &shift.duration_hours;
    }

    let mut total = BigDecimal::from(0);
    let mut confirmed_total = BigDecimal::from(0);
    let mut used_confirmed = false;
    let mut used_scheduled = false;

    let mut day = period_start;
    while day <= period_end {
        let week = week_window::week_start(day);

        if let Some(record) = by_week.get(&week) {
            let value = record.day_hours()[day.weekday().num_days_from_sunday() as usize];
            total = total + value;
            confirmed_total = confirmed_total + value;
            used_confirmed = true;
        } else if let Some(value) = scheduled_by_date.get(&day) {
            total = total + value;
            if value > &BigDecimal::from(0) {
                used_scheduled = true;
            }
        }

        day = day + Duration::days(1);
    }

    let source = match (used_confirmed, used_scheduled) {
        (true, true) => HoursSource::Mixed,
        (true, false) => HoursSource::Confirmed,
        _ => HoursSource::Scheduled,
    };

    let scheduled_total = if scheduled.is_empty() {
        None
    } else {
        Some(round_hours(scheduled.iter().fold(
            BigDecimal::from(0),
            |acc, shift| acc + &shift.duration_hours,
        )))
    };

    ResolvedHours {
        total: round_hours(total),
        source,
        confirmed_total: used_confirmed.then(|| round_hours(confirmed_total)),
        scheduled_total,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::database::models::ConfirmedHoursStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn approved_record(week_start_date: NaiveDate, days: [&str; 7]) -> ConfirmedHoursRecord {
        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] =
            days.map(|d| dec(d));
        let now = Utc::now();

        ConfirmedHoursRecord {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            week_start_date,
            total_hours: round_hours(
                [
                    &sunday, &monday, &tuesday, &wednesday, &thursday, &friday, &saturday,
                ]
                .iter()
                .fold(BigDecimal::from(0), |acc, d| acc + *d),
            ),
            sunday_hours: sunday,
            monday_hours: monday,
            tuesday_hours: tuesday,
            wednesday_hours: wednesday,
            thursday_hours: thursday,
            friday_hours: friday,
            saturday_hours: saturday,
            status: ConfirmedHoursStatus::Approved,
            notes: None,
            rejection_reason: None,
            submitted_at: Some(now),
            approved_at: Some(now),
            approved_by: Some(Uuid::new_v4()),
            rejected_at: None,
            rejected_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn shift(work_date: NaiveDate, hours: &str) -> ShiftDuration {
        ShiftDuration {
            work_date,
            duration_hours: dec(hours),
        }
    }

    #[test]
    fn gross_is_hours_times_rate() {
        assert_eq!(gross_pay(&dec("40"), &dec("15.00")), dec("600.00"));
        assert_eq!(gross_pay(&dec("32.25"), &dec("10.00")), dec("322.50"));
    }

    #[test]
    fn net_applies_adjustments_and_may_go_negative() {
        assert_eq!(
            net_pay(&dec("600.00"), &dec("50"), &dec("20"), &dec("0")),
            dec("630.00")
        );
        assert_eq!(
            net_pay(&dec("100.00"), &dec("0"), &dec("150"), &dec("0")),
            dec("-50.00")
        );
    }

    #[test]
    fn zero_rate_is_refused() {
        assert!(ensure_positive_rate(&dec("15.00")).is_ok());
        assert!(ensure_positive_rate(&BigDecimal::from(0)).is_err());
        assert!(ensure_positive_rate(&dec("-1")).is_err());
    }

    #[test]
    fn approved_week_wins_over_schedule() {
        let week = date(2024, 1, 7);
        let approved = vec![approved_record(week, ["0", "8", "8", "8", "8", "8", "0"])];
        // schedule disagrees; it must be ignored for covered days
        let scheduled = vec![shift(date(2024, 1, 8), "4.00")];

        let resolved = resolve_period_hours(week, date(2024, 1, 13), &approved, &scheduled);

        assert_eq!(resolved.total, dec("40.00"));
        assert_eq!(resolved.source, HoursSource::Confirmed);
        assert_eq!(resolved.confirmed_total, Some(dec("40.00")));
        assert_eq!(resolved.scheduled_total, Some(dec("4.00")));
    }

    #[test]
    fn missing_confirmation_falls_back_to_schedule() {
        let week = date(2024, 1, 7);
        let scheduled = vec![
            shift(date(2024, 1, 8), "8.00"),
            shift(date(2024, 1, 9), "8.00"),
            shift(date(2024, 1, 10), "8.00"),
            shift(date(2024, 1, 11), "8.00"),
        ];

        let resolved = resolve_period_hours(week, date(2024, 1, 13), &[], &scheduled);

        assert_eq!(resolved.total, dec("32.00"));
        assert_eq!(resolved.source, HoursSource::Scheduled);
        assert_eq!(resolved.confirmed_total, None);
        assert_eq!(resolved.scheduled_total, Some(dec("32.00")));
    }

    #[test]
    fn multi_week_period_mixes_sources() {
        let first_week = date(2024, 1, 7);
        let second_week = date(2024, 1, 14);
        let approved = vec![approved_record(
            first_week,
            ["0", "8", "8", "8", "8", "8", "0"],
        )];
        let scheduled = vec![shift(date(2024, 1, 15), "6.00")];

        let resolved = resolve_period_hours(
            first_week,
            second_week + Duration::days(6),
            &approved,
            &scheduled,
        );

        assert_eq!(resolved.total, dec("46.00"));
        assert_eq!(resolved.source, HoursSource::Mixed);
    }

    #[test]
    fn empty_period_resolves_to_zero_scheduled() {
        let resolved = resolve_period_hours(date(2024, 1, 7), date(2024, 1, 13), &[], &[]);

        assert_eq!(resolved.total, BigDecimal::from(0));
        assert_eq!(resolved.source, HoursSource::Scheduled);
        assert_eq!(resolved.confirmed_total, None);
        assert_eq!(resolved.scheduled_total, None);
    }

    #[test]
    fn partial_period_counts_only_days_inside() {
        let week = date(2024, 1, 7);
        let approved = vec![approved_record(week, ["0", "8", "8", "8", "8", "8", "0"])];

        // Wednesday through Friday only
        let resolved = resolve_period_hours(date(2024, 1, 10), date(2024, 1, 12), &approved, &[]);

        assert_eq!(resolved.total, dec("24.00"));
        assert_eq!(resolved.source, HoursSource::Confirmed);
    }
}
