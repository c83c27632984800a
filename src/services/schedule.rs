use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Serialize;

use crate::database::models::ShiftDuration;
use crate::services::hours::round_hours;

/// Per-day scheduled hours for one week, Sunday first, with the total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHours {
    pub days: [BigDecimal; 7],
    pub total: BigDecimal,
}

/// Bucket posted-shift durations into the week's 7-day vector. Shifts outside
/// the week are ignored; multiple shifts on one day accumulate.
pub fn aggregate_week(week_start: NaiveDate, shifts: &[ShiftDuration]) -> WeeklyHours {
    let mut days = [(); 7].map(|_| BigDecimal::from(0));

    for shift in shifts {
        let offset = (shift.work_date - week_start).num_days();
        if (0..7).contains(&offset) {
            days[offset as usize] = &days[offset as usize] + &shift.duration_hours;
        }
    }

    let total = round_hours(days.iter().fold(BigDecimal::from(0), |acc, day| acc + day));

    WeeklyHours { days, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn shift(work_date: NaiveDate, hours: &str) -> ShiftDuration {
        ShiftDuration {
            work_date,
            duration_hours: hours.parse().unwrap(),
        }
    }

    #[test]
    fn buckets_shifts_by_day() {
        let week = date(2024, 1, 7);
        let shifts = vec![
            shift(date(2024, 1, 8), "8.00"),  // Monday
            shift(date(2024, 1, 8), "2.50"),  // Monday, second shift
            shift(date(2024, 1, 12), "6.25"), // Friday
        ];

        let weekly = aggregate_week(week, &shifts);

        assert_eq!(weekly.days[1], "10.50".parse::<BigDecimal>().unwrap());
        assert_eq!(weekly.days[5], "6.25".parse::<BigDecimal>().unwrap());
        assert_eq!(weekly.days[0], BigDecimal::from(0));
        assert_eq!(weekly.total, "16.75".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn ignores_shifts_outside_the_week() {
        let week = date(2024, 1, 7);
        let shifts = vec![
            shift(date(2024, 1, 6), "8.00"),  // Saturday before
            shift(date(2024, 1, 14), "8.00"), // next Sunday
        ];

        let weekly = aggregate_week(week, &shifts);

        assert_eq!(weekly.total, BigDecimal::from(0));
    }

    #[test]
    fn empty_schedule_totals_zero() {
        let weekly = aggregate_week(date(2024, 1, 7), &[]);
        assert_eq!(weekly.total, BigDecimal::from(0));
        assert!(weekly.days.iter().all(|d| *d == BigDecimal::from(0)));
    }
}
