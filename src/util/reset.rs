use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc, Weekday};

const RESET_WEEKDAY: Weekday = Weekday::Sat;
const RESET_HOUR: u32 = 7;
const PUBLISH_DELAY_MINUTES: i64 = 10;

/// The next market tax reset strictly after `now`: Saturday 07:00 UTC.
/// On a Saturday at or past the reset hour this rolls a full week ahead.
pub fn next_tax_reset(now: DateTime<Utc>) -> DateTime<Utc> {
    let mut days_ahead = i64::from(RESET_WEEKDAY.num_days_from_monday())
        - i64::from(now.weekday().num_days_from_monday());
    days_ahead = days_ahead.rem_euclid(7);

    if days_ahead == 0 && now.hour() >= RESET_HOUR {
        days_ahead = 7;
    }

    let date = now.date_naive() + Duration::days(days_ahead);

    Utc.from_utc_datetime(&date.and_hms_opt(RESET_HOUR, 0, 0).unwrap())
}

/// When the refreshed rates get published, shortly after the reset itself.
pub fn next_publish(now: DateTime<Utc>) -> DateTime<Utc> {
    next_tax_reset(now) + Duration::minutes(PUBLISH_DELAY_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, second).unwrap()
    }

    #[test]
    fn lands_on_the_next_saturday_morning() {
        // 2022-03-16 is a Wednesday.
        assert_eq!(next_tax_reset(utc(2022, 3, 16, 12, 30, 0)), utc(2022, 3, 19, 7, 0, 0));
    }

    #[test]
    fn same_day_before_the_boundary_stays_on_that_day() {
        assert_eq!(next_tax_reset(utc(2022, 3, 19, 6, 59, 59)), utc(2022, 3, 19, 7, 0, 0));
    }

    #[test]
    fn rolls_a_full_week_at_the_boundary() {
        assert_eq!(next_tax_reset(utc(2022, 3, 19, 7, 0, 0)), utc(2022, 3, 26, 7, 0, 0));
        assert_eq!(next_tax_reset(utc(2022, 3, 19, 22, 15, 3)), utc(2022, 3, 26, 7, 0, 0));
    }

    #[test]
    fn always_strictly_future_and_at_most_a_week_out() {
        let starts = [
            utc(2022, 3, 14, 0, 0, 0),
            utc(2022, 3, 18, 23, 59, 59),
            utc(2022, 3, 19, 7, 0, 0),
            utc(2022, 3, 20, 3, 4, 5),
            utc(2024, 2, 29, 12, 0, 0),
        ];

        for now in starts {
            let reset = next_tax_reset(now);

            assert!(reset > now);
            assert!(reset - now <= Duration::days(7));
            assert_eq!(reset.weekday(), Weekday::Sat);
            assert_eq!((reset.hour(), reset.minute(), reset.second()), (7, 0, 0));
        }
    }

    #[test]
    fn reapplying_past_the_instant_advances_exactly_one_week() {
        let first = next_tax_reset(utc(2022, 3, 16, 12, 0, 0));
        let second = next_tax_reset(first + Duration::seconds(1));

        assert_eq!(second - first, Duration::days(7));
    }

    #[test]
    fn publish_trails_the_reset_by_ten_minutes() {
        let now = utc(2022, 3, 16, 12, 0, 0);

        assert_eq!(next_publish(now) - next_tax_reset(now), Duration::minutes(10));
    }
}
