//! Booking admission, pricing and availability rules.
//!
//! Everything here is pure: [`BookingService`](super::BookingService) loads
//! the rows inside a transaction and applies these functions to them, so the
//! same rules hold no matter where the data comes from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::bikes::models::Bike;
use crate::features::bookings::models::{Booking, BookingStatus, NewBooking};
use crate::shared::constants::{MAX_AMOUNT, MSG_DATES_UNAVAILABLE};

/// Wire format of booking dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar date range; `start <= end` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(AppError::Validation(format!(
                "End date {} must not be before start date {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Parse a pair of `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date("Start date", start)?, parse_date("End date", end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive overlap: each range starts no later than the other ends
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of rental days; both ends count, so a same-day rental is one day
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        AppError::Validation(format!(
            "{} '{}' is not a valid date (expected YYYY-MM-DD)",
            field, raw
        ))
    })
}

impl From<&Booking> for DateRange {
    fn from(b: &Booking) -> Self {
        // Rows satisfy the ordering CHECK constraint
        Self {
            start: b.start_date,
            end: b.end_date.max(b.start_date),
        }
    }
}

/// Total cost of renting at `price_per_day` over `range`.
///
/// `None` when the total does not fit a money column.
pub fn rental_cost(price_per_day: Decimal, range: &DateRange) -> Option<Decimal> {
    price_per_day
        .checked_mul(Decimal::from(range.days()))
        .filter(|total| *total <= MAX_AMOUNT)
}

/// First pending/active booking of `bike_id` whose dates intersect `range`
pub fn find_conflict<'a>(
    bike_id: Uuid,
    range: &DateRange,
    existing: &'a [Booking],
) -> Option<&'a Booking> {
    existing.iter().find(|b| {
        b.bike_id == bike_id && b.status.blocks_dates() && DateRange::from(*b).overlaps(range)
    })
}

/// Decide whether `user_id` may book `bike` over `range`.
///
/// `existing` must contain at least every pending/active booking of the bike
/// that could intersect the range; extra rows are ignored.
pub fn admit_booking(
    user_id: Uuid,
    bike: &Bike,
    range: DateRange,
    existing: &[Booking],
) -> Result<NewBooking> {
    if let Some(conflict) = find_conflict(bike.id, &range, existing) {
        tracing::debug!(
            "Booking request for bike {} over {}..{} conflicts with booking {}",
            bike.id,
            range.start(),
            range.end(),
            conflict.id
        );
        return Err(AppError::Conflict(MSG_DATES_UNAVAILABLE.to_string()));
    }

    let total_cost = rental_cost(bike.price_per_day, &range).ok_or_else(|| {
        AppError::Validation(format!(
            "Rental of {} days at {} per day exceeds the maximum booking total",
            range.days(),
            bike.price_per_day
        ))
    })?;

    Ok(NewBooking {
        user_id,
        bike_id: bike.id,
        start_date: range.start(),
        end_date: range.end(),
        total_cost,
        status: BookingStatus::Pending,
    })
}

/// Availability flag to write when a booking moves to `status`.
///
/// Only `Active` forces a write (`false`); the bike's current flag is never
/// consulted. Completing or cancelling leaves the flag alone.
pub fn availability_update(status: BookingStatus) -> Option<bool> {
    match status {
        BookingStatus::Active => Some(false),
        BookingStatus::Pending | BookingStatus::Completed | BookingStatus::Cancelled => None,
    }
}

/// Decide whether `booking` may move to `status`.
///
/// Reopening a completed or cancelled booking must not overlap dates another
/// blocking booking of the bike has taken since. `existing` follows the same
/// contract as in [`admit_booking`]; the booking itself may be included.
pub fn check_status_change(
    booking: &Booking,
    status: BookingStatus,
    existing: &[Booking],
) -> Result<()> {
    if !status.blocks_dates() || booking.status.blocks_dates() {
        return Ok(());
    }

    let range = DateRange::from(booking);
    let conflict = existing.iter().find(|b| {
        b.id != booking.id
            && b.bike_id == booking.bike_id
            && b.status.blocks_dates()
            && DateRange::from(*b).overlaps(&range)
    });

    match conflict {
        Some(other) => {
            tracing::debug!(
                "Reopening booking {} as {} conflicts with booking {}",
                booking.id,
                status,
                other.id
            );
            Err(AppError::Conflict(MSG_DATES_UNAVAILABLE.to_string()))
        }
        None => Ok(()),
    }
}

/// A pending/active booking covers `date`
pub fn is_booked_on(bike_id: Uuid, date: NaiveDate, bookings: &[Booking]) -> bool {
    find_conflict(bike_id, &DateRange::single_day(date), bookings).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    /// The bike's flag after a booking moves to `status`
    fn flag_after(status: BookingStatus, current: bool) -> bool {
        availability_update(status).unwrap_or(current)
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    fn bike(price_per_day: &str) -> Bike {
        Bike {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            name: "Bike B".to_string(),
            description: String::new(),
            price_per_hour: dec("5.00"),
            price_per_day: dec(price_per_day),
            is_available: true,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    /// In-memory stand-in for the bookings table
    #[derive(Default)]
    struct Ledger {
        bookings: Vec<Booking>,
    }

    impl Ledger {
        fn request(&mut self, user_id: Uuid, bike: &Bike, range: DateRange) -> Result<Booking> {
            let admitted = admit_booking(user_id, bike, range, &self.bookings)?;
            let booking = Booking {
                id: Uuid::new_v4(),
                user_id: admitted.user_id,
                bike_id: admitted.bike_id,
                start_date: admitted.start_date,
                end_date: admitted.end_date,
                total_cost: admitted.total_cost,
                status: admitted.status,
                created_at: Utc::now(),
            };
            self.bookings.push(booking.clone());
            Ok(booking)
        }

        fn set_status(&mut self, id: Uuid, status: BookingStatus) {
            if let Some(b) = self.bookings.iter_mut().find(|b| b.id == id) {
                b.status = status;
            }
        }
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = DateRange::new(d("2024-01-05"), d("2024-01-04")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_parse_dates() {
        let r = DateRange::parse("2024-01-01", " 2024-01-03 ").unwrap();
        assert_eq!(r.start(), d("2024-01-01"));
        assert_eq!(r.end(), d("2024-01-03"));

        assert!(matches!(
            DateRange::parse("2024-02-30", "2024-03-01"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            DateRange::parse("01/01/2024", "2024-01-02"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            DateRange::parse("2024-01-02", ""),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let a = range("2024-01-01", "2024-01-03");
        assert!(a.overlaps(&range("2024-01-03", "2024-01-05")));
        assert!(a.overlaps(&range("2023-12-30", "2024-01-01")));
        assert!(a.overlaps(&range("2024-01-02", "2024-01-02")));
        assert!(a.overlaps(&range("2023-12-01", "2024-02-01")));
        assert!(!a.overlaps(&range("2024-01-04", "2024-01-05")));
        assert!(!a.overlaps(&range("2023-12-25", "2023-12-31")));
    }

    #[test]
    fn test_overlap_matches_shared_dates() {
        // Overlap holds exactly when some calendar date lies in both ranges
        let base = d("2024-03-10");
        let day = |offset: i64| base + Duration::days(offset);
        for s1 in 0..6 {
            for len1 in 0..4 {
                for s2 in 0..6 {
                    for len2 in 0..4 {
                        let a = DateRange::new(day(s1), day(s1 + len1)).unwrap();
                        let b = DateRange::new(day(s2), day(s2 + len2)).unwrap();
                        let shares_date = (s1..=s1 + len1).any(|x| (s2..=s2 + len2).contains(&x));
                        assert_eq!(a.overlaps(&b), shares_date, "{:?} vs {:?}", a, b);
                        assert_eq!(a.overlaps(&b), b.overlaps(&a));
                    }
                }
            }
        }
    }

    #[test]
    fn test_single_day_costs_one_day() {
        let r = range("2024-05-01", "2024-05-01");
        assert_eq!(r.days(), 1);
        assert_eq!(rental_cost(dec("20.00"), &r), Some(dec("20.00")));
    }

    #[test]
    fn test_week_costs_seven_days() {
        let r = range("2024-05-01", "2024-05-07");
        assert_eq!(r.days(), 7);
        assert_eq!(rental_cost(dec("12.50"), &r), Some(dec("87.50")));
    }

    #[test]
    fn test_cost_across_month_and_leap_day() {
        let r = range("2024-02-28", "2024-03-01");
        assert_eq!(r.days(), 3);
        assert_eq!(rental_cost(dec("10.00"), &r), Some(dec("30.00")));
    }

    #[test]
    fn test_cost_beyond_money_column_rejected() {
        let r = range("2024-01-01", "2024-12-31");
        assert_eq!(rental_cost(dec("99999999.99"), &r), None);

        let mut ledger = Ledger::default();
        let err = ledger
            .request(Uuid::new_v4(), &bike("99999999.99"), r)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(ledger.bookings.is_empty());
    }

    #[test]
    fn test_booking_scenario() {
        let mut ledger = Ledger::default();
        let bike = bike("20.00");
        let user = Uuid::new_v4();

        let first = ledger
            .request(user, &bike, range("2024-01-01", "2024-01-03"))
            .unwrap();
        assert_eq!(first.total_cost, dec("60.00"));
        assert_eq!(first.status, BookingStatus::Pending);

        let second = ledger.request(Uuid::new_v4(), &bike, range("2024-01-03", "2024-01-05"));
        assert!(matches!(second, Err(AppError::Conflict(ref msg)) if msg == MSG_DATES_UNAVAILABLE));
        assert_eq!(ledger.bookings.len(), 1);

        let third = ledger
            .request(Uuid::new_v4(), &bike, range("2024-01-04", "2024-01-05"))
            .unwrap();
        assert_eq!(third.total_cost, dec("40.00"));
        assert_eq!(ledger.bookings.len(), 2);
    }

    #[test]
    fn test_non_overlapping_requests_both_succeed() {
        let mut ledger = Ledger::default();
        let bike = bike("15.00");
        let user = Uuid::new_v4();

        assert!(ledger
            .request(user, &bike, range("2024-06-01", "2024-06-05"))
            .is_ok());
        assert!(ledger
            .request(user, &bike, range("2024-06-06", "2024-06-06"))
            .is_ok());
        assert!(ledger
            .request(user, &bike, range("2024-05-20", "2024-05-31"))
            .is_ok());
        assert_eq!(ledger.bookings.len(), 3);
    }

    #[test]
    fn test_other_bikes_do_not_conflict() {
        let mut ledger = Ledger::default();
        let first_bike = bike("20.00");
        let second_bike = bike("25.00");
        let user = Uuid::new_v4();

        ledger
            .request(user, &first_bike, range("2024-01-01", "2024-01-10"))
            .unwrap();
        let other = ledger
            .request(user, &second_bike, range("2024-01-01", "2024-01-10"))
            .unwrap();
        assert_eq!(other.total_cost, dec("250.00"));
    }

    #[test]
    fn test_active_booking_blocks_dates() {
        let mut ledger = Ledger::default();
        let bike = bike("20.00");
        let user = Uuid::new_v4();

        let booking = ledger
            .request(user, &bike, range("2024-01-01", "2024-01-03"))
            .unwrap();
        ledger.set_status(booking.id, BookingStatus::Active);

        assert!(matches!(
            ledger.request(user, &bike, range("2024-01-02", "2024-01-02")),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_finished_bookings_release_dates() {
        for status in [BookingStatus::Completed, BookingStatus::Cancelled] {
            let mut ledger = Ledger::default();
            let bike = bike("20.00");
            let user = Uuid::new_v4();

            let booking = ledger
                .request(user, &bike, range("2024-01-01", "2024-01-03"))
                .unwrap();
            ledger.set_status(booking.id, status);

            assert!(
                ledger
                    .request(user, &bike, range("2024-01-01", "2024-01-03"))
                    .is_ok(),
                "{} booking should not block",
                status
            );
        }
    }

    #[test]
    fn test_admission_ignores_availability_flag() {
        let mut ledger = Ledger::default();
        let mut bike = bike("20.00");
        bike.is_available = false;

        assert!(ledger
            .request(Uuid::new_v4(), &bike, range("2024-01-01", "2024-01-01"))
            .is_ok());
    }

    #[test]
    fn test_active_always_marks_unavailable() {
        assert!(!flag_after(BookingStatus::Active, true));
        assert!(!flag_after(BookingStatus::Active, false));
        assert_eq!(availability_update(BookingStatus::Active), Some(false));
    }

    #[test]
    fn test_other_statuses_leave_flag_unchanged() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(availability_update(status), None);
            assert!(flag_after(status, true));
            assert!(!flag_after(status, false));
        }
    }

    #[test]
    fn test_booked_today_uses_full_range() {
        let mut ledger = Ledger::default();
        let bike = bike("20.00");
        let user = Uuid::new_v4();

        let booking = ledger
            .request(user, &bike, range("2024-01-01", "2024-01-05"))
            .unwrap();

        // Started before "today" but still running
        assert!(is_booked_on(bike.id, d("2024-01-03"), &ledger.bookings));
        assert!(is_booked_on(bike.id, d("2024-01-05"), &ledger.bookings));
        assert!(!is_booked_on(bike.id, d("2024-01-06"), &ledger.bookings));
        assert!(!is_booked_on(bike.id, d("2023-12-31"), &ledger.bookings));

        ledger.set_status(booking.id, BookingStatus::Cancelled);
        assert!(!is_booked_on(bike.id, d("2024-01-03"), &ledger.bookings));
    }

    #[test]
    fn test_booked_today_agrees_with_admission() {
        let mut ledger = Ledger::default();
        let bike = bike("20.00");
        let user = Uuid::new_v4();
        ledger
            .request(user, &bike, range("2024-01-02", "2024-01-04"))
            .unwrap();

        for day in ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"] {
            let date = d(day);
            let admissible =
                admit_booking(user, &bike, DateRange::single_day(date), &ledger.bookings).is_ok();
            assert_eq!(is_booked_on(bike.id, date, &ledger.bookings), !admissible);
        }
    }

    #[test]
    fn test_reopening_over_taken_dates_conflicts() {
        let mut ledger = Ledger::default();
        let bike = bike("20.00");

        let first = ledger
            .request(Uuid::new_v4(), &bike, range("2024-01-01", "2024-01-03"))
            .unwrap();
        ledger.set_status(first.id, BookingStatus::Cancelled);
        ledger
            .request(Uuid::new_v4(), &bike, range("2024-01-03", "2024-01-04"))
            .unwrap();

        let cancelled = ledger.bookings[0].clone();
        for status in [BookingStatus::Pending, BookingStatus::Active] {
            assert!(matches!(
                check_status_change(&cancelled, status, &ledger.bookings),
                Err(AppError::Conflict(_))
            ));
        }
        assert!(check_status_change(&cancelled, BookingStatus::Completed, &ledger.bookings).is_ok());
    }

    #[test]
    fn test_reopening_free_dates_and_blocking_moves_allowed() {
        let mut ledger = Ledger::default();
        let bike = bike("20.00");

        let first = ledger
            .request(Uuid::new_v4(), &bike, range("2024-01-01", "2024-01-03"))
            .unwrap();
        ledger
            .request(Uuid::new_v4(), &bike, range("2024-01-04", "2024-01-06"))
            .unwrap();

        // Pending -> Active never re-checks; the booking does not conflict with itself
        let pending = ledger.bookings[0].clone();
        assert!(check_status_change(&pending, BookingStatus::Active, &ledger.bookings).is_ok());

        ledger.set_status(first.id, BookingStatus::Completed);
        let completed = ledger.bookings[0].clone();
        assert!(check_status_change(&completed, BookingStatus::Active, &ledger.bookings).is_ok());
    }
}
