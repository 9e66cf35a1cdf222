use chrono::{Duration, NaiveDateTime, NaiveTime};
use std::fmt;
use std::slice;
use crate::domain::models::appointment::Appointment;
use crate::domain::models::availability::AvailabilityWindow;
use crate::domain::models::time_range::TimeRange;

/// Granularity of generated start times.
pub const SLOT_STEP_MIN: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejection {
    OutsideAvailability,
    AlreadyBooked,
}

impl BookingRejection {
    pub fn code(&self) -> &'static str {
        match self {
            BookingRejection::OutsideAvailability => "outside_availability",
            BookingRejection::AlreadyBooked => "already_booked",
        }
    }
}

impl fmt::Display for BookingRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingRejection::OutsideAvailability => write!(f, "not within declared availability"),
            BookingRejection::AlreadyBooked => write!(f, "slot already booked"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDecision {
    Accepted,
    Rejected(BookingRejection),
}

/// Busy intervals of one barber. Only active appointments are recorded.
#[derive(Debug, Default, Clone)]
pub struct BookingLedger {
    busy: Vec<TimeRange>,
}

impl BookingLedger {
    pub fn from_appointments(appointments: &[Appointment]) -> Self {
        let busy = appointments.iter()
            .filter(|a| a.is_active())
            .map(Appointment::range)
            .collect();
        Self { busy }
    }

    pub fn has_conflict(&self, requested: &TimeRange) -> bool {
        self.busy.iter().any(|taken| taken.overlaps(requested))
    }
}

/// Lazily walks each window in the order given, stepping by [`SLOT_STEP_MIN`],
/// and yields start times whose full service interval fits the window and is free.
///
/// Windows are neither merged nor deduplicated, so overlapping windows can
/// produce repeated or out-of-order times.
pub struct FreeSlots<'a> {
    windows: slice::Iter<'a, AvailabilityWindow>,
    ledger: &'a BookingLedger,
    duration: Duration,
    current: Option<(TimeRange, NaiveDateTime)>,
}

impl Iterator for FreeSlots<'_> {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        if self.duration <= Duration::zero() {
            return None;
        }

        loop {
            let (window, cursor) = match self.current {
                Some(state) => state,
                None => {
                    let window = self.windows.next()?.range();
                    (window, window.start)
                }
            };

            let candidate = TimeRange::starting_at(cursor, self.duration);
            if !window.contains(&candidate) {
                self.current = None;
                continue;
            }

            self.current = Some((window, cursor + Duration::minutes(SLOT_STEP_MIN)));

            if !self.ledger.has_conflict(&candidate) {
                return Some(candidate.start.time());
            }
        }
    }
}

/// `windows` must already be the barber's windows for a single day.
pub fn free_slots<'a>(
    windows: &'a [AvailabilityWindow],
    ledger: &'a BookingLedger,
    duration: Duration,
) -> FreeSlots<'a> {
    FreeSlots {
        windows: windows.iter(),
        ledger,
        duration,
        current: None,
    }
}

/// Availability first, then existing bookings. The order fixes which reason a
/// client sees when both apply.
pub fn check_booking(
    windows: &[AvailabilityWindow],
    ledger: &BookingLedger,
    requested: &TimeRange,
) -> BookingDecision {
    let available = windows.iter().any(|w| w.range().contains(requested));
    if !available {
        return BookingDecision::Rejected(BookingRejection::OutsideAvailability);
    }

    if ledger.has_conflict(requested) {
        return BookingDecision::Rejected(BookingRejection::AlreadyBooked);
    }

    BookingDecision::Accepted
}

/// First declared window of the same day that shares any time with `candidate`.
pub fn find_overlapping_window<'a>(
    existing: &'a [AvailabilityWindow],
    candidate: &AvailabilityWindow,
) -> Option<&'a AvailabilityWindow> {
    existing.iter()
        .filter(|w| w.day == candidate.day && w.id != candidate.id)
        .find(|w| w.range().overlaps(&candidate.range()))
}
