//! Stay intervals and the overlap predicate.
//!
//! A stay occupies the half-open interval `[check_in, check_out)`. Two stays
//! overlap iff `a.start < b.end && b.start < a.end`, so a guest checking out
//! at 12:00 never blocks a guest checking in at 12:00.
//!
//! The repository layer expresses the same predicate in SQL
//! (`check_in_at < $end AND expected_check_out_at > $start`) for both the
//! single-room check and the bulk search, and the `bookings` table carries an
//! exclusion constraint over `tstzrange(check_in_at, expected_check_out_at, '[)')`.
//! Only `Active` bookings participate.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// First key of the two-key `pg_advisory_xact_lock(namespace, room_id)`
/// taken before any overlap check + insert on a room.
pub const ROOM_LOCK_NAMESPACE: i32 = 0x524f_4f4d;

/// `true` when `[a_start, a_end)` and `[b_start, b_end)` share any instant.
pub fn intervals_overlap<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}

/// A validated, non-empty `[check_in, check_out)` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayInterval {
    check_in: Timestamp,
    check_out: Timestamp,
}

impl StayInterval {
    /// Build an interval, rejecting `check_out <= check_in`.
    pub fn new(check_in: Timestamp, check_out: Timestamp) -> Result<Self, CoreError> {
        if check_out <= check_in {
            return Err(CoreError::Validation(
                "Check-out must be after check-in".to_string(),
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> Timestamp {
        self.check_in
    }

    pub fn check_out(&self) -> Timestamp {
        self.check_out
    }

    pub fn overlaps(&self, other: &StayInterval) -> bool {
        intervals_overlap(self.check_in, self.check_out, other.check_in, other.check_out)
    }
}

/// Point check: is a room free for `request` given its active stays?
pub fn is_room_free<'a>(
    active_stays: impl IntoIterator<Item = &'a StayInterval>,
    request: &StayInterval,
) -> bool {
    !active_stays.into_iter().any(|stay| stay.overlaps(request))
}

/// Bulk search: all rooms minus the ones with an overlapping active booking.
///
/// `booked` is the set of room ids returned by the overlap query for the
/// requested interval. Input order is preserved.
pub fn free_rooms<R>(rooms: Vec<R>, booked: &HashSet<DbId>, id: impl Fn(&R) -> DbId) -> Vec<R> {
    rooms
        .into_iter()
        .filter(|room| !booked.contains(&id(room)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn at(hour: i64, minute: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
            + Duration::hours(hour)
            + Duration::minutes(minute)
    }

    fn stay(from: i64, to: i64) -> StayInterval {
        StayInterval::new(at(from, 0), at(to, 0)).unwrap()
    }

    // -----------------------------------------------------------------------
    // Predicate boundaries
    // -----------------------------------------------------------------------

    #[test]
    fn touching_intervals_do_not_overlap() {
        let booked = stay(10, 12);
        let request = stay(12, 14);
        assert!(!booked.overlaps(&request));
        assert!(is_room_free([&booked], &request));
    }

    #[test]
    fn one_minute_inside_overlaps() {
        let booked = stay(10, 12);
        let request = StayInterval::new(at(11, 59), at(14, 0)).unwrap();
        assert!(booked.overlaps(&request));
        assert!(!is_room_free([&booked], &request));
    }

    #[test]
    fn contained_interval_overlaps() {
        assert!(stay(8, 20).overlaps(&stay(10, 12)));
        assert!(stay(10, 12).overlaps(&stay(8, 20)));
    }

    #[test]
    fn predicate_is_symmetric() {
        for (a, b) in [((1, 3), (2, 4)), ((1, 2), (2, 3)), ((5, 9), (1, 4))] {
            assert_eq!(
                intervals_overlap(a.0, a.1, b.0, b.1),
                intervals_overlap(b.0, b.1, a.0, a.1)
            );
        }
    }

    #[test]
    fn empty_or_inverted_interval_rejected() {
        assert!(StayInterval::new(at(10, 0), at(10, 0)).is_err());
        assert!(StayInterval::new(at(12, 0), at(10, 0)).is_err());
    }

    #[test]
    fn room_without_stays_is_free() {
        let none: [StayInterval; 0] = [];
        assert!(is_room_free(&none, &stay(1, 2)));
    }

    // -----------------------------------------------------------------------
    // Consistency: bulk search == per-room point checks
    // -----------------------------------------------------------------------

    #[test]
    fn free_rooms_matches_point_checks_over_generated_grid() {
        let rooms: Vec<DbId> = (1..=6).collect();

        // Room r gets stays starting at hour r, stepping by 2r + 1 hours,
        // each lasting (r % 3) + 1 hours.
        let mut stays: Vec<(DbId, StayInterval)> = Vec::new();
        for &room in &rooms {
            let mut start = room;
            while start < 40 {
                let len = (room % 3) + 1;
                stays.push((room, stay(start, start + len)));
                start += room * 2 + 1;
            }
        }

        for from in 0..40 {
            for len in 1..6 {
                let request = stay(from, from + len);

                let booked: HashSet<DbId> = stays
                    .iter()
                    .filter(|(_, s)| s.overlaps(&request))
                    .map(|(room, _)| *room)
                    .collect();
                let bulk = free_rooms(rooms.clone(), &booked, |r| *r);

                let pointwise: Vec<DbId> = rooms
                    .iter()
                    .copied()
                    .filter(|room| {
                        let room_stays: Vec<&StayInterval> = stays
                            .iter()
                            .filter(|(r, _)| r == room)
                            .map(|(_, s)| s)
                            .collect();
                        is_room_free(room_stays, &request)
                    })
                    .collect();

                assert_eq!(bulk, pointwise, "mismatch for request {from}..{}", from + len);
            }
        }
    }

    #[test]
    fn free_rooms_preserves_order() {
        let booked: HashSet<DbId> = [2].into_iter().collect();
        assert_eq!(free_rooms(vec![3, 2, 1], &booked, |r| *r), vec![3, 1]);
    }
}
