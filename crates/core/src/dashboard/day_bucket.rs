//! Calendar-day bucketing for time-windowed aggregation.
//!
//! Day keys are computed in one caller-supplied time zone (`Local` in
//! production), never mixed with UTC date math at the call sites. All the
//! sharp edges of local-midnight resolution live here.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Calendar day containing `instant`, in the zone `tz`.
pub fn day_key<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// First instant of `day` in the zone `tz`, as UTC.
pub fn day_start<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    resolve_local(day.and_time(NaiveTime::MIN), tz)
}

/// Last instant of `day` (23:59:59.999 local) in the zone `tz`, as UTC.
/// Together with [`day_start`] this forms the inclusive `[from, to]` range
/// the store queries expect.
pub fn day_end<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let end_of_day = day
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid wall-clock time");
    resolve_local(end_of_day, tz)
}

/// Resolves a naive local timestamp to a UTC instant.
///
/// On a DST fall-back the wall-clock time occurs twice; we take the earlier
/// instant. On a spring-forward gap it does not occur at all; we interpret
/// it as UTC, which keeps the result inside the right calendar day.
fn resolve_local<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&local),
    }
}
