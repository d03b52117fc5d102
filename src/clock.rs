//! Time-override utility.
//!
//! Operators can pin work-order timestamps to a configured date/time/zone
//! instead of the system clock. Stored instants are always absolute UTC;
//! DST awareness only affects display formatting and the informational flag
//! written next to a timestamp, never the instant itself.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeSettings {
    pub use_custom_time: bool,
    /// YYYY-MM-DD
    pub custom_date: Option<String>,
    /// HH:MM (24h)
    pub custom_time: Option<String>,
    /// IANA zone name, e.g. "America/Chicago".
    pub timezone: String,
    pub auto_detect_timezone: bool,
    pub enable_dst: bool,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            use_custom_time: false,
            custom_date: None,
            custom_time: None,
            timezone: "America/Chicago".to_string(),
            auto_detect_timezone: false,
            enable_dst: true,
        }
    }
}

impl TimeSettings {
    /// The zone the settings resolve to: the runtime's `TZ` when auto-detect
    /// is on (UTC when unset or unparseable), otherwise the explicit value.
    pub fn effective_timezone(&self) -> AppResult<Tz> {
        if self.auto_detect_timezone {
            return Ok(std::env::var("TZ")
                .ok()
                .and_then(|name| name.parse::<Tz>().ok())
                .unwrap_or(Tz::UTC));
        }
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::validation("timezone", format!("Unknown timezone: {}", self.timezone)))
    }
}

/// The instant new work-order timestamps should carry.
///
/// With the override off this is the system clock, and any stale
/// `custom_date`/`custom_time` still present in the settings is ignored.
pub fn resolve_current_time(settings: &TimeSettings) -> AppResult<DateTime<Utc>> {
    if !settings.use_custom_time {
        return Ok(Utc::now());
    }

    let date = settings
        .custom_date
        .as_deref()
        .ok_or_else(|| AppError::validation("custom_date", "Required when use_custom_time is set"))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation("custom_date", format!("Invalid date: {date}")))?;

    let time = settings
        .custom_time
        .as_deref()
        .ok_or_else(|| AppError::validation("custom_time", "Required when use_custom_time is set"))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation("custom_time", format!("Invalid time: {time}")))?;

    let tz = settings.effective_timezone()?;
    let naive = date.and_time(time);

    // DST gap fallback: if the local time does not exist (spring-forward),
    // reinterpret the naive timestamp as UTC.
    let instant = naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive));

    Ok(instant)
}

/// Locale-style display string in the given zone, e.g. on receipts.
pub fn format_for_display(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%B %-d, %Y %-I:%M %p %Z")
        .to_string()
}

fn utc_offset_secs(tz: Tz, date: NaiveDate) -> i32 {
    let noon = date.and_hms_opt(12, 0, 0).unwrap_or(date.and_time(NaiveTime::MIN));
    tz.offset_from_utc_datetime(&noon).fix().local_minus_utc()
}

/// Whether the zone shifts its offset at all during the given year.
pub fn time_zone_observes_dst(tz: Tz, year: i32) -> bool {
    let jan = NaiveDate::from_ymd_opt(year, 1, 1);
    let jul = NaiveDate::from_ymd_opt(year, 7, 1);
    match (jan, jul) {
        (Some(jan), Some(jul)) => utc_offset_secs(tz, jan) != utc_offset_secs(tz, jul),
        _ => false,
    }
}

/// Whether the instant falls inside the zone's DST window. The DST offset is
/// the larger of the two seasonal offsets, which also holds south of the
/// equator where the window spans the new year.
pub fn is_instant_in_dst(instant: DateTime<Utc>, tz: Tz) -> bool {
    let local = instant.with_timezone(&tz);
    let year = local.year();
    let (Some(jan), Some(jul)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 7, 1),
    ) else {
        return false;
    };
    let jan = utc_offset_secs(tz, jan);
    let jul = utc_offset_secs(tz, jul);
    if jan == jul {
        return false;
    }
    local.offset().fix().local_minus_utc() == jan.max(jul)
}

/// The informational flag stored alongside a work-order timestamp.
/// Always false when the operator disabled DST handling.
pub fn dst_flag_for(instant: DateTime<Utc>, settings: &TimeSettings) -> bool {
    if !settings.enable_dst {
        return false;
    }
    match settings.effective_timezone() {
        Ok(tz) => is_instant_in_dst(instant, tz),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn custom(date: &str, time: &str, zone: &str) -> TimeSettings {
        TimeSettings {
            use_custom_time: true,
            custom_date: Some(date.to_string()),
            custom_time: Some(time.to_string()),
            timezone: zone.to_string(),
            auto_detect_timezone: false,
            enable_dst: true,
        }
    }

    #[test]
    fn override_off_ignores_stale_fields() {
        let mut settings = custom("2001-01-01", "00:00", "America/Chicago");
        settings.use_custom_time = false;
        let resolved = resolve_current_time(&settings).unwrap();
        assert!(Utc::now().signed_duration_since(resolved) < Duration::seconds(5));
    }

    #[test]
    fn custom_time_is_reinterpreted_in_zone() {
        // Noon in Chicago during DST is 17:00 UTC.
        let settings = custom("2025-07-04", "12:00", "America/Chicago");
        let resolved = resolve_current_time(&settings).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2025, 7, 4, 17, 0, 0).unwrap());

        // Same wall clock in January is 18:00 UTC.
        let settings = custom("2025-01-04", "12:00", "America/Chicago");
        let resolved = resolve_current_time(&settings).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2025, 1, 4, 18, 0, 0).unwrap());
    }

    #[test]
    fn missing_fields_are_validation_errors() {
        let mut settings = custom("2025-07-04", "12:00", "America/Chicago");
        settings.custom_time = None;
        assert!(resolve_current_time(&settings).is_err());

        let settings = custom("2025-07-04", "12:00", "Not/AZone");
        assert!(resolve_current_time(&settings).is_err());
    }

    #[test]
    fn dst_observation_per_zone() {
        let chicago: Tz = "America/Chicago".parse().unwrap();
        let phoenix: Tz = "America/Phoenix".parse().unwrap();
        assert!(time_zone_observes_dst(chicago, 2025));
        assert!(!time_zone_observes_dst(phoenix, 2025));
    }

    #[test]
    fn dst_flag_tracks_season_not_instant() {
        let chicago: Tz = "America/Chicago".parse().unwrap();
        let summer = Utc.with_ymd_and_hms(2025, 7, 4, 17, 0, 0).unwrap();
        let winter = Utc.with_ymd_and_hms(2025, 1, 4, 18, 0, 0).unwrap();
        assert!(is_instant_in_dst(summer, chicago));
        assert!(!is_instant_in_dst(winter, chicago));

        let mut settings = custom("2025-07-04", "12:00", "America/Chicago");
        settings.enable_dst = false;
        assert!(!dst_flag_for(summer, &settings));
    }

    #[test]
    fn display_formatting_uses_zone() {
        let chicago: Tz = "America/Chicago".parse().unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 7, 4, 17, 0, 0).unwrap();
        let display = format_for_display(instant, chicago);
        assert!(display.contains("July 4, 2025"), "{display}");
        assert!(display.contains("12:00 PM"), "{display}");
        assert!(display.contains("CDT"), "{display}");
    }
}
