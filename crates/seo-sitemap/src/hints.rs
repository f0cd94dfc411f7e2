//! Crawler hints: `changefreq` and `priority`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use seo_content::Entity;

/// Post type that receives the higher page priority.
pub const PAGE_TYPE: &str = "page";

/// `<changefreq>` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    /// Protocol keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Derive a change frequency from the time since last modification.
    ///
    /// Timestamps in the future count as just modified.
    #[must_use]
    pub fn from_age(modified_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let age = now - modified_at;
        if age < Duration::days(1) {
            Self::Hourly
        } else if age < Duration::days(7) {
            Self::Daily
        } else if age < Duration::days(30) {
            Self::Weekly
        } else if age < Duration::days(365) {
            Self::Monthly
        } else {
            Self::Yearly
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<priority>` value in tenths, so it prints exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    /// Configured homepage.
    pub const HOME: Self = Self(10);
    /// Entities of the `page` post type.
    pub const PAGE: Self = Self(8);
    /// Every other post type.
    pub const POST: Self = Self(6);
    /// Taxonomy and author archives.
    pub const ARCHIVE: Self = Self(4);

    /// Priority of a post-type entity.
    #[must_use]
    pub fn for_post(entity: &Entity, home_id: Option<u64>) -> Self {
        if entity.type_name != PAGE_TYPE {
            Self::POST
        } else if home_id == Some(entity.id) {
            Self::HOME
        } else {
            Self::PAGE
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use seo_content::EntityKind;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn entity(id: u64, type_name: &str) -> Entity {
        Entity::new(id, EntityKind::Post, type_name, "https://example.com/x/", now())
    }

    #[test]
    fn test_change_freq_examples() {
        let cases = [
            (Duration::hours(2), ChangeFreq::Hourly),
            (Duration::days(3), ChangeFreq::Daily),
            (Duration::days(10), ChangeFreq::Weekly),
            (Duration::days(100), ChangeFreq::Monthly),
            (Duration::days(400), ChangeFreq::Yearly),
        ];
        for (age, expected) in cases {
            assert_eq!(ChangeFreq::from_age(now() - age, now()), expected, "{age}");
        }
    }

    #[test]
    fn test_change_freq_boundaries() {
        assert_eq!(
            ChangeFreq::from_age(now() - Duration::days(1), now()),
            ChangeFreq::Daily
        );
        assert_eq!(
            ChangeFreq::from_age(now() - Duration::days(7), now()),
            ChangeFreq::Weekly
        );
        assert_eq!(
            ChangeFreq::from_age(now() - Duration::days(30), now()),
            ChangeFreq::Monthly
        );
        assert_eq!(
            ChangeFreq::from_age(now() - Duration::days(365), now()),
            ChangeFreq::Yearly
        );
    }

    #[test]
    fn test_change_freq_future_is_hourly() {
        assert_eq!(
            ChangeFreq::from_age(now() + Duration::days(3), now()),
            ChangeFreq::Hourly
        );
    }

    #[test]
    fn test_priority_for_posts_and_pages() {
        assert_eq!(Priority::for_post(&entity(5, "page"), Some(5)), Priority::HOME);
        assert_eq!(Priority::for_post(&entity(6, "page"), Some(5)), Priority::PAGE);
        assert_eq!(Priority::for_post(&entity(6, "page"), None), Priority::PAGE);
        assert_eq!(Priority::for_post(&entity(5, "post"), Some(5)), Priority::POST);
        assert_eq!(Priority::for_post(&entity(9, "product"), None), Priority::POST);
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::HOME.to_string(), "1.0");
        assert_eq!(Priority::PAGE.to_string(), "0.8");
        assert_eq!(Priority::POST.to_string(), "0.6");
        assert_eq!(Priority::ARCHIVE.to_string(), "0.4");
    }
}
