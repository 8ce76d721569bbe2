#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lazgo::libs::record::{StudentData, TardinessRecord};
    use lazgo::libs::tardiness::{categorize, duration_minutes, OnTimePolicy, TardinessCategory};

    #[test]
    fn test_arrival_before_or_at_start_is_zero() {
        assert_eq!(duration_minutes("07:30", "07:30").unwrap(), 0);
        assert_eq!(duration_minutes("07:30", "07:10").unwrap(), 0);
    }

    #[test]
    fn test_exact_minute_difference() {
        assert_eq!(duration_minutes("07:30", "07:36").unwrap(), 6);
        assert_eq!(duration_minutes("07:00", "08:15").unwrap(), 75);
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        assert!(duration_minutes("07:30", "7.36").is_err());
        assert!(duration_minutes("25:00", "07:36").is_err());
        assert!(duration_minutes("07:30", "").is_err());
    }

    #[test]
    fn test_category_boundaries() {
        let cases = [
            (1, TardinessCategory::Ringan),
            (5, TardinessCategory::Ringan),
            (6, TardinessCategory::Sedang),
            (15, TardinessCategory::Sedang),
            (16, TardinessCategory::Berat),
            (120, TardinessCategory::Berat),
        ];
        for (minutes, expected) in cases {
            assert_eq!(categorize(minutes, OnTimePolicy::Mild), Some(expected), "{} minutes", minutes);
            assert_eq!(categorize(minutes, OnTimePolicy::Exclude), Some(expected), "{} minutes", minutes);
        }
    }

    #[test]
    fn test_zero_minutes_follows_policy() {
        assert_eq!(categorize(0, OnTimePolicy::Mild), Some(TardinessCategory::Ringan));
        assert_eq!(categorize(0, OnTimePolicy::Exclude), None);
        assert_eq!(OnTimePolicy::default(), OnTimePolicy::Mild);
    }

    #[test]
    fn test_record_creation() {
        let created_at = Utc.with_ymd_and_hms(2025, 1, 15, 0, 42, 10).unwrap();
        let student = StudentData::new("  Budi Santoso ", "X IPA 1", "07:36", Some("Macet"));
        let record = TardinessRecord::create(student, "07:30", created_at, OnTimePolicy::Mild).unwrap();

        assert_eq!(record.id, "2025-01-15T00:42:10.000Z");
        assert_eq!(record.name(), "Budi Santoso");
        assert_eq!(record.duration_minutes, 6);
        assert_eq!(record.category, TardinessCategory::Sedang);
        assert_eq!(record.school_start_time, "07:30");
        assert_eq!(record.created_at(), Some(created_at));
    }

    #[test]
    fn test_record_json_shape() {
        let created_at = Utc.with_ymd_and_hms(2025, 1, 15, 0, 42, 10).unwrap();
        let student = StudentData::new("Budi", "X IPA 1", "07:50", None);
        let record = TardinessRecord::create(student, "07:30", created_at, OnTimePolicy::Mild).unwrap();

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["className"], "X IPA 1");
        assert_eq!(json["arrivalTime"], "07:50");
        assert_eq!(json["schoolStartTime"], "07:30");
        assert_eq!(json["durationMinutes"], 20);
        assert_eq!(json["category"], "Berat");
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn test_on_time_arrival_under_exclude_is_not_recorded() {
        let student = StudentData::new("Budi", "X IPA 1", "07:25", None);
        let result = TardinessRecord::create(student, "07:30", Utc::now(), OnTimePolicy::Exclude);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        for (name, class, arrival) in [("", "X IPA 1", "07:40"), ("Budi", " ", "07:40"), ("Budi", "X IPA 1", "")] {
            let student = StudentData::new(name, class, arrival, None);
            assert!(TardinessRecord::create(student, "07:30", Utc::now(), OnTimePolicy::Mild).is_err());
        }
    }
}
