#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};
    use lazgo::db::storage::Storage;
    use lazgo::libs::formatter::{long_date, period_label, short_date, strip_bold};
    use lazgo::libs::insight::Insight;
    use lazgo::libs::reason::{self, NO_REASON, OTHER_REASON, PRESET_REASONS};
    use lazgo::libs::record::{StudentData, TardinessRecord};
    use lazgo::libs::roster::{Roster, Student};
    use lazgo::libs::store::{ROSTER_KEY, THEME_KEY};
    use lazgo::libs::tardiness::OnTimePolicy;
    use lazgo::libs::theme::Theme;
    use std::io::Write;
    use test_context::{test_context, TestContext};

    struct RosterContext {
        storage: Storage,
        roster: Roster,
    }

    impl TestContext for RosterContext {
        fn setup() -> Self {
            let students = [("Budi Santoso", "X IPA 1"), ("Budiman", "XI IPS 2"), ("Ani", "X IPA 1"), ("Citra", "XII Bahasa")]
                .iter()
                .map(|(name, class_name)| Student {
                    name: name.to_string(),
                    class_name: class_name.to_string(),
                })
                .collect();
            RosterContext {
                storage: Storage::in_memory().unwrap(),
                roster: Roster::new(students),
            }
        }
    }

    fn record(name: &str, class_name: &str, arrival: &str, reason: Option<&str>, offset_ms: i64) -> TardinessRecord {
        let student = StudentData::new(name, class_name, arrival, reason);
        TardinessRecord::create(student, "07:30", Utc::now() + Duration::milliseconds(offset_ms), OnTimePolicy::Mild).unwrap()
    }

    #[test_context(RosterContext)]
    #[test]
    fn test_student_suggestions(ctx: &mut RosterContext) {
        assert!(ctx.roster.suggest_students("b").is_empty());

        let names: Vec<String> = ctx.roster.suggest_students("bud").into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Budi Santoso", "Budiman"]);

        let picked = &ctx.roster.suggest_students("santoso")[0];
        assert_eq!(picked.class_name, "X IPA 1");
    }

    #[test_context(RosterContext)]
    #[test]
    fn test_class_suggestions(ctx: &mut RosterContext) {
        assert_eq!(ctx.roster.class_names(), vec!["X IPA 1", "XI IPS 2", "XII Bahasa"]);
        assert_eq!(ctx.roster.suggest_classes("x"), vec!["X IPA 1", "XI IPS 2", "XII Bahasa"]);
        assert_eq!(ctx.roster.suggest_classes("ips"), vec!["XI IPS 2"]);
        assert!(ctx.roster.suggest_classes("").is_empty());
    }

    #[test_context(RosterContext)]
    #[test]
    fn test_roster_persistence(ctx: &mut RosterContext) {
        assert!(Roster::load(&ctx.storage).unwrap().is_empty());
        ctx.roster.save(&mut ctx.storage).unwrap();
        assert_eq!(Roster::load(&ctx.storage).unwrap(), ctx.roster);

        ctx.storage.set(ROSTER_KEY, "rusak").unwrap();
        assert!(Roster::load(&ctx.storage).unwrap().is_empty());
    }

    #[test]
    fn test_roster_csv_import() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Nama,Kelas\nBudi Santoso, X IPA 1\n,XI IPS 2\nAni,X IPA 2").unwrap();

        let roster = Roster::import_csv(file.path()).unwrap();
        assert_eq!(roster.students().len(), 2);
        assert_eq!(roster.students()[0].class_name, "X IPA 1");

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "siswa,ruang\nBudi,1").unwrap();
        assert!(Roster::import_csv(bad.path()).is_err());
    }

    #[test]
    fn test_reason_choices() {
        let choices = reason::choices();
        assert_eq!(choices.len(), PRESET_REASONS.len() + 1);
        assert_eq!(choices[0], "Macet");
        assert_eq!(choices.last(), Some(&OTHER_REASON));

        assert_eq!(reason::resolve("Hujan", "diabaikan"), "Hujan");
        assert_eq!(reason::resolve(OTHER_REASON, "  Ban bocor "), "Ban bocor");
        assert_eq!(reason::resolve(OTHER_REASON, ""), "");
    }

    #[test]
    fn test_insight_statistics() {
        assert_eq!(Insight::from_records(&[]), None);

        let records = vec![
            record("Ani", "X IPA 1", "07:33", Some("Macet"), 0),
            record("Budi", "X IPA 2", "07:40", Some("Hujan"), 1),
            record("Citra", "X IPA 2", "07:50", Some("Macet"), 2),
            record("Dodi", "X IPA 1", "07:31", None, 3),
        ];
        let insight = Insight::from_records(&records).unwrap();
        assert_eq!(insight.most_common_reason, "Macet");
        assert_eq!(insight.top_class, "X IPA 2");
        assert_eq!(insight.average_minutes, 9);
        assert_eq!((insight.ringan, insight.sedang, insight.berat), (2, 1, 1));

        let single = Insight::from_records(&records[3..]).unwrap();
        assert_eq!(single.most_common_reason, NO_REASON);
    }

    #[test]
    fn test_theme_preference() {
        let mut storage = Storage::in_memory().unwrap();
        assert_eq!(Theme::load(&storage).unwrap(), Theme::Light);

        Theme::Light.toggled().save(&mut storage).unwrap();
        assert_eq!(Theme::load(&storage).unwrap(), Theme::Dark);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("\"dark\""));

        storage.set(THEME_KEY, "ungu").unwrap();
        assert_eq!(Theme::load(&storage).unwrap(), Theme::Light);
    }

    #[test]
    fn test_indonesian_formatting() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
        assert_eq!(short_date(date), "17/8/2025");
        assert_eq!(long_date(date), "Minggu, 17 Agustus 2025");
        assert_eq!(period_label(2025, 12), "Desember 2025");
        assert_eq!(strip_bold("**Laporan** bulanan"), "Laporan bulanan");
    }
}
