#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use chrono::{Duration, Local, Utc};
    use lazgo::api::parse::{parse_daily_response, parse_monthly_response, MonthlyResponse, ResponseParseError};
    use lazgo::api::TextGenerator;
    use lazgo::db::storage::Storage;
    use lazgo::libs::config::Config;
    use lazgo::libs::prompt::{daily_prompt, format_history};
    use lazgo::libs::record::{StudentData, TardinessRecord};
    use lazgo::libs::report::{top_offender, ReportSlot, TopOffender};
    use lazgo::libs::store::{load_daily_output, RecordStore};
    use lazgo::libs::tardiness::OnTimePolicy;
    use lazgo::libs::tracker::{monthly_result, Tracker};
    use serde_json::Value;
    use std::cell::RefCell;

    const DAILY_REPLY: &str = "1️⃣ **Ringkasan Keterlambatan**\nBudi (X IPA 1) terlambat 6 menit.\n\n2️⃣ **Pesan WhatsApp untuk Orang Tua**\nYth. Bapak/Ibu Orang Tua/Wali dari ananda Budi\n\n3️⃣ **Rekap Harian**\nTotal Keterlambatan Hari Ini: 1 siswa.";

    /// Generator returning a canned reply and remembering every prompt.
    struct FakeGenerator {
        reply: Result<String, String>,
        prompts: RefCell<Vec<String>>,
    }

    impl FakeGenerator {
        fn replying(text: &str) -> Self {
            FakeGenerator {
                reply: Ok(text.to_string()),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            FakeGenerator {
                reply: Err("connection refused".to_string()),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn answer(&self, prompt: &str) -> anyhow::Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.reply.clone().map_err(|e| anyhow!(e))
        }
    }

    impl TextGenerator for FakeGenerator {
        async fn generate_text(&self, prompt: &str) -> anyhow::Result<String> {
            self.answer(prompt)
        }

        async fn generate_json(&self, prompt: &str, _schema: &Value) -> anyhow::Result<String> {
            self.answer(prompt)
        }
    }

    fn tracker(generator: FakeGenerator) -> Tracker<FakeGenerator> {
        Tracker::new(Storage::in_memory().unwrap(), Config::default(), generator).unwrap()
    }

    fn student(name: &str, class_name: &str) -> StudentData {
        StudentData::new(name, class_name, "07:36", Some("Macet"))
    }

    fn records(names: &[&str]) -> Vec<TardinessRecord> {
        let start = Utc::now();
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let class_name = format!("Kelas {}", i);
                TardinessRecord::create(student(name, &class_name), "07:30", start + Duration::milliseconds(i as i64), OnTimePolicy::Mild).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_parse_daily_all_sections() {
        let sections = parse_daily_response(DAILY_REPLY).unwrap();
        assert_eq!(sections.summary.as_deref(), Some("Budi (X IPA 1) terlambat 6 menit."));
        assert_eq!(sections.whatsapp.as_deref(), Some("Yth. Bapak/Ibu Orang Tua/Wali dari ananda Budi"));
        assert_eq!(sections.daily_recap.as_deref(), Some("Total Keterlambatan Hari Ini: 1 siswa."));
    }

    #[test]
    fn test_parse_daily_missing_section_uses_fallback() {
        let text = "1️⃣ **Ringkasan Keterlambatan**\nRingkasan singkat.\n3️⃣ **Rekap Harian**\nRekap.";
        let output = parse_daily_response(text).unwrap().into_output();
        assert_eq!(output.summary, "Ringkasan singkat.");
        assert_eq!(output.whatsapp, "Gagal memuat pesan WhatsApp.");
        assert_eq!(output.daily_recap, "Rekap.");
    }

    #[test]
    fn test_parse_daily_without_sections_fails() {
        assert_eq!(parse_daily_response("Maaf, saya tidak bisa membantu."), Err(ResponseParseError::NoSections));
        assert_eq!(parse_daily_response("  \n "), Err(ResponseParseError::Empty));
    }

    #[test]
    fn test_parse_daily_recap_keeps_numbered_lines() {
        let text = "1️⃣ **Ringkasan Keterlambatan**\nDua siswa terlambat.\n\n2️⃣ **Pesan WhatsApp untuk Orang Tua**\nYth. Bapak/Ibu\n\n3️⃣ **Rekap Harian**\nTotal: 2 siswa.\n1️⃣ Ani (X) 5 menit\n2️⃣ Budi (X) 7 menit";
        let sections = parse_daily_response(text).unwrap();
        assert_eq!(sections.summary.as_deref(), Some("Dua siswa terlambat."));
        assert_eq!(sections.whatsapp.as_deref(), Some("Yth. Bapak/Ibu"));
        assert_eq!(sections.daily_recap.as_deref(), Some("Total: 2 siswa.\n1️⃣ Ani (X) 5 menit\n2️⃣ Budi (X) 7 menit"));

        let numbered_summary = "1️⃣ **Ringkasan Keterlambatan**\nUrutan:\n2️⃣ Budi datang kedua\n2️⃣ **Pesan WhatsApp untuk Orang Tua**\nPesan";
        let sections = parse_daily_response(numbered_summary).unwrap();
        assert_eq!(sections.summary.as_deref(), Some("Urutan:\n2️⃣ Budi datang kedua"));
        assert_eq!(sections.whatsapp.as_deref(), Some("Pesan"));
    }

    #[test]
    fn test_parse_monthly_json() {
        let plain = r#"{"report": "**Laporan**", "parentMessage": null}"#;
        let parsed = parse_monthly_response(plain).unwrap();
        assert_eq!(parsed.report, "**Laporan**");
        assert_eq!(parsed.parent_message, None);

        let fenced = "```json\n{\"report\": \"Laporan\", \"parentMessage\": \"Yth. Bapak/Ibu\"}\n```";
        let parsed = parse_monthly_response(fenced).unwrap();
        assert_eq!(parsed.parent_message.as_deref(), Some("Yth. Bapak/Ibu"));

        assert!(matches!(parse_monthly_response("laporan biasa"), Err(ResponseParseError::InvalidJson(_))));
    }

    #[test]
    fn test_top_offender_tie_goes_to_earliest_first_occurrence() {
        let records = records(&["Citra", "Budi", "Budi", "Citra", "Ani"]);
        let top = top_offender(&records).unwrap();
        assert_eq!(top.name, "Citra");
        assert_eq!(top.count, 2);
        assert_eq!(top.class_name, "Kelas 0");

        assert_eq!(top_offender(&[]), None);
    }

    #[test]
    fn test_parent_message_gate() {
        let response = || MonthlyResponse {
            report: "Laporan".to_string(),
            parent_message: Some("Pesan dari AI".to_string()),
        };
        let top = |count| TopOffender {
            name: "Budi".to_string(),
            class_name: "X IPA 1".to_string(),
            count,
        };

        assert_eq!(monthly_result(response(), Some(top(2)), "Januari 2025").parent_message, None);
        assert_eq!(monthly_result(response(), Some(top(3)), "Januari 2025").parent_message.as_deref(), Some("Pesan dari AI"));
        assert_eq!(monthly_result(response(), None, "Januari 2025").parent_message, None);

        let silent = MonthlyResponse {
            report: "Laporan".to_string(),
            parent_message: None,
        };
        let message = monthly_result(silent, Some(top(4)), "Januari 2025").parent_message.unwrap();
        assert!(message.contains("Budi"));
        assert!(message.contains("Januari 2025"));
    }

    #[test]
    fn test_report_slot_transitions() {
        let mut slot: ReportSlot<String> = ReportSlot::default();
        assert_eq!(slot, ReportSlot::Empty);

        slot.begin();
        assert!(slot.is_loading());
        slot.resolve(Err("gagal".to_string()));
        assert_eq!(slot.error(), Some("gagal"));

        slot.begin();
        slot.resolve(Ok("laporan".to_string()));
        assert_eq!(slot.ready().map(String::as_str), Some("laporan"));

        slot.reset();
        assert_eq!(slot, ReportSlot::Empty);
    }

    #[test]
    fn test_daily_prompt_mentions_history() {
        let records = records(&["Ani", "Budi"]);
        assert!(format_history(&[]).starts_with("Belum ada siswa"));

        let prompt = daily_prompt(&records[1], &records[..1]);
        assert!(prompt.contains("- Nama: Budi"));
        assert!(prompt.contains("- Ani (Kelas 0): Terlambat 6 menit (Sedang)"));
        assert!(prompt.contains("1️⃣ **Ringkasan Keterlambatan**"));
    }

    #[tokio::test]
    async fn test_daily_success_is_cached() {
        let mut tracker = tracker(FakeGenerator::replying(DAILY_REPLY));
        let submission = tracker.submit(student("Budi", "X IPA 1"), Utc::now()).unwrap();
        assert!(submission.history.is_empty());

        let slot = tracker.generate_daily(&submission).await;
        let output = slot.ready().cloned().unwrap();
        assert_eq!(output.daily_recap, "Total Keterlambatan Hari Ini: 1 siswa.");

        let today = Local::now().date_naive();
        assert_eq!(load_daily_output(tracker.storage(), today).unwrap(), Some(output));
    }

    #[tokio::test]
    async fn test_ai_failure_keeps_the_record() {
        let mut tracker = tracker(FakeGenerator::failing());
        let submission = tracker.submit(student("Budi", "X IPA 1"), Utc::now()).unwrap();

        let slot = tracker.generate_daily(&submission).await;
        assert_eq!(slot.error(), Some("Tidak dapat terhubung ke AI. Mohon coba lagi."));

        let stored = RecordStore::load(tracker.storage()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.records()[0].name(), "Budi");
        assert_eq!(load_daily_output(tracker.storage(), Local::now().date_naive()).unwrap(), None);
    }

    #[tokio::test]
    async fn test_history_is_taken_before_the_new_record() {
        let mut tracker = tracker(FakeGenerator::replying(DAILY_REPLY));
        let now = Utc::now();
        tracker.submit(student("Ani", "X IPA 2"), now).unwrap();
        let submission = tracker.submit(student("Budi", "X IPA 1"), now + Duration::milliseconds(1)).unwrap();

        assert_eq!(submission.history.len(), 1);
        assert_eq!(submission.history[0].name(), "Ani");

        tracker.generate_daily(&submission).await;
        let prompts = tracker_prompts(&tracker);
        assert!(prompts[0].contains("- Ani (X IPA 2)"));
        assert_eq!(tracker.records_on(Local::now().date_naive())[0].name(), "Budi");
    }

    fn tracker_prompts(tracker: &Tracker<FakeGenerator>) -> Vec<String> {
        tracker.generator().prompts.borrow().clone()
    }

    #[tokio::test]
    async fn test_monthly_parent_notice_at_three_late_arrivals() {
        let mut tracker = tracker(FakeGenerator::replying(r#"{"report": "Laporan bulanan"}"#));
        let now = Utc::now();
        for (i, name) in ["Budi", "Ani", "Budi", "Budi"].iter().enumerate() {
            tracker.submit(student(name, "X IPA 1"), now + Duration::milliseconds(i as i64)).unwrap();
        }

        let slot = tracker.generate_monthly().await;
        let result = slot.ready().cloned().unwrap();
        assert_eq!(result.report, "Laporan bulanan");
        assert_eq!(result.top_offender.as_ref().map(|t| t.count), Some(3));
        assert!(result.parent_message.unwrap().contains("Budi"));
    }

    #[tokio::test]
    async fn test_monthly_failure_and_month_switch() {
        let mut tracker = tracker(FakeGenerator::replying("bukan json"));
        tracker.submit(student("Budi", "X IPA 1"), Utc::now()).unwrap();

        let slot = tracker.generate_monthly().await;
        assert_eq!(slot.error(), Some("Tidak dapat menghasilkan laporan bulanan dari AI. Mohon coba lagi."));

        let (year, month) = tracker.selected_period();
        tracker.select_month(year - 1, month);
        assert_eq!(tracker.monthly_slot(), &ReportSlot::Empty);
        assert!(tracker.month_records().is_empty());
    }
}
