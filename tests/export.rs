#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};
    use lazgo::libs::export::{render_csv, ExportError, ExportFormat, ExportJob, ExportScope, Exporter};
    use lazgo::libs::record::{StudentData, TardinessRecord};
    use lazgo::libs::tardiness::OnTimePolicy;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportContext {
        temp_dir: TempDir,
        date: NaiveDate,
    }

    impl TestContext for ExportContext {
        fn setup() -> Self {
            ExportContext {
                temp_dir: tempfile::tempdir().unwrap(),
                date: NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
            }
        }
    }

    fn sample_records(count: usize) -> Vec<TardinessRecord> {
        let start = Utc::now();
        (0..count)
            .map(|i| {
                let reason = if i % 2 == 0 { Some("Macet, parah") } else { None };
                let student = StudentData::new(&format!("Siswa {}", i), "XI IPS 2", "07:45", reason);
                TardinessRecord::create(student, "07:30", start + Duration::milliseconds(i as i64), OnTimePolicy::Mild).unwrap()
            })
            .collect()
    }

    #[test_context(ExportContext)]
    #[test]
    fn test_empty_export_is_rejected_without_a_file(ctx: &mut ExportContext) {
        let path = ctx.temp_dir.path().join("kosong.csv");
        let job = ExportJob::daily(ctx.date, Vec::new(), None);

        let err = Exporter::new(ExportFormat::Csv, Some(path.clone())).export(&job).unwrap_err();
        assert_eq!(err.downcast_ref::<ExportError>(), Some(&ExportError::NothingToExport));
        assert!(!path.exists());

        for format in [ExportFormat::Excel, ExportFormat::Pdf] {
            assert_eq!(ExportJob::monthly(2025, 1, Vec::new(), None).check(format), Err(ExportError::NothingToExport));
        }
    }

    #[test]
    fn test_csv_layout() {
        let records = sample_records(3);
        let csv = String::from_utf8(render_csv(&records).unwrap()).unwrap();

        assert!(csv.starts_with('\u{FEFF}'));
        assert!(!csv.contains('\r'));

        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines.len(), records.len() + 1);
        assert_eq!(lines[0], "ID,Tanggal,Nama,Kelas,Jam Datang,Durasi Terlambat (mnt),Kategori,Alasan");
        assert!(lines[1].ends_with("\"Siswa 0\",\"XI IPS 2\",\"07:45\",\"15\",\"Sedang\",\"Macet, parah\""));
        assert!(lines[2].ends_with(",\"15\",\"Sedang\",\"\""));
    }

    #[test]
    fn test_csv_keeps_numeric_looking_text_quoted() {
        let student = StudentData::new("007", "10", "07:45", None);
        let record = TardinessRecord::create(student, "07:30", Utc::now(), OnTimePolicy::Mild).unwrap();
        let csv = String::from_utf8(render_csv(&[record.clone()]).unwrap()).unwrap();

        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with(&format!("\"{}\",", record.id)));
        assert!(row.contains(",\"007\",\"10\",\"07:45\","));
    }

    #[test_context(ExportContext)]
    #[test]
    fn test_excel_export_writes_workbook(ctx: &mut ExportContext) {
        let path = ctx.temp_dir.path().join("harian.xlsx");
        let job = ExportJob::daily(ctx.date, sample_records(4), None);

        let written = Exporter::new(ExportFormat::Excel, Some(path.clone())).export(&job).unwrap();
        assert_eq!(written, path);
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test_context(ExportContext)]
    #[test]
    fn test_daily_pdf_requires_ai_recap(ctx: &mut ExportContext) {
        let path = ctx.temp_dir.path().join("harian.pdf");
        let without_recap = ExportJob::daily(ctx.date, sample_records(2), None);
        let err = Exporter::new(ExportFormat::Pdf, Some(path.clone())).export(&without_recap).unwrap_err();
        assert_eq!(err.downcast_ref::<ExportError>(), Some(&ExportError::MissingAiSummary));
        assert!(!path.exists());

        let with_recap = ExportJob::daily(ctx.date, sample_records(2), Some("**Total Keterlambatan Hari Ini: 2 siswa.**".to_string()));
        Exporter::new(ExportFormat::Pdf, Some(path.clone())).export(&with_recap).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test_context(ExportContext)]
    #[test]
    fn test_monthly_pdf_paginates_without_analysis(ctx: &mut ExportContext) {
        let path = ctx.temp_dir.path().join("bulanan.pdf");
        let job = ExportJob::monthly(2025, 1, sample_records(120), None);
        assert_eq!(job.check(ExportFormat::Pdf), Ok(()));

        Exporter::new(ExportFormat::Pdf, Some(path.clone())).export(&job).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test_context(ExportContext)]
    #[test]
    fn test_default_file_names(ctx: &mut ExportContext) {
        let daily = ExportJob::daily(ctx.date, Vec::new(), None);
        assert_eq!(daily.scope(), ExportScope::Daily);
        assert_eq!(daily.file_name(ExportFormat::Csv), "laporan_keterlambatan_harian_13-01-2025.csv");

        let monthly = ExportJob::monthly(2025, 1, Vec::new(), None);
        assert_eq!(monthly.scope(), ExportScope::Monthly);
        assert_eq!(monthly.file_name(ExportFormat::Excel), "laporan_keterlambatan_Januari_2025.xlsx");
        assert_eq!(monthly.file_name(ExportFormat::Pdf), "laporan_keterlambatan_Januari_2025.pdf");
    }
}
