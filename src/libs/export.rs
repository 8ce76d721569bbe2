//! Export of tardiness records to CSV, Excel and PDF.
//!
//! Every format has a pure renderer returning the file bytes; [`Exporter`]
//! only decides the destination and writes them. Preconditions are checked
//! by [`ExportJob::check`] before anything touches the file system, so a
//! rejected export never leaves a file behind.
//!
//! ```rust,no_run
//! use lazgo::libs::export::{ExportFormat, ExportJob, Exporter};
//! # fn demo(records: Vec<lazgo::libs::record::TardinessRecord>) -> anyhow::Result<()> {
//! let job = ExportJob::monthly(2025, 1, records, None);
//! let path = Exporter::new(ExportFormat::Excel, None).export(&job)?;
//! # Ok(())
//! # }
//! ```

use crate::libs::formatter::{file_date, long_date, month_name, period_label, record_date, strip_bold};
use crate::libs::messages::Message;
use crate::libs::record::TardinessRecord;
use crate::msg_success;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

const UTF8_BOM: &str = "\u{FEFF}";

const CSV_HEADERS: [&str; 8] = ["ID", "Tanggal", "Nama", "Kelas", "Jam Datang", "Durasi Terlambat (mnt)", "Kategori", "Alasan"];
const XLSX_HEADERS: [&str; 7] = ["Tanggal", "Nama Siswa", "Kelas", "Jam Datang", "Durasi Terlambat (menit)", "Kategori", "Alasan"];
const DAILY_SHEET: &str = "Keterlambatan Harian";
const MONTHLY_SHEET: &str = "Keterlambatan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportScope {
    Daily,
    Monthly,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("{}", Message::NothingToExport)]
    NothingToExport,
    #[error("{}", Message::MissingAiSummary)]
    MissingAiSummary,
}

/// What is being exported, with the AI text that accompanies it in PDFs.
#[derive(Debug, Clone)]
pub enum ReportKind {
    Daily { date: NaiveDate, recap: Option<String> },
    Monthly { year: i32, month: u32, analysis: Option<String> },
}

#[derive(Debug, Clone)]
pub struct ExportJob {
    pub kind: ReportKind,
    pub records: Vec<TardinessRecord>,
}

impl ExportJob {
    /// `recap` is the cached daily recap for `date`, if one exists.
    pub fn daily(date: NaiveDate, records: Vec<TardinessRecord>, recap: Option<String>) -> Self {
        Self {
            kind: ReportKind::Daily { date, recap },
            records,
        }
    }

    pub fn monthly(year: i32, month: u32, records: Vec<TardinessRecord>, analysis: Option<String>) -> Self {
        Self {
            kind: ReportKind::Monthly { year, month, analysis },
            records,
        }
    }

    pub fn scope(&self) -> ExportScope {
        match self.kind {
            ReportKind::Daily { .. } => ExportScope::Daily,
            ReportKind::Monthly { .. } => ExportScope::Monthly,
        }
    }

    pub fn check(&self, format: ExportFormat) -> Result<(), ExportError> {
        if self.records.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        if let (ExportFormat::Pdf, ReportKind::Daily { recap: None, .. }) = (format, &self.kind) {
            return Err(ExportError::MissingAiSummary);
        }
        Ok(())
    }

    /// Default file name, e.g. `laporan_keterlambatan_harian_13-01-2025.csv`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        match &self.kind {
            ReportKind::Daily { date, .. } => {
                format!("laporan_keterlambatan_harian_{}.{}", file_date(*date), format.extension())
            }
            ReportKind::Monthly { year, month, .. } => {
                format!("laporan_keterlambatan_{}_{}.{}", month_name(*month), year, format.extension())
            }
        }
    }

    fn sheet_name(&self) -> &'static str {
        match self.kind {
            ReportKind::Daily { .. } => DAILY_SHEET,
            ReportKind::Monthly { .. } => MONTHLY_SHEET,
        }
    }
}

/// Checks preconditions, then renders the job in `format`.
pub fn render(job: &ExportJob, format: ExportFormat) -> Result<Vec<u8>> {
    job.check(format)?;
    match format {
        ExportFormat::Csv => render_csv(&job.records),
        ExportFormat::Excel => render_xlsx(job),
        ExportFormat::Pdf => render_pdf(job),
    }
}

/// UTF-8 CSV with a BOM. The header row is bare; every data field is quoted
/// so class names like `10` or `007` stay text in spreadsheets.
pub fn render_csv(records: &[TardinessRecord]) -> Result<Vec<u8>> {
    let mut header = csv_writer(QuoteStyle::Necessary, UTF8_BOM.as_bytes().to_vec());
    header.write_record(CSV_HEADERS)?;
    let buffer = header.into_inner().map_err(|e| anyhow!("{}", e.error()))?;

    let mut wtr = csv_writer(QuoteStyle::Always, buffer);
    for record in records {
        wtr.write_record([
            record.id.clone(),
            record_date(record),
            record.name().to_string(),
            record.class_name().to_string(),
            record.arrival_time().to_string(),
            record.duration_minutes.to_string(),
            record.category.to_string(),
            record.reason().unwrap_or("").to_string(),
        ])?;
    }

    wtr.into_inner().map_err(|e| anyhow!("{}", e.error()))
}

fn csv_writer(quote_style: QuoteStyle, buffer: Vec<u8>) -> csv::Writer<Vec<u8>> {
    WriterBuilder::new().quote_style(quote_style).terminator(Terminator::Any(b'\n')).from_writer(buffer)
}

pub fn render_xlsx(job: &ExportJob) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(job.sheet_name())?;

    let header_format = Format::new().set_bold();
    for (col, header) in XLSX_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, record) in job.records.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, record_date(record))?;
        worksheet.write_string(row, 1, record.name())?;
        worksheet.write_string(row, 2, record.class_name())?;
        worksheet.write_string(row, 3, record.arrival_time())?;
        worksheet.write_number(row, 4, record.duration_minutes)?;
        worksheet.write_string(row, 5, record.category.as_str())?;
        worksheet.write_string(row, 6, record.reason().unwrap_or(""))?;
    }
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;
/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.5;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;

const DAILY_COLUMNS: [(&str, f32); 5] = [("Nama Siswa", 60.0), ("Kelas", 30.0), ("Jam Datang", 30.0), ("Durasi (mnt)", 30.0), ("Kategori", 30.0)];
const MONTHLY_COLUMNS: [(&str, f32); 6] = [
    ("Tanggal", 22.0),
    ("Nama Siswa", 42.0),
    ("Kelas", 20.0),
    ("Durasi (mnt)", 22.0),
    ("Kategori", 20.0),
    ("Alasan", 54.0),
];

pub fn render_pdf(job: &ExportJob) -> Result<Vec<u8>> {
    match &job.kind {
        ReportKind::Daily { date, recap } => {
            let mut pdf = PdfWriter::new("Laporan Keterlambatan Harian")?;
            pdf.text("Laporan Keterlambatan Harian", TITLE_SIZE, true);
            pdf.text(&long_date(*date), BODY_SIZE, false);
            pdf.gap(4.0);
            pdf.text("Rekap Harian (AI)", HEADING_SIZE, true);
            pdf.paragraph(&strip_bold(recap.as_deref().unwrap_or("")), BODY_SIZE);
            pdf.gap(6.0);

            let rows = job
                .records
                .iter()
                .map(|r| {
                    vec![
                        r.name().to_string(),
                        r.class_name().to_string(),
                        r.arrival_time().to_string(),
                        r.duration_minutes.to_string(),
                        r.category.to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            pdf.table(&DAILY_COLUMNS, &rows);
            pdf.finish()
        }
        ReportKind::Monthly { year, month, analysis } => {
            let mut pdf = PdfWriter::new("Laporan Keterlambatan Bulanan")?;
            pdf.text("Laporan Keterlambatan Bulanan", TITLE_SIZE, true);
            pdf.text(&format!("Periode: {}", period_label(*year, *month)), BODY_SIZE, false);
            pdf.gap(4.0);
            if let Some(analysis) = analysis {
                pdf.text("Ringkasan Analisis AI", HEADING_SIZE, true);
                pdf.paragraph(&strip_bold(analysis), BODY_SIZE);
                pdf.gap(6.0);
            }

            let rows = job
                .records
                .iter()
                .map(|r| {
                    vec![
                        record_date(r),
                        r.name().to_string(),
                        r.class_name().to_string(),
                        r.duration_minutes.to_string(),
                        r.category.to_string(),
                        r.reason().unwrap_or("-").to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            pdf.table(&MONTHLY_COLUMNS, &rows);
            pdf.finish()
        }
    }
}

/// Top-down text layout over A4 pages.
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Baseline of the next line, in mm from the bottom edge.
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(|e| anyhow!("{:?}", e))?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(|e| anyhow!("{:?}", e))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * LINE_SPACING
    }

    fn ensure_space(&mut self, height: f32) -> bool {
        if self.y - height >= MARGIN {
            return false;
        }
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        true
    }

    fn put(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(latin1(text), size, Mm(x), Mm(self.y), font);
    }

    fn text(&mut self, text: &str, size: f32, bold: bool) {
        let height = Self::line_height(size);
        self.ensure_space(height);
        self.y -= height;
        self.put(text, size, MARGIN, bold);
    }

    fn paragraph(&mut self, text: &str, size: f32) {
        for line in wrap_text(text, max_chars(PAGE_WIDTH - 2.0 * MARGIN, size)) {
            self.text(&line, size, false);
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn wrap_row(columns: &[(&str, f32)], cells: &[String]) -> Vec<Vec<String>> {
        columns.iter().zip(cells).map(|((_, width), cell)| wrap_text(cell, max_chars(*width - 2.0, TABLE_SIZE))).collect()
    }

    fn row(&mut self, columns: &[(&str, f32)], wrapped: &[Vec<String>], bold: bool) {
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let height = Self::line_height(TABLE_SIZE);
        for i in 0..lines {
            self.y -= height;
            let mut x = MARGIN;
            for ((_, width), cell_lines) in columns.iter().zip(wrapped) {
                if let Some(line) = cell_lines.get(i) {
                    self.put(line, TABLE_SIZE, x, bold);
                }
                x += width;
            }
        }
    }

    /// Table with its header repeated at the top of every page it spans.
    fn table(&mut self, columns: &[(&str, f32)], rows: &[Vec<String>]) {
        let headers: Vec<String> = columns.iter().map(|(name, _)| name.to_string()).collect();
        let header = Self::wrap_row(columns, &headers);
        let line_height = Self::line_height(TABLE_SIZE);

        self.ensure_space(line_height * 2.0);
        self.row(columns, &header, true);
        for cells in rows {
            let wrapped = Self::wrap_row(columns, cells);
            let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
            if self.ensure_space(line_height * lines as f32) {
                self.row(columns, &header, true);
            }
            self.row(columns, &wrapped, false);
        }
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc.save_to_bytes().map_err(|e| anyhow!("{:?}", e))
    }
}

fn max_chars(width: f32, size: f32) -> usize {
    ((width / (size * GLYPH_WIDTH * PT_TO_MM)).floor() as usize).max(1)
}

/// Built-in PDF fonts only cover Latin-1.
fn latin1(text: &str) -> String {
    text.chars().filter(|c| (*c as u32) < 0x100 && !c.is_control()).collect()
}

/// Greedy word wrap; blank lines are kept and overlong words are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }

            let needed = if current.is_empty() { word.chars().count() } else { current.chars().count() + 1 + word.chars().count() };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Writes rendered exports to disk.
pub struct Exporter {
    format: ExportFormat,
    output_path: Option<PathBuf>,
}

impl Exporter {
    /// `output_path` overrides the default file name in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    pub fn output_path(&self, job: &ExportJob) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| PathBuf::from(job.file_name(self.format)))
    }

    /// Renders `job` and writes it, returning the written path.
    pub fn export(&self, job: &ExportJob) -> Result<PathBuf> {
        let bytes = render(job, self.format)?;
        let path = self.output_path(job);
        fs::write(&path, bytes)?;

        msg_success!(Message::ExportCompleted(path.display().to_string()));
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap_text("satu dua tiga", 8), vec!["satu dua", "tiga"]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn drops_glyphs_outside_builtin_fonts() {
        assert_eq!(latin1("1️⃣ Rekap é"), "1 Rekap é");
    }
}
