//! Prompts sent to the generative-language service.
//!
//! The daily prompt asks for three fixed, numbered sections whose headers are
//! matched again by [`crate::api::parse::parse_daily_response`]; the header
//! constants below are shared by both sides and must not drift apart.

use crate::libs::formatter::record_date;
use crate::libs::reason::NO_REASON;
use crate::libs::record::TardinessRecord;
use crate::libs::report::TopOffender;

pub const SUMMARY_MARKER: &str = "1️⃣";
pub const WHATSAPP_MARKER: &str = "2️⃣";
pub const RECAP_MARKER: &str = "3️⃣";

pub const SUMMARY_LABEL: &str = "Ringkasan Keterlambatan";
pub const WHATSAPP_LABEL: &str = "Pesan WhatsApp untuk Orang Tua";
pub const RECAP_LABEL: &str = "Rekap Harian";

/// Late arrivals in a month at which the parents are notified.
pub const PARENT_NOTICE_THRESHOLD: usize = 3;

const EMPTY_HISTORY: &str = "Belum ada siswa yang terlambat hari ini selain siswa saat ini.";

/// Today's earlier records as a bullet list.
pub fn format_history(history: &[TardinessRecord]) -> String {
    if history.is_empty() {
        return EMPTY_HISTORY.to_string();
    }
    history
        .iter()
        .map(|r| format!("- {} ({}): Terlambat {} menit ({})", r.name(), r.class_name(), r.duration_minutes, r.category))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for one new record; `history` holds today's records before it.
pub fn daily_prompt(record: &TardinessRecord, history: &[TardinessRecord]) -> String {
    format!(
        r#"Kamu adalah LazGo, asisten sekolah yang efisien dan profesional untuk mencatat keterlambatan siswa.

Tugasmu adalah memproses data keterlambatan siswa dan menghasilkan output dalam format yang ditentukan. Selalu gunakan Bahasa Indonesia yang baik dan formal.

Data Siswa Saat Ini:
- Nama: {name}
- Kelas: {class_name}
- Jam Masuk Seharusnya: {start}
- Jam Kedatangan: {arrival}
- Durasi Keterlambatan: {duration} menit
- Kategori Keterlambatan: {category}
- Alasan: {reason}

Riwayat Keterlambatan Hari Ini (Siswa yang sudah tercatat sebelumnya):
{history}

---

Instruksi:
Berdasarkan data di atas, hasilkan output dengan format TEPAT seperti di bawah ini. JANGAN tambahkan teks pembuka atau penutup lainnya. Gunakan emoji dan formatting tebal (**...**) yang sudah ditentukan.

{m1} **{l1}**
[Buat ringkasan singkat dan jelas tentang keterlambatan siswa SAAT INI. Sebutkan nama, kelas, durasi, dan kategori.]

{m2} **{l2}**
[Buat pesan WhatsApp yang formal, sopan, dan informatif untuk orang tua siswa SAAT INI. Gunakan tanggal hari ini (asumsikan hari ini adalah tanggal saat pesan dibuat). Gunakan format tebal (*...*) dan miring (_..._) jika perlu untuk penekanan. Sapa dengan "Yth. Bapak/Ibu Orang Tua/Wali dari ananda [Nama Siswa]".]

{m3} **{l3}**
[Buat ringkasan dari SEMUA siswa yang terlambat hari ini (termasuk siswa saat ini dari data di atas dan riwayat). Jika hanya ada satu siswa, sebutkan "Total Keterlambatan Hari Ini: 1 siswa.". Jika ada lebih dari satu, berikan daftar ringkas dan totalnya.]
"#,
        name = record.name(),
        class_name = record.class_name(),
        start = record.school_start_time,
        arrival = record.arrival_time(),
        duration = record.duration_minutes,
        category = record.category,
        reason = record.reason().unwrap_or(NO_REASON),
        history = format_history(history),
        m1 = SUMMARY_MARKER,
        l1 = SUMMARY_LABEL,
        m2 = WHATSAPP_MARKER,
        l2 = WHATSAPP_LABEL,
        m3 = RECAP_MARKER,
        l3 = RECAP_LABEL,
    )
}

/// One line per record of the month.
pub fn format_month_data(records: &[TardinessRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "- Tanggal: {}, Nama: {}, Kelas: {}, Terlambat: {} menit, Kategori: {}, Alasan: {}",
                record_date(r),
                r.name(),
                r.class_name(),
                r.duration_minutes,
                r.category,
                r.reason().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for the monthly analysis, answered as JSON `{report, parentMessage}`.
pub fn monthly_prompt(records: &[TardinessRecord], top_offender: Option<&TopOffender>) -> String {
    let parent_instruction = match top_offender {
        Some(top) if top.count >= PARENT_NOTICE_THRESHOLD => format!(
            "Isi \"parentMessage\" dengan pesan WhatsApp yang formal dan sopan untuk orang tua/wali dari ananda {} ({}) yang terlambat sebanyak {} kali bulan ini. Sapa dengan \"Yth. Bapak/Ibu Orang Tua/Wali dari ananda {}\" dan ajak orang tua untuk bekerja sama dengan pihak sekolah.",
            top.name, top.class_name, top.count, top.name
        ),
        _ => "Isi \"parentMessage\" dengan null.".to_string(),
    };

    format!(
        r#"Kamu adalah LazGo, seorang analis data sekolah yang bertugas membuat laporan bulanan tentang keterlambatan siswa.

Berikut adalah data mentah keterlambatan siswa untuk bulan ini:
{data}

---

Instruksi:
Berdasarkan data di atas, buatlah laporan analisis yang komprehensif dalam Bahasa Indonesia. Laporan harus mencakup poin-poin berikut, dengan format yang jelas menggunakan markdown (gunakan **...** untuk tebal).

**Laporan Analisis Keterlambatan Bulanan**

**1. Ringkasan Umum**
- Total Keterlambatan: [Jumlah total keterlambatan dalam sebulan]
- Rata-rata Durasi Keterlambatan: [Hitung rata-rata durasi keterlambatan dalam menit]
- Rincian Kategori:
    - Ringan: [Jumlah]
    - Sedang: [Jumlah]
    - Berat: [Jumlah]

**2. Tren dan Pola Utama**
- [Identifikasi tren yang paling menonjol. Contoh: "Keterlambatan paling sering terjadi pada hari Senin pagi" atau "Terjadi peningkatan jumlah keterlambatan di minggu ketiga bulan ini".]
- [Sebutkan pola lain yang menarik jika ada.]

**3. Siswa dengan Keterlambatan Terbanyak**
- [Sebutkan 3-5 siswa yang paling sering terlambat, beserta jumlah keterlambatannya. Contoh: "1. Nama Siswa (Kelas) - 5 kali terlambat".]

**4. Rekomendasi**
- [Berikan 1-2 rekomendasi singkat yang dapat ditindaklanjuti oleh pihak sekolah berdasarkan analisis.]

Gunakan bahasa yang profesional dan mudah dipahami.

Jawab HANYA dalam format JSON dengan struktur {{"report": string, "parentMessage": string | null}}. Letakkan seluruh laporan markdown di "report". {parent}
"#,
        data = format_month_data(records),
        parent = parent_instruction,
    )
}

/// Parent notice used when the service leaves `parentMessage` empty.
pub fn fallback_parent_message(top: &TopOffender, period: &str) -> String {
    format!(
        "Yth. Bapak/Ibu Orang Tua/Wali dari ananda *{name}*,\n\nBersama pesan ini kami sampaikan bahwa ananda {name} ({class_name}) tercatat terlambat datang ke sekolah sebanyak *{count} kali* pada periode {period}.\n\nKami mohon bantuan Bapak/Ibu untuk mendampingi ananda agar dapat hadir tepat waktu. Terima kasih atas perhatian dan kerja samanya.\n\n_Hormat kami,_\n_Pihak Sekolah_",
        name = top.name,
        class_name = top.class_name,
        count = top.count,
        period = period,
    )
}
