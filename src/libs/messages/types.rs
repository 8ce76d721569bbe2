#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleSchool,
    ConfigModuleAi,
    ApiKeyNotSet,

    // === FORM MESSAGES ===
    RequiredFieldsMissing,
    InvalidTimeFormat(String), // raw input
    OnTimeNotRecorded(String), // student name
    KeepTypedName(String),     // typed name

    // === RECORD MESSAGES ===
    RecordSaved {
        name: String,
        duration: u32,
        category: String,
    },
    RecordsLoadFailed(String),  // error
    NoRecordsToday,
    TodayHeader(String),        // long date
    MonthHeader(String),        // period label
    NoDataForMonth(String),     // period label
    AvailablePeriods(String),   // formatted list
    RecordIdAdjusted(String),   // new id

    // === AI MESSAGES ===
    AiGeneratingDaily,
    AiGeneratingMonthly,
    AiDailyFailed,
    AiMonthlyFailed,
    AiRequestFailed(String),    // error
    AiResponseUnparsable(String), // reason
    AiSummaryHeader,
    AiWhatsappHeader,
    AiDailyRecapHeader,
    AiMonthlyReportHeader,
    ParentNotificationHeader,
    ParentNotificationFor {
        name: String,
        class_name: String,
        count: usize,
    },
    NoAiOutputToday,
    DailyCacheLoadFailed(String), // error
    RecordKeptAfterAiFailure,

    // === INSIGHT MESSAGES ===
    InsightHeader,
    InsightNoData,

    // === EXPORT MESSAGES ===
    ExportingData(String, String), // scope, format
    ExportCompleted(String),       // path
    NothingToExport,
    MissingAiSummary,

    // === THEME MESSAGES ===
    ThemeCurrent(String),
    ThemeChanged(String),
    ThemeLoadFailed(String), // error

    // === ROSTER MESSAGES ===
    RosterImported(usize),
    RosterEmpty,
    RosterLoadFailed(String), // error

    // === PROMPTS ===
    PromptSelectModules,
    PromptSchoolStartTime,
    PromptOnTimePolicy,
    PromptAiModel,
    PromptAiApiUrl,
    PromptStudentName,
    PromptStudentClass,
    PromptArrivalTime,
    PromptReason,
    PromptCustomReason,
    PromptPickStudent,
    PromptPickClass,
}
