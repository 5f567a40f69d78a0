/// Keyword constants shared by the sheet scanners.
/// Matching is always done against lower-cased cell text.

// Substrings that mark a punch cell as an explicit absence
pub const ABSENCE_MARKERS: &[&str] = &["absen", "ijin", "izin", "sakit", "cuti", "libur"];

// A cell holding only this token is also treated as absence
pub const ABSENCE_DASH: &str = "-";

// Department tokens: interns are filed under R&D, permanent staff under Office
pub const INTERN_DEPARTMENT_TOKENS: &[&str] = &["rnd", "r&d"];
pub const PERMANENT_DEPARTMENT_TOKENS: &[&str] = &["office"];

/// Structural and label words that can never be an employee name.
pub const NAME_DENYLIST: &[&str] = &[
    "name",
    "nama",
    "employee",
    "karyawan",
    "dept",
    "department",
    "departemen",
    "date",
    "time",
    "jam",
    "masuk",
    "pulang",
    "tanggal",
    "total",
    "report",
    "laporan",
    "rnd",
    "r&d",
    "office",
    "check",
    // Weekday headers
    "senin",
    "selasa",
    "rabu",
    "kamis",
    "jumat",
    "sabtu",
    "minggu",
    "sen",
    "sel",
    "rab",
    "kam",
    "jum",
    "sab",
    "min",
    "mon",
    "tue",
    "wed",
    "thu",
    "fri",
    "sat",
    "sun",
];

/// Extra words rejected only by strict profiles.
pub const STRICT_NAME_DENYLIST: &[&str] = &[
    "attendance",
    "absensi",
    "kehadiran",
    "periode",
    "period",
    "shift",
    "schedule",
    "jadwal",
    "kerja",
    "nik",
    "id",
    "no",
];

// Sheet names containing these are summaries, never data sheets
pub const SUMMARY_SHEET_MARKERS: &[&str] = &["rekap", "log"];

/// Lowest data sheet name recognised when no marker is configured.
pub const DEFAULT_SHEET_MARKER: &str = "14.15.17";

// Punch row labels
pub const CHECK_IN_LABELS: &[&str] = &["masuk"];
pub const CHECK_IN_WORDS: &[&str] = &["in"];
pub const CHECK_OUT_LABELS: &[&str] = &["pulang"];
pub const CHECK_OUT_WORDS: &[&str] = &["out"];
pub const FIRST_SHIFT_LABEL: &str = "jam kerja 1";
pub const SECOND_SHIFT_LABEL: &str = "jam kerja 2";

// Serialized status values at the persistence boundary
pub const STATUS_PERMANENT: &str = "Karyawan";
pub const STATUS_INTERN: &str = "Magang";

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV_VAR: &str = "ABSENSI_CONFIG";
