use std::fmt;

/// Final classification of a tracked path.
///
/// - `Untouched`: existed before the build and was never opened.
/// - `Accessed`: existed before the build and was opened, created or moved
///   over at least once while the shell was running.
/// - `Generated`: did not exist at scan time and was created (or moved in)
///   during the build.
///
/// The only transition is `Untouched -> Accessed`; `Generated` is a birth
/// state. Neither `Accessed` nor `Generated` is ever left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verdict {
    Untouched,
    Accessed,
    Generated,
}

impl Verdict {
    /// Single-character tag written to the report.
    pub fn tag(self) -> char {
        match self {
            Verdict::Accessed => 'A',
            Verdict::Generated => 'G',
            Verdict::Untouched => 'U',
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Untouched => "untouched",
            Verdict::Accessed => "accessed",
            Verdict::Generated => "generated",
        };
        f.write_str(s)
    }
}

/// What a notification says happened to a child of a watched directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Opened,
    Created,
    MovedIn,
    /// Anything else the kernel reports on a watched directory
    /// (`IN_IGNORED`, unsolicited events). Never classified.
    Other,
}

impl NotificationKind {
    /// Kinds that may bring a previously unknown path into existence.
    pub fn creates_entry(self) -> bool {
        matches!(self, NotificationKind::Created | NotificationKind::MovedIn)
    }
}
