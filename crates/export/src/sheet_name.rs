//! Worksheet naming.
//!
//! Excel limits names to 31 characters, forbids `[ ] * ? / \ :` and
//! compares names case-insensitively.

use std::collections::HashSet;

/// Longest name Excel accepts.
pub const MAX_SHEET_NAME: usize = 31;

const FORBIDDEN: [char; 7] = ['[', ']', '*', '?', '/', '\\', ':'];

const FALLBACK: &str = "Sheet";

/// Strips forbidden characters and truncates to [`MAX_SHEET_NAME`].
#[must_use]
pub fn sanitize(name: &str) -> String {
    let cleaned: String = name.chars().filter(|c| !FORBIDDEN.contains(c)).collect();
    let truncated: String = trim_edges(&cleaned).chars().take(MAX_SHEET_NAME).collect();
    let truncated = trim_edges(&truncated);
    if truncated.is_empty() {
        FALLBACK.to_string()
    } else {
        truncated.to_string()
    }
}

// A leading or trailing apostrophe is rejected too.
fn trim_edges(name: &str) -> &str {
    name.trim_matches(|c: char| c.is_whitespace() || c == '\'')
}

/// Hands out unique sheet names for one workbook.
#[derive(Debug, Default)]
pub struct SheetNames {
    used: HashSet<String>,
}

impl SheetNames {
    /// Returns a sanitized name not yet used in this workbook.
    ///
    /// Clashes get a ` (2)`, ` (3)`, ... suffix; the stem is shortened so the
    /// result still fits.
    pub fn claim(&mut self, name: &str) -> String {
        let base = sanitize(name);
        if self.used.insert(base.to_lowercase()) {
            return base;
        }

        let mut n = 2usize;
        loop {
            let suffix = format!(" ({n})");
            let room = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
            let stem: String = base.chars().take(room).collect();
            let stem = match trim_edges(&stem) {
                "" => FALLBACK,
                trimmed => trimmed,
            };
            let candidate = format!("{stem}{suffix}");
            if self.used.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("UD Sumber Rejeki", "UD Sumber Rejeki")]
    #[case("UD [Tani]*Makmur?", "UD TaniMakmur")]
    #[case("Sayur/Buah\\Segar:Pagi", "SayurBuahSegarPagi")]
    #[case("'Kutip'", "Kutip")]
    #[case("[]*?", "Sheet")]
    #[case("UD Sumber Rejeki Makmur Abadi ' Jaya", "UD Sumber Rejeki Makmur Abadi")]
    #[case(" ' ", "Sheet")]
    fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn test_long_name_fits() {
        let name = "UD Sumber Rejeki Makmur [Cabang] Kota Bandung Utara";
        let sheet = sanitize(name);
        assert!(sheet.chars().count() <= MAX_SHEET_NAME);
        assert!(!sheet.contains(&FORBIDDEN[..]));
        assert!(sheet.starts_with("UD Sumber Rejeki Makmur Cabang"));
    }

    #[test]
    fn test_duplicates_get_suffix() {
        let mut names = SheetNames::default();
        let long = "Koperasi Produsen Sayur Lembang Sejahtera A";
        let other = "Koperasi Produsen Sayur Lembang Sejahtera B";

        let first = names.claim(long);
        let second = names.claim(other);
        assert_eq!(first.chars().count(), MAX_SHEET_NAME);
        assert_ne!(first, second);
        assert!(second.ends_with(" (2)"));
        assert!(second.chars().count() <= MAX_SHEET_NAME);

        assert_eq!(names.claim("Rekap"), "Rekap");
        assert_eq!(names.claim("REKAP"), "REKAP (2)");
    }

    #[test]
    fn test_suffixed_stem_drops_cut_apostrophe() {
        let mut names = SheetNames::default();
        // The 27th character is an apostrophe once the suffix needs room.
        let name = "UD Sumber Rejeki Makmur Ab' Jaya";
        let first = names.claim(name);
        let second = names.claim(name);
        assert_eq!(first, "UD Sumber Rejeki Makmur Ab' Jay");
        assert_eq!(second, "UD Sumber Rejeki Makmur Ab (2)");
        assert!(!second.contains('\''));
    }
}
