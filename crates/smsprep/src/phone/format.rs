//! Regional phone number formats.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Accepted shapes of a canonical phone number for one region.
///
/// A number is valid in exactly two forms: the domestic form (trunk prefix
/// plus subscriber number) and the international form (country code plus
/// the same subscriber number without the trunk digit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalFormat {
    /// Human-readable region name.
    pub region: String,
    /// Leading digits of the domestic form.
    pub domestic_prefix: String,
    /// Total digit count of the domestic form.
    pub domestic_len: usize,
    /// Leading digits of the international form.
    pub international_prefix: String,
    /// Total digit count of the international form.
    pub international_len: usize,
}

/// Which accepted form a number matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneKind {
    Domestic,
    International,
}

/// Why a canonical number failed the format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum FormatIssue {
    /// No digits at all.
    Empty,
    /// Starts like a valid number but has the wrong digit count.
    WrongLength { digits: usize },
    /// Has a valid digit count but the wrong leading digits for it.
    WrongPrefix { digits: usize },
    /// Neither the length nor the prefix matches any form.
    WrongLengthAndPrefix { digits: usize },
}

impl fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatIssue::Empty => write!(f, "no digits"),
            FormatIssue::WrongLength { digits } => write!(f, "wrong length ({} digits)", digits),
            FormatIssue::WrongPrefix { digits } => {
                write!(f, "wrong prefix for a {}-digit number", digits)
            }
            FormatIssue::WrongLengthAndPrefix { digits } => {
                write!(f, "wrong length ({} digits) and prefix", digits)
            }
        }
    }
}

impl RegionalFormat {
    /// Philippine mobile numbers: `09XXXXXXXXX` or `639XXXXXXXXX`.
    pub fn philippines() -> Self {
        Self {
            region: "Philippines".to_string(),
            domestic_prefix: "09".to_string(),
            domestic_len: 11,
            international_prefix: "63".to_string(),
            international_len: 12,
        }
    }

    fn forms(&self) -> [(&str, usize, PhoneKind); 2] {
        [
            (&self.domestic_prefix, self.domestic_len, PhoneKind::Domestic),
            (
                &self.international_prefix,
                self.international_len,
                PhoneKind::International,
            ),
        ]
    }

    /// Classify a canonical digit string.
    pub fn check(&self, digits: &str) -> Result<PhoneKind, FormatIssue> {
        if digits.is_empty() {
            return Err(FormatIssue::Empty);
        }
        let len = digits.len();
        let forms = self.forms();

        if let Some((_, _, kind)) = forms
            .iter()
            .find(|(prefix, expected, _)| len == *expected && digits.starts_with(prefix))
        {
            return Ok(*kind);
        }

        let length_fits = forms.iter().any(|(_, expected, _)| len == *expected);
        let prefix_fits = forms.iter().any(|(prefix, _, _)| digits.starts_with(prefix));

        Err(match (length_fits, prefix_fits) {
            (true, _) => FormatIssue::WrongPrefix { digits: len },
            (false, true) => FormatIssue::WrongLength { digits: len },
            (false, false) => FormatIssue::WrongLengthAndPrefix { digits: len },
        })
    }

    /// Whether a canonical digit string is in an accepted form.
    pub fn is_valid(&self, digits: &str) -> bool {
        self.check(digits).is_ok()
    }

    /// Whether two canonical numbers are the domestic and international
    /// forms of the same subscriber.
    ///
    /// ```
    /// use smsprep::phone::RegionalFormat;
    ///
    /// let ph = RegionalFormat::philippines();
    /// assert!(ph.are_related("09123456789", "639123456789"));
    /// assert!(!ph.are_related("09123456789", "639123456780"));
    /// ```
    pub fn are_related(&self, a: &str, b: &str) -> bool {
        let (domestic, international) = if a.len() == self.domestic_len
            && b.len() == self.international_len
        {
            (a, b)
        } else if b.len() == self.domestic_len && a.len() == self.international_len {
            (b, a)
        } else {
            return false;
        };

        match (
            international.strip_prefix(self.international_prefix.as_str()),
            domestic.get(1..),
        ) {
            (Some(intl_rest), Some(dom_rest)) => intl_rest == dom_rest,
            _ => false,
        }
    }

    /// One-line description of the accepted forms, for error messages.
    pub fn describe(&self) -> String {
        format!(
            "{} digits starting with {} or {} digits starting with {}",
            self.domestic_len,
            self.domestic_prefix,
            self.international_len,
            self.international_prefix
        )
    }
}

impl Default for RegionalFormat {
    fn default() -> Self {
        Self::philippines()
    }
}
