use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::parse::{parse_version, ParseError};

/// A dotted numeric version such as `10.6.8`, stored as 16-bit components.
///
/// Ordering compares component by component, treating missing trailing
/// components as zero, so `1.0` and `1` are equal.
#[derive(Debug, Clone, Default)]
pub struct Version {
    components: Vec<u16>,
}

impl Version {
    #[must_use]
    pub fn from_components(components: Vec<u16>) -> Self {
        Self { components }
    }

    #[must_use]
    pub fn components(&self) -> &[u16] {
        &self.components
    }

    /// Parse a driver date in `mm-dd-yyyy` form into the version `yyyy.mm.dd`,
    /// so that component ordering is chronological.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] unless the input splits into exactly three
    /// hyphen-separated numeric parts.
    pub fn from_date(date: &str) -> Result<Self, ParseError> {
        let pieces: Vec<&str> = date.split('-').collect();
        let [month, day, year] = pieces.as_slice() else {
            return Err(ParseError::new(date, "expected mm-dd-yyyy"));
        };
        format!("{year}.{month}.{day}")
            .parse()
            .map_err(|_| ParseError::new(date, "expected mm-dd-yyyy"))
    }

    /// Parse an operating system release string, ignoring everything from the
    /// first character that is neither a digit nor a dot.
    #[must_use]
    pub fn from_os_release(release: &str) -> Option<Self> {
        let end = release
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(release.len());
        release[..end].parse().ok()
    }

    /// Component-wise equality limited to this version's own length: the
    /// candidate's missing components count as zero and its extra components
    /// are ignored. `10.6` therefore matches `10.6.0` and `10.6.5`.
    pub(crate) fn is_prefix_of(&self, candidate: &Version) -> bool {
        self.components
            .iter()
            .enumerate()
            .all(|(i, &c)| candidate.components.get(i).copied().unwrap_or(0) == c)
    }
}

/// Rewrite `major.digits` so every digit after the first dot becomes its own
/// component: `8.103` becomes `8.1.0.3`. Any other shape is returned unchanged.
#[must_use]
pub fn numerical_to_lexical(numerical: &str) -> Cow<'_, str> {
    let Some((major, rest)) = numerical.split_once('.') else {
        return Cow::Borrowed(numerical);
    };
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Cow::Borrowed(numerical);
    }
    let mut lexical = String::with_capacity(major.len() + rest.len() * 2);
    lexical.push_str(major);
    for digit in rest.chars() {
        lexical.push('.');
        lexical.push(digit);
    }
    Cow::Owned(lexical)
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s).map(Self::from_components)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let a = self.components.get(i).copied().unwrap_or(0);
                let b = other.components.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
