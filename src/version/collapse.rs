//! Sorting and collapsing of version lists by grouping granularity

use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::version::types::VersionRecord;

static MAJOR_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.").expect("major prefix pattern is valid"));
static MINOR_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.").expect("minor prefix pattern is valid"));
static PATCH_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+").expect("patch prefix pattern is valid")
});

/// Granularity used to keep one representative version per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionGroup {
    Major,
    Minor,
    Patch,
}

impl VersionGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionGroup::Major => "major",
            VersionGroup::Minor => "minor",
            VersionGroup::Patch => "patch",
        }
    }

    /// Grouping prefix of a version name, if it has one at this granularity
    pub fn prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        let re = match self {
            VersionGroup::Major => &MAJOR_PREFIX_RE,
            VersionGroup::Minor => &MINOR_PREFIX_RE,
            VersionGroup::Patch => &PATCH_PREFIX_RE,
        };
        re.find(name).map(|m| m.as_str())
    }
}

impl FromStr for VersionGroup {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(VersionGroup::Major),
            "minor" => Ok(VersionGroup::Minor),
            "patch" => Ok(VersionGroup::Patch),
            _ => Err(()),
        }
    }
}

/// Punctuation and symbols in collation order (CLDR root), all before digits
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Primary collation key of a single character.
///
/// Whitespace sorts first, then the listed punctuation in table order, then
/// other symbols by code point, then digits, then letters.
fn primary_key(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        (0, c as u32)
    } else if let Some(position) = PUNCTUATION_ORDER.chars().position(|p| p == c) {
        (1, position as u32)
    } else if c.is_ascii_digit() {
        (3, 0)
    } else if c.is_alphabetic() {
        (4, 0)
    } else {
        (2, c as u32)
    }
}

/// Compare two digit runs by numeric value without parsing (runs may overflow u64)
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn take_digits<'a>(s: &'a str) -> (&'a str, &'a str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Case-insensitive, numeric-aware comparison of version names.
///
/// Digit runs compare by value, so "1.10.0" sorts after "1.9.0". A name that
/// is a prefix of another sorts first ("1.0.0" < "1.0.0-beta").
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);

    loop {
        let (Some(ca), Some(cb)) = (a.chars().next(), b.chars().next()) else {
            return a.is_empty().cmp(&b.is_empty()).reverse();
        };

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let (da, rest_a) = take_digits(a);
            let (db, rest_b) = take_digits(b);
            match compare_digits(da, db) {
                Ordering::Equal => {
                    a = rest_a;
                    b = rest_b;
                    continue;
                }
                ordering => return ordering,
            }
        }

        let ordering = primary_key(ca)
            .cmp(&primary_key(cb))
            .then_with(|| ca.to_lowercase().cmp(cb.to_lowercase()));
        if ordering != Ordering::Equal {
            return ordering;
        }

        a = &a[ca.len_utf8()..];
        b = &b[cb.len_utf8()..];
    }
}

/// Sort versions descending, then keep the first version of each group.
///
/// Without a group the full sorted list is returned. With a group, names
/// without a grouping prefix are dropped.
pub fn collapse_versions(
    group: Option<VersionGroup>,
    versions: &[VersionRecord],
) -> Vec<VersionRecord> {
    let mut items = versions.to_vec();
    items.sort_by(|a, b| compare_names(&b.name, &a.name));

    let Some(group) = group else {
        return items;
    };

    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| match group.prefix(&item.name) {
            Some(prefix) => seen.insert(prefix.to_string()),
            None => false,
        })
        .collect()
}
