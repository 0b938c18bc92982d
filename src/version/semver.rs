use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::version::types::VersionRecord;

/// https://semver.org/#is-there-a-suggested-regular-expression-regex-to-check-a-semver-string
static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<major>0|[1-9][0-9]*)\.(?P<minor>0|[1-9][0-9]*)\.(?P<patch>0|[1-9][0-9]*)(?:-(?P<prerelease>(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+(?P<build>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("semver pattern is valid")
});

/// Template variables, iterated in insertion order.
/// A `None` value is a known variable without a value (substituted as "").
pub type Variables = IndexMap<String, Option<String>>;

/// Semver fields of a version name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemverParts {
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub prerelease: Option<String>,
    pub build: Option<String>,
    /// "MAJOR.MINOR.PATCH"
    pub core: String,
    /// The full version string
    pub version: String,
}

/// Structured fields derived from a [`VersionRecord`]
///
/// `parts` is only present when the name is strict semver. Registries may list
/// non-semver names, so a failed parse is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionDescriptor {
    pub parts: Option<SemverParts>,
    pub tag: Option<String>,
}

impl VersionDescriptor {
    pub fn is_semver(&self) -> bool {
        self.parts.is_some()
    }

    /// Variables for template resolution, in semver field order followed by
    /// `version`, `core` and `tag`.
    ///
    /// Non-semver descriptors only expose `tag`, leaving every other
    /// placeholder unresolved.
    pub fn variables(&self) -> Variables {
        let mut variables = Variables::new();
        if let Some(parts) = &self.parts {
            variables.insert("major".to_string(), Some(parts.major.clone()));
            variables.insert("minor".to_string(), Some(parts.minor.clone()));
            variables.insert("patch".to_string(), Some(parts.patch.clone()));
            variables.insert("prerelease".to_string(), parts.prerelease.clone());
            variables.insert("build".to_string(), parts.build.clone());
            variables.insert("version".to_string(), Some(parts.version.clone()));
            variables.insert("core".to_string(), Some(parts.core.clone()));
        }
        variables.insert("tag".to_string(), self.tag.clone());
        variables
    }
}

/// Parse a version name into semver fields, or `None` if it isn't strict semver
pub fn parse_semver(name: &str) -> Option<SemverParts> {
    let caps = SEMVER_RE.captures(name)?;
    let group = |key: &str| caps.name(key).map(|m| m.as_str().to_string());

    let major = group("major")?;
    let minor = group("minor")?;
    let patch = group("patch")?;
    let core = format!("{}.{}.{}", major, minor, patch);

    Some(SemverParts {
        major,
        minor,
        patch,
        prerelease: group("prerelease"),
        build: group("build"),
        core,
        version: name.to_string(),
    })
}

/// Describe a version record for templating.
///
/// Never fails: names that don't match the semver grammar yield a descriptor
/// carrying only the tag.
pub fn describe_version(record: &VersionRecord) -> VersionDescriptor {
    VersionDescriptor {
        parts: parse_semver(&record.name),
        tag: record.tag.clone(),
    }
}
