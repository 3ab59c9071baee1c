//! Android Gradle Plugin versions and the constraints that gate syntax on them.

use std::cmp::Ordering;
use std::fmt;

/// A parsed AGP version such as `7.0.0` or `8.1.0-alpha05`.
///
/// Pre-release versions order before the corresponding release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgpVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    /// `alpha`/`beta`/`rc` qualifier with its number, `None` for a release
    pub preview: Option<(PreviewKind, u32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreviewKind {
    Alpha,
    Beta,
    Rc,
}

impl AgpVersion {
    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            preview: None,
        }
    }

    /// Parse `major.minor[.micro][-qualifierN]`. Returns `None` on anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (numbers, qualifier) = match text.split_once('-') {
            Some((numbers, qualifier)) => (numbers, Some(qualifier)),
            None => (text, None),
        };

        let mut parts = numbers.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let micro = match parts.next() {
            Some(micro) => micro.parse().ok()?,
            None => 0,
        };
        if parts.next().is_some() {
            return None;
        }

        let preview = match qualifier {
            None => None,
            Some(qualifier) => Some(parse_preview(qualifier)?),
        };

        Some(Self {
            major,
            minor,
            micro,
            preview,
        })
    }

    pub fn is_preview(&self) -> bool {
        self.preview.is_some()
    }
}

fn parse_preview(qualifier: &str) -> Option<(PreviewKind, u32)> {
    let split = qualifier
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(qualifier.len());
    let (kind, number) = qualifier.split_at(split);
    let kind = match kind.to_ascii_lowercase().as_str() {
        "alpha" => PreviewKind::Alpha,
        "beta" => PreviewKind::Beta,
        "rc" => PreviewKind::Rc,
        _ => return None,
    };
    let number = if number.is_empty() {
        0
    } else {
        number.parse().ok()?
    };
    Some((kind, number))
}

impl Ord for AgpVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.micro)
            .cmp(&(other.major, other.minor, other.micro))
            .then_with(|| match (&self.preview, &other.preview) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for AgpVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AgpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if let Some((kind, number)) = self.preview {
            let kind = match kind {
                PreviewKind::Alpha => "alpha",
                PreviewKind::Beta => "beta",
                PreviewKind::Rc => "rc",
            };
            write!(f, "-{kind}{number:02}")?;
        }
        Ok(())
    }
}

/// Gate on the active AGP version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionConstraint {
    /// Satisfied by versions at or above the bound
    AgpMin(AgpVersion),
    /// Satisfied by versions strictly below the bound
    AgpMax(AgpVersion),
}

impl VersionConstraint {
    pub const fn agp_min(major: u32, minor: u32, micro: u32) -> Self {
        Self::AgpMin(AgpVersion::new(major, minor, micro))
    }

    pub const fn agp_max(major: u32, minor: u32, micro: u32) -> Self {
        Self::AgpMax(AgpVersion::new(major, minor, micro))
    }

    /// An unknown version (`None`) satisfies every constraint.
    pub fn is_ok_with(&self, version: Option<&AgpVersion>) -> bool {
        let Some(version) = version else {
            return true;
        };
        match self {
            Self::AgpMin(min) => version >= min,
            Self::AgpMax(max) => version < max,
        }
    }
}
