//! Four-part version numbers (`major.minor[.build[.revision]]`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid version `{0}`")]
pub struct ParseVersionError(String);

/// A version number with two to four components.
///
/// Missing trailing components sort before any present one, so `1.2`
/// precedes `1.2.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    pub fn with_build(mut self, build: u32) -> Self {
        self.build = Some(build);
        self
    }

    /// Sets the revision; a missing build becomes `0`.
    pub fn with_revision(mut self, revision: u32) -> Self {
        self.build = Some(self.build.unwrap_or(0));
        self.revision = Some(revision);
        self
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
            if let Some(revision) = self.revision {
                write!(f, ".{revision}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError(s.to_string());
        let parts = s
            .trim()
            .split('.')
            .map(|part| {
                let part = part.trim();
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<u32>, _>>()?;

        match parts.as_slice() {
            [major, minor] => Ok(Version::new(*major, *minor)),
            [major, minor, build] => Ok(Version::new(*major, *minor).with_build(*build)),
            [major, minor, build, revision] => Ok(Version::new(*major, *minor)
                .with_build(*build)
                .with_revision(*revision)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_to_four_parts() {
        assert_eq!("1.2".parse::<Version>().unwrap(), Version::new(1, 2));
        assert_eq!(
            " 1.2.3.4 ".parse::<Version>().unwrap().to_string(),
            "1.2.3.4"
        );
        assert!("1".parse::<Version>().is_err());
        assert!("1.2.3.4.5".parse::<Version>().is_err());
        assert!("1.-2".parse::<Version>().is_err());
        assert!("1..2".parse::<Version>().is_err());
    }

    #[test]
    fn ordering_treats_missing_parts_as_lowest() {
        let a: Version = "1.2".parse().unwrap();
        let b: Version = "1.2.0".parse().unwrap();
        let c: Version = "1.10".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
    }
}
