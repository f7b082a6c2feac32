//! Rendering of remaining seconds as a fixed-width `HH:MM:SS` string.

use std::fmt;
use std::str::FromStr;

use super::EtaError;

/// Placeholder shown when no estimate is available.
pub const UNKNOWN_TIME: &str = "??:??:??";

/// Largest value that fits two-digit hours (99:59:59).
pub const MAX_DISPLAYABLE_SECS: u64 = 99 * 3600 + 59 * 60 + 59;

const SECS_PER_DAY: u64 = 86_400;

/// How to render an estimate larger than [`MAX_DISPLAYABLE_SECS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfBoundsFormat {
    /// Raw `HH:MM:SS` with unbounded hours, e.g. `100:00:00`.
    #[default]
    Literal,
    /// `??:??:??`
    Unknown,
    /// `> N Days`
    Friendly,
}

impl OutOfBoundsFormat {
    /// Resolve an optional format name. `None` means no special handling
    /// (`Literal`); only `unknown` and `friendly` are accepted as names.
    pub fn from_name(name: Option<&str>) -> Result<Self, EtaError> {
        match name {
            None => Ok(Self::Literal),
            Some(n) => n.parse(),
        }
    }

    /// Format name as accepted by [`OutOfBoundsFormat::from_name`]; `None` for `Literal`.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Literal => None,
            Self::Unknown => Some("unknown"),
            Self::Friendly => Some("friendly"),
        }
    }

    /// Render whole seconds remaining under this policy.
    pub fn render(&self, secs: u64) -> String {
        if secs <= MAX_DISPLAYABLE_SECS {
            return format_hms(secs);
        }
        match self {
            Self::Literal => format_hms(secs),
            Self::Unknown => UNKNOWN_TIME.to_string(),
            Self::Friendly => format!("> {} Days", secs / SECS_PER_DAY),
        }
    }
}

impl FromStr for OutOfBoundsFormat {
    type Err = EtaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "friendly" => Ok(Self::Friendly),
            other => Err(EtaError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutOfBoundsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("literal"))
    }
}

/// Zero-padded `HH:MM:SS`; hours grow past two digits when needed.
pub fn format_hms(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_is_zero_padded() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(13332), "03:42:12");
        assert_eq!(format_hms(MAX_DISPLAYABLE_SECS), "99:59:59");
    }

    #[test]
    fn hms_hours_are_unbounded() {
        assert_eq!(format_hms(360_000), "100:00:00");
    }

    #[test]
    fn in_bounds_ignores_policy() {
        for policy in [
            OutOfBoundsFormat::Literal,
            OutOfBoundsFormat::Unknown,
            OutOfBoundsFormat::Friendly,
        ] {
            assert_eq!(policy.render(MAX_DISPLAYABLE_SECS), "99:59:59");
        }
    }

    #[test]
    fn out_of_bounds_policies() {
        let secs = MAX_DISPLAYABLE_SECS + 1;
        assert_eq!(OutOfBoundsFormat::Literal.render(secs), "100:00:00");
        assert_eq!(OutOfBoundsFormat::Unknown.render(secs), UNKNOWN_TIME);
        assert_eq!(OutOfBoundsFormat::Friendly.render(secs), "> 4 Days");
        assert_eq!(OutOfBoundsFormat::Friendly.render(10 * 86_400), "> 10 Days");
    }

    #[test]
    fn names_parse() {
        assert_eq!(
            OutOfBoundsFormat::from_name(None).unwrap(),
            OutOfBoundsFormat::Literal
        );
        assert_eq!(
            OutOfBoundsFormat::from_name(Some("friendly")).unwrap(),
            OutOfBoundsFormat::Friendly
        );
        assert_eq!(
            "unknown".parse::<OutOfBoundsFormat>().unwrap(),
            OutOfBoundsFormat::Unknown
        );
        let err = OutOfBoundsFormat::from_name(Some("foo")).unwrap_err();
        assert_eq!(err, EtaError::InvalidFormat("foo".to_string()));
    }
}
