use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named paper formats understood by the print request.
///
/// Serialized by canonical name; parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaperFormat {
    A3,
    A4,
    Letter,
    Legal,
    Tabloid,
}

impl PaperFormat {
    pub const ALL: [PaperFormat; 5] = [
        PaperFormat::A3,
        PaperFormat::A4,
        PaperFormat::Letter,
        PaperFormat::Legal,
        PaperFormat::Tabloid,
    ];

    /// Portrait dimensions in inches.
    pub fn size(self) -> PaperSize {
        let (width, height) = match self {
            PaperFormat::A4 => (8.27, 11.7),
            PaperFormat::A3 => (11.7, 16.5),
            PaperFormat::Letter => (8.5, 11.0),
            PaperFormat::Legal => (8.5, 14.0),
            PaperFormat::Tabloid => (11.0, 17.0),
        };
        PaperSize { width, height }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperFormat::A3 => "A3",
            PaperFormat::A4 => "A4",
            PaperFormat::Letter => "Letter",
            PaperFormat::Legal => "Legal",
            PaperFormat::Tabloid => "Tabloid",
        }
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperFormat {
    type Err = PaperParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PaperFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PaperParseError::UnknownFormat(wanted.to_string()))
    }
}

impl TryFrom<String> for PaperFormat {
    type Error = PaperParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaperFormat> for String {
    fn from(format: PaperFormat) -> Self {
        format.name().to_string()
    }
}

/// Paper dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaperSize {
    pub width: f64,
    pub height: f64,
}

impl PaperSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Swaps the axes when printing in landscape.
    pub fn oriented(self, landscape: bool) -> Self {
        if landscape {
            Self {
                width: self.height,
                height: self.width,
            }
        } else {
            self
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Error)]
pub enum PaperParseError {
    #[error("Unknown paper format '{0}': expected one of A3, A4, Letter, Legal, Tabloid")]
    UnknownFormat(String),
    #[error("Invalid paper size format: expected WIDTHxHEIGHT in inches (e.g., 8.5x11)")]
    InvalidFormat,
    #[error("Invalid width: {0}")]
    InvalidWidth(String),
    #[error("Invalid height: {0}")]
    InvalidHeight(String),
    #[error("Width must be positive")]
    NonPositiveWidth,
    #[error("Height must be positive")]
    NonPositiveHeight,
}

impl FromStr for PaperSize {
    type Err = PaperParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(['x', 'X']).collect();
        if parts.len() != 2 {
            return Err(PaperParseError::InvalidFormat);
        }

        let width: f64 = parts[0]
            .trim()
            .parse()
            .map_err(|_| PaperParseError::InvalidWidth(parts[0].trim().to_string()))?;

        let height: f64 = parts[1]
            .trim()
            .parse()
            .map_err(|_| PaperParseError::InvalidHeight(parts[1].trim().to_string()))?;

        if !width.is_finite() || width <= 0.0 {
            return Err(PaperParseError::NonPositiveWidth);
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(PaperParseError::NonPositiveHeight);
        }

        Ok(PaperSize { width, height })
    }
}

impl TryFrom<String> for PaperSize {
    type Error = PaperParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaperSize> for String {
    fn from(size: PaperSize) -> Self {
        size.to_string()
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Either a named format or explicit dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageSize {
    Format(PaperFormat),
    Custom(PaperSize),
}

impl PageSize {
    pub fn dimensions(&self) -> PaperSize {
        match self {
            PageSize::Format(format) => format.size(),
            PageSize::Custom(size) => *size,
        }
    }

    pub fn format(&self) -> Option<PaperFormat> {
        match self {
            PageSize::Format(format) => Some(*format),
            PageSize::Custom(_) => None,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Format(format) => fmt::Display::fmt(format, f),
            PageSize::Custom(size) => fmt::Display::fmt(size, f),
        }
    }
}

impl From<PaperFormat> for PageSize {
    fn from(format: PaperFormat) -> Self {
        PageSize::Format(format)
    }
}

impl From<PaperSize> for PageSize {
    fn from(size: PaperSize) -> Self {
        PageSize::Custom(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dimensions() {
        assert_eq!(PaperFormat::A4.size(), PaperSize::new(8.27, 11.7));
        assert_eq!(PaperFormat::A3.size(), PaperSize::new(11.7, 16.5));
        assert_eq!(PaperFormat::Letter.size(), PaperSize::new(8.5, 11.0));
        assert_eq!(PaperFormat::Legal.size(), PaperSize::new(8.5, 14.0));
        assert_eq!(PaperFormat::Tabloid.size(), PaperSize::new(11.0, 17.0));
    }

    #[test]
    fn test_format_parse_ignores_case() {
        assert_eq!("a4".parse::<PaperFormat>().unwrap(), PaperFormat::A4);
        assert_eq!(" LETTER ".parse::<PaperFormat>().unwrap(), PaperFormat::Letter);
        assert_eq!("tabloid".parse::<PaperFormat>().unwrap(), PaperFormat::Tabloid);
        assert!("B5".parse::<PaperFormat>().is_err());
    }

    #[test]
    fn test_format_display_is_canonical() {
        assert_eq!(PaperFormat::Legal.to_string(), "Legal");
        assert_eq!(PaperFormat::A3.to_string(), "A3");
    }

    #[test]
    fn test_parse_size() {
        let size: PaperSize = "8.5x11".parse().unwrap();
        assert_eq!(size, PaperSize::new(8.5, 11.0));

        let size: PaperSize = " 11.7 X 16.5 ".parse().unwrap();
        assert_eq!(size, PaperSize::new(11.7, 16.5));
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(matches!(
            "8.5".parse::<PaperSize>(),
            Err(PaperParseError::InvalidFormat)
        ));
        assert!(matches!(
            "8.5x11x2".parse::<PaperSize>(),
            Err(PaperParseError::InvalidFormat)
        ));
        assert!(matches!(
            "abcx11".parse::<PaperSize>(),
            Err(PaperParseError::InvalidWidth(_))
        ));
        assert!(matches!(
            "8.5x".parse::<PaperSize>(),
            Err(PaperParseError::InvalidHeight(_))
        ));
    }

    #[test]
    fn test_parse_size_rejects_non_positive() {
        assert!(matches!(
            "0x11".parse::<PaperSize>(),
            Err(PaperParseError::NonPositiveWidth)
        ));
        assert!(matches!(
            "8.5x-1".parse::<PaperSize>(),
            Err(PaperParseError::NonPositiveHeight)
        ));
        assert!("infx11".parse::<PaperSize>().is_err());
    }

    #[test]
    fn test_oriented_swaps_for_landscape() {
        let size = PaperFormat::Letter.size();
        assert_eq!(size.oriented(false), size);
        assert_eq!(size.oriented(true), PaperSize::new(11.0, 8.5));
    }

    #[test]
    fn test_page_size_serde_shape() {
        let json = serde_json::to_string(&PageSize::Format(PaperFormat::A4)).unwrap();
        assert_eq!(json, r#"{"format":"A4"}"#);

        let json = serde_json::to_string(&PageSize::Custom(PaperSize::new(8.5, 11.0))).unwrap();
        assert_eq!(json, r#"{"custom":"8.5x11"}"#);

        let back: PageSize = serde_json::from_str(r#"{"custom":"5x7"}"#).unwrap();
        assert_eq!(back.dimensions(), PaperSize::new(5.0, 7.0));
        assert!(back.format().is_none());
        assert_eq!(back.to_string(), "5x7");
    }

    #[test]
    fn test_format_serde_ignores_case() {
        let back: PageSize = serde_json::from_str(r#"{"format":"letter"}"#).unwrap();
        assert_eq!(back, PageSize::Format(PaperFormat::Letter));

        let format: PaperFormat = serde_json::from_str(r#""TABLOID""#).unwrap();
        assert_eq!(format, PaperFormat::Tabloid);
        assert_eq!(serde_json::to_string(&format).unwrap(), r#""Tabloid""#);

        assert!(serde_json::from_str::<PaperFormat>(r#""B5""#).is_err());
    }
}
