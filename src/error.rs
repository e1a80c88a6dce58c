use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidHorizon { start_year: i32, horizon_year: i32 },
    InvalidRegion { vertices: usize },
    ReferenceData { message: String },
    Config { message: String },
    InvalidRequest { message: String },
    Io { message: String },
    InternalError { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidHorizon {
                start_year,
                horizon_year,
            } => write!(
                f,
                "horizon year {horizon_year} must be after start year {start_year}"
            ),
            Error::InvalidRegion { vertices } => write!(
                f,
                "region needs at least 3 distinct vertices, got {vertices}"
            ),
            Error::ReferenceData { message } => write!(f, "invalid reference data: {message}"),
            Error::Config { message } => write!(f, "invalid configuration: {message}"),
            Error::InvalidRequest { message } => write!(f, "invalid request: {message}"),
            Error::Io { message } => write!(f, "io error: {message}"),
            Error::InternalError { message } => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::ReferenceData {
            message: e.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_horizon() {
        let err = Error::InvalidHorizon {
            start_year: 2050,
            horizon_year: 2025,
        };
        assert_eq!(
            err.to_string(),
            "horizon year 2025 must be after start year 2050"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::ReferenceData { .. }));
    }

    #[test]
    fn test_display_invalid_request() {
        let err = Error::InvalidRequest {
            message: "missing field `building`".to_string(),
        };
        assert_eq!(err.to_string(), "invalid request: missing field `building`");
    }
}
