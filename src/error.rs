// SPDX-License-Identifier: MPL-2.0
use thiserror::Error as ThisError;

#[derive(Debug, Clone, ThisError)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    /// The on-disk store could not be encoded or decoded.
    #[error("Storage Error: {0}")]
    Storage(String),
    /// A stored JSON value could not be encoded or decoded.
    #[error("Encoding Error: {0}")]
    Encoding(String),
}

impl Error {
    /// Short user-facing text shown in a warning toast when this error is surfaced.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Io(_) => "Could not access the data directory",
            Error::Config(_) => "Settings could not be saved",
            Error::Storage(_) => "Your changes could not be saved",
            Error::Encoding(_) => "Stored data could not be encoded",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl<E: std::fmt::Debug> From<ciborium::de::Error<E>> for Error {
    fn from(err: ciborium::de::Error<E>) -> Self {
        Error::Storage(format!("{err:?}"))
    }
}

impl<E: std::fmt::Debug> From<ciborium::ser::Error<E>> for Error {
    fn from(err: ciborium::ser::Error<E>) -> Self {
        Error::Storage(format!("{err:?}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn json_error_maps_to_encoding_variant() {
        let json_error = serde_json::from_str::<Vec<u32>>("[1, oops]").unwrap_err();
        let err: Error = json_error.into();
        assert!(matches!(err, Error::Encoding(_)));
        assert_eq!(err.user_message(), "Stored data could not be encoded");
    }

    #[test]
    fn user_messages_are_distinct() {
        let keys = [
            Error::Io(String::new()).user_message(),
            Error::Config(String::new()).user_message(),
            Error::Storage(String::new()).user_message(),
            Error::Encoding(String::new()).user_message(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
