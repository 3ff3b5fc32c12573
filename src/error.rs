use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    Unspecified(String),
    FetchError(String),
    ApiError(u16, String),
    ParseError(String),
    NotFound,
}

impl Error {
    /// True for failures that happened while retrieving the feed, before any
    /// parsing took place.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::FetchError(_) | Error::ApiError(_, _))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unspecified(g) => write!(f, "{}", g),
            Error::FetchError(g) => write!(f, "{}", g),
            Error::ApiError(status, g) => write!(f, "Server responded {} ({}).", status, g),
            Error::ParseError(g) => write!(f, "{}", g),
            Error::NotFound => write!(f, "Not found."),
        }
    }
}

impl std::error::Error for Error {}
