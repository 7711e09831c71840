use std::error::Error;
use std::fmt::{Display, Formatter};
use gbop_core::CatalogError;

#[derive(Debug)]
pub enum BrowserError {
    Catalog(CatalogError),
    UnknownOpCode(String),
    MissingOpCode,
    Json(String),
}

impl From<CatalogError> for BrowserError {
    fn from(error: CatalogError) -> Self {
        BrowserError::Catalog(error)
    }
}

impl From<serde_json::Error> for BrowserError {
    fn from(error: serde_json::Error) -> Self {
        BrowserError::Json(error.to_string())
    }
}

impl Error for BrowserError {}

impl Display for BrowserError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            BrowserError::Catalog(error) => write!(f, "-> catalog error: {}", error),
            BrowserError::UnknownOpCode(s) => { write!(f, "unknown opcode: {}", s) },
            BrowserError::MissingOpCode => { write!(f, "no opcode given") },
            BrowserError::Json(s) => { write!(f, "json error: {}", s) }
        }
    }
}
