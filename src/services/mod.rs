//! Service layer for the analyzer.
//!
//! This module contains the business logic for:
//! - eCFR API access (`EcfrClient`, `TitleSource`)
//! - Chapter text extraction (`extract_chapters`)

mod ecfr;
mod extract;

pub use ecfr::{EcfrClient, TitleSource};
pub use extract::extract_chapters;
