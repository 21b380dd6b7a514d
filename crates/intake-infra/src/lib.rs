//! Infrastructure adapters for the audit intake wizard
//!
//! - `fs`: file-backed local storage
//! - `http`: reqwest client for the auth and audit-intake endpoints
//! - `time`: system clock

pub mod fs;
pub mod http;
pub mod time;

pub use fs::FileLocalStorage;
pub use http::HttpIntakeClient;
pub use time::SystemClock;
