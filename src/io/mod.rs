//! Request/response JSON I/O and CSV shift-report export.

pub mod request;
pub mod response;
