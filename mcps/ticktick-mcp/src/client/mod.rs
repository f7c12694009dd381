//! TickTick REST access

pub mod api;
pub mod today;
pub mod transport;

pub use api::{TickTickClient, API_BASE, INBOX_PROBE_TITLE};
pub use transport::{ReqwestTransport, Transport};
