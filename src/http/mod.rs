//! Outbound HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! caller builds RequestDescriptor
//!     → gateway.rs (log, time, send through the session)
//!     → session.rs (reqwest client + cookie jar)
//!     → response.rs (2xx body, or snapshot of the rejected response)
//!     → types.rs (GatewayError on any failure)
//! ```

pub mod gateway;
pub mod request;
pub mod response;
pub mod session;
pub mod types;

pub use gateway::Gateway;
pub use request::{Payload, RequestDescriptor};
pub use response::{ResponseBody, ResponseSnapshot};
pub use session::{Session, SessionBuilder};
pub use types::{GatewayError, GatewayResult, Method};
