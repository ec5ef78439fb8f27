//! Request gateway and shared web-service helpers for Marvin Live plugins.

pub mod config;
pub mod http;
pub mod observability;
pub mod webservices;

pub use config::schema::GatewayConfig;
pub use http::{Gateway, GatewayError, RequestDescriptor, ResponseBody, Session};
pub use webservices::WebServices;
