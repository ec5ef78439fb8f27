//! JChem Web Services helpers used by most plugins.
//!
//! # Data Flow
//! ```text
//! plugin structure (MRV, SMILES, molfile)
//!     → convert.rs (stringMolExport: structure → requested format)
//!     → image.rs   (util/detail: structures → images / image URLs)
//!     → Gateway POST with a request body built fresh per call
//! ```
//!
//! # Design Decisions
//! - Request bodies are typed serde structs, never shared templates
//! - Endpoint URLs are joined onto the configured base URL once, at construction

pub mod convert;
pub mod image;

use url::Url;

use crate::config::WebServicesConfig;
use crate::http::{Gateway, GatewayError, GatewayResult};

const CONVERT_PATH: &str = "rest-v0/util/calculate/stringMolExport";
const DETAIL_PATH: &str = "rest-v0/util/detail";

/// Client for the shared chemistry web services.
#[derive(Debug, Clone)]
pub struct WebServices {
    gateway: Gateway,
    base_url: Url,
    convert_url: Url,
    detail_url: Url,
    image_url_prefix: String,
    image_size: (u32, u32),
    structure_data_size: (u32, u32),
}

impl WebServices {
    pub fn new(gateway: Gateway, config: &WebServicesConfig) -> GatewayResult<Self> {
        let image_url_prefix = with_trailing_slash(config.base_url.trim());
        let base_url = parse_base_url(&image_url_prefix)?;
        let convert_url = join(&base_url, CONVERT_PATH)?;
        let detail_url = join(&base_url, DETAIL_PATH)?;

        Ok(Self {
            gateway,
            base_url,
            convert_url,
            detail_url,
            image_url_prefix,
            image_size: (config.image_width, config.image_height),
            structure_data_size: (config.structure_data_width, config.structure_data_height),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}

fn with_trailing_slash(raw: &str) -> String {
    if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    }
}

/// Parse the base URL; `raw` must end in `/` so relative joins land below it.
fn parse_base_url(raw: &str) -> GatewayResult<Url> {
    Url::parse(raw).map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", raw, e)))
}

fn join(base: &Url, path: &str) -> GatewayResult<Url> {
    base.join(path)
        .map_err(|e| GatewayError::InvalidUrl(format!("{}{}: {}", base, path, e)))
}
