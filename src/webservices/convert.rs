//! Structure format conversion (`stringMolExport`).

use serde::Serialize;

use crate::http::{GatewayResult, RequestDescriptor};
use crate::webservices::WebServices;

#[derive(Debug, Serialize)]
struct ConvertRequest<'a> {
    structure: &'a str,
    /// Target format, e.g. "smiles", "mol", "mrv".
    parameters: &'a str,
}

impl WebServices {
    /// Convert `structure` into `format`, returning the service's text verbatim.
    ///
    /// The result usually ends with a newline; trim it before using it in a URL.
    pub async fn convert(&self, structure: &str, format: &str) -> GatewayResult<String> {
        let body = serde_json::to_value(ConvertRequest {
            structure,
            parameters: format,
        })?;

        let response = self
            .gateway
            .post(RequestDescriptor::new(self.convert_url.as_str()).json(body))
            .await?;

        Ok(response.text().into_owned())
    }
}
