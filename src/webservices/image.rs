//! Structure image rendering (`util/detail`).

use serde::Serialize;
use serde_json::Value;

use crate::http::{GatewayError, GatewayResult, RequestDescriptor};
use crate::webservices::WebServices;

#[derive(Debug, Serialize)]
struct DetailRequest<'a> {
    structures: Vec<StructureRef<'a>>,
    display: DisplayOptions,
}

#[derive(Debug, Serialize)]
struct StructureRef<'a> {
    structure: &'a str,
}

#[derive(Debug, Serialize)]
struct DisplayOptions {
    include: Vec<&'static str>,
    parameters: DisplayParameters,
}

#[derive(Debug, Default, Serialize)]
struct DisplayParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<ImageParameters>,
    #[serde(rename = "structureData", skip_serializing_if = "Option::is_none")]
    structure_data: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageParameters {
    width: u32,
    height: u32,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_image: Option<bool>,
}

impl<'a> DetailRequest<'a> {
    fn image<S: AsRef<str>>(structures: &'a [S], (width, height): (u32, u32), return_image: Option<bool>) -> Self {
        Self {
            structures: structure_refs(structures),
            display: DisplayOptions {
                include: vec!["image"],
                parameters: DisplayParameters {
                    image: Some(ImageParameters {
                        width,
                        height,
                        kind: "jpeg",
                        return_image,
                    }),
                    ..DisplayParameters::default()
                },
            },
        }
    }

    fn png_data<S: AsRef<str>>(structures: &'a [S], (width, height): (u32, u32)) -> Self {
        Self {
            structures: structure_refs(structures),
            display: DisplayOptions {
                include: vec!["structureData"],
                parameters: DisplayParameters {
                    structure_data: Some(format!(
                        "png:-a,w{},h{},transbg,cpk,wireframe,nosource,marginSize2,maxScale28",
                        width, height
                    )),
                    ..DisplayParameters::default()
                },
            },
        }
    }
}

fn structure_refs<S: AsRef<str>>(structures: &[S]) -> Vec<StructureRef<'_>> {
    structures
        .iter()
        .map(|s| StructureRef { structure: s.as_ref() })
        .collect()
}

impl WebServices {
    /// Render one structure; resolves to the service's record for it (`data[0]`).
    pub async fn image(&self, structure: &str, size: Option<(u32, u32)>) -> GatewayResult<Value> {
        let structures = [structure];
        let request = DetailRequest::image(&structures, size.unwrap_or(self.image_size), None);

        let mut records = self.detail(&request).await?;
        if records.is_empty() {
            return Err(GatewayError::Payload("detail response has an empty `data` array".into()));
        }
        Ok(records.swap_remove(0))
    }

    /// Image URLs for `structures`, relative to the web services root so the host can proxy them.
    ///
    /// Entries line up with `structures`; `None` where the service returned no URL.
    pub async fn image_urls<S: AsRef<str>>(
        &self,
        structures: &[S],
        size: Option<(u32, u32)>,
    ) -> GatewayResult<Vec<Option<String>>> {
        let request = DetailRequest::image(structures, size.unwrap_or(self.image_size), Some(false));
        let records = self.detail(&request).await?;

        Ok(records
            .iter()
            .enumerate()
            .map(|(index, record)| match record.pointer("/image/imageUrl").and_then(Value::as_str) {
                Some(url) => Some(self.relative_image_url(url)),
                None => {
                    tracing::warn!(index, "No image URL for structure");
                    None
                }
            })
            .collect())
    }

    /// Inline PNG images (`data:` URIs) for `structures`.
    ///
    /// Entries line up with `structures`; `None` where the service returned no image.
    pub async fn image_data_uris<S: AsRef<str>>(
        &self,
        structures: &[S],
        size: Option<(u32, u32)>,
    ) -> GatewayResult<Vec<Option<String>>> {
        let request = DetailRequest::png_data(structures, size.unwrap_or(self.structure_data_size));
        let records = self.detail(&request).await?;

        Ok(records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                match record.pointer("/structureData/binaryStructure").and_then(Value::as_str) {
                    Some(png) => Some(format!("data:image/png;base64,{}", png)),
                    None => {
                        tracing::warn!(index, "No image for structure");
                        None
                    }
                }
            })
            .collect())
    }

    /// Strip the configured base URL, as written in the config, from a service image URL.
    fn relative_image_url(&self, url: &str) -> String {
        url.replacen(self.image_url_prefix.as_str(), "/", 1)
    }

    async fn detail(&self, request: &DetailRequest<'_>) -> GatewayResult<Vec<Value>> {
        let body = serde_json::to_value(request)?;
        let response = self
            .gateway
            .post(RequestDescriptor::new(self.detail_url.as_str()).json(body).decode_json())
            .await?;

        match response.into_json()? {
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(records)) => Ok(records),
                _ => Err(GatewayError::Payload("detail response has no `data` array".into())),
            },
            _ => Err(GatewayError::Payload("detail response is not a JSON object".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, WebServicesConfig};
    use crate::http::Gateway;
    use serde_json::json;

    fn services(base_url: &str) -> WebServices {
        let config = WebServicesConfig {
            base_url: base_url.to_string(),
            ..WebServicesConfig::default()
        };
        WebServices::new(Gateway::new(&ClientConfig::default()).unwrap(), &config).unwrap()
    }

    #[test]
    fn test_image_url_relative_to_configured_base() {
        let ws = services("http://jws.example.org:80/webservices");
        assert_eq!(
            ws.relative_image_url("http://jws.example.org:80/webservices/rest-v0/util/image/7.jpeg"),
            "/rest-v0/util/image/7.jpeg"
        );
        assert_eq!(
            ws.relative_image_url("http://cdn.example.org/7.jpeg"),
            "http://cdn.example.org/7.jpeg"
        );
    }

    #[test]
    fn test_image_request_shape() {
        let structures = ["CCO"];
        let body = serde_json::to_value(DetailRequest::image(&structures, (280, 150), None)).unwrap();
        assert_eq!(
            body,
            json!({
                "structures": [{"structure": "CCO"}],
                "display": {
                    "include": ["image"],
                    "parameters": {"image": {"width": 280, "height": 150, "type": "jpeg"}}
                }
            })
        );
    }

    #[test]
    fn test_image_url_request_disables_inline_image() {
        let structures = vec!["CCO".to_string(), "c1ccccc1".to_string()];
        let body = serde_json::to_value(DetailRequest::image(&structures[..], (100, 80), Some(false))).unwrap();
        assert_eq!(body["structures"][1]["structure"], "c1ccccc1");
        assert_eq!(body["display"]["parameters"]["image"]["returnImage"], false);
    }

    #[test]
    fn test_png_data_request_embeds_size() {
        let structures = ["CCO"];
        let body = serde_json::to_value(DetailRequest::png_data(&structures, (400, 260))).unwrap();
        assert_eq!(body["display"]["include"], json!(["structureData"]));
        assert_eq!(
            body["display"]["parameters"]["structureData"],
            "png:-a,w400,h260,transbg,cpk,wireframe,nosource,marginSize2,maxScale28"
        );
        assert!(body["display"]["parameters"].get("image").is_none());
    }
}
