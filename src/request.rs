//! Inbound API Gateway proxy request, reduced to the fields the logger
//! binds as context.

use crate::value::FieldValue;
use serde::{Deserialize, Deserializer};

/// The subset of an API Gateway proxy event read by [`extract_request`].
///
/// Deserializes from the event JSON. Missing or `null` members become
/// empty strings; unknown members are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiGatewayRequest {
    #[serde(deserialize_with = "nullable")]
    pub http_method: String,
    #[serde(deserialize_with = "nullable")]
    pub path: String,
    #[serde(deserialize_with = "nullable")]
    pub request_context: RequestContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestContext {
    #[serde(deserialize_with = "nullable")]
    pub request_id: String,
    #[serde(deserialize_with = "nullable")]
    pub stage: String,
    #[serde(deserialize_with = "nullable")]
    pub identity: RequestIdentity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestIdentity {
    #[serde(deserialize_with = "nullable")]
    pub cognito_identity_id: String,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApiGatewayRequest {
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        ApiGatewayRequest {
            http_method: http_method.into(),
            path: path.into(),
            request_context: RequestContext::default(),
        }
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_context.request_id = id.into();
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.request_context.stage = stage.into();
        self
    }

    pub fn with_cognito_identity_id(mut self, id: impl Into<String>) -> Self {
        self.request_context.identity.cognito_identity_id = id.into();
        self
    }
}

/// Context fields derived from `req`.
///
/// Method, path, request id and stage are always present, empty or not.
/// `cognitoIdentityId` is included only when non-empty.
pub fn extract_request(req: &ApiGatewayRequest) -> Vec<(String, FieldValue)> {
    let ctx = &req.request_context;
    let mut fields = vec![
        ("requestMethod".to_string(), FieldValue::from(&req.http_method)),
        ("requestPath".to_string(), FieldValue::from(&req.path)),
        ("requestId".to_string(), FieldValue::from(&ctx.request_id)),
        ("apiStage".to_string(), FieldValue::from(&ctx.stage)),
    ];
    if !ctx.identity.cognito_identity_id.is_empty() {
        fields.push((
            "cognitoIdentityId".to_string(),
            FieldValue::from(&ctx.identity.cognito_identity_id),
        ));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(fields: &[(String, FieldValue)]) -> Vec<&str> {
        fields.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn empty_identity_is_omitted() {
        let req = ApiGatewayRequest::new("GET", "/").with_stage("prod");
        let fields = extract_request(&req);
        assert_eq!(keys(&fields), vec!["requestMethod", "requestPath", "requestId", "apiStage"]);
        assert_eq!(fields[2].1, FieldValue::from(""));
    }

    #[test]
    fn identity_is_included_verbatim() {
        let req = ApiGatewayRequest::default().with_cognito_identity_id("us-east-1:abc");
        let fields = extract_request(&req);
        assert_eq!(
            fields.last(),
            Some(&("cognitoIdentityId".to_string(), FieldValue::from("us-east-1:abc")))
        );
    }

    #[test]
    fn deserializes_proxy_event_json() {
        let event = r#"{
            "resource": "/{proxy+}",
            "path": "/path",
            "httpMethod": "POST",
            "headers": null,
            "requestContext": {
                "stage": "v1",
                "requestId": "f56d1423-cb54-41a1-84d2-f2c133d1819a",
                "identity": { "cognitoIdentityId": null, "sourceIp": "127.0.0.1" }
            },
            "body": ""
        }"#;
        let req: ApiGatewayRequest = serde_json::from_str(event).unwrap();
        assert_eq!(
            req,
            ApiGatewayRequest::new("POST", "/path")
                .with_stage("v1")
                .with_request_id("f56d1423-cb54-41a1-84d2-f2c133d1819a")
        );
    }

    #[test]
    fn missing_context_deserializes_to_defaults() {
        let req: ApiGatewayRequest = serde_json::from_str(r#"{"requestContext": null}"#).unwrap();
        assert_eq!(req, ApiGatewayRequest::default());
    }
}
