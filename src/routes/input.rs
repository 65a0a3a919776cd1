use std::{collections::HashMap, convert::Infallible};

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde_json::Value;

/// Flat request parameters taken from either a form-encoded or a JSON body.
///
/// Browsers post forms to skip the CORS preflight, other clients send JSON;
/// both land here as strings. An empty or unreadable body yields no
/// parameters, so the handler's validation decides the error.
#[derive(Debug, Default, Clone)]
pub struct InputParams(pub HashMap<String, String>);

impl InputParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn from_json(bytes: &[u8]) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(bytes) else {
            return Self::default();
        };
        let params = map
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key, value))
            })
            .collect();
        Self(params)
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .is_some_and(|m| m.type_() == mime::APPLICATION && m.subtype() == mime::WWW_FORM_URLENCODED)
}

impl<S> FromRequest<S> for InputParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            return Ok(match Form::<HashMap<String, String>>::from_request(req, state).await {
                Ok(Form(params)) => Self(params),
                Err(e) => {
                    tracing::debug!("ignoring unreadable form body: {e}");
                    Self::default()
                }
            });
        }
        match Bytes::from_request(req, state).await {
            Ok(bytes) => Ok(Self::from_json(&bytes)),
            Err(e) => {
                tracing::debug!("ignoring unreadable body: {e}");
                Ok(Self::default())
            }
        }
    }
}
