use crate::imp::{core::Error, prelude::*};
use std::fmt;

/// Identifier the driver assigns to every remote object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(String);

impl Guid {
    /// The connection itself. `initialize` is addressed to it.
    pub(crate) fn root() -> Self { Self(String::new()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl From<&str> for Guid {
    fn from(s: &str) -> Self { Self(s.to_owned()) }
}

#[derive(Debug, Serialize)]
pub(crate) struct Req<'a> {
    pub(crate) id: i32,
    pub(crate) guid: &'a Guid,
    pub(crate) method: &'a str,
    pub(crate) params: Map<String, Value>,
    pub(crate) metadata: Metadata,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Metadata {
    pub(crate) api_name: Option<String>,
    pub(crate) internal: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Res {
    Result(ResResult),
    Event(ResEvent),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResResult {
    pub(crate) id: i32,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<SerializedError>,
}

impl ResResult {
    pub(crate) fn into_body(self) -> Result<Value, ErrorMessage> {
        match self.error {
            Some(e) => Err(e.into()),
            None => Ok(self.result.unwrap_or_else(|| Value::Object(Map::new()))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResEvent {
    pub(crate) guid: Guid,
    pub(crate) method: String,
    #[serde(default)]
    pub(crate) params: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct SerializedError {
    #[serde(default)]
    error: Option<ErrorMessage>,
    #[serde(default)]
    value: Option<Value>,
}

impl From<SerializedError> for ErrorMessage {
    fn from(SerializedError { error, value }: SerializedError) -> Self {
        match (error, value) {
            (Some(e), _) => e,
            (None, Some(v)) => ErrorMessage {
                message: v.to_string(),
                ..ErrorMessage::default()
            },
            (None, None) => ErrorMessage::default(),
        }
    }
}

/// Error reported by the driver in response to a call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ErrorMessage {
    pub name: String,
    pub message: String,
    pub stack: String,
}

impl ErrorMessage {
    pub fn is_timeout(&self) -> bool { self.name == "TimeoutError" }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl std::error::Error for ErrorMessage {}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateParams {
    #[serde(rename = "type")]
    pub(crate) typ: String,
    pub(crate) guid: Guid,
    #[serde(default)]
    pub(crate) initializer: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OnlyGuid {
    pub(crate) guid: Guid,
}

/// `{"<key>": {"guid": ...}}` as returned by calls that create an object.
pub(crate) fn guid_at(v: &Value, key: &str) -> Result<Guid, Error> {
    v.get(key)
        .and_then(|x| x.get("guid"))
        .and_then(Value::as_str)
        .map(Guid::from)
        .ok_or_else(|| Error::GuidNotFound(v.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_result() {
        let res: Res =
            serde_json::from_str(r#"{"id":3,"result":{"browser":{"guid":"browser@1"}}}"#).unwrap();
        let Res::Result(r) = res else {
            panic!("expected a result")
        };
        assert_eq!(r.id, 3);
        let body = r.into_body().unwrap();
        assert_eq!(guid_at(&body, "browser").unwrap().as_str(), "browser@1");
    }

    #[test]
    fn decode_void_result() {
        let res: Res = serde_json::from_str(r#"{"id":7}"#).unwrap();
        let Res::Result(r) = res else {
            panic!("expected a result")
        };
        assert_eq!(r.into_body().unwrap(), Value::Object(Map::new()));
    }

    #[test]
    fn decode_error() {
        let res: Res = serde_json::from_str(
            r#"{"id":9,"error":{"error":{"name":"TimeoutError","message":"Timeout 5000ms exceeded.","stack":""}}}"#,
        )
        .unwrap();
        let Res::Result(r) = res else {
            panic!("expected a result")
        };
        let e = r.into_body().unwrap_err();
        assert!(e.is_timeout());
        assert_eq!(e.to_string(), "TimeoutError: Timeout 5000ms exceeded.");
    }

    #[test]
    fn decode_thrown_value() {
        let res: Res = serde_json::from_str(r#"{"id":2,"error":{"value":"boom"}}"#).unwrap();
        let Res::Result(r) = res else {
            panic!("expected a result")
        };
        let e = r.into_body().unwrap_err();
        assert!(!e.is_timeout());
        assert_eq!(e.to_string(), "\"boom\"");
    }

    #[test]
    fn decode_event() {
        let res: Res = serde_json::from_str(
            r#"{"guid":"page@2","method":"__create__","params":{"type":"Frame","guid":"frame@3","initializer":{"url":"about:blank"}}}"#,
        )
        .unwrap();
        let Res::Event(e) = res else {
            panic!("expected an event")
        };
        assert_eq!(e.guid.as_str(), "page@2");
        assert_eq!(e.method, "__create__");
        let p: CreateParams = serde_json::from_value(e.params.unwrap().into()).unwrap();
        assert_eq!(p.typ, "Frame");
        assert_eq!(p.guid, Guid::from("frame@3"));
    }

    #[test]
    fn missing_guid() {
        let v = serde_json::json!({ "page": {} });
        assert!(matches!(guid_at(&v, "page"), Err(Error::GuidNotFound(_))));
    }

    #[test]
    fn request_shape() {
        let guid = Guid::from("frame@1");
        let mut params = Map::new();
        params.insert("selector".into(), "#username".into());
        let req = Req {
            id: 1,
            guid: &guid,
            method: "fill",
            params,
            metadata: Metadata::default(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "id": 1,
                "guid": "frame@1",
                "method": "fill",
                "params": { "selector": "#username" },
                "metadata": {}
            })
        );
    }
}
