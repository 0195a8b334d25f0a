use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::errors::CredentialError;

/// Registry login returned to Docker.
///
/// Serialized field names are the ones Docker's credential-helper client
/// expects on stdout, in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(rename = "ServerURL")]
    pub server_url: String,

    #[serde(rename = "Username")]
    pub username: String,

    #[serde(rename = "Secret")]
    pub secret: String,
}

impl CredentialRecord {
    /// Store field holding the registry URL.
    pub const SERVER_URL_FIELD: &'static str = "serverurl";
    /// Store field holding the login name.
    pub const USERNAME_FIELD: &'static str = "username";
    /// Store field holding the password or token.
    pub const SECRET_FIELD: &'static str = "password";

    /// Map the `data` object of a secret onto a record.
    ///
    /// Missing fields become empty strings and unknown fields are ignored.
    /// Only a non-object payload, or a mapped field holding something other
    /// than a string, is rejected.
    pub fn from_secret_data(data: &Value) -> Result<Self, CredentialError> {
        let Value::Object(fields) = data else {
            return Err(CredentialError::Decode(format!(
                "expected a map of fields, got {}",
                json_type(data)
            )));
        };

        Ok(Self {
            server_url: string_field(fields, Self::SERVER_URL_FIELD)?,
            username: string_field(fields, Self::USERNAME_FIELD)?,
            secret: string_field(fields, Self::SECRET_FIELD)?,
        })
    }

    /// Compact JSON payload written to stdout.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CredentialError> {
        serde_json::to_vec(self).map_err(CredentialError::Serialize)
    }
}

/// Exact key first, then the first key that matches ignoring ASCII case.
fn lookup<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).or_else(|| {
        fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Result<String, CredentialError> {
    match lookup(fields, name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(CredentialError::Decode(format!(
            "field '{name}' must be a string, got {}",
            json_type(other)
        ))),
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
