// Response envelope shared by every endpoint.
//
// The appliance wraps each payload:
// { "status": "ok", "code": 200, "return": 0, "message": "Success", "data": ... }
// Only `data` changes shape between endpoints.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::trace;

use crate::error::Error;

/// Outer fields common to every response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub code: u16,
    #[serde(default, rename = "return")]
    pub return_code: i64,
    #[serde(default)]
    pub message: String,
}

/// A response envelope whose `data` is of type `T`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(flatten)]
    pub meta: ApiResponse,
    pub data: T,
}

/// `data` payload keyed by name or id.
///
/// The appliance encodes an empty keyed collection as `[]`, and a few
/// firmware versions emit a plain list where a map is expected, so both
/// shapes are accepted.
#[derive(Debug)]
pub enum Keyed<T> {
    Map(IndexMap<String, T>),
    List(Vec<T>),
}

// Dispatches on the JSON shape directly so an entry that fails to parse
// reports its own error instead of a generic "no variant matched".
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Keyed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyedVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for KeyedVisitor<T> {
            type Value = Keyed<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of entries or a list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = IndexMap::new();
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    map.insert(key, value);
                }
                Ok(Keyed::Map(map))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut list = Vec::new();
                while let Some(value) = access.next_element::<T>()? {
                    list.push(value);
                }
                Ok(Keyed::List(list))
            }
        }

        deserializer.deserialize_any(KeyedVisitor(PhantomData))
    }
}

impl<T> Keyed<T> {
    pub fn len(&self) -> usize {
        match self {
            Self::Map(map) => map.len(),
            Self::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in server document order, paired with their map key when the
    /// payload was a map.
    pub fn into_entries(self) -> Vec<(Option<String>, T)> {
        match self {
            Self::Map(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
            Self::List(list) => list.into_iter().map(|v| (None, v)).collect(),
        }
    }
}

/// Decode a raw response body into an envelope.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Envelope<T>, Error> {
    let envelope: Envelope<T> = serde_json::from_slice(body).map_err(|e| {
        let text = String::from_utf8_lossy(body).into_owned();
        let preview: String = text.chars().take(200).collect();
        Error::Decode {
            message: format!("{e} (body preview: {preview:?})"),
            body: text,
        }
    })?;
    trace!(
        status = %envelope.meta.status,
        code = envelope.meta.code,
        message = %envelope.meta.message,
        "decoded envelope"
    );
    Ok(envelope)
}
