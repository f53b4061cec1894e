//! Credential bundle: store identifier plus opaque service credentials

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroize;

/// The unit that gets encrypted and distributed
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    pub store_id: String,
    #[serde(serialize_with = "to_base64", deserialize_with = "from_base64")]
    pub credentials: Vec<u8>,
}

impl CredentialBundle {
    pub fn new(store_id: impl Into<String>, credentials: Vec<u8>) -> Self {
        Self {
            store_id: store_id.into(),
            credentials,
        }
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("store_id", &self.store_id)
            .field("credentials", &format_args!("<{} bytes>", self.credentials.len()))
            .finish()
    }
}

impl Drop for CredentialBundle {
    fn drop(&mut self) {
        self.credentials.zeroize();
    }
}

fn to_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64.encode(bytes))
}

fn from_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    BASE64.decode(encoded).map_err(serde::de::Error::custom)
}
