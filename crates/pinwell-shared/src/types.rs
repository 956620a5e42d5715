use bytes::Bytes;
use serde::{Deserialize, Serialize};

// Identifiers are issued by the custody provider and treated as opaque
// strings on the client side.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SpaceId(pub String);

impl SpaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// An authenticated identity known to the client.
///
/// The email is the external authentication handle; the id is issued by the
/// custody provider on login. Accounts are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Provider-issued unique identifier.
    pub id: AccountId,
    /// Email address used to authenticate with the provider.
    pub email: String,
}

// ---------------------------------------------------------------------------
// Space
// ---------------------------------------------------------------------------

/// A named content container scoped to exactly one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Space {
    /// Provider-issued unique identifier.
    pub id: SpaceId,
    /// Human-readable display name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// An uploaded item belonging to one space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    /// Provider-issued unique identifier.
    pub id: ContentId,
    /// Original file name.
    pub name: String,
    /// Content-address handle (e.g. an IPFS CID), if the provider issued one.
    pub cid: Option<String>,
    /// Byte size, if known.
    pub size: Option<u64>,
    /// Media type, if known.
    pub media_type: Option<String>,
}

// ---------------------------------------------------------------------------
// UploadRequest
// ---------------------------------------------------------------------------

/// A pending upload: the raw payload plus the metadata echoed back into the
/// resulting [`Content`] record.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File name reported to the provider.
    pub name: String,
    /// Raw payload bytes.
    pub data: Bytes,
    /// Media type reported to the provider, if known.
    pub media_type: Option<String>,
}

impl UploadRequest {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_transparently() {
        let id = SpaceId::new("space-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"space-1\"");

        let back: SpaceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn upload_request_size_tracks_payload() {
        let req = UploadRequest::new("doc.txt", &b"0123456789"[..]);
        assert_eq!(req.size(), 10);
        assert!(req.media_type.is_none());

        let req = req.with_media_type("text/plain");
        assert_eq!(req.media_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn content_round_trips_optional_fields() {
        let content = Content {
            id: ContentId::new("content-1"),
            name: "doc.txt".into(),
            cid: Some("bafybeigdyrzt5".into()),
            size: Some(10),
            media_type: None,
        };

        let json = serde_json::to_string(&content).unwrap();
        let back: Content = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }
}
