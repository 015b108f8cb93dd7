//! The storage trigger that starts a document's processing.
//!
//! An [`ObjectCreatedEvent`] is the new-object notification the blob store
//! emits when a client uploads a source document: a bucket name and an
//! object key. Store notifications URL-encode the key (spaces arrive as `+`,
//! reserved characters as `%XX`), so [`ObjectCreatedEvent::decoded_key`]
//! must be used when addressing the actual object.

use serde::{Deserialize, Serialize};

/// New-object notification: `bucket` + raw (still URL-encoded) `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCreatedEvent {
    /// Bucket the object was created in.
    pub bucket: String,
    /// Object key exactly as delivered in the notification.
    pub key: String,
}

impl ObjectCreatedEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// The object key with notification URL-encoding undone.
    ///
    /// `+` decodes to a space and `%XX` pairs to their byte value. Malformed
    /// escapes (`%` not followed by two hex digits) pass through literally
    /// rather than failing the event, and non-UTF-8 decode results fall back
    /// to lossy conversion.
    pub fn decoded_key(&self) -> String {
        unquote_plus(&self.key)
    }
}

/// Decode `+` as space and `%XX` hex escapes in an object key.
fn unquote_plus(s: &str) -> String {
    let mut out = Vec::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match (hex_val(bytes.get(i + 1)), hex_val(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: Option<&u8>) -> Option<u8> {
    match *b? {
        c @ b'0'..=b'9' => Some(c - b'0'),
        c @ b'a'..=b'f' => Some(c - b'a' + 10),
        c @ b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
