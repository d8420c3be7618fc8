// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

/// A block of text that can be wrapped by a [`MarkedText`].
///
/// Marks cover byte ranges, so the only capability required of the storage
/// is a view of the underlying bytes. Implementations for the common string
/// and byte-buffer types are provided; borrowed storage (`&str`, `&[u8]`)
/// keeps the text outside the store entirely.
///
/// [`MarkedText`]: crate::MarkedText
pub trait TextStorage {
    /// The underlying text as bytes.
    fn as_bytes(&self) -> &[u8];

    /// The length of the underlying text, in bytes.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` if the underlying text is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TextStorage for &str {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl TextStorage for String {
    fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }
}

impl TextStorage for Arc<str> {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl TextStorage for &[u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl TextStorage for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::TextStorage;
    use std::sync::Arc;

    fn assert_storage<T: TextStorage>(t: &T, expected: &[u8]) {
        assert_eq!(t.as_bytes(), expected);
        assert_eq!(t.len(), expected.len());
        assert_eq!(t.is_empty(), expected.is_empty());
    }

    #[test]
    fn string_types() {
        assert_storage(&"héllo", "héllo".as_bytes());
        assert_storage(&"héllo".to_string(), "héllo".as_bytes());
        let arc: Arc<str> = Arc::from("héllo");
        assert_storage(&arc, "héllo".as_bytes());
    }

    #[test]
    fn byte_types() {
        assert_storage(&&b"\x00\xff"[..], b"\x00\xff");
        assert_storage(&b"\x00\xff".to_vec(), b"\x00\xff");
        assert_storage(&"", b"");
    }
}
