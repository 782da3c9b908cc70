//! Translation between public string identifiers and MongoDB's native keys.
//!
//! Stored records use a 16-byte UUID-subtype binary as `_id`; everything
//! public-facing uses its 32-character lowercase hex encoding as `id`.
//! Decoupling the two keeps URLs and API payloads human-typable and leaves the
//! storage representation swappable. All functions here are pure and
//! synchronous.

use crate::errors::{Error, Result};
use mongodb::bson::spec::BinarySubtype;
use mongodb::bson::{Binary, Bson, Document};
use uuid::Uuid;

/// Builds a UUID-subtype binary key from a public id string, or from a fresh
/// random v4 UUID when no id is supplied.
///
/// Hyphens are stripped before decoding, so both the canonical hyphenated form
/// and the bare 32-character hex form are accepted. Anything that is not valid
/// hex, or does not decode to exactly 16 bytes, is an [`Error::InvalidId`].
pub fn create_uuid(id: Option<&str>) -> Result<Binary> {
    let hex_str = match id {
        Some(id) => id.replace('-', ""),
        None => Uuid::new_v4().simple().to_string(),
    };
    let bytes = hex::decode(&hex_str).map_err(|_| Error::InvalidId(hex_str.clone()))?;
    if bytes.len() != 16 {
        return Err(Error::InvalidId(hex_str));
    }
    Ok(Binary {
        subtype: BinarySubtype::Uuid,
        bytes,
    })
}

/// Encodes a binary key as its public id: lowercase hex, no hyphens.
#[must_use]
pub fn binary_to_id(key: &Binary) -> String {
    hex::encode(&key.bytes)
}

/// Replaces a record's `id` field with a binary `_id`, transcoding the value.
/// All other fields pass through unchanged.
pub fn replace_id_with_uuid(record: Document) -> Result<Document> {
    let mut result = Document::new();
    for (key, value) in record {
        if key == "id" {
            let id = value
                .as_str()
                .ok_or_else(|| Error::InvalidId(value.to_string()))?;
            result.insert("_id", Bson::Binary(create_uuid(Some(id))?));
        } else {
            result.insert(key, value);
        }
    }
    Ok(result)
}

/// Replaces a record's binary `_id` field with its public hex `id`. The
/// inverse of [`replace_id_with_uuid`]; a non-binary `_id` is renamed without
/// transcoding.
#[must_use]
pub fn replace_uuid_with_id(record: Document) -> Document {
    let mut result = Document::new();
    for (key, value) in record {
        if key == "_id" {
            match value {
                Bson::Binary(binary) => {
                    result.insert("id", binary_to_id(&binary));
                }
                other => {
                    result.insert("id", other);
                }
            }
        } else {
            result.insert(key, value);
        }
    }
    result
}

/// Flattens a nested filter like `{foo: {bar: "baz"}}` to `{"foo.bar": "baz"}`
/// for MongoDB queries.
///
/// Keys beginning with `$` encode query operators, not field paths; their
/// values are passed through verbatim even when they are nested documents.
#[must_use]
pub fn flatten_query(query: Document) -> Document {
    let mut result = Document::new();
    for (key, value) in query {
        match value {
            Bson::Document(inner) if !key.starts_with('$') => {
                for (inner_key, inner_value) in flatten_query(inner) {
                    result.insert(format!("{key}.{inner_key}"), inner_value);
                }
            }
            other => {
                result.insert(key, other);
            }
        }
    }
    result
}

/// Derives a URL-safe slug from a display title: lowercase, strip everything
/// that is not a word character or a space, then collapse space runs into
/// single hyphens.
#[must_use]
pub fn create_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_spaces = false;
    for c in text.to_lowercase().chars() {
        if c == ' ' {
            if !in_spaces {
                slug.push('-');
            }
            in_spaces = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
            in_spaces = false;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn uuid_round_trips_through_hex() {
        let hex_id = "0123456789abcdef0123456789abcdef";
        let binary = create_uuid(Some(hex_id)).unwrap();
        assert_eq!(binary.subtype, BinarySubtype::Uuid);
        assert_eq!(binary.bytes.len(), 16);
        assert_eq!(binary_to_id(&binary), hex_id);
    }

    #[test]
    fn hyphenated_uuid_is_accepted() {
        let binary = create_uuid(Some("01234567-89ab-cdef-0123-456789abcdef")).unwrap();
        assert_eq!(binary_to_id(&binary), "0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn generated_uuid_is_sixteen_bytes() {
        let binary = create_uuid(None).unwrap();
        assert_eq!(binary.bytes.len(), 16);
        assert_eq!(binary_to_id(&binary).len(), 32);
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(matches!(
            create_uuid(Some("not hex at all")),
            Err(Error::InvalidId(_))
        ));
        // valid hex, wrong length
        assert!(matches!(
            create_uuid(Some("abcdef")),
            Err(Error::InvalidId(_))
        ));
    }

    #[test]
    fn id_rename_round_trips() {
        let record = doc! { "id": "0123456789abcdef0123456789abcdef", "title": "Test" };
        let stored = replace_id_with_uuid(record.clone()).unwrap();
        assert!(stored.get("id").is_none());
        assert!(matches!(stored.get("_id"), Some(Bson::Binary(_))));
        assert_eq!(stored.get_str("title").unwrap(), "Test");
        assert_eq!(replace_uuid_with_id(stored), record);
    }

    #[test]
    fn flatten_joins_nested_keys_with_dots() {
        let flat = flatten_query(doc! { "a": { "b": { "c": 1 } } });
        assert_eq!(flat, doc! { "a.b.c": 1 });
    }

    #[test]
    fn flatten_leaves_operator_keys_alone() {
        let query = doc! { "$or": [ { "a": 1 } ], "unlisted": { "$ne": true } };
        assert_eq!(flatten_query(query.clone()), query);
    }

    #[test]
    fn slug_examples() {
        assert_eq!(create_slug("Hello, World!  2024"), "hello-world-2024");
        assert_eq!(create_slug("already-hyphenated"), "alreadyhyphenated");
        assert_eq!(create_slug("Under_score"), "under_score");
    }
}
