//! Entry repository - typed read accessors for wiki articles.

use crate::db::codec;
use crate::errors::Result;
use crate::models::Entry;
use futures::stream::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};

const COLLECTION: &str = "entries";

/// Cursor window for [`fetch_entries`]. A `limit` of 0 means unlimited,
/// matching the driver's semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    pub limit: i64,
    pub skip: u64,
}

fn listed_filter() -> Document {
    // flatten_query leaves the $ne operator untouched
    codec::flatten_query(doc! { "unlisted": { "$ne": true } })
}

fn decode_entry(document: Document) -> Result<Entry> {
    let public = codec::replace_uuid_with_id(document);
    Ok(mongodb::bson::from_document(public)?)
}

/// Fetches listed entries, most recently edited first.
pub async fn fetch_entries(db: &Database, options: FetchOptions) -> Result<Vec<Entry>> {
    let mut cursor = db
        .collection::<Document>(COLLECTION)
        .find(listed_filter())
        .sort(doc! { "last_edited": -1 })
        .skip(options.skip)
        .limit(options.limit)
        .await?;

    let mut entries = Vec::new();
    while let Some(document) = cursor.try_next().await? {
        entries.push(decode_entry(document)?);
    }
    Ok(entries)
}

/// Counts listed entries.
pub async fn count_entries(db: &Database) -> Result<u64> {
    db.collection::<Document>(COLLECTION)
        .count_documents(listed_filter())
        .await
        .map_err(Into::into)
}

/// Fetches a single listed entry by slug, returning `None` when absent.
///
/// When the slug misses and the argument parses as a public id, falls back to
/// an id lookup, so entries can also be addressed by their hex id.
pub async fn fetch_entry(db: &Database, slug: &str) -> Result<Option<Entry>> {
    let collection = db.collection::<Document>(COLLECTION);

    let mut filter = listed_filter();
    filter.insert("slug", slug);
    let mut found = collection.find_one(filter).await?;

    if found.is_none() {
        if let Ok(key) = codec::create_uuid(Some(slug)) {
            found = collection
                .find_one(doc! { "_id": Bson::Binary(key) })
                .await?;
        }
    }

    found.map(decode_entry).transpose()
}
