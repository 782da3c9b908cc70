//! User repository.

use crate::db::codec;
use crate::errors::Result;
use crate::models::User;
use mongodb::Database;
use mongodb::bson::{Document, doc};

const COLLECTION: &str = "users";

/// Fetches a user by public id. An absent user is `Ok(None)`, never an error;
/// a malformed id is an [`crate::errors::Error::InvalidId`].
pub async fn fetch_user(db: &Database, id: &str) -> Result<Option<User>> {
    let filter = codec::replace_id_with_uuid(doc! { "id": id })?;
    let found = db.collection::<Document>(COLLECTION).find_one(filter).await?;
    found
        .map(|document| {
            let public = codec::replace_uuid_with_id(document);
            Ok(mongodb::bson::from_document(public)?)
        })
        .transpose()
}
