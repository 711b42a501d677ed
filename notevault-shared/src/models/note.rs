/// Note model for the notes service
///
/// Notes are owned by a username, the `sub` claim of the verified bearer
/// token. Every query here filters on the owner, so a caller can never see
/// or touch another user's rows; the handlers pass the authenticated subject
/// straight through.
///
/// Content is stored directly in the database. The `s3_key` column is kept
/// for the inactive object-storage path (see [`crate::storage`]): when a
/// note's content lives in an object store instead, the key goes here and
/// `content` stays NULL.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notes (
///     id BIGSERIAL PRIMARY KEY,
///     user_id TEXT NOT NULL,
///     title TEXT NOT NULL,
///     content TEXT,
///     s3_key TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// CREATE INDEX notes_user_id_idx ON notes (user_id);
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A stored note
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Note ID
    pub id: i64,

    /// Owning username (token subject)
    pub user_id: String,

    /// Title
    pub title: String,

    /// Note body, stored inline (None when content lives in object storage)
    pub content: Option<String>,

    /// Object storage key for the inactive S3 path
    pub s3_key: Option<String>,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// When the note was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a note
#[derive(Debug, Clone)]
pub struct CreateNote {
    /// Title
    pub title: String,

    /// Note body
    pub content: String,
}

/// Input for updating a note; None leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateNote {
    /// New title
    pub title: Option<String>,

    /// New body
    pub content: Option<String>,
}

impl Note {
    /// Creates a note owned by `owner`
    pub async fn create(pool: &PgPool, owner: &str, data: CreateNote) -> Result<Self, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (user_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, content, s3_key, created_at, updated_at
            "#,
        )
        .bind(owner)
        .bind(data.title)
        .bind(data.content)
        .fetch_one(pool)
        .await?;

        Ok(note)
    }

    /// Lists `owner`'s notes with pagination, newest first
    pub async fn list_for_owner(
        pool: &PgPool,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, s3_key, created_at, updated_at
            FROM notes
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Fetches one of `owner`'s notes
    ///
    /// A note that exists but belongs to someone else comes back as None,
    /// indistinguishable from a note that does not exist.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: i64,
        owner: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, s3_key, created_at, updated_at
            FROM notes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Updates one of `owner`'s notes; None if absent or foreign
    pub async fn update_for_owner(
        pool: &PgPool,
        id: i64,
        owner: &str,
        data: UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = COALESCE($3, title),
                content = COALESCE($4, content),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, content, s3_key, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(data.title)
        .bind(data.content)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Deletes one of `owner`'s notes; false if absent or foreign
    pub async fn delete_for_owner(pool: &PgPool, id: i64, owner: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_note_default_changes_nothing() {
        let update = UpdateNote::default();
        assert!(update.title.is_none());
        assert!(update.content.is_none());
    }

    #[test]
    fn test_note_serializes_optional_fields() {
        let note = Note {
            id: 1,
            user_id: "alice".to_string(),
            title: "groceries".to_string(),
            content: Some("milk".to_string()),
            s3_key: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["user_id"], "alice");
        assert_eq!(value["s3_key"], serde_json::Value::Null);
    }

    // Query behavior (ownership filtering in particular) requires a running
    // database and is not covered in the unit suite.
}
