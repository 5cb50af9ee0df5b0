//! Profile/content store repository.
//!
//! Read-only snapshot queries against the main database. Every method takes
//! the requesting username and returns fully assembled domain records.

use async_trait::async_trait;
use domain::models::user_export::{NetlogId, RelationshipId};
use domain::models::{
    BanState, Chat, Netlog, Post, PostRevision, Relationship, Report, ReporterEntry, UserExport,
};
use domain::services::{ContentStore, StoreError};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::entities::{
    ChatRow, NetlogRow, PostRevisionRow, PostRow, RelationshipRow, ReportEntryRow, ReportRow,
    UserRow, UserSettingsRow,
};

/// Repository for profile and content snapshot queries.
#[derive(Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for ContentRepository {
    async fn user_export(&self, user: &str) -> Result<UserExport, StoreError> {
        // The pswd and tokens columns are deliberately absent from this
        // select list.
        let profile = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT uuid, username, pfp_data, avatar, avatar_color, quote,
                   flags, permissions, ban_state, ban_restrictions,
                   ban_expires, ban_reason, created, last_seen, delete_after
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await?;

        let settings = sqlx::query_as::<_, UserSettingsRow>(
            r#"
            SELECT settings
            FROM user_settings
            WHERE username = $1
            "#,
        )
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;

        let relationships = sqlx::query_as::<_, RelationshipRow>(
            r#"
            SELECT to_user, state, updated_at
            FROM relationships
            WHERE from_user = $1
            ORDER BY updated_at, to_user
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        let netlogs = sqlx::query_as::<_, NetlogRow>(
            r#"
            SELECT ip, last_used
            FROM netlog
            WHERE username = $1
            ORDER BY last_used, ip
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(UserExport {
            id: profile.uuid,
            username: profile.username,
            pfp_data: profile.pfp_data,
            avatar: profile.avatar,
            avatar_color: profile.avatar_color,
            quote: profile.quote,
            flags: profile.flags,
            permissions: profile.permissions,
            ban: BanState {
                state: profile.ban_state,
                restrictions: profile.ban_restrictions,
                expires: profile.ban_expires,
                reason: profile.ban_reason,
            },
            created: profile.created,
            last_seen: profile.last_seen,
            delete_after: profile.delete_after,
            settings: settings
                .map(|row| row.settings)
                .unwrap_or(serde_json::Value::Null),
            relationships: relationships
                .into_iter()
                .map(|row| Relationship {
                    id: RelationshipId { to: row.to_user },
                    state: row.state,
                    updated_at: row.updated_at,
                })
                .collect(),
            netlogs: netlogs
                .into_iter()
                .map(|row| Netlog {
                    id: NetlogId { ip: row.ip },
                    last_used: row.last_used,
                })
                .collect(),
        })
    }

    async fn reports_for_reporter(&self, user: &str) -> Result<Vec<Report>, StoreError> {
        let heads = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT r.id, r.kind, r.content_id, r.status
            FROM reports r
            WHERE EXISTS (
                SELECT 1 FROM report_entries e
                WHERE e.report_id = r.id AND e.reporter = $1
            )
            ORDER BY r.id
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        if heads.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = heads.iter().map(|row| row.id.clone()).collect();

        // Entry order follows the serial primary key, which is insertion
        // order; first-match-wins relies on it.
        let entry_rows = sqlx::query_as::<_, ReportEntryRow>(
            r#"
            SELECT report_id, reporter, ip, reason, comment, time
            FROM report_entries
            WHERE report_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<String, Vec<ReporterEntry>> = HashMap::new();
        for row in entry_rows {
            grouped.entry(row.report_id).or_default().push(ReporterEntry {
                user: row.reporter,
                ip: row.ip,
                reason: row.reason,
                comment: row.comment,
                time: row.time,
            });
        }

        Ok(heads
            .into_iter()
            .map(|head| {
                let entries = grouped.remove(&head.id).unwrap_or_default();
                Report {
                    id: head.id,
                    kind: head.kind,
                    content_id: head.content_id,
                    status: head.status,
                    entries,
                }
            })
            .collect())
    }

    async fn chats_with_member(&self, user: &str) -> Result<Vec<Chat>, StoreError> {
        let rows = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT id, kind, nickname, icon, icon_color, owner, members,
                   created, last_active, deleted, allow_pinning
            FROM chats
            WHERE $1 = ANY(members)
            ORDER BY id
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Chat {
                id: row.id,
                kind: row.kind,
                nickname: row.nickname,
                icon: row.icon,
                icon_color: row.icon_color,
                owner: row.owner,
                members: row.members,
                created: row.created,
                last_active: row.last_active,
                deleted: row.deleted,
                allow_pinning: row.allow_pinning,
            })
            .collect())
    }

    async fn post_origins(&self, user: &str) -> Result<Vec<String>, StoreError> {
        let origins: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT origin
            FROM posts
            WHERE author = $1
            ORDER BY origin
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(origins.into_iter().map(|(origin,)| origin).collect())
    }

    async fn posts_with_revisions(
        &self,
        user: &str,
        origin: &str,
    ) -> Result<Vec<Post>, StoreError> {
        let post_rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, origin, content, unfiltered_content, timestamp,
                   edited_at, deleted, mod_deleted, deleted_at
            FROM posts
            WHERE author = $1 AND origin = $2
            ORDER BY timestamp, id
            "#,
        )
        .bind(user)
        .bind(origin)
        .fetch_all(&self.pool)
        .await?;

        if post_rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = post_rows.iter().map(|row| row.id.clone()).collect();

        let revision_rows = sqlx::query_as::<_, PostRevisionRow>(
            r#"
            SELECT id, post_id, old_content, new_content, time
            FROM post_revisions
            WHERE post_id = ANY($1)
            ORDER BY time, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<String, Vec<PostRevision>> = HashMap::new();
        for row in revision_rows {
            grouped.entry(row.post_id.clone()).or_default().push(PostRevision {
                id: row.id,
                old_content: row.old_content,
                new_content: row.new_content,
                time: row.time,
            });
        }

        Ok(post_rows
            .into_iter()
            .map(|row| {
                let revisions = grouped.remove(&row.id).unwrap_or_default();
                Post {
                    id: row.id,
                    origin: row.origin,
                    content: row.content,
                    unfiltered_content: row.unfiltered_content,
                    timestamp: row.timestamp,
                    revisions,
                    edited_at: row.edited_at,
                    deleted: row.deleted,
                    mod_deleted: row.mod_deleted,
                    deleted_at: row.deleted_at,
                }
            })
            .collect())
    }
}
