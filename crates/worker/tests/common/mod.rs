//! Common test utilities for integration tests.
//!
//! In-memory collaborators standing in for the databases, the object store,
//! and the pub/sub transport, plus fixture builders for the exported record
//! shapes.

// Allow dead code in this module - these are helper utilities that may not be used
// by all integration tests but are intentionally available for future use.
#![allow(dead_code)]

use async_trait::async_trait;
use domain::models::{
    AttachmentUpload, BanState, Chat, ExportJob, ExportJobStatus, IconUpload, Netlog, NetlogId,
    PendingExport, Post, Relationship, RelationshipId, Report, UserExport,
};
use domain::services::{ContentStore, ExportJobStore, ObjectStore, StoreError, UploadStore};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Job store holding jobs in memory, insertion-ordered.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: Mutex<Vec<ExportJob>>,
    fail_find: AtomicBool,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_pending(&self, id: &str, user: &str) {
        self.jobs.lock().unwrap().push(ExportJob {
            id: id.to_string(),
            user: user.to_string(),
            status: ExportJobStatus::Pending,
            error: None,
            created_at: 1_700_000_000,
            completed_at: None,
        });
    }

    pub fn job(&self, id: &str) -> Option<ExportJob> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == id)
            .cloned()
    }

    pub fn completed_count(&self) -> usize {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.status == ExportJobStatus::Completed)
            .count()
    }

    pub fn fail_find_pending(&self, fail: bool) {
        self.fail_find.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ExportJobStore for MemoryJobStore {
    async fn find_pending(&self) -> Result<Vec<PendingExport>, StoreError> {
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(StoreError::Decode("simulated fetch failure".to_string()));
        }
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.status == ExportJobStatus::Pending)
            .map(|j| PendingExport {
                id: j.id.clone(),
                user: j.user.clone(),
            })
            .collect())
    }

    async fn mark_completed(&self, job_id: &str, completed_at: i64) -> Result<(), StoreError> {
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| StoreError::Decode(format!("no such job: {job_id}")))?;
        job.status = ExportJobStatus::Completed;
        job.completed_at = Some(completed_at);
        Ok(())
    }

    async fn mark_failed(
        &self,
        job_id: &str,
        error: &str,
        completed_at: i64,
    ) -> Result<(), StoreError> {
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| StoreError::Decode(format!("no such job: {job_id}")))?;
        job.status = ExportJobStatus::Failed;
        job.error = Some(error.to_string());
        job.completed_at = Some(completed_at);
        Ok(())
    }
}

/// Content store serving canned records, filtered the way the real queries
/// filter.
#[derive(Default)]
pub struct FakeContentStore {
    pub users: Mutex<HashMap<String, UserExport>>,
    pub reports: Mutex<Vec<Report>>,
    pub chats: Mutex<Vec<Chat>>,
    pub posts: Mutex<Vec<(String, Post)>>,
    fail_user: Mutex<Option<String>>,
}

impl FakeContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: UserExport) {
        self.users
            .lock()
            .unwrap()
            .insert(user.username.clone(), user);
    }

    pub fn add_report(&self, report: Report) {
        self.reports.lock().unwrap().push(report);
    }

    pub fn add_chat(&self, chat: Chat) {
        self.chats.lock().unwrap().push(chat);
    }

    /// Register a post authored by `author`.
    pub fn add_post(&self, author: &str, post: Post) {
        self.posts.lock().unwrap().push((author.to_string(), post));
    }

    /// Make `user_export` fail for one username, for failed-path tests.
    pub fn fail_user_export(&self, user: &str) {
        *self.fail_user.lock().unwrap() = Some(user.to_string());
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn user_export(&self, user: &str) -> Result<UserExport, StoreError> {
        if self.fail_user.lock().unwrap().as_deref() == Some(user) {
            return Err(StoreError::Decode("simulated profile failure".to_string()));
        }
        self.users
            .lock()
            .unwrap()
            .get(user)
            .cloned()
            .ok_or_else(|| StoreError::Decode(format!("no such user: {user}")))
    }

    async fn reports_for_reporter(&self, user: &str) -> Result<Vec<Report>, StoreError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.entries.iter().any(|e| e.user == user))
            .cloned()
            .collect())
    }

    async fn chats_with_member(&self, user: &str) -> Result<Vec<Chat>, StoreError> {
        Ok(self
            .chats
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.members.iter().any(|m| m == user))
            .cloned()
            .collect())
    }

    async fn post_origins(&self, user: &str) -> Result<Vec<String>, StoreError> {
        let mut origins: Vec<String> = Vec::new();
        for (author, post) in self.posts.lock().unwrap().iter() {
            if author == user && !origins.contains(&post.origin) {
                origins.push(post.origin.clone());
            }
        }
        Ok(origins)
    }

    async fn posts_with_revisions(
        &self,
        user: &str,
        origin: &str,
    ) -> Result<Vec<Post>, StoreError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|(author, post)| author == user && post.origin == origin)
            .map(|(_, post)| post.clone())
            .collect())
    }
}

/// Upload store serving canned metadata rows.
#[derive(Default)]
pub struct FakeUploadStore {
    pub icons: Mutex<Vec<IconUpload>>,
    pub attachments: Mutex<Vec<AttachmentUpload>>,
}

impl FakeUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_icon(&self, icon: IconUpload) {
        self.icons.lock().unwrap().push(icon);
    }

    pub fn add_attachment(&self, attachment: AttachmentUpload) {
        self.attachments.lock().unwrap().push(attachment);
    }
}

#[async_trait]
impl UploadStore for FakeUploadStore {
    async fn icons_by_uploader(&self, _user: &str) -> Result<Vec<IconUpload>, StoreError> {
        Ok(self.icons.lock().unwrap().clone())
    }

    async fn attachments_by_uploader(
        &self,
        _user: &str,
    ) -> Result<Vec<AttachmentUpload>, StoreError> {
        Ok(self.attachments.lock().unwrap().clone())
    }
}

/// Object store capturing uploaded archives in memory.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_puts: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_file(&self, key: &str, path: &Path) -> Result<(), StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::ObjectStorage(
                "simulated upload failure".to_string(),
            ));
        }
        let bytes =
            std::fs::read(path).map_err(|e| StoreError::ObjectStorage(e.to_string()))?;
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }
}

/// Minimal but realistic user snapshot.
pub fn sample_user(username: &str) -> UserExport {
    UserExport {
        id: Uuid::new_v4(),
        username: username.to_string(),
        pfp_data: 1,
        avatar: String::new(),
        avatar_color: "4287f5".to_string(),
        quote: Sentence(1..3).fake(),
        flags: 0,
        permissions: 0,
        ban: BanState {
            state: "none".to_string(),
            restrictions: 0,
            expires: 0,
            reason: String::new(),
        },
        created: 1_690_000_000,
        last_seen: Some(1_700_000_000),
        delete_after: None,
        settings: serde_json::json!({"theme": "orange"}),
        relationships: vec![Relationship {
            id: RelationshipId {
                to: "bob".to_string(),
            },
            state: 1,
            updated_at: 1_695_000_000,
        }],
        netlogs: vec![Netlog {
            id: NetlogId {
                ip: "10.0.0.1".to_string(),
            },
            last_used: 1_700_000_000,
        }],
    }
}

pub fn sample_post(id: &str, origin: &str, content: &str) -> Post {
    Post {
        id: id.to_string(),
        origin: origin.to_string(),
        content: content.to_string(),
        unfiltered_content: None,
        timestamp: 1_700_000_000,
        revisions: vec![],
        edited_at: None,
        deleted: false,
        mod_deleted: false,
        deleted_at: None,
    }
}

pub fn sample_icon(id: &str) -> IconUpload {
    IconUpload {
        id: id.to_string(),
        hash: "deadbeef".to_string(),
        mime: "image/png".to_string(),
        size: 2048,
        width: 64,
        height: 64,
        uploaded_at: 1_699_000_000,
        used_by: "alice".to_string(),
    }
}

pub fn sample_attachment(id: &str, filename: &str) -> AttachmentUpload {
    AttachmentUpload {
        id: id.to_string(),
        hash: "cafebabe".to_string(),
        mime: "image/jpeg".to_string(),
        filename: filename.to_string(),
        size: 8192,
        width: 800,
        height: 600,
        uploaded_at: 1_699_500_000,
        used_by: "p1".to_string(),
    }
}

/// Open an uploaded archive's bytes for inspection.
pub fn open_archive(bytes: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
    zip::ZipArchive::new(Cursor::new(bytes)).expect("uploaded bytes are not a zip archive")
}

/// Entry names in archive order.
pub fn entry_names(archive: &zip::ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    archive.file_names().map(str::to_string).collect()
}

/// One entry's contents as UTF-8.
pub fn read_entry(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    use std::io::Read;

    let mut entry = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing archive entry: {name}"));
    let mut contents = String::new();
    entry.read_to_string(&mut contents).unwrap();
    contents
}
