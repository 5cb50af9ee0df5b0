//! Export pipeline: one job in, one uploaded archive out.
//!
//! Sections are written in a fixed order, each one fully read from its
//! source and flushed into the archive before the next starts. Any error
//! aborts the job; the remaining sections are not attempted.

use domain::models::PendingExport;
use domain::services::{ContentStore, ObjectStore, UploadStore};
use std::fs::{self, File};
use std::io::{Seek, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::archive::ArchiveBuilder;
use crate::error::ExportError;

const REPORT_HEADER: [&str; 8] = [
    "id", "type", "content_id", "status", "ip", "reason", "comment", "time",
];

const POST_HEADER: [&str; 9] = [
    "id",
    "content",
    "unfiltered_content",
    "timestamp",
    "revisions",
    "edited_at",
    "deleted",
    "mod_deleted",
    "deleted_at",
];

const ICON_HEADER: [&str; 8] = [
    "id", "hash", "mime", "size", "width", "height", "uploaded_at", "used_by",
];

const ATTACHMENT_HEADER: [&str; 9] = [
    "id",
    "hash",
    "mime",
    "filename",
    "size",
    "width",
    "height",
    "uploaded_at",
    "used_by",
];

/// Builds and uploads one archive per job.
pub struct ExportPipeline {
    content: Arc<dyn ContentStore>,
    uploads: Arc<dyn UploadStore>,
    objects: Arc<dyn ObjectStore>,
    staging_dir: PathBuf,
}

impl ExportPipeline {
    pub fn new(
        content: Arc<dyn ContentStore>,
        uploads: Arc<dyn UploadStore>,
        objects: Arc<dyn ObjectStore>,
        staging_dir: PathBuf,
    ) -> Self {
        Self {
            content,
            uploads,
            objects,
            staging_dir,
        }
    }

    /// Deterministic staging path for a job; the filename doubles as the
    /// object storage key.
    pub fn staging_path(&self, job_id: &str) -> PathBuf {
        self.staging_dir.join(job_id)
    }

    /// Build, finalize, and upload the archive for one job.
    ///
    /// The local file is removed only on the success path. On failure the
    /// partially written staging file stays on disk; failed archives are
    /// never uploaded, so the leftover is inspection material, not a leak
    /// into object storage.
    pub async fn execute(&self, job: &PendingExport) -> Result<(), ExportError> {
        info!(job_id = %job.id, user = %job.user, "Starting export");

        let path = self.staging_path(&job.id);
        let file = File::create(&path)?;
        let mut archive = ArchiveBuilder::new(file);

        self.write_sections(&mut archive, job).await?;
        archive.finalize()?;

        self.objects.put_file(&job.id, &path).await?;
        fs::remove_file(&path)?;

        info!(job_id = %job.id, "Archive uploaded and staging file removed");
        Ok(())
    }

    async fn write_sections<W: Write + Seek + Send>(
        &self,
        archive: &mut ArchiveBuilder<W>,
        job: &PendingExport,
    ) -> Result<(), ExportError> {
        self.write_user(archive, job).await?;
        self.write_reports(archive, job).await?;
        self.write_chats(archive, job).await?;
        self.write_posts(archive, job).await?;
        self.write_icon_uploads(archive, job).await?;
        self.write_attachment_uploads(archive, job).await?;
        Ok(())
    }

    /// `user.json`: profile, settings, relationships, and network log.
    async fn write_user<W: Write + Seek + Send>(
        &self,
        archive: &mut ArchiveBuilder<W>,
        job: &PendingExport,
    ) -> Result<(), ExportError> {
        let user = self.content.user_export(&job.user).await?;
        archive.put_json("user.json", &user)?;
        debug!(job_id = %job.id, "Wrote user.json");
        Ok(())
    }

    /// `safety/reports.csv`: one row per report, holding only the
    /// requesting user's own reporter entry.
    async fn write_reports<W: Write + Seek + Send>(
        &self,
        archive: &mut ArchiveBuilder<W>,
        job: &PendingExport,
    ) -> Result<(), ExportError> {
        let reports = self.content.reports_for_reporter(&job.user).await?;

        let entry = archive.begin_entry("safety/reports.csv")?;
        let mut writer = csv::Writer::from_writer(entry);
        writer.write_record(REPORT_HEADER)?;
        for report in &reports {
            if let Some(reporter) = report.entry_for(&job.user) {
                let time = reporter.time.to_string();
                writer.write_record([
                    report.id.as_str(),
                    report.kind.as_str(),
                    report.content_id.as_str(),
                    report.status.as_str(),
                    reporter.ip.as_str(),
                    reporter.reason.as_str(),
                    reporter.comment.as_str(),
                    time.as_str(),
                ])?;
            }
        }
        writer.flush()?;
        drop(writer);
        archive.flush()?;

        debug!(job_id = %job.id, reports = reports.len(), "Wrote safety/reports.csv");
        Ok(())
    }

    /// `chats/<chat_id>.json`: one file per chat the user is a member of.
    async fn write_chats<W: Write + Seek + Send>(
        &self,
        archive: &mut ArchiveBuilder<W>,
        job: &PendingExport,
    ) -> Result<(), ExportError> {
        let chats = self.content.chats_with_member(&job.user).await?;
        for chat in &chats {
            archive.put_json(&format!("chats/{}.json", chat.id), chat)?;
        }
        archive.flush()?;

        debug!(job_id = %job.id, chats = chats.len(), "Wrote chat files");
        Ok(())
    }

    /// `posts/<origin>.csv`: one table per distinct post origin. Origin
    /// values are accepted as-is for the entry name; the service that
    /// accepts origins owns their validity as path segments.
    async fn write_posts<W: Write + Seek + Send>(
        &self,
        archive: &mut ArchiveBuilder<W>,
        job: &PendingExport,
    ) -> Result<(), ExportError> {
        let origins = self.content.post_origins(&job.user).await?;

        for origin in &origins {
            let posts = self.content.posts_with_revisions(&job.user, origin).await?;

            let entry = archive.begin_entry(&format!("posts/{}.csv", origin))?;
            let mut writer = csv::Writer::from_writer(entry);
            writer.write_record(POST_HEADER)?;
            for post in &posts {
                let revisions = post.revisions_json()?;
                let timestamp = post.timestamp.to_string();
                let edited_at = post.edited_at.map(|v| v.to_string()).unwrap_or_default();
                let deleted = post.deleted.to_string();
                let mod_deleted = post.mod_deleted.to_string();
                let deleted_at = post.deleted_at.map(|v| v.to_string()).unwrap_or_default();
                writer.write_record([
                    post.id.as_str(),
                    post.content.as_str(),
                    post.unfiltered_content.as_deref().unwrap_or(""),
                    timestamp.as_str(),
                    revisions.as_str(),
                    edited_at.as_str(),
                    deleted.as_str(),
                    mod_deleted.as_str(),
                    deleted_at.as_str(),
                ])?;
            }
            writer.flush()?;
            drop(writer);
            archive.flush()?;

            debug!(job_id = %job.id, origin = %origin, posts = posts.len(), "Wrote post table");
        }
        Ok(())
    }

    /// `uploads/icons.csv`.
    async fn write_icon_uploads<W: Write + Seek + Send>(
        &self,
        archive: &mut ArchiveBuilder<W>,
        job: &PendingExport,
    ) -> Result<(), ExportError> {
        let icons = self.uploads.icons_by_uploader(&job.user).await?;

        let entry = archive.begin_entry("uploads/icons.csv")?;
        let mut writer = csv::Writer::from_writer(entry);
        writer.write_record(ICON_HEADER)?;
        for icon in &icons {
            let size = icon.size.to_string();
            let width = icon.width.to_string();
            let height = icon.height.to_string();
            let uploaded_at = icon.uploaded_at.to_string();
            writer.write_record([
                icon.id.as_str(),
                icon.hash.as_str(),
                icon.mime.as_str(),
                size.as_str(),
                width.as_str(),
                height.as_str(),
                uploaded_at.as_str(),
                icon.used_by.as_str(),
            ])?;
        }
        writer.flush()?;
        drop(writer);
        archive.flush()?;

        debug!(job_id = %job.id, icons = icons.len(), "Wrote uploads/icons.csv");
        Ok(())
    }

    /// `uploads/attachments.csv`.
    async fn write_attachment_uploads<W: Write + Seek + Send>(
        &self,
        archive: &mut ArchiveBuilder<W>,
        job: &PendingExport,
    ) -> Result<(), ExportError> {
        let attachments = self.uploads.attachments_by_uploader(&job.user).await?;

        let entry = archive.begin_entry("uploads/attachments.csv")?;
        let mut writer = csv::Writer::from_writer(entry);
        writer.write_record(ATTACHMENT_HEADER)?;
        for attachment in &attachments {
            let size = attachment.size.to_string();
            let width = attachment.width.to_string();
            let height = attachment.height.to_string();
            let uploaded_at = attachment.uploaded_at.to_string();
            writer.write_record([
                attachment.id.as_str(),
                attachment.hash.as_str(),
                attachment.mime.as_str(),
                attachment.filename.as_str(),
                size.as_str(),
                width.as_str(),
                height.as_str(),
                uploaded_at.as_str(),
                attachment.used_by.as_str(),
            ])?;
        }
        writer.flush()?;
        drop(writer);
        archive.flush()?;

        debug!(
            job_id = %job.id,
            attachments = attachments.len(),
            "Wrote uploads/attachments.csv"
        );
        Ok(())
    }
}
