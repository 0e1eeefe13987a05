// src/uploads.rs
//! Client-side checks for resume and job CSV uploads. Nothing here touches
//! the network; a file that fails validation never reaches the API client.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::UploadError;
use crate::utils::get_file_extension;

pub const PDF_MIME: &str = "application/pdf";
pub const CSV_MIME: &str = "text/csv";

const PDF_MAGIC: &[u8] = b"%PDF";

const JOB_CSV_TEMPLATE: &str = "Job Title,Job Description\n\
Senior Frontend Developer,\"We are looking for a Senior Frontend Developer with experience in React, TypeScript, and modern web technologies.\"\n\
Full Stack Engineer,\"We are seeking a Full Stack Engineer with experience in Node.js, React, and database technologies.\"";

/// A validated file ready to be sent as the multipart `file` field.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0 / 1024.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCsvRow {
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Job Description")]
    pub job_description: String,
}

/// Load a resume; only PDF documents are accepted.
pub async fn load_resume(path: &Path) -> Result<UploadFile, UploadError> {
    let file_name = file_name_of(path);
    require_extension(&file_name, "pdf", "PDF")?;

    let bytes = read_bytes(path, &file_name).await?;
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(UploadError::InvalidFileType {
            file_name,
            expected: "PDF",
        });
    }

    debug!("Validated resume {} ({} bytes)", file_name, bytes.len());
    Ok(UploadFile {
        file_name,
        mime: PDF_MIME,
        bytes,
    })
}

/// Load a job-description CSV.
pub async fn load_job_csv(path: &Path) -> Result<UploadFile, UploadError> {
    let file_name = file_name_of(path);
    require_extension(&file_name, "csv", "CSV")?;

    let bytes = read_bytes(path, &file_name).await?;

    debug!("Validated job CSV {} ({} bytes)", file_name, bytes.len());
    Ok(UploadFile {
        file_name,
        mime: CSV_MIME,
        bytes,
    })
}

/// Template offered to recruiters before a bulk upload.
pub fn job_csv_template() -> &'static str {
    JOB_CSV_TEMPLATE
}

/// Parse the rows a job CSV would create. Rows without a title are skipped.
pub fn preview_job_csv(bytes: &[u8]) -> Result<Vec<JobCsvRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<JobCsvRow>().enumerate() {
        let row = record.with_context(|| format!("Invalid CSV record at row {}", index + 2))?;
        if row.job_title.is_empty() {
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}

fn require_extension(
    file_name: &str,
    extension: &str,
    expected: &'static str,
) -> Result<(), UploadError> {
    match get_file_extension(file_name) {
        Some(ext) if ext == extension => Ok(()),
        _ => Err(UploadError::InvalidFileType {
            file_name: file_name.to_string(),
            expected,
        }),
    }
}

async fn read_bytes(path: &Path, file_name: &str) -> Result<Vec<u8>, UploadError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| UploadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    if bytes.is_empty() {
        return Err(UploadError::Empty(file_name.to_string()));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_resume_requires_pdf() {
        let dir = tempdir().unwrap();
        let docx = dir.path().join("resume.docx");
        fs::write(&docx, b"PK\x03\x04").unwrap();

        let err = load_resume(&docx).await.unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileType { expected: "PDF", .. }));
    }

    #[tokio::test]
    async fn test_resume_checks_content() {
        let dir = tempdir().unwrap();
        let fake = dir.path().join("resume.pdf");
        fs::write(&fake, b"just text").unwrap();
        assert!(load_resume(&fake).await.is_err());

        let real = dir.path().join("Resume.PDF");
        fs::write(&real, b"%PDF-1.7\n...").unwrap();
        let file = load_resume(&real).await.unwrap();
        assert_eq!(file.file_name, "Resume.PDF");
        assert_eq!(file.mime, PDF_MIME);
    }

    #[tokio::test]
    async fn test_job_csv_validation() {
        let dir = tempdir().unwrap();

        let empty = dir.path().join("jobs.csv");
        fs::write(&empty, b"").unwrap();
        assert!(matches!(
            load_job_csv(&empty).await.unwrap_err(),
            UploadError::Empty(_)
        ));

        let xlsx = dir.path().join("jobs.xlsx");
        fs::write(&xlsx, b"data").unwrap();
        assert!(matches!(
            load_job_csv(&xlsx).await.unwrap_err(),
            UploadError::InvalidFileType { expected: "CSV", .. }
        ));

        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            load_job_csv(&missing).await.unwrap_err(),
            UploadError::Unreadable { .. }
        ));
    }

    #[test]
    fn test_template_previews_two_rows() {
        let rows = preview_job_csv(job_csv_template().as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].job_title, "Senior Frontend Developer");
        assert!(rows[1].job_description.contains("Node.js, React"));
    }

    #[test]
    fn test_preview_skips_untitled_rows() {
        let csv = "Job Title,Job Description\n,orphan description\nData Engineer,Pipelines\n";
        let rows = preview_job_csv(csv.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![JobCsvRow {
                job_title: "Data Engineer".into(),
                job_description: "Pipelines".into(),
            }]
        );
    }
}
