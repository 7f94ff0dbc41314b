//! Guideline PDF file URLs.
//!
//! Guideline documents are served straight from the hosted storage
//! bucket; viewers only need the public view URL.

use emtprep_core::guidelines;

use crate::config::AppConfig;

/// Public view URL for one guideline PDF.
pub fn guideline_url(config: &AppConfig, section: &str, number: &str) -> String {
    format!(
        "{}/storage/buckets/{}/files/{}/view?project={}",
        config.endpoint,
        config.bucket_id,
        guidelines::file_id(section, number),
        config.project_id,
    )
}
