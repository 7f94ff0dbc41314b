//! Clinical practice guideline (CPG) catalogue.
//!
//! Guideline PDFs live in the hosted file bucket under a fixed naming
//! convention; this module only knows the sections and file identities.
//! Rendering the PDFs is not this system's job.

use serde::{Deserialize, Serialize};

/// A guideline section: a numbered group of PDFs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section number as used in file IDs (e.g. "13").
    pub id: String,
    /// Display name.
    pub name: String,
    /// How many guidelines the section contains.
    pub count: u32,
}

/// The known guideline sections, in catalogue order.
pub fn sections() -> Vec<Section> {
    vec![
        Section {
            id: "13".into(),
            name: "Paediatrics".into(),
            count: 30,
        },
        Section {
            id: "14".into(),
            name: "Trauma".into(),
            count: 25,
        },
    ]
}

/// Look up a section by ID.
pub fn section(id: &str) -> Option<Section> {
    sections().into_iter().find(|s| s.id == id)
}

/// Display name for a section, falling back to a generic label.
pub fn section_name(id: &str) -> String {
    section(id)
        .map(|s| s.name)
        .unwrap_or_else(|| format!("Section {id}"))
}

/// Guideline numbers available in a section ("1".."count").
pub fn guidelines_for_section(id: &str) -> Vec<String> {
    let count = section(id).map(|s| s.count).unwrap_or(0);
    (1..=count).map(|n| n.to_string()).collect()
}

/// File ID of one guideline PDF in the storage bucket.
pub fn file_id(section: &str, number: &str) -> String {
    format!("section{section}_cpg{number}")
}
