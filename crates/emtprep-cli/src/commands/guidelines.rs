//! The `emtprep guidelines` command: browse the CPG catalogue.

use std::path::PathBuf;

use anyhow::{Context, Result};

use emtprep_core::guidelines;
use emtprep_store::{files, load_config_from};

pub fn execute(
    section: Option<String>,
    number: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    match (section, number) {
        (None, _) => {
            println!("Guideline sections:");
            for section in guidelines::sections() {
                println!(
                    "  {} — {} ({} guidelines)",
                    section.id, section.name, section.count
                );
            }
        }
        (Some(section), None) => {
            let name = guidelines::section_name(&section);
            let cpgs = guidelines::guidelines_for_section(&section);
            anyhow::ensure!(!cpgs.is_empty(), "unknown section '{section}'");
            println!("{name}:");
            for number in cpgs {
                println!("  CPG {number} ({})", guidelines::file_id(&section, &number));
            }
        }
        (Some(section), Some(number)) => {
            guidelines::section(&section)
                .with_context(|| format!("unknown section '{section}'"))?;
            let config = load_config_from(config_path.as_deref())?;
            println!("{}", files::guideline_url(&config, &section, &number));
        }
    }

    Ok(())
}
