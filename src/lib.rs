//! Generates Rust table literals from the pci.ids database and splices them
//! into a template between `// START` and `// END` marker lines.

pub mod cli;
mod pci_id_data;
pub mod table;
pub mod template;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

pub use crate::pci_id_data::{PciDevice, PciId, PciIdData, PciIdRecord, PciVendor};
pub use crate::table::TableKind;

/// Regenerates the `kind` table inside `template_file` from `pci_ids_file`.
///
/// The template is overwritten in place, through any symlink. A template
/// without a marker region is an error and is not touched.
pub fn generate_table(kind: TableKind, pci_ids_file: &Path, template_file: &Path) -> Result<()> {
    let mut pci_id_data = PciIdData::new();
    let mut pci_ids_stream = fs::File::open(pci_ids_file)
        .with_context(|| format!("Cannot open pci.ids file: {}", pci_ids_file.display()))?;
    pci_id_data
        .add_pci_ids_data(&mut pci_ids_stream)
        .with_context(|| format!("Cannot parse pci.ids file: {}", pci_ids_file.display()))?;

    let template_contents = fs::read_to_string(template_file)
        .with_context(|| format!("Cannot read template file: {}", template_file.display()))?;
    let block = table::render_block(&pci_id_data, kind);
    let spliced = template::splice(&template_contents, &block)
        .with_context(|| format!("Cannot splice template: {}", template_file.display()))?;

    fs::write(template_file, spliced)
        .with_context(|| format!("Cannot write template file: {}", template_file.display()))?;
    info!("Wrote {:?} table to {}.", kind, template_file.display());
    Ok(())
}
