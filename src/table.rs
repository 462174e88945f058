use crate::pci_id_data::{PciDevice, PciIdData, PciVendor};

/// Indentation of every generated line, markers included.
pub const INDENT: &str = "        ";

pub const START_MARKER: &str = "// START";
pub const END_MARKER: &str = "// END";

/// Which table a template holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// `(0xVVVV, "name"),`
    Vendors,
    /// `((0xVVVV, 0xDDDD), "name"),`
    Devices,
}

/// Renders the marker-wrapped block that replaces a template's marker region.
///
/// There is no trailing newline; the splice keeps the one that followed the
/// old end marker.
pub fn render_block(pci_id_data: &PciIdData, kind: TableKind) -> String {
    let mut lines = vec![format!("{}{}", INDENT, START_MARKER)];
    lines.extend(render_rows(pci_id_data, kind));
    lines.push(format!("{}{}", INDENT, END_MARKER));
    lines.join("\n")
}

pub fn render_rows(pci_id_data: &PciIdData, kind: TableKind) -> Vec<String> {
    match kind {
        TableKind::Vendors => pci_id_data.vendors().map(vendor_row).collect(),
        TableKind::Devices => pci_id_data.devices().map(device_row).collect(),
    }
}

fn vendor_row(vendor: &PciVendor) -> String {
    format!(
        "{}(0x{}, \"{}\"),",
        INDENT,
        vendor.id.as_hex(),
        escape_name(&vendor.name)
    )
}

fn device_row(device: &PciDevice) -> String {
    format!(
        "{}((0x{}, 0x{}), \"{}\"),",
        INDENT,
        device.vendor_id.as_hex(),
        device.id.as_hex(),
        escape_name(&device.name)
    )
}

// Only double quotes; names come from single lines.
fn escape_name(name: &str) -> String {
    name.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pci_id_data::parse_str;
    use anyhow::Result;

    const STAMPING_DATA: &str = concat!(
        "10de  NVIDIA\n",
        "\t0010  Device A\n",
        "\t0011  Device B\n",
        "10ec  Realtek\n",
        "\t8168  Device C\n",
    );

    #[test]
    fn test_empty_database_renders_bare_markers() -> Result<()> {
        let pci_id_data = parse_str("# nothing to see here\n")?;
        for kind in &[TableKind::Vendors, TableKind::Devices] {
            assert_eq!(
                render_block(&pci_id_data, *kind),
                "        // START\n        // END"
            );
        }
        Ok(())
    }

    #[test]
    fn test_device_rows() -> Result<()> {
        let pci_id_data = parse_str(STAMPING_DATA)?;
        assert_eq!(
            render_rows(&pci_id_data, TableKind::Devices),
            vec![
                "        ((0x10de, 0x0010), \"Device A\"),",
                "        ((0x10de, 0x0011), \"Device B\"),",
                "        ((0x10ec, 0x8168), \"Device C\"),",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_vendor_rows_keep_order() -> Result<()> {
        let pci_id_data = parse_str("ffff  Z\n\t0001  skipped\n0001  A\n8086  Intel Corporation\n")?;
        assert_eq!(
            render_rows(&pci_id_data, TableKind::Vendors),
            vec![
                "        (0xffff, \"Z\"),",
                "        (0x0001, \"A\"),",
                "        (0x8086, \"Intel Corporation\"),",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_quotes_are_escaped() -> Result<()> {
        let pci_id_data = parse_str("1234  say \"hi\"\n\t5678  it's a \\ \"device\"\n")?;
        assert_eq!(
            render_rows(&pci_id_data, TableKind::Vendors),
            vec![r#"        (0x1234, "say \"hi\""),"#]
        );
        assert_eq!(
            render_rows(&pci_id_data, TableKind::Devices),
            vec![r#"        ((0x1234, 0x5678), "it's a \ \"device\""),"#]
        );
        Ok(())
    }

    #[test]
    fn test_ids_are_rendered_as_written() -> Result<()> {
        let pci_id_data = parse_str("10DE  NVIDIA\n\tABCD  X\n")?;
        assert_eq!(
            render_rows(&pci_id_data, TableKind::Vendors),
            vec!["        (0x10DE, \"NVIDIA\"),"]
        );
        assert_eq!(
            render_rows(&pci_id_data, TableKind::Devices),
            vec!["        ((0x10DE, 0xABCD), \"X\"),"]
        );
        Ok(())
    }

    #[test]
    fn test_block_wraps_rows_in_markers() -> Result<()> {
        let pci_id_data = parse_str(STAMPING_DATA)?;
        assert_eq!(
            render_block(&pci_id_data, TableKind::Vendors),
            concat!(
                "        // START\n",
                "        (0x10de, \"NVIDIA\"),\n",
                "        (0x10ec, \"Realtek\"),\n",
                "        // END",
            )
        );
        Ok(())
    }
}
