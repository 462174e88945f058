use std::concat;

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

/// Vendor and device records of a pci.ids database, in file order.
#[derive(Debug, Default)]
pub struct PciIdData {
    records: Vec<PciIdRecord>,
}

impl PciIdData {
    pub fn new() -> Self {
        PciIdData {
            records: Vec::new(),
        }
    }

    /// Parses a pci.ids stream and appends its vendor and device records.
    ///
    /// Lines that are neither a vendor nor a device line are ignored. A device
    /// line is stamped with the id of the nearest vendor line above it; device
    /// lines with no vendor above them are skipped.
    pub fn add_pci_ids_data(
        &mut self,
        pciids_data_stream: &mut dyn std::io::Read,
    ) -> Result<()> {
        info!("Parsing pci.id data!");
        let mut unparsed_data = String::new();
        pciids_data_stream
            .read_to_string(&mut unparsed_data)
            .context("Couldn't read pci.ids data.")?;

        let state = PciIdsParser::parse(Rule::file, &unparsed_data)?
            .try_fold(ParseState::default(), ParseState::step)?;
        info!(
            concat!(
                "Number of objects imported from the pci.ids database: ",
                "vendors({}), devices({}) and orphaned devices skipped({})",
            ),
            state.num_vendors, state.num_devices, state.num_orphans
        );
        self.records.extend(state.records);

        Ok(())
    }

    pub fn records(&self) -> &[PciIdRecord] {
        &self.records
    }

    pub fn vendors(&self) -> impl Iterator<Item = &PciVendor> {
        self.records.iter().filter_map(|record| match record {
            PciIdRecord::Vendor(vendor) => Some(vendor),
            PciIdRecord::Device(_) => None,
        })
    }

    pub fn devices(&self) -> impl Iterator<Item = &PciDevice> {
        self.records.iter().filter_map(|record| match record {
            PciIdRecord::Device(device) => Some(device),
            PciIdRecord::Vendor(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PciIdRecord {
    Vendor(PciVendor),
    Device(PciDevice),
}

/// A 16-bit id, keeping the hex digits it was written with.
#[derive(Debug, Clone)]
pub struct PciId {
    value: u16,
    hex: String,
}

impl PciId {
    fn from_hex(hex: &str) -> Result<Self> {
        let value = u16::from_str_radix(hex, 16)?;
        Ok(PciId {
            value,
            hex: String::from(hex),
        })
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn as_hex(&self) -> &str {
        &self.hex
    }
}

impl From<u16> for PciId {
    fn from(value: u16) -> Self {
        PciId {
            value,
            hex: format!("{:04x}", value),
        }
    }
}

impl PartialEq for PciId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for PciId {}

impl PartialEq<u16> for PciId {
    fn eq(&self, other: &u16) -> bool {
        self.value == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PciVendor {
    pub id: PciId,
    pub name: String,
}

impl PciVendor {
    pub fn new(id: u16, name: &str) -> Self {
        PciVendor::with_id(PciId::from(id), name)
    }

    fn with_id(id: PciId, name: &str) -> Self {
        PciVendor {
            id,
            name: String::from(name),
        }
    }

    fn from_vendor_pairs(vendor_pairs: &mut Pairs<Rule>) -> Result<Self> {
        let vendor_id_pair = vendor_pairs.next().ok_or(anyhow!("No vendor id found."))?;
        let vendor_id = PciId::from_hex(vendor_id_pair.as_str())
            .with_context(|| format!("Invalid vendor_id: {}", vendor_id_pair.as_str()))?;
        let vendor_name = vendor_pairs
            .next()
            .ok_or(anyhow!("No vendor name found."))?
            .as_str();
        Ok(PciVendor::with_id(vendor_id, vendor_name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PciDevice {
    pub vendor_id: PciId,
    pub id: PciId,
    pub name: String,
}

impl PciDevice {
    pub fn new(vendor_id: u16, id: u16, name: &str) -> Self {
        PciDevice::with_ids(PciId::from(vendor_id), PciId::from(id), name)
    }

    fn with_ids(vendor_id: PciId, id: PciId, name: &str) -> Self {
        PciDevice {
            vendor_id,
            id,
            name: String::from(name),
        }
    }

    fn from_device_pairs(vendor_id: PciId, device_pairs: &mut Pairs<Rule>) -> Result<Self> {
        let device_id_pair = device_pairs.next().ok_or(anyhow!("No device id found."))?;
        let device_id = PciId::from_hex(device_id_pair.as_str())
            .with_context(|| format!("Invalid device: {}", device_id_pair.as_str()))?;
        let device_name = device_pairs
            .next()
            .ok_or(anyhow!("No device name found."))?
            .as_str();
        Ok(PciDevice::with_ids(vendor_id, device_id, device_name))
    }
}

/// Accumulator threaded through the parsed lines.
#[derive(Debug, Default)]
struct ParseState {
    current_vendor_id: Option<PciId>,
    records: Vec<PciIdRecord>,
    num_vendors: usize,
    num_devices: usize,
    num_orphans: usize,
}

impl ParseState {
    fn step(mut self, line_pair: Pair<Rule>) -> Result<Self> {
        match line_pair.as_rule() {
            Rule::vendor => {
                let vendor = PciVendor::from_vendor_pairs(&mut line_pair.into_inner())?;
                debug!("vendor: {:?}", &vendor);
                self.num_vendors += 1;
                self.current_vendor_id = Some(vendor.id.clone());
                self.records.push(PciIdRecord::Vendor(vendor));
            }
            Rule::device => match self.current_vendor_id.clone() {
                Some(vendor_id) => {
                    let device =
                        PciDevice::from_device_pairs(vendor_id, &mut line_pair.into_inner())?;
                    debug!("device: {:?}", &device);
                    self.num_devices += 1;
                    self.records.push(PciIdRecord::Device(device));
                }
                None => {
                    warn!(
                        "Skipping device line with no vendor above it: {:?}",
                        line_pair.as_str()
                    );
                    self.num_orphans += 1;
                }
            },
            Rule::EOI => info!("End of input reached."),
            _ => unreachable!(),
        }
        Ok(self)
    }
}

#[derive(Parser)]
#[grammar = "pciids.pest"]
struct PciIdsParser;

#[cfg(test)]
pub(crate) fn parse_str(unparsed_data: &str) -> Result<PciIdData> {
    let mut pci_id_data = PciIdData::new();
    pci_id_data.add_pci_ids_data(&mut unparsed_data.as_bytes())?;
    Ok(pci_id_data)
}
