use std::path::PathBuf;

use anyhow::Result;

use crate::{generate_table, TableKind};

/// Arguments shared by the table generator binaries.
#[derive(Debug, PartialEq, structopt::StructOpt)]
pub struct Args {
    /// The pci.ids database to read.
    #[structopt(parse(from_os_str))]
    pub pci_ids_file: PathBuf,

    /// The source file holding the `// START` ... `// END` region to rewrite.
    #[structopt(parse(from_os_str))]
    pub template_file: PathBuf,
}

pub fn run(kind: TableKind, args: Args) -> Result<()> {
    pretty_env_logger::init();
    generate_table(kind, &args.pci_ids_file, &args.template_file)
}
