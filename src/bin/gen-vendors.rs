use anyhow::Result;

use pciids_tablegen::cli::{run, Args};
use pciids_tablegen::TableKind;

#[paw::main]
fn main(args: Args) -> Result<()> {
    run(TableKind::Vendors, args)
}
