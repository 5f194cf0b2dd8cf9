//! `stevedore flags` - print resolved compile/link flags.

use anyhow::Result;

use stevedore::probe::{PkgConfig, ProbeContext};

use crate::cli::FlagsArgs;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let probe = PkgConfig::new(ProbeContext::system())?;
    let flags = probe.flags(&args.name)?;

    println!("{flags}");
    Ok(())
}
