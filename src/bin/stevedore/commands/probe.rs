//! `stevedore probe` - presence check only.

use anyhow::Result;

use stevedore::probe::{PkgConfig, ProbeContext};

use crate::cli::ProbeArgs;

pub fn execute(args: ProbeArgs) -> Result<()> {
    let probe = PkgConfig::new(ProbeContext::system())?;

    if probe.exists(&args.name)? {
        println!("{}: present", args.name);
        Ok(())
    } else {
        println!("{}: absent", args.name);
        std::process::exit(1);
    }
}
