//! `stevedore detect` - classify a source tree.

use anyhow::{bail, Result};

use stevedore::builder::detect;
use stevedore::BuildSystemKind;

use crate::cli::DetectArgs;

pub fn execute(args: DetectArgs) -> Result<()> {
    if !args.dir.is_dir() {
        bail!("not a directory: {}", args.dir.display());
    }

    let kind = detect(&args.dir);
    println!("{kind}");

    if kind == BuildSystemKind::Unknown {
        std::process::exit(1);
    }
    Ok(())
}
