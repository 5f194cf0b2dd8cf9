//! `stevedore ensure` - the full orchestration.

use anyhow::{Context, Result};
use url::Url;

use stevedore::core::spec::Manifest;
use stevedore::ops::{ensure, reconcile};
use stevedore::ConsumingTarget;

use crate::cli::EnsureArgs;

pub fn execute(args: EnsureArgs) -> Result<()> {
    let manifest = match &args.manifest {
        Some(path) => Manifest::load(path)?,
        None => {
            let default = std::path::Path::new("Stevedore.toml");
            if default.exists() {
                Manifest::load(default)?
            } else {
                Manifest::default()
            }
        }
    };

    let mut spec = manifest.dependency_spec();
    if let Some(name) = args.name {
        spec.name = name;
    }
    if let Some(url) = args.url {
        spec.url = Url::parse(&url).with_context(|| format!("invalid URL: {url}"))?;
    }
    if let Some(rev) = args.rev {
        spec.revision = rev;
    }

    let opts = ensure::EnsureOptions {
        keep_staging_on_failure: !args.discard_staging && manifest.staging.keep_on_failure,
    };

    let resolution = ensure::ensure(&spec, &opts)?;

    let mut target = manifest
        .target
        .clone()
        .map(ConsumingTarget::from)
        .unwrap_or_else(|| ConsumingTarget::new(spec.name.clone(), Vec::new()));

    reconcile::apply(&mut target, &spec.name, &resolution)?;

    match resolution.staging_root() {
        Some(root) => println!("resolved: staged at {}", root.display()),
        None => println!("resolved: system"),
    }
    println!("{}", target.flags);

    Ok(())
}
