use std::io;

use goodshop_storefront::{Shell, StorefrontConfig};

fn main() -> anyhow::Result<()> {
    goodshop_observability::init();

    let config = StorefrontConfig::from_env();
    let report = config.load_catalog()?;
    if !report.is_clean() {
        tracing::warn!(
            skipped = report.rejected.len(),
            "some catalog records were malformed and are not listed"
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut shell = Shell::new(&report.catalog, config.initial_state());
    shell.run(stdin.lock(), &mut out)?;
    Ok(())
}
