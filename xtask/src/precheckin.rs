// Licensed under the Apache-2.0 license

use anyhow::Result;

pub(crate) fn precheckin() -> Result<()> {
    crate::header::check()?;
    crate::cargo::format(true)?;
    crate::cargo::clippy()?;
    crate::cargo::target_check()?;
    crate::cargo::test()?;
    Ok(())
}
