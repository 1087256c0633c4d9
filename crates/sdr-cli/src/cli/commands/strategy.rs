//! `sdr strategy` – which interception strategy the configured host gets.

use anyhow::{bail, Result};
use sdr_core::config::SdrConfig;
use sdr_core::intercept::InterceptStrategy;

pub fn run_strategy(cfg: &SdrConfig) -> Result<()> {
    match InterceptStrategy::probe(&cfg.capabilities) {
        Some(strategy) => println!("{strategy}"),
        None => bail!("configured host capabilities allow no interception strategy"),
    }
    Ok(())
}
