use anyhow::Result;
use simple_logger::init_with_level;

/// Installs `simple_logger` as the `log` backend. Hosts that already own a
/// logger should skip this.
pub fn init(level: log::Level) -> Result<()> {
    init_with_level(level)?;

    Ok(())
}
