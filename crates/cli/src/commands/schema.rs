use anyhow::Result;
use tend_core::configs::config_schema;

pub fn execute() -> Result<()> {
    println!("{}", config_schema()?);
    Ok(())
}
