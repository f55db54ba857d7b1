//! Print the JSON schema of the configuration file

use labterm::config::Config;

fn main() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
