use dockyard_build::{DevComposeAssembler, ProdComposeAssembler};
use dockyard_core::Environment;

use crate::Format;

pub fn compose(environment: Environment, format: Format) -> anyhow::Result<()> {
    let (_, config) = super::load_config()?;

    let document = match environment {
        Environment::Dev => DevComposeAssembler::new(&config.config, &config.dev).assemble(),
        Environment::Prod => ProdComposeAssembler::new(&config.config, &config.prod).assemble(),
    };

    let rendered = match format {
        Format::Yaml => document.to_yaml()?,
        Format::Json => document.to_json()?,
    };
    print!("{rendered}");
    Ok(())
}
