use dockyard_build::{EnvGenerator, format_env_line};
use dockyard_core::Environment;

pub fn env(environment: Environment) -> anyhow::Result<()> {
    let (_, config) = super::load_config()?;
    let generator = EnvGenerator::new(&config.config);

    match environment {
        Environment::Dev => {
            for (key, value) in generator.dev_values(&config.dev) {
                println!("{}", format_env_line(&key, &value));
            }
        }
        Environment::Prod => print!("{}", generator.prod_template(&config.prod)),
    }
    Ok(())
}
