use dockyard_build::{EnvGenerator, ScaffoldPlan, patch_env_file};

pub struct InitOptions {
    pub force: bool,
    pub dev: bool,
    pub prod: bool,
    pub patch_env: bool,
}

/// Write the Docker scaffold into the current project.
pub fn init(options: InitOptions) -> anyhow::Result<()> {
    let (project_dir, config) = super::load_config()?;

    let mut plan = ScaffoldPlan::default();
    if options.dev {
        plan.extend(ScaffoldPlan::dev(&config)?);
    }
    if options.prod {
        plan.extend(ScaffoldPlan::prod(&config)?);
    }
    plan.extend(ScaffoldPlan::gitignore());

    let report = plan.write(&project_dir, options.force)?;

    for path in &report.skipped {
        eprintln!("{path} already exists, skipping (use --force to overwrite)");
    }
    if report.written.is_empty() {
        println!("Nothing to create, already initialized.");
    } else {
        for path in &report.written {
            println!("Created {path}");
        }
    }

    if options.patch_env {
        let values = EnvGenerator::new(&config.config).dev_values(&config.dev);
        let outcome = patch_env_file(&project_dir, &values)?;
        tracing::info!(
            updated = ?outcome.updated,
            added = ?outcome.added,
            "patched .env with dev container values"
        );
        println!(
            "Patched .env ({} updated, {} added)",
            outcome.updated.len(),
            outcome.added.len()
        );
    }

    println!();
    println!("Next steps:");
    println!();
    if options.dev {
        println!("  Development:");
        println!("     docker compose up -d");
        println!();
    }
    if options.prod {
        println!("  Production:");
        println!("     1. Fill in .docker/prod/.env.production (APP_KEY, mail, ...)");
        println!("     2. Build and push images to {}", config.config.registry.url);
        println!(
            "     3. docker stack deploy -c .docker/prod/docker-compose.yml {}",
            config.config.project_name()
        );
    }

    Ok(())
}
