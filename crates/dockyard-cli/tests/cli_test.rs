use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn dockyard() -> assert_cmd::Command {
    cargo_bin_cmd!("dockyard")
}

// ── Help / Version ──

#[test]
fn shows_help() {
    dockyard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Scaffold Docker dev and production environments",
        ));
}

#[test]
fn shows_version() {
    dockyard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dockyard"));
}

// ── Init Command ──

#[test]
fn init_writes_full_scaffold() {
    let tmp = TempDir::new().unwrap();

    dockyard()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created docker-compose.yml"))
        .stdout(predicate::str::contains("Next steps:"));

    for path in [
        ".docker/dev/backend/Dockerfile",
        ".docker/dev/frontend/Dockerfile",
        ".docker/dev/frontend/conf.d/app.conf",
        ".docker/dev/node/Dockerfile",
        "docker-compose.yml",
        ".docker/prod/backend/Dockerfile",
        ".docker/prod/frontend/Dockerfile",
        ".docker/prod/frontend/conf.d/app.conf",
        ".docker/prod/docker-compose.yml",
        ".docker/prod/.env.production",
        ".docker/.gitignore",
    ] {
        assert!(tmp.path().join(path).is_file(), "missing {path}");
    }
}

#[test]
fn init_dev_only_skips_prod_but_writes_gitignore() {
    let tmp = TempDir::new().unwrap();

    dockyard()
        .current_dir(tmp.path())
        .args(["init", "--dev-only"])
        .assert()
        .success();

    assert!(tmp.path().join("docker-compose.yml").exists());
    assert!(!tmp.path().join(".docker/prod").exists());
    assert!(tmp.path().join(".docker/.gitignore").is_file());
}

#[test]
fn init_prod_only_skips_dev() {
    let tmp = TempDir::new().unwrap();

    dockyard()
        .current_dir(tmp.path())
        .args(["init", "--prod-only"])
        .assert()
        .success();

    assert!(!tmp.path().join("docker-compose.yml").exists());
    assert!(tmp.path().join(".docker/prod/docker-compose.yml").exists());
}

#[test]
fn init_rejects_conflicting_scopes() {
    dockyard()
        .args(["init", "--dev-only", "--prod-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn init_second_run_skips_existing() {
    let tmp = TempDir::new().unwrap();

    dockyard().current_dir(tmp.path()).arg("init").assert().success();

    dockyard()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to create"))
        .stderr(predicate::str::contains(
            "docker-compose.yml already exists, skipping",
        ))
        .stderr(predicate::function(|stderr: &str| {
            stderr.matches("already exists").count() == 11
        }));
}

#[test]
fn init_force_overwrites() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("docker-compose.yml"), "custom").unwrap();

    dockyard()
        .current_dir(tmp.path())
        .args(["init", "--dev-only", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created docker-compose.yml"));

    let content = std::fs::read_to_string(tmp.path().join("docker-compose.yml")).unwrap();
    assert!(content.starts_with("services:"));
}

#[test]
fn init_patch_env_seeds_from_example() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(".env.example"),
        "APP_NAME=\"My Shop\"\nDB_HOST=127.0.0.1\n",
    )
    .unwrap();

    dockyard()
        .current_dir(tmp.path())
        .args(["init", "--dev-only", "--patch-env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Patched .env"))
        .stderr(predicate::str::contains("patched .env with dev container values"));

    let env = std::fs::read_to_string(tmp.path().join(".env")).unwrap();
    assert!(env.starts_with("APP_NAME=\"My Shop\"\nDB_HOST=database\n"));
    assert!(env.contains("REDIS_HOST=redis\n"));
    assert!(env.contains("MAIL_HOST=mailhog\n"));
}

#[test]
fn init_fails_on_invalid_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("dockyard.toml"), "[prod.database]\ndriver = \"sqlite\"\n")
        .unwrap();

    dockyard()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported in production"));

    assert!(!tmp.path().join("docker-compose.yml").exists());
}

// ── Compose Command ──

#[test]
fn compose_prints_dev_yaml_by_default() {
    let tmp = TempDir::new().unwrap();

    dockyard()
        .current_dir(tmp.path())
        .arg("compose")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("services:\n  backend:"))
        .stdout(predicate::str::contains("mailhog/mailhog"));
}

#[test]
fn compose_honours_config_selections() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("dockyard.toml"),
        "[dev]\nmailhog = false\n\n[dev.database]\ndriver = \"sqlite\"\n",
    )
    .unwrap();

    dockyard()
        .current_dir(tmp.path())
        .arg("compose")
        .assert()
        .success()
        .stdout(predicate::str::contains("mailhog").not())
        .stdout(predicate::str::contains("  database:").not());
}

#[test]
fn compose_prod_json() {
    let tmp = TempDir::new().unwrap();

    dockyard()
        .current_dir(tmp.path())
        .args(["compose", "--env", "prod", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"traefik.enable=true\""));
}

#[test]
fn compose_rejects_unknown_env() {
    dockyard()
        .args(["compose", "--env", "staging"])
        .assert()
        .failure();
}

#[test]
fn compose_reads_overrides_from_dotenv() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".env"), "DOCKER_PORT_FRONTEND=9090\n").unwrap();

    dockyard()
        .current_dir(tmp.path())
        .arg("compose")
        .assert()
        .success()
        .stdout(predicate::str::contains("9090:80"));
}

// ── Env Command ──

#[test]
fn env_dev_prints_patch_lines() {
    let tmp = TempDir::new().unwrap();

    dockyard()
        .current_dir(tmp.path())
        .arg("env")
        .assert()
        .success()
        .stdout(predicate::str::contains("DB_HOST=database\n"))
        .stdout(predicate::str::contains("QUEUE_CONNECTION=redis\n"));
}

#[test]
fn env_prod_prints_template() {
    let tmp = TempDir::new().unwrap();

    dockyard()
        .current_dir(tmp.path())
        .args(["env", "--env", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("APP_NAME=Laravel\nAPP_ENV=production\n"))
        .stdout(predicate::str::contains("MAIL_ENCRYPTION=tls\n"));
}
