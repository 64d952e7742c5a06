//! Checks that the generated YAML artifacts keep the structure downstream
//! tooling parses: compose service/volume keys and dip interaction keys.

use dockerdev::artifacts::{Artifacts, APTFILE, SIDEKIQ_CONFIG};
use dockerdev::options::{Database, Options};
use dockerdev::renderer::MiniJinjaRenderer;

fn options_for(database: Database) -> Options {
    Options { app_name: "myapp".to_string(), database: Some(database), skip_install: true }
}

fn parse(yaml: &str) -> serde_yaml::Value {
    serde_yaml::from_str(yaml).expect("artifact is not valid YAML")
}

fn keys(value: &serde_yaml::Value, field: &str) -> Vec<String> {
    value[field]
        .as_mapping()
        .unwrap_or_else(|| panic!("missing mapping '{field}'"))
        .keys()
        .map(|k| k.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_compose_services_postgresql() {
    let options = options_for(Database::Postgresql);
    let renderer = MiniJinjaRenderer::new();
    let compose = Artifacts::new(&options, &renderer).docker_compose_yml().unwrap();

    let value = parse(&compose);
    assert_eq!(value["version"].as_str(), Some("3.4"));

    let services = keys(&value, "services");
    for service in ["runner", "rails", "postgres", "webpacker", "redis", "sidekiq"] {
        assert!(services.contains(&service.to_string()), "missing service {service}");
    }
    assert!(!services.contains(&"mysql".to_string()));

    let volumes = keys(&value, "volumes");
    for volume in ["bundle", "node_modules", "packs", "db", "rails_cache", "redis"] {
        assert!(volumes.contains(&volume.to_string()), "missing volume {volume}");
    }
}

#[test]
fn test_compose_services_mysql() {
    let options = options_for(Database::Mysql);
    let renderer = MiniJinjaRenderer::new();
    let compose = Artifacts::new(&options, &renderer).docker_compose_yml().unwrap();

    let value = parse(&compose);
    let services = keys(&value, "services");
    assert!(services.contains(&"mysql".to_string()));
    assert!(!services.contains(&"postgres".to_string()));

    let mysql = &value["services"]["mysql"];
    assert_eq!(mysql["image"].as_str(), Some("mysql:8.0"));
    assert_eq!(
        mysql["healthcheck"]["test"].as_str(),
        Some("mysqladmin ping -h localhost")
    );
}

#[test]
fn test_dip_yml_structure() {
    let options = options_for(Database::Postgresql);
    let renderer = MiniJinjaRenderer::new();
    let dip = Artifacts::new(&options, &renderer).dip_yml().unwrap();

    let value = parse(&dip);
    assert_eq!(value["version"].as_str(), Some("4.1"));

    let interactions = keys(&value, "interaction");
    for name in
        ["sh", "bash", "bundle", "rake", "rails", "yarn", "test", "rubocop", "psql", "redis-cli"]
    {
        assert!(interactions.contains(&name.to_string()), "missing interaction {name}");
    }

    let provision: Vec<_> = value["provision"]
        .as_sequence()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(provision[1], "dip compose up -d redis postgres");
}

#[test]
fn test_static_artifacts_parse() {
    let sidekiq: serde_yaml::Value = serde_yaml::from_str(SIDEKIQ_CONFIG).unwrap();
    assert_eq!(sidekiq[":concurrency"].as_u64(), Some(5));

    assert_eq!(APTFILE, "vim\n");
}
