//! Compose document model.
//!
//! Field order in the structs is the key order in the rendered document.
//! Optional fields are omitted entirely when unset.

use indexmap::IndexMap;
use serde::Serialize;

/// Where a service's image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImageSource {
    /// Built locally from a Dockerfile.
    Build { build: BuildContext },
    /// Pulled from a registry.
    Image { image: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    pub context: String,
    pub dockerfile: String,
}

/// Container-level `restart:` policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartMode {
    No,
    Always,
    OnFailure,
    UnlessStopped,
}

/// Orchestrator `deploy.restart_policy.condition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartCondition {
    None,
    OnFailure,
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestartPolicy {
    pub condition: RestartCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

/// `deploy:` section. Routing labels live here because swarm reads them
/// from the service's deploy block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployPolicy {
    pub replicas: u32,
    pub restart_policy: RestartPolicy,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDefinition {
    #[serde(flatten)]
    pub source: ImageSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<RestartMode>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub tty: bool,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub environment: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    pub networks: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy: Option<DeployPolicy>,
}

impl ServiceDefinition {
    fn with_source(source: ImageSource) -> Self {
        Self {
            source,
            container_name: None,
            command: None,
            restart: None,
            tty: false,
            environment: IndexMap::new(),
            volumes: Vec::new(),
            ports: Vec::new(),
            networks: Vec::new(),
            depends_on: Vec::new(),
            deploy: None,
        }
    }

    /// Service built from `dockerfile` with the project root as context.
    pub fn build(dockerfile: &str) -> Self {
        Self::with_source(ImageSource::Build {
            build: BuildContext {
                context: ".".to_owned(),
                dockerfile: dockerfile.to_owned(),
            },
        })
    }

    /// Service running a pre-built image.
    pub fn image(image: impl Into<String>) -> Self {
        Self::with_source(ImageSource::Image {
            image: image.into(),
        })
    }

    /// Image reference, if this service pulls rather than builds.
    pub fn image_ref(&self) -> Option<&str> {
        match &self.source {
            ImageSource::Image { image } => Some(image),
            ImageSource::Build { .. } => None,
        }
    }
}

/// Insertion-ordered map of service name to definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServiceGraph(IndexMap<String, ServiceDefinition>);

impl ServiceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ServiceDefinition> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Service names in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServiceDefinition)> {
        self.0.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub(crate) fn insert(&mut self, name: String, definition: ServiceDefinition) {
        self.0.insert(name, definition);
    }

    /// `(service, missing dependency)` pairs. Empty for every assembled graph.
    pub fn dangling_dependencies(&self) -> Vec<(&str, &str)> {
        self.iter()
            .flat_map(|(name, def)| {
                def.depends_on
                    .iter()
                    .filter(|dep| !self.contains(dep))
                    .map(move |dep| (name, dep.as_str()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    /// Managed outside this stack.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

impl NetworkDefinition {
    pub fn bridge() -> Self {
        Self {
            driver: Some("bridge".to_owned()),
            external: false,
        }
    }

    pub fn external() -> Self {
        Self {
            driver: None,
            external: true,
        }
    }
}

/// Named volume managed by the orchestrator; always rendered as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VolumeDefinition {}

/// A complete compose document for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeDocument {
    pub services: ServiceGraph,
    pub networks: IndexMap<String, NetworkDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<IndexMap<String, VolumeDefinition>>,
}

impl ComposeDocument {
    pub fn to_yaml(&self) -> Result<String, RenderError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to render compose document as YAML")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to render compose document as JSON")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_source_renders_context_and_dockerfile() {
        let mut svc = ServiceDefinition::build(".docker/dev/backend/Dockerfile");
        svc.networks.push("app-network".to_owned());
        let yaml = serde_yaml::to_string(&svc).unwrap();

        assert!(yaml.starts_with("build:\n  context: .\n  dockerfile: .docker/dev/backend/Dockerfile\n"));
        assert!(!yaml.contains("image:"));
    }

    #[test]
    fn unset_optionals_are_omitted() {
        let mut svc = ServiceDefinition::image("redis:alpine");
        svc.networks.push("app-network".to_owned());
        let yaml = serde_yaml::to_string(&svc).unwrap();

        assert_eq!(yaml, "image: redis:alpine\nnetworks:\n- app-network\n");
    }

    #[test]
    fn restart_values_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&RestartMode::UnlessStopped).unwrap(),
            "\"unless-stopped\""
        );
        assert_eq!(
            serde_json::to_string(&RestartCondition::OnFailure).unwrap(),
            "\"on-failure\""
        );
        assert_eq!(
            serde_json::to_string(&RestartCondition::None).unwrap(),
            "\"none\""
        );
    }

    #[test]
    fn dangling_dependencies_reports_missing_peers() {
        let mut graph = ServiceGraph::new();
        let mut horizon = ServiceDefinition::image("app");
        horizon.depends_on = vec!["redis".to_owned(), "backend".to_owned()];
        graph.insert("backend".to_owned(), ServiceDefinition::image("app"));
        graph.insert("horizon".to_owned(), horizon);

        assert_eq!(graph.dangling_dependencies(), vec![("horizon", "redis")]);
    }

    #[test]
    fn network_definitions_render() {
        assert_eq!(
            serde_json::to_string(&NetworkDefinition::bridge()).unwrap(),
            r#"{"driver":"bridge"}"#
        );
        assert_eq!(
            serde_json::to_string(&NetworkDefinition::default()).unwrap(),
            "{}"
        );
        assert_eq!(
            serde_json::to_string(&NetworkDefinition::external()).unwrap(),
            r#"{"external":true}"#
        );
        assert_eq!(serde_json::to_string(&VolumeDefinition {}).unwrap(), "{}");
    }
}
