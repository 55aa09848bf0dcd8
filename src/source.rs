use k8s_openapi::api::networking::v1::Ingress;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceResource {
    pub namespace: String,
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    /// One entry per `spec.tls` item, hosts in declaration order
    pub tls_hosts: Vec<Vec<String>>,
}

impl From<&Ingress> for SourceResource {
    fn from(ingress: &Ingress) -> Self {
        let tls_hosts = ingress
            .spec
            .as_ref()
            .and_then(|spec| spec.tls.as_ref())
            .map(|tls| {
                tls.iter()
                    .map(|entry| entry.hosts.clone().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        SourceResource {
            namespace: ingress.metadata.namespace.clone().unwrap_or_default(),
            name: ingress.metadata.name.clone().unwrap_or_default(),
            labels: ingress.metadata.labels.clone().unwrap_or_default(),
            annotations: ingress.metadata.annotations.clone().unwrap_or_default(),
            tls_hosts,
        }
    }
}

pub fn extract_hosts(resource: &SourceResource) -> Vec<String> {
    resource.tls_hosts.iter().flatten().cloned().collect()
}
