use crate::source::SourceResource;

/// Path the ACME http-01 challenge responder is served on.
pub const ACME_CHALLENGE_PATH: &str = "/.well-known/acme-challenge";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPolicy {
    /// Label which marks an ingress as handled by kube-cert-manager
    pub required_label_key: String,
    pub required_label_value: String,
    /// Annotation holding the challenge provider
    pub required_annotation_key: String,
    pub required_provider_value: String,
    /// Namespace this process runs in, never scanned
    pub own_namespace: String,
    pub challenge_path: String,
    pub target_name: String,
    pub target_namespace: String,
    pub service_name: String,
    pub service_port: i32,
    pub ingress_class: Option<String>,
}

pub fn is_eligible(resource: &SourceResource, policy: &RoutingPolicy) -> bool {
    let class = match resource.labels.get(&policy.required_label_key) {
        Some(class) => class,
        None => return false,
    };
    if class != &policy.required_label_value {
        return false;
    }

    resource
        .annotations
        .get(&policy.required_annotation_key)
        .is_some_and(|provider| provider == &policy.required_provider_value)
}
