use crate::hosts::HostnameSet;
use crate::policy::RoutingPolicy;
use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, ServiceBackendPort,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";
pub const MANAGED_BY: &str = "kube-cert-ingress";
pub const INGRESS_CLASS_ANNOTATION: &str = "kubernetes.io/ingress.class";

pub fn build_target(hosts: &HostnameSet, policy: &RoutingPolicy) -> Ingress {
    let mut labels = BTreeMap::new();
    labels.insert(MANAGED_BY_LABEL.to_string(), MANAGED_BY.to_string());

    let annotations = policy.ingress_class.as_ref().map(|class| {
        let mut annotations = BTreeMap::new();
        annotations.insert(INGRESS_CLASS_ANNOTATION.to_string(), class.clone());
        annotations
    });

    let rules: Vec<IngressRule> = hosts
        .iter()
        .map(|host| build_rule(host, policy))
        .collect();

    Ingress {
        metadata: ObjectMeta {
            name: Some(policy.target_name.clone()),
            namespace: Some(policy.target_namespace.clone()),
            labels: Some(labels),
            annotations,
            ..Default::default()
        },
        spec: Some(IngressSpec {
            ingress_class_name: policy.ingress_class.clone(),
            rules: Some(rules),
            ..Default::default()
        }),
        status: None,
    }
}

fn build_rule(host: &str, policy: &RoutingPolicy) -> IngressRule {
    IngressRule {
        host: Some(host.to_string()),
        http: Some(HTTPIngressRuleValue {
            paths: vec![HTTPIngressPath {
                path: Some(policy.challenge_path.clone()),
                path_type: "Prefix".to_string(),
                backend: IngressBackend {
                    service: Some(IngressServiceBackend {
                        name: policy.service_name.clone(),
                        port: Some(ServiceBackendPort {
                            number: Some(policy.service_port),
                            name: None,
                        }),
                    }),
                    ..Default::default()
                },
            }],
        }),
    }
}
