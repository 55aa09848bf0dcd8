use k8s_openapi::api::{
    core::v1::Namespace,
    networking::v1::{
        HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
        IngressServiceBackend, IngressSpec, IngressTLS, ServiceBackendPort,
    },
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::{Api, Client, api::DeleteParams};
use std::collections::BTreeMap;

pub const CLASS_LABEL: &str = "stable.k8s.psg.io/kcm.class";
pub const PROVIDER_ANNOTATION: &str = "stable.k8s.psg.io/kcm.provider";

pub struct TestResources {
    pub client: Client,
    pub namespace: String,
}

impl TestResources {
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            client,
            namespace: namespace.to_string(),
        }
    }

    pub async fn create_namespace(&self) -> Result<(), Box<dyn std::error::Error>> {
        let namespace = Namespace {
            metadata: ObjectMeta {
                name: Some(self.namespace.clone()),
                ..Default::default()
            },
            ..Default::default()
        };

        let namespaces: Api<Namespace> = Api::all(self.client.clone());

        match namespaces.create(&Default::default(), &namespace).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(ae)) if ae.code == 409 => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Creates an ingress asking kube-cert-manager for an http challenge.
    pub async fn create_handled_ingress(
        &self,
        name: &str,
        hosts: &[&str],
    ) -> Result<Ingress, Box<dyn std::error::Error>> {
        let mut labels = BTreeMap::new();
        labels.insert(CLASS_LABEL.to_string(), "default".to_string());
        let mut annotations = BTreeMap::new();
        annotations.insert(PROVIDER_ANNOTATION.to_string(), "http".to_string());

        self.create_test_ingress(name, labels, annotations, hosts)
            .await
    }

    pub async fn create_test_ingress(
        &self,
        name: &str,
        labels: BTreeMap<String, String>,
        annotations: BTreeMap<String, String>,
        hosts: &[&str],
    ) -> Result<Ingress, Box<dyn std::error::Error>> {
        let hosts: Vec<String> = hosts.iter().map(|h| h.to_string()).collect();
        let rules = hosts
            .iter()
            .map(|host| IngressRule {
                host: Some(host.clone()),
                http: Some(HTTPIngressRuleValue {
                    paths: vec![HTTPIngressPath {
                        path: Some("/".to_string()),
                        path_type: "Prefix".to_string(),
                        backend: IngressBackend {
                            service: Some(IngressServiceBackend {
                                name: "web".to_string(),
                                port: Some(ServiceBackendPort {
                                    number: Some(80),
                                    name: None,
                                }),
                            }),
                            ..Default::default()
                        },
                    }],
                }),
            })
            .collect();

        let ingress = Ingress {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(self.namespace.clone()),
                labels: Some(labels),
                annotations: Some(annotations),
                ..Default::default()
            },
            spec: Some(IngressSpec {
                rules: Some(rules),
                tls: Some(vec![IngressTLS {
                    hosts: Some(hosts),
                    secret_name: Some(format!("{name}-tls")),
                }]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let ingresses: Api<Ingress> = Api::namespaced(self.client.clone(), &self.namespace);
        Ok(ingresses.create(&Default::default(), &ingress).await?)
    }

    pub async fn get_ingress(&self, name: &str) -> Result<Option<Ingress>, Box<dyn std::error::Error>> {
        let ingresses: Api<Ingress> = Api::namespaced(self.client.clone(), &self.namespace);
        Ok(ingresses.get_opt(name).await?)
    }

    pub async fn delete_ingress(&self, name: &str) -> Result<(), Box<dyn std::error::Error>> {
        let ingresses: Api<Ingress> = Api::namespaced(self.client.clone(), &self.namespace);
        ingresses.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }

    pub async fn cleanup(&self) -> Result<(), Box<dyn std::error::Error>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        match namespaces
            .delete(&self.namespace, &DeleteParams::default())
            .await
        {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Hosts of the rules on an ingress, in order.
pub fn rule_hosts(ingress: &Ingress) -> Vec<String> {
    ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.rules.as_ref())
        .map(|rules| rules.iter().filter_map(|r| r.host.clone()).collect())
        .unwrap_or_default()
}
