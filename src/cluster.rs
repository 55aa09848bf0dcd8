use crate::error::Result;
use crate::source::SourceResource;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::api::networking::v1::Ingress;
use kube::{
    Client, ResourceExt,
    api::{Api, ListParams, PostParams},
};

/// Outcome of looking up the target ingress by name.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetLookup {
    Found(Box<Ingress>),
    NotFound,
}

#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<String>>;

    async fn list_ingresses(&self, namespace: &str) -> Result<Vec<SourceResource>>;

    async fn get_ingress(&self, namespace: &str, name: &str) -> Result<TargetLookup>;

    async fn create_ingress(&self, ingress: &Ingress) -> Result<()>;

    async fn update_ingress(&self, ingress: &Ingress) -> Result<()>;
}

#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn ingresses(&self, namespace: &str) -> Api<Ingress> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ClusterApi for KubeCluster {
    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items.iter().map(|ns| ns.name_any()).collect())
    }

    async fn list_ingresses(&self, namespace: &str) -> Result<Vec<SourceResource>> {
        let list = self
            .ingresses(namespace)
            .list(&ListParams::default())
            .await?;
        Ok(list.items.iter().map(SourceResource::from).collect())
    }

    async fn get_ingress(&self, namespace: &str, name: &str) -> Result<TargetLookup> {
        match self.ingresses(namespace).get_opt(name).await? {
            Some(ingress) => Ok(TargetLookup::Found(Box::new(ingress))),
            None => Ok(TargetLookup::NotFound),
        }
    }

    async fn create_ingress(&self, ingress: &Ingress) -> Result<()> {
        let namespace = ingress.namespace().unwrap_or_default();
        self.ingresses(&namespace)
            .create(&PostParams::default(), ingress)
            .await?;
        Ok(())
    }

    async fn update_ingress(&self, ingress: &Ingress) -> Result<()> {
        let namespace = ingress.namespace().unwrap_or_default();
        self.ingresses(&namespace)
            .replace(&ingress.name_any(), &PostParams::default(), ingress)
            .await?;
        Ok(())
    }
}
