use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    #[error("{operation} did not complete within {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("unable to get namespace list: {0}")]
    ListNamespaces(#[source] Box<Error>),

    #[error("unable to retrieve the ingresses in namespace {namespace}: {source}")]
    ListResources {
        namespace: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unable to retrieve ingress {namespace}/{name}: {source}")]
    TargetRetrieval {
        namespace: String,
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unable to {verb} ingress {namespace}/{name}: {source}")]
    TargetWrite {
        verb: &'static str,
        namespace: String,
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("the reconcile loop stopped: {0}")]
    LoopStopped(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Error::Kube(_) => "kube",
            Error::Timeout { .. } => "timeout",
            Error::ListNamespaces(_) => "list_namespaces",
            Error::ListResources { .. } => "list_resources",
            Error::TargetRetrieval { .. } => "target_retrieval",
            Error::TargetWrite { .. } => "target_write",
            Error::Config(_) => "config",
            Error::LoopStopped(_) => "loop_stopped",
        }
    }
}
