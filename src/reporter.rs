use tracing::{debug, error, info, warn};

/// Something worth telling the operator about during a sync cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CycleStarted,
    ListNamespacesFailed {
        error: String,
    },
    ListIngressesFailed {
        namespace: String,
        error: String,
    },
    NamespaceScanned {
        namespace: String,
        ingresses: usize,
    },
    IngressNotHandled {
        namespace: String,
        name: String,
    },
    IngressWithoutHosts {
        namespace: String,
        name: String,
    },
    Unchanged {
        hosts: usize,
    },
    HostsChanged {
        changes: Vec<String>,
    },
    TargetRetrievalFailed {
        error: String,
    },
    TargetWriteFailed {
        verb: &'static str,
        error: String,
    },
    TargetSynced {
        verb: &'static str,
        hosts: usize,
    },
}

pub trait Reporter: Send + Sync {
    fn report(&self, event: Event);
}

#[derive(Debug, Clone, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: Event) {
        match event {
            Event::CycleStarted => debug!("performing a synchronization of ingresses"),
            Event::ListNamespacesFailed { error } => {
                error!(error = %error, "unable to synchronize the ingresses")
            }
            Event::ListIngressesFailed { namespace, error } => {
                error!(
                    namespace = %namespace,
                    error = %error,
                    "unable to retrieve the ingresses in namespace"
                )
            }
            Event::NamespaceScanned {
                namespace,
                ingresses,
            } => debug!(
                namespace = %namespace,
                ingresses,
                "inspecting the namespace for ingresses"
            ),
            Event::IngressNotHandled { namespace, name } => debug!(
                namespace = %namespace,
                name = %name,
                "skipping ingress, it is not being handled"
            ),
            Event::IngressWithoutHosts { namespace, name } => warn!(
                namespace = %namespace,
                name = %name,
                "ingress does not contain any tls hosts"
            ),
            Event::Unchanged { hosts } => debug!(hosts, "no changes to the ingress hostnames"),
            Event::HostsChanged { changes } => info!(
                changes = changes.len(),
                names = %changes.join(","),
                "the above hostnames have changed"
            ),
            Event::TargetRetrievalFailed { error } => {
                error!(error = %error, "unable to retrieve the webhooks ingress")
            }
            Event::TargetWriteFailed { verb, error } => {
                error!(verb, error = %error, "unable to write the webhooks ingress")
            }
            Event::TargetSynced { verb, hosts } => {
                info!(verb, hosts, "successfully updated the ingress resource")
            }
        }
    }
}
