use crate::error::{Error, Result};
use crate::policy::{ACME_CHALLENGE_PATH, RoutingPolicy};
use clap::Parser;
use std::time::Duration;

pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (git+sha: ",
    env!("GIT_SHA"),
    ")"
);

pub const DEFAULT_CLASS_LABEL: &str = "stable.k8s.psg.io/kcm.class";

/// Creates an ingress routing the ACME web challenge of every kube-cert-manager
/// handled ingress to the kube-cert-manager service.
#[derive(Parser, Debug, Clone)]
#[command(name = "kube-cert-ingress", version = VERSION)]
pub struct Config {
    /// Namespace where the webhooks ingress is created; never scanned
    #[arg(long, env = "KUBE_NAMESPACE", default_value = "kube-certificates")]
    pub namespace: String,

    /// Name of the ingress holding the acme webhooks
    #[arg(long, env = "INGRESS_NAME", default_value = "kube-cert-webhooks")]
    pub ingress_name: String,

    /// Time between synchronizations (e.g. 10s, 1m)
    #[arg(long, env = "SYNC_INTERVAL", value_parser = humantime::parse_duration, default_value = "10s")]
    pub interval: Duration,

    /// Label marking an ingress as handled by kube-cert-manager [default: stable.k8s.psg.io/kcm.class]
    #[arg(long, env = "KUBE_CERT_LABEL")]
    pub kube_cert_label: Option<String>,

    #[arg(long, env = "KUBE_CERT_ANNOTATION", hide = true)]
    pub kube_cert_annotation: Option<String>,

    /// Value of the class label we handle
    #[arg(long, env = "KUBE_CERT_CLASS", default_value = "default")]
    pub kube_cert_class: String,

    /// Annotation carrying the challenge provider
    #[arg(
        long,
        env = "KUBE_CERT_PROVIDER_ANNOTATION",
        default_value = "stable.k8s.psg.io/kcm.provider"
    )]
    pub kube_cert_provider_annotation: String,

    /// Provider value requesting http challenges
    #[arg(long, env = "KUBE_CERT_PROVIDER", default_value = "http")]
    pub kube_cert_provider: String,

    /// Service where kube-cert-manager answers web challenges
    #[arg(long, env = "KUBE_CERT_SERVICE", default_value = "kube-cert-manager")]
    pub kube_cert_service: String,

    /// Port of the kube-cert-manager service
    #[arg(long, env = "KUBE_CERT_SERVICE_PORT", default_value_t = 8080)]
    pub kube_cert_service_port: i32,

    /// Ingress class applied to the webhooks ingress
    #[arg(long, env = "INGRESS_CLASS")]
    pub ingress_class: Option<String>,

    /// Deadline for each call to the kubernetes api
    #[arg(long, env = "API_TIMEOUT", value_parser = humantime::parse_duration, default_value = "5s")]
    pub api_timeout: Duration,

    /// Address of the health and status server
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8081")]
    pub bind_address: String,

    /// Enable debug logging
    #[arg(long, env = "VERBOSE")]
    pub verbose: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("namespace", self.namespace.as_str()),
            ("ingress-name", self.ingress_name.as_str()),
            ("kube-cert-label", self.class_label()),
            (
                "kube-cert-provider-annotation",
                self.kube_cert_provider_annotation.as_str(),
            ),
            ("kube-cert-service", self.kube_cert_service.as_str()),
        ];
        for (flag, value) in required {
            if value.trim().is_empty() {
                return Err(Error::config(format!("--{flag} must not be empty")));
            }
        }

        if !(1..=65535).contains(&self.kube_cert_service_port) {
            return Err(Error::config(format!(
                "--kube-cert-service-port {} is not a valid port",
                self.kube_cert_service_port
            )));
        }
        if self.interval.is_zero() {
            return Err(Error::config("--interval must be greater than zero"));
        }
        if self.api_timeout.is_zero() {
            return Err(Error::config("--api-timeout must be greater than zero"));
        }

        Ok(())
    }

    // --kube-cert-annotation is the name older deployments still set
    pub fn class_label(&self) -> &str {
        self.kube_cert_label
            .as_deref()
            .or(self.kube_cert_annotation.as_deref())
            .unwrap_or(DEFAULT_CLASS_LABEL)
    }

    pub fn policy(&self) -> RoutingPolicy {
        RoutingPolicy {
            required_label_key: self.class_label().to_string(),
            required_label_value: self.kube_cert_class.clone(),
            required_annotation_key: self.kube_cert_provider_annotation.clone(),
            required_provider_value: self.kube_cert_provider.clone(),
            own_namespace: self.namespace.clone(),
            challenge_path: ACME_CHALLENGE_PATH.to_string(),
            target_name: self.ingress_name.clone(),
            target_namespace: self.namespace.clone(),
            service_name: self.kube_cert_service.clone(),
            service_port: self.kube_cert_service_port,
            ingress_class: self.ingress_class.clone().filter(|c| !c.is_empty()),
        }
    }
}
