use crate::cluster::{ClusterApi, TargetLookup};
use crate::error::{Error, Result};
use crate::hosts::{HostnameSet, diff};
use crate::ingress::build_target;
use crate::policy::{RoutingPolicy, is_eligible};
use crate::reporter::{Event, Reporter, TracingReporter};
use crate::source::extract_hosts;
use crate::state::State;
use chrono::Utc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Created,
    Updated,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Unchanged => "unchanged",
            Outcome::Created => "created",
            Outcome::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub outcome: Outcome,
    pub hosts: usize,
    /// Namespaces whose ingresses could not be listed this cycle
    pub skipped_namespaces: Vec<String>,
}

pub struct Reconciler<C, R = TracingReporter> {
    cluster: C,
    policy: RoutingPolicy,
    reporter: R,
    state: State,
    api_timeout: Duration,
    last_known_hosts: HostnameSet,
}

impl<C: ClusterApi> Reconciler<C, TracingReporter> {
    pub fn new(cluster: C, policy: RoutingPolicy) -> Self {
        Self::with_reporter(cluster, policy, TracingReporter)
    }
}

impl<C: ClusterApi, R: Reporter> Reconciler<C, R> {
    pub fn with_reporter(cluster: C, policy: RoutingPolicy, reporter: R) -> Self {
        Self {
            cluster,
            policy,
            reporter,
            state: State::default(),
            api_timeout: DEFAULT_API_TIMEOUT,
            last_known_hosts: HostnameSet::new(),
        }
    }

    pub fn api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = timeout;
        self
    }

    pub fn state(mut self, state: State) -> Self {
        self.state = state;
        self
    }

    /// Runs a cycle every `interval` for as long as the process lives.
    pub async fn run(mut self, interval: Duration) {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(err) = self.run_cycle().await {
                debug!(error = %err, kind = err.kind(), "synchronization cycle failed");
            }
        }
    }

    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let result = self.sync_once().await;
        self.publish(&result).await;
        result
    }

    async fn sync_once(&mut self) -> Result<CycleReport> {
        self.reporter.report(Event::CycleStarted);

        let namespaces = match self
            .bounded("list namespaces", self.cluster.list_namespaces())
            .await
        {
            Ok(namespaces) => namespaces,
            Err(e) => {
                let err = Error::ListNamespaces(Box::new(e));
                self.reporter.report(Event::ListNamespacesFailed {
                    error: err.to_string(),
                });
                return Err(err);
            }
        };

        let mut backends = Vec::new();
        let mut skipped_namespaces = Vec::new();

        for namespace in namespaces
            .iter()
            .filter(|ns| **ns != self.policy.own_namespace)
        {
            let ingresses = match self
                .bounded("list ingresses", self.cluster.list_ingresses(namespace))
                .await
            {
                Ok(ingresses) => ingresses,
                Err(e) => {
                    let err = Error::ListResources {
                        namespace: namespace.clone(),
                        source: Box::new(e),
                    };
                    self.reporter.report(Event::ListIngressesFailed {
                        namespace: namespace.clone(),
                        error: err.to_string(),
                    });
                    skipped_namespaces.push(namespace.clone());
                    continue;
                }
            };

            self.reporter.report(Event::NamespaceScanned {
                namespace: namespace.clone(),
                ingresses: ingresses.len(),
            });

            for ingress in &ingresses {
                if !is_eligible(ingress, &self.policy) {
                    self.reporter.report(Event::IngressNotHandled {
                        namespace: namespace.clone(),
                        name: ingress.name.clone(),
                    });
                    continue;
                }

                let hostnames = extract_hosts(ingress);
                if hostnames.is_empty() {
                    self.reporter.report(Event::IngressWithoutHosts {
                        namespace: namespace.clone(),
                        name: ingress.name.clone(),
                    });
                    continue;
                }

                backends.extend(hostnames);
            }
        }

        let current: HostnameSet = backends.into_iter().collect();

        let changes = diff(&self.last_known_hosts, &current);
        if changes.is_empty() {
            self.reporter.report(Event::Unchanged {
                hosts: current.len(),
            });
            return Ok(CycleReport {
                outcome: Outcome::Unchanged,
                hosts: current.len(),
                skipped_namespaces,
            });
        }

        self.reporter.report(Event::HostsChanged { changes });

        let outcome = self.upsert(&current).await?;

        self.reporter.report(Event::TargetSynced {
            verb: outcome.as_str(),
            hosts: current.len(),
        });
        let hosts = current.len();
        self.last_known_hosts = current;

        Ok(CycleReport {
            outcome,
            hosts,
            skipped_namespaces,
        })
    }

    async fn upsert(&self, hosts: &HostnameSet) -> Result<Outcome> {
        let mut ingress = build_target(hosts, &self.policy);
        let namespace = &self.policy.target_namespace;
        let name = &self.policy.target_name;

        let lookup = match self
            .bounded("get ingress", self.cluster.get_ingress(namespace, name))
            .await
        {
            Ok(lookup) => lookup,
            Err(e) => {
                let err = Error::TargetRetrieval {
                    namespace: namespace.clone(),
                    name: name.clone(),
                    source: Box::new(e),
                };
                self.reporter.report(Event::TargetRetrievalFailed {
                    error: err.to_string(),
                });
                return Err(err);
            }
        };

        let (outcome, verb, result) = match lookup {
            TargetLookup::NotFound => (
                Outcome::Created,
                "create",
                self.bounded("create ingress", self.cluster.create_ingress(&ingress))
                    .await,
            ),
            TargetLookup::Found(existing) => {
                ingress.metadata.resource_version = existing.metadata.resource_version.clone();
                (
                    Outcome::Updated,
                    "update",
                    self.bounded("update ingress", self.cluster.update_ingress(&ingress))
                        .await,
                )
            }
        };

        if let Err(e) = result {
            let err = Error::TargetWrite {
                verb,
                namespace: namespace.clone(),
                name: name.clone(),
                source: Box::new(e),
            };
            self.reporter.report(Event::TargetWriteFailed {
                verb,
                error: err.to_string(),
            });
            return Err(err);
        }

        Ok(outcome)
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.api_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                operation,
                after: self.api_timeout,
            }),
        }
    }

    async fn publish(&self, result: &Result<CycleReport>) {
        let now = Utc::now();
        let mut status = self.state.status.write().await;
        status.cycles += 1;
        status.last_cycle_at = Some(now);

        match result {
            Ok(report) => {
                status.last_outcome = Some(report.outcome.as_str().to_string());
                status.last_error = None;
                status.consecutive_failures = 0;
                status.skipped_namespaces = report.skipped_namespaces.clone();
                if report.outcome != Outcome::Unchanged {
                    status.last_write_at = Some(now);
                    status.hosts = self.last_known_hosts.clone();
                }
            }
            Err(err) => {
                status.last_outcome = Some(format!("failed: {}", err.kind()));
                status.last_error = Some(err.to_string());
                status.consecutive_failures += 1;
            }
        }
    }
}
