use crate::functional::resources::rule_hosts;
use crate::functional::{TestCluster, TestResources};
use clap::Parser;
use kube_cert_ingress::cluster::KubeCluster;
use kube_cert_ingress::config::Config;
use kube_cert_ingress::server::Server;
use kube_cert_ingress::{Outcome, Reconciler};
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::time::{Duration, sleep};

fn test_config(args: &[&str]) -> Config {
    let mut argv = vec!["kube-cert-ingress"];
    argv.extend_from_slice(args);
    Config::try_parse_from(argv).expect("valid test config")
}

#[tokio::test]
async fn test_reconciler_creates_and_updates_webhooks_ingress()
-> Result<(), Box<dyn std::error::Error>> {
    let cluster = TestCluster::new().await?;
    let own = TestResources::new(cluster.client.clone(), "kube-certificates");
    let apps = TestResources::new(cluster.client.clone(), "apps");
    let other = TestResources::new(cluster.client.clone(), "other");
    own.create_namespace().await?;
    apps.create_namespace().await?;
    other.create_namespace().await?;

    apps.create_handled_ingress("web", &["b.example.com", "a.example.com"])
        .await?;
    other
        .create_test_ingress("plain", BTreeMap::new(), BTreeMap::new(), &["c.example.com"])
        .await?;
    own.create_handled_ingress("self", &["self.example.com"])
        .await?;

    let config = test_config(&[]);
    let mut reconciler = Reconciler::new(KubeCluster::new(cluster.client.clone()), config.policy());

    let report = reconciler.run_cycle().await?;
    assert_eq!(report.outcome, Outcome::Created);

    let target = own
        .get_ingress("kube-cert-webhooks")
        .await?
        .expect("webhooks ingress should exist");
    assert_eq!(rule_hosts(&target), vec!["a.example.com", "b.example.com"]);

    let report = reconciler.run_cycle().await?;
    assert_eq!(report.outcome, Outcome::Unchanged);

    apps.create_handled_ingress("api", &["api.example.com"]).await?;
    let report = reconciler.run_cycle().await?;
    assert_eq!(report.outcome, Outcome::Updated);

    let target = own.get_ingress("kube-cert-webhooks").await?.unwrap();
    assert_eq!(
        rule_hosts(&target),
        vec!["a.example.com", "api.example.com", "b.example.com"]
    );

    apps.delete_ingress("web").await?;
    apps.delete_ingress("api").await?;
    let report = reconciler.run_cycle().await?;
    assert_eq!(report.outcome, Outcome::Updated);
    let target = own.get_ingress("kube-cert-webhooks").await?.unwrap();
    assert!(rule_hosts(&target).is_empty());

    apps.cleanup().await?;
    other.cleanup().await?;
    own.cleanup().await?;
    cluster.cleanup().await?;
    Ok(())
}

#[tokio::test]
async fn test_server_reports_state() -> Result<(), Box<dyn std::error::Error>> {
    let cluster = TestCluster::new().await?;
    let own = TestResources::new(cluster.client.clone(), "kube-certificates");
    let apps = TestResources::new(cluster.client.clone(), "apps");
    own.create_namespace().await?;
    apps.create_namespace().await?;
    apps.create_handled_ingress("web", &["a.example.com"]).await?;

    let config = test_config(&["--bind-address", "127.0.0.1:0", "--interval", "1s"]);
    let server = Server::new_with_client(config, cluster.client.clone())
        .await
        .map_err(|e| e.to_string())?;
    let server_url = format!("http://{}", server.addr);
    let _server_handle = tokio::spawn(async move { server.serve().await });

    sleep(Duration::from_secs(4)).await;

    let health = reqwest::get(format!("{server_url}/healthz")).await?;
    assert_eq!(health.status(), reqwest::StatusCode::OK);

    let state: Value = reqwest::get(format!("{server_url}/state")).await?.json().await?;
    assert_eq!(state["hosts"], serde_json::json!(["a.example.com"]));
    assert_eq!(state["consecutive_failures"], 0);
    assert!(state["cycles"].as_u64().unwrap() >= 1);

    apps.cleanup().await?;
    own.cleanup().await?;
    cluster.cleanup().await?;
    Ok(())
}
