use crate::cluster::KubeCluster;
use crate::config::Config;
use crate::controller::Reconciler;
use crate::error::Error;
use crate::{router, state::State};
use kube::Client;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub struct Server {
    pub state: State,
    pub addr: SocketAddr,
    pub listener: tokio::net::TcpListener,
    pub router: axum::Router,
    pub client: Client,
    pub config: Config,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = Client::try_default().await?;
        Self::new_with_client(config, client).await
    }

    pub async fn new_with_client(
        config: Config,
        client: Client,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        config.validate()?;

        let state = State::default();
        let router = router::new_router(state.clone());
        let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
        let addr = listener.local_addr()?;

        Ok(Server {
            state,
            addr,
            listener,
            router,
            client,
            config,
        })
    }

    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let reconciler = Reconciler::new(KubeCluster::new(self.client.clone()), self.config.policy())
            .api_timeout(self.config.api_timeout)
            .state(self.state.clone());
        let interval = self.config.interval;

        let reconciler_handle = tokio::spawn(async move {
            info!(interval = ?interval, "starting the ingress reconciler");
            reconciler.run(interval).await;
        });

        info!(addr = %self.addr, "serving health and status endpoints");
        supervise(
            axum::serve(self.listener, self.router).into_future(),
            reconciler_handle,
        )
        .await
    }
}

async fn supervise<F>(
    server: F,
    mut reconciler: JoinHandle<()>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        served = server => {
            reconciler.abort();
            if let Err(err) = &served {
                error!(error = %err, "status server failed");
            }
            served?;
            Ok(())
        }
        joined = &mut reconciler => {
            let reason = match joined {
                Ok(()) => "finished unexpectedly".to_string(),
                Err(err) => err.to_string(),
            };
            error!(reason = %reason, "the ingress reconciler is no longer running");
            Err(Error::LoopStopped(reason).into())
        }
    }
}
