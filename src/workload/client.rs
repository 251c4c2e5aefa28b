//! Kubernetes implementation of [`WorkloadInspector`]

use crate::error::Result;
use crate::error::handlers::ClusterErrorHandler;
use crate::logging::Logger;
use crate::workload::{PodImages, WorkloadInspector};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams};
use kube::{Client, Config};

pub struct KubeWorkloadClient {
    client: Client,
    logger: Logger,
}

impl KubeWorkloadClient {
    /// Connect using the service account mounted into the pod
    pub fn in_cluster(logger: Logger) -> Result<Self> {
        let config = Config::incluster()?;
        let client = Client::try_from(config)
            .map_err(|e| ClusterErrorHandler::handle_kube_error("create Kubernetes client", e))?;
        Ok(Self { client, logger })
    }
}

#[async_trait]
impl WorkloadInspector for KubeWorkloadClient {
    async fn list_pods(&self) -> Result<Vec<PodImages>> {
        let api: Api<Pod> = Api::all(self.client.clone());
        let pods = api
            .list(&ListParams::default())
            .await
            .map_err(|e| ClusterErrorHandler::handle_kube_error("list pods", e))?;

        let pods: Vec<PodImages> = pods.items.iter().map(pod_images).collect();
        self.logger.debug(&format!("Found {} pods in the cluster", pods.len()));
        Ok(pods)
    }
}

pub(crate) fn pod_images(pod: &Pod) -> PodImages {
    let images = pod
        .spec
        .as_ref()
        .map(|spec| {
            spec.containers
                .iter()
                .filter_map(|container| container.image.clone())
                .collect()
        })
        .unwrap_or_default();

    PodImages::new(
        pod.metadata.namespace.clone().unwrap_or_default(),
        pod.metadata.name.clone().unwrap_or_default(),
        images,
    )
}
