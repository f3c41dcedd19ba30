//! Connection plumbing and a narrow seam over the operator service.
//!
//! The operator service is Temporal's management-plane API; the bootstrap
//! needs exactly two of its calls, wrapped in [`OperatorGateway`] so the
//! registration logic can be exercised against a fake cluster in tests.

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use temporal_client::{Client, OperatorService, RetryClient};
use temporal_sdk::sdk_client_options;
use temporal_sdk_core::Url;
use temporal_sdk_core_protos::temporal::api::operatorservice::v1::{
    AddSearchAttributesRequest, ListSearchAttributesRequest,
};

use crate::settings::Settings;

/// Connect to the Temporal frontend described by `settings`.
///
/// Returns a `RetryClient<Client>` which retries transient per-call failures;
/// establishing the connection itself is the caller's retry loop's problem.
pub async fn connect(settings: &Settings) -> anyhow::Result<RetryClient<Client>> {
    let url = Url::from_str(&settings.server_url())
        .with_context(|| format!("invalid Temporal address {:?}", settings.address))?;

    let opts = sdk_client_options(url)
        .build()
        .context("failed building Temporal client options")?;

    let client = opts
        .connect(settings.namespace.clone(), None)
        .await
        .context("failed connecting to Temporal server")?;

    Ok(client)
}

/// The management-plane calls the bootstrap needs.
#[async_trait]
pub trait OperatorGateway {
    /// Custom search attributes currently registered in `namespace`, as a
    /// name → indexed-value-type map. System attributes are not included.
    async fn list_custom_attributes(
        &mut self,
        namespace: &str,
    ) -> anyhow::Result<HashMap<String, i32>>;

    /// Register `attributes` (name → indexed-value-type) in `namespace`.
    async fn register_attributes(
        &mut self,
        namespace: &str,
        attributes: HashMap<String, i32>,
    ) -> anyhow::Result<()>;
}

#[async_trait]
impl OperatorGateway for RetryClient<Client> {
    async fn list_custom_attributes(
        &mut self,
        namespace: &str,
    ) -> anyhow::Result<HashMap<String, i32>> {
        let response = self
            .list_search_attributes(ListSearchAttributesRequest {
                namespace: namespace.to_owned(),
            })
            .await
            .context("ListSearchAttributes call failed")?;

        Ok(response.into_inner().custom_attributes)
    }

    async fn register_attributes(
        &mut self,
        namespace: &str,
        attributes: HashMap<String, i32>,
    ) -> anyhow::Result<()> {
        self.add_search_attributes(AddSearchAttributesRequest {
            namespace: namespace.to_owned(),
            search_attributes: attributes,
        })
        .await
        .context("AddSearchAttributes call failed")?;

        Ok(())
    }
}
