//! The startup sequence: wait for the cluster, diff, register.

use std::collections::HashMap;

use log::{error, info, warn};
use temporal_client::{Client, RetryClient};
use tokio::time::sleep;

use crate::attributes;
use crate::cluster::{self, OperatorGateway};
use crate::settings::Settings;

/// What the hook accomplished. Informational only — the hook never fails the
/// process that invoked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every required attribute was already registered; nothing was mutated.
    AllPresent,
    /// These attributes were missing and have been added.
    Registered(Vec<&'static str>),
    /// The cluster answered but the add call was rejected.
    RegistrationFailed,
    /// The cluster (or its operator service) never became reachable.
    Unavailable,
}

/// Run the whole hook: probe the cluster until it answers, then make sure
/// the required search attributes exist in the configured namespace.
pub async fn run(settings: &Settings) -> Outcome {
    let (mut client, existing) = match await_cluster(settings).await {
        Some(ready) => ready,
        None => return Outcome::Unavailable,
    };

    ensure_attributes(&mut client, &settings.namespace, existing).await
}

/// Probe until the frontend *and* its operator sub-service answer, or the
/// attempt budget runs out.
///
/// A successful `ListSearchAttributes` proves both are up and already yields
/// the current attribute set, so the readiness check and the initial read are
/// one call. Each attempt opens a fresh connection; a handle from a failed
/// attempt is not worth keeping.
async fn await_cluster(
    settings: &Settings,
) -> Option<(RetryClient<Client>, HashMap<String, i32>)> {
    for attempt in 1..=settings.attempts {
        match probe(settings).await {
            Ok(ready) => {
                info!("connected to Temporal at {}", settings.address);
                return Some(ready);
            }
            Err(err) => {
                warn!(
                    "Temporal not ready (attempt {attempt}/{}): {err:#}",
                    settings.attempts
                );
                if attempt < settings.attempts {
                    sleep(settings.retry_delay).await;
                }
            }
        }
    }

    error!(
        "failed to reach Temporal at {} after {} attempts; search attributes were not registered",
        settings.address, settings.attempts
    );
    None
}

async fn probe(settings: &Settings) -> anyhow::Result<(RetryClient<Client>, HashMap<String, i32>)> {
    let mut client = cluster::connect(settings).await?;
    let existing = client.list_custom_attributes(&settings.namespace).await?;
    Ok((client, existing))
}

/// Register whichever required attributes `existing` does not contain.
///
/// One add call covering all missing names, no retry: if the management
/// plane rejects it the hook logs and moves on, like every other failure
/// path here.
pub async fn ensure_attributes<G: OperatorGateway + Send>(
    gateway: &mut G,
    namespace: &str,
    existing: HashMap<String, i32>,
) -> Outcome {
    let missing = attributes::missing(&existing);
    if missing.is_empty() {
        info!("all required search attributes are present in namespace {namespace:?}");
        return Outcome::AllPresent;
    }

    let request = attributes::registration_request(&missing);
    match gateway.register_attributes(namespace, request).await {
        Ok(()) => {
            info!("added missing search attributes: {}", missing.join(", "));
            Outcome::Registered(missing)
        }
        Err(err) => {
            error!(
                "failed to register search attributes {}: {err:#}",
                missing.join(", ")
            );
            Outcome::RegistrationFailed
        }
    }
}
