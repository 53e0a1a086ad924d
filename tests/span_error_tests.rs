// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Error attributes land on the span of the operation that failed.

use alloy_chains::NamedChain;
use alloy_primitives::{Address, Bytes};
use reg_ccip::deploy::{Artifact, Artifacts, DeploymentContext, MemoryDeploymentStore, Sequencer};
use reg_ccip::testing::FakeChainBackend;
use reg_ccip::{DeployConfig, NamedAccounts};
use serde_json::json;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::span::{Id, Record};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Names of spans that had `error.message` recorded, in recording order.
#[derive(Clone, Default)]
struct FailedSpans(Arc<Mutex<Vec<&'static str>>>);

struct ErrorMessageVisitor(bool);

impl Visit for ErrorMessageVisitor {
    fn record_debug(&mut self, field: &Field, _value: &dyn fmt::Debug) {
        if field.name() == "error.message" {
            self.0 = true;
        }
    }
}

impl<S> Layer<S> for FailedSpans
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let mut visitor = ErrorMessageVisitor(false);
        values.record(&mut visitor);
        if visitor.0 {
            if let Some(span) = ctx.span(id) {
                self.0.lock().unwrap().push(span.name());
            }
        }
    }
}

#[tokio::test]
async fn test_failed_step_records_error_on_step_and_run_spans() {
    let failed = FailedSpans::default();
    let subscriber = tracing_subscriber::registry().with(failed.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let backend = FakeChainBackend::new(31337);
    backend.fail_deploy(0);
    let store = MemoryDeploymentStore::new();
    let artifacts = Artifacts::new().with(Artifact::new(
        "WETH9",
        json!([]),
        Bytes::from_static(&[0xfe]),
    ));
    let addresses: Vec<Address> = (1..=4).map(Address::with_last_byte).collect();
    let accounts = NamedAccounts::from_accounts(&addresses).unwrap();
    let config = DeployConfig::builder()
        .rpc_url("http://127.0.0.1:8545".parse().unwrap())
        .chain(NamedChain::AnvilHardhat)
        .build();
    let ctx = DeploymentContext::builder()
        .backend(&backend)
        .store(&store)
        .artifacts(&artifacts)
        .accounts(&accounts)
        .config(&config)
        .build();

    Sequencer::run(&ctx, &["WETH"]).await.unwrap_err();

    let names = failed.0.lock().unwrap().clone();
    assert_eq!(
        names,
        vec!["reg_ccip.deploy_step", "reg_ccip.run_sequence"],
        "{names:?}"
    );
}
