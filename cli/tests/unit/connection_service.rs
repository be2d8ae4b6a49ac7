//! Tests for the connection controller: connect and provisioning flows.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use ccdeploy_cli::application::services::connection::{
    CONNECT_FAILED, CONNECT_FAILED_STATUS, CONNECTING, ConnectOutcome, ConnectionController,
    PROVISION_FAILED, PROVISIONING,
};
use ccdeploy_cli::application::services::registry::ComputerRegistry;
use ccdeploy_cli::domain::error::{ValidationError, WorkflowError};

use crate::mocks::{
    Call, RecordingApi, RecordingNotifier, installed, message, missing, rejected, rejected_blank,
    unreachable,
};

#[tokio::test]
async fn test_connect_blank_name_alerts_without_request() {
    for name in ["", "   ", "\t\n"] {
        let api = RecordingApi::new();
        let ui = RecordingNotifier::new();
        let mut conn = ConnectionController::new();
        let mut registry = ComputerRegistry::new();

        let err = conn
            .connect(name, &api, &mut registry, &ui)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            WorkflowError::Validation(ValidationError::MissingWorldName)
        );
        assert!(api.calls().is_empty(), "no request for {name:?}");
        assert_eq!(ui.alerts(), vec!["Please enter a world name."]);
        assert!(ui.modals().is_empty());
    }
}

#[tokio::test]
async fn test_connect_trims_world_name() {
    let api = RecordingApi::new();
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    conn.connect("  TestWorld ", &api, &mut registry, &ui)
        .await
        .unwrap();

    assert_eq!(api.calls()[0], Call::Connect("TestWorld".to_string()));
    assert_eq!(conn.session().unwrap().name, "TestWorld");
}

#[tokio::test]
async fn test_connect_installed_lists_exactly_once() {
    let api = RecordingApi::new()
        .with_connect(Ok(installed("Connected to world TestWorld")))
        .with_computers(&["1", "2"]);
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    let outcome = conn
        .connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap();

    assert_eq!(outcome, ConnectOutcome::Ready { computers: Some(2) });
    assert_eq!(api.list_calls(), 1);
    assert!(!conn.provision_offered());
    assert!(conn.subsystem_installed());
    assert_eq!(conn.status(), "Connected to world TestWorld");
    assert_eq!(registry.ids().len(), 2);
    assert_eq!(
        ui.statuses(),
        vec![CONNECTING.to_string(), "Connected to world TestWorld".to_string()]
    );
}

#[tokio::test]
async fn test_connect_keeps_server_counts_on_session() {
    let api = RecordingApi::new().with_connect(Ok(installed("ok")));
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    conn.connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap();

    let session = conn.session().unwrap();
    assert_eq!(session.computers_found, Some(true));
    assert_eq!(session.max_computer_id, Some(2));
    assert_eq!(session.status_text, "ok");
}

#[tokio::test]
async fn test_connect_missing_offers_provisioning_and_does_not_list() {
    let api = RecordingApi::new().with_connect(Ok(missing("ComputerCraft not found.")));
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    let outcome = conn
        .connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap();

    assert_eq!(outcome, ConnectOutcome::NeedsProvisioning);
    assert_eq!(api.list_calls(), 0);
    assert!(conn.provision_offered());
    assert!(!conn.subsystem_installed());
    assert_eq!(conn.status(), "ComputerCraft not found.");
}

#[tokio::test]
async fn test_connect_rejected_shows_server_message_in_modal_and_status() {
    let api = RecordingApi::new().with_connect(Err(rejected("World folder not found.")));
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    let err = conn
        .connect("Nowhere", &api, &mut registry, &ui)
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::Remote("World folder not found.".into()));
    assert_eq!(conn.status(), "World folder not found.");
    let modals = ui.modals();
    assert_eq!(modals.len(), 1);
    assert_eq!(modals[0].message, "World folder not found.");
    assert!(!modals[0].offer_save_settings);
    assert_eq!(api.list_calls(), 0);
}

#[tokio::test]
async fn test_connect_rejected_without_message_uses_generic_text() {
    let api = RecordingApi::new().with_connect(Err(rejected_blank()));
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    conn.connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap_err();

    assert_eq!(conn.status(), CONNECT_FAILED_STATUS);
    assert_eq!(ui.modals()[0].message, CONNECT_FAILED);
}

#[tokio::test]
async fn test_connect_unreachable_offers_save_settings() {
    let api = RecordingApi::new().with_connect(Err(unreachable()));
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    let err = conn
        .connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::Transport(CONNECT_FAILED.into()));
    assert_eq!(conn.status(), CONNECT_FAILED_STATUS);
    let modal = &ui.modals()[0];
    assert_eq!(modal.message, CONNECT_FAILED);
    assert!(modal.offer_save_settings);
}

#[tokio::test]
async fn test_failed_connect_keeps_previous_installed_flag() {
    let api = RecordingApi::new().with_connect(Ok(installed("Connected")));
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();
    conn.connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap();

    let api = api.with_connect(Err(unreachable()));
    conn.connect("OtherWorld", &api, &mut registry, &ui)
        .await
        .unwrap_err();

    let session = conn.session().unwrap();
    assert_eq!(session.name, "TestWorld");
    assert!(session.subsystem_installed);
    assert_eq!(session.status_text, CONNECT_FAILED_STATUS);
}

#[tokio::test]
async fn test_failed_first_connect_leaves_flag_false() {
    let api = RecordingApi::new().with_connect(Err(rejected("boom")));
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    conn.connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap_err();

    assert!(conn.session().is_none());
    assert!(!conn.subsystem_installed());
}

#[tokio::test]
async fn test_provision_success_lists_once_and_hides_affordance() {
    let api = RecordingApi::new()
        .with_connect(Ok(missing("ComputerCraft not found.")))
        .with_provision(Ok(message("ComputerCraft folders created.")))
        .with_computers(&["0"]);
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();
    conn.connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap();
    assert!(conn.provision_offered());

    let listed = conn
        .provision("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap();

    assert_eq!(listed, Some(1));
    assert_eq!(api.list_calls(), 1);
    assert!(!conn.provision_offered());
    assert!(conn.subsystem_installed());
    assert_eq!(conn.status(), "ComputerCraft folders created.");
    assert!(ui.statuses().contains(&PROVISIONING.to_string()));
}

#[tokio::test]
async fn test_provision_without_prior_connect_creates_session() {
    let api = RecordingApi::new();
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    conn.provision("Fresh", &api, &mut registry, &ui)
        .await
        .unwrap();

    assert_eq!(api.calls()[0], Call::Provision("Fresh".to_string()));
    let session = conn.session().unwrap();
    assert_eq!(session.name, "Fresh");
    assert!(session.subsystem_installed);
}

#[tokio::test]
async fn test_provision_blank_name_alerts_without_request() {
    let api = RecordingApi::new();
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    conn.provision(" ", &api, &mut registry, &ui)
        .await
        .unwrap_err();

    assert!(api.calls().is_empty());
    assert_eq!(ui.alerts(), vec!["Please enter a world name."]);
}

#[tokio::test]
async fn test_provision_failure_leaves_flag_and_affordance() {
    let api = RecordingApi::new()
        .with_connect(Ok(missing("missing")))
        .with_provision(Err(rejected_blank()));
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();
    conn.connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap();

    let err = conn
        .provision("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::Remote(PROVISION_FAILED.into()));
    assert!(!conn.subsystem_installed());
    assert!(conn.provision_offered());
    assert_eq!(api.list_calls(), 0);
    assert_eq!(ui.modals()[0].message, PROVISION_FAILED);
}

#[tokio::test]
async fn test_connect_ready_with_failed_listing_reports_none() {
    let api = RecordingApi::new().with_connect(Ok(installed("Connected")));
    api.set_list(Err(rejected("world not found")));
    let ui = RecordingNotifier::new();
    let mut conn = ConnectionController::new();
    let mut registry = ComputerRegistry::new();

    let outcome = conn
        .connect("TestWorld", &api, &mut registry, &ui)
        .await
        .unwrap();

    assert_eq!(outcome, ConnectOutcome::Ready { computers: None });
    assert_eq!(ui.modals()[0].message, "world not found");
}
