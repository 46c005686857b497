/// Integration tests for the lookup pipeline with both upstream endpoints mocked.
mod common;

use airlift_view::aggregator::LookupOutcome;
use airlift_view::errors::{AppError, EMPTY_QUERY_MESSAGE, LOOKUP_FAILED_MESSAGE};
use airlift_view::normalizers::{DOM_GROUP, OCC_GROUP, OTHER_GROUP};
use airlift_view::reducer::UNKNOWN;
use airlift_view::view::{
    ContactsSection, ViewModel, CONTACTS_UNAVAILABLE_MESSAGE, NO_CONTACTS_MESSAGE,
};
use common::*;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_primary(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/aircraft"))
        .and(query_param("n", "N123AB"))
        .and(query_param("use_adsb", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

async fn mount_contacts(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/contacts-by-tail"))
        .and(query_param("n", "N123AB"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn expect_ready(outcome: LookupOutcome) -> ViewModel {
    match outcome {
        LookupOutcome::Ready { view } => *view,
        other => panic!("expected a ready view, got {:?}", other),
    }
}

#[tokio::test]
async fn test_flight_meta_without_source_url_has_no_link() {
    let server = MockServer::start().await;
    mount_primary(&server, json!({"fr24": {"model": "Gulfstream G650"}})).await;
    mount_contacts(&server, ResponseTemplate::new(200).set_body_json(empty_contacts_payload()))
        .await;

    let aggregator = create_test_aggregator(server.uri());
    let view = expect_ready(aggregator.lookup("N123AB").await.unwrap());

    assert_eq!(view.flight_meta.get("Model"), Some("Gulfstream G650"));
    assert!(view.flight_meta.links.is_empty());
    assert_eq!(view.identity.get("Tail Number"), Some("N123AB"));
}

#[tokio::test]
async fn test_likely_base_renders_confidence_percentage() {
    let server = MockServer::start().await;
    mount_primary(&server, full_primary_payload()).await;
    mount_contacts(&server, ResponseTemplate::new(200).set_body_json(contacts_payload())).await;

    let aggregator = create_test_aggregator(server.uri());
    let view = expect_ready(aggregator.lookup("n123ab").await.unwrap());

    assert_eq!(view.targeting.summary.get("Likely Base"), Some("TEB (conf 87%)"));
    assert_eq!(view.targeting.chase_score, 3);
    assert_eq!(
        view.targeting.overnights,
        vec!["TEB · 3 overnights · avg 40.2h ground"]
    );
    assert_eq!(view.registry.get("Fractional Owner"), Some("NO"));
    assert_eq!(view.registry.links.len(), 1);
    assert_eq!(view.telemetry.get("Registration"), Some("N123AB"));
    assert_eq!(view.telemetry.get("Last Seen"), Some("5 mins ago"));
    assert_eq!(view.telemetry.get("Type"), Some("GLF6 · Gulfstream G650"));
    assert_eq!(
        view.activity.summary.get("Last Spotted"),
        Some("5 mins ago · TEB (Teterboro)")
    );
    assert_eq!(view.flight_history.len(), 2);
    assert_eq!(view.flight_history[0].origin, "PBI");
    assert_eq!(view.flight_history[1].duration, UNKNOWN);

    let dom = view.contacts.group(DOM_GROUP).unwrap();
    assert_eq!(dom.entries[0].name, "Dana Reyes");
    assert_eq!(
        dom.entries[0].detail(),
        "Director of Maintenance · dreyes@example.com · +1 513 555 0142 · Executive Jet Management"
    );
    assert_eq!(
        view.contacts.group(OCC_GROUP).unwrap().empty_message,
        Some(NO_CONTACTS_MESSAGE)
    );
}

#[tokio::test]
async fn test_empty_query_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let aggregator = create_test_aggregator(server.uri());

    for query in ["", "   ", "#"] {
        let outcome = aggregator.lookup(query).await.unwrap();
        assert_eq!(
            outcome,
            LookupOutcome::Invalid {
                message: EMPTY_QUERY_MESSAGE.to_string()
            }
        );
    }
}

#[tokio::test]
async fn test_contacts_transport_error_degrades_only_contacts() {
    let server = MockServer::start().await;
    mount_primary(&server, full_primary_payload()).await;
    // Longer than the 1s client timeout
    mount_contacts(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(contacts_payload())
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let aggregator = create_test_aggregator(server.uri());
    let view = expect_ready(aggregator.lookup("N123AB").await.unwrap());

    assert_eq!(
        view.contacts,
        ContactsSection::Unavailable {
            message: CONTACTS_UNAVAILABLE_MESSAGE
        }
    );
    assert_eq!(view.flight_meta.fields.len(), 8);
    assert_eq!(view.registry.fields.len(), 12);
    assert_eq!(view.telemetry.fields.len(), 12);
    assert_eq!(view.registry.get("Owner"), Some("WILMINGTON TRUST CO TRUSTEE"));
    assert_eq!(view.telemetry.get("Callsign"), Some("EJM123"));
    assert_eq!(view.activity.top_airports_7d.len(), 2);
}

#[tokio::test]
async fn test_contacts_failure_isolated_from_other_sections() {
    let failing = MockServer::start().await;
    mount_primary(&failing, full_primary_payload()).await;
    mount_contacts(
        &failing,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let empty = MockServer::start().await;
    mount_primary(&empty, full_primary_payload()).await;
    mount_contacts(&empty, ResponseTemplate::new(200).set_body_json(empty_contacts_payload()))
        .await;

    let mut degraded = expect_ready(
        create_test_aggregator(failing.uri())
            .lookup("N123AB")
            .await
            .unwrap(),
    );
    let mut loaded = expect_ready(
        create_test_aggregator(empty.uri())
            .lookup("N123AB")
            .await
            .unwrap(),
    );

    assert_eq!(degraded.contacts, ContactsSection::unavailable());
    for label in [DOM_GROUP, OCC_GROUP, OTHER_GROUP] {
        let group = loaded.contacts.group(label).unwrap();
        assert!(group.entries.is_empty());
        assert_eq!(group.empty_message, Some(NO_CONTACTS_MESSAGE));
    }

    degraded.contacts = ContactsSection::Loading;
    loaded.contacts = ContactsSection::Loading;
    assert_eq!(degraded, loaded);
}

#[tokio::test]
async fn test_malformed_contacts_body_degrades() {
    let server = MockServer::start().await;
    mount_primary(&server, full_primary_payload()).await;
    mount_contacts(&server, ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .await;

    let aggregator = create_test_aggregator(server.uri());
    let view = expect_ready(aggregator.lookup("N123AB").await.unwrap());

    assert_eq!(view.contacts, ContactsSection::unavailable());
    assert_eq!(view.flight_meta.get("Model"), Some("Gulfstream G650"));
}

#[tokio::test]
async fn test_primary_failure_is_fatal_and_skips_contacts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/aircraft"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contacts-by-tail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contacts_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let aggregator = create_test_aggregator(server.uri());
    let err = aggregator.lookup("N123AB").await.unwrap_err();

    assert!(matches!(err, AppError::PrimaryFetch(_)));
    assert!(err.to_string().contains("503"));
    assert_eq!(err.user_message(), LOOKUP_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_primary_malformed_body_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/aircraft"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let aggregator = create_test_aggregator(server.uri());
    let err = aggregator.lookup("N123AB").await.unwrap_err();
    assert!(matches!(err, AppError::PrimaryFetch(_)));
}

#[tokio::test]
async fn test_repeated_lookup_is_identical() {
    let server = MockServer::start().await;
    mount_primary(&server, full_primary_payload()).await;
    mount_contacts(&server, ResponseTemplate::new(200).set_body_json(contacts_payload())).await;

    let aggregator = create_test_aggregator(server.uri());
    let first = expect_ready(aggregator.lookup("N123AB").await.unwrap());
    let second = expect_ready(aggregator.lookup("N123AB").await.unwrap());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_sparse_payload_fills_every_label() {
    let server = MockServer::start().await;
    mount_primary(&server, json!({})).await;
    mount_contacts(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;

    let aggregator = create_test_aggregator(server.uri());
    let view = expect_ready(aggregator.lookup("N123AB").await.unwrap());

    for section in [&view.flight_meta, &view.registry] {
        assert!(section.fields.iter().all(|f| f.value == UNKNOWN));
    }
    assert_eq!(view.telemetry.get("Registration"), Some("N123AB"));
    assert_eq!(view.targeting.chase_score, 0);
    assert_eq!(view.targeting.summary.get("Chase Score"), Some("0/5"));
    assert_eq!(view.activity.summary.get("Last Spotted"), Some(UNKNOWN));
    assert!(view.flight_history.is_empty());
    match &view.contacts {
        ContactsSection::Loaded { airline, groups } => {
            assert_eq!(airline, UNKNOWN);
            assert_eq!(groups.len(), 3);
        }
        other => panic!("expected loaded contacts, got {:?}", other),
    }
}

#[tokio::test]
async fn test_null_list_entries_keep_lookup_alive() {
    let server = MockServer::start().await;
    mount_primary(
        &server,
        json!({
            "fr24": {"model": "Gulfstream G650"},
            "top_airports_7d": [null, {"code": "TEB", "count": 2}],
            "recent_flights": [null],
            "chase": {"score": 2, "reasons": []}
        }),
    )
    .await;
    mount_contacts(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"contacts": {"dom": [null]}})),
    )
    .await;

    let aggregator = create_test_aggregator(server.uri());
    let view = expect_ready(aggregator.lookup("N123AB").await.unwrap());

    assert_eq!(view.flight_meta.get("Model"), Some("Gulfstream G650"));
    assert_eq!(view.activity.top_airports_7d.len(), 1);
    assert_eq!(view.activity.top_airports_7d[0].render(), "TEB (2)");
    assert!(view.flight_history.is_empty());
    assert_eq!(view.targeting.summary.get("Chase Score"), Some("2/5"));
    assert_eq!(view.targeting.summary.get("Chase Reasons"), Some(""));
    assert_eq!(
        view.contacts.group(DOM_GROUP).unwrap().empty_message,
        Some(NO_CONTACTS_MESSAGE)
    );
}
