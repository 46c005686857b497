#![allow(dead_code)]

use airlift_view::aggregator::Aggregator;
use airlift_view::airlift_client::AirliftClient;
use airlift_view::config::Config;
use airlift_view::time_format::FixedClock;
use serde_json::{json, Value};
use std::sync::Arc;

/// Frozen "now" for every lookup in the integration tests.
pub const NOW: i64 = 1_734_004_800;

/// Helper function to create a test config pointing at a mock server.
pub fn create_test_config(api_base_url: String) -> Config {
    Config {
        api_base_url,
        port: 8080,
        upstream_timeout_secs: 1,
        use_adsb: true,
    }
}

pub fn create_test_aggregator(api_base_url: String) -> Aggregator {
    let config = create_test_config(api_base_url);
    let client = AirliftClient::new(&config).expect("client builds");
    Aggregator::new(client, Arc::new(FixedClock(NOW)))
}

/// Aircraft payload shaped like the upstream service's response.
pub fn full_primary_payload() -> Value {
    json!({
        "tail_number": "N123AB",
        "fr24": {
            "model": "Gulfstream G650",
            "airline": null,
            "operator": "Executive Jet Management",
            "type_code": "GLF6",
            "airline_code": null,
            "operator_code": "EJM",
            "mode_s": "A0F4C1",
            "serial_msn": "6123",
            "source_url": null
        },
        "registry": {
            "owner": "WILMINGTON TRUST CO TRUSTEE",
            "status": "Valid",
            "airworthiness_class": "Standard",
            "certificate_issue_date": "2021-03-04",
            "airworthiness_date": "2015-06-10",
            "expiration": "2028-03-31",
            "engine": "ROLLS-ROYCE BR725 A1-12",
            "serial_number": "6123",
            "model_year": "2015",
            "fractional_owner": false,
            "seats": "19",
            "engines_count": "2",
            "source_url": "https://registry.faa.gov/AircraftInquiry/Search/NNumberResult?nNumberTxt=N123AB"
        },
        "adsb": {
            "callsign": "EJM123",
            "hex": "A0F4C1",
            "registration": null,
            "icao_type": "GLF6",
            "type_full": "Gulfstream G650",
            "type_desc": "Business Jet",
            "category": "A3",
            "squawk": "1200",
            "groundspeed_kt": "445",
            "baro_altitude": "43000",
            "ground_track": "210",
            "true_heading": "208",
            "mag_heading": "205",
            "position": "40.850100, -74.060800",
            "last_seen": "2 min",
            "source": "ADS-B",
            "message_rate": "5.4",
            "pos_epoch": NOW - 300
        },
        "links": {
            "fr24_url": null,
            "registry_source_url": null,
            "adsb_globe_url": "https://globe.adsbexchange.com/?icao=a0f4c1"
        },
        "inferred_operation": "Part 91 – Corporate/Private",
        "is_fractional": false,
        "buyer_roles_hint": [
            "Director of Maintenance (DOM)",
            "Chief Pilot",
            "Fleet Manager / Aviation Dept."
        ],
        "last_spotted": {
            "place_code": "TEB",
            "place_city": "Teterboro",
            "epoch": NOW - 300,
            "source": "ADS-B Exchange (epoch)"
        },
        "top_airports_7d": [{"code": "TEB", "count": 4}, {"code": "PBI", "count": 2}],
        "top_airports_30d": [{"code": "TEB", "count": 9}],
        "top_airports_90d": [],
        "recent_flights": [
            {"date_local": "2024-12-12", "from_airport": "PBI", "to_airport": "TEB", "callsign": "EJM123", "flight_time": "2:31"},
            {"date_local": "2024-12-09", "from_airport": "TEB", "to_airport": "PBI", "callsign": "EJM123", "flight_time": null}
        ],
        "likely_base": {"code": "TEB", "confidence": 0.87},
        "overnights_top": [{"airport": "TEB", "overnights": 3, "avg_ground_hours": 40.2}],
        "chase": {"score": 3, "reasons": ["Seen in last 72h", "Overnight groundtime present"]}
    })
}

pub fn contacts_payload() -> Value {
    json!({
        "tail_number": "N123AB",
        "airline": "Executive Jet Management",
        "contacts": {
            "airline": "Executive Jet Management",
            "dom": [{
                "name": "Dana Reyes",
                "title": "Director of Maintenance",
                "email": "dreyes@example.com",
                "company": "Executive Jet Management",
                "corporate_phone": "+1 513 555 0142"
            }],
            "occ": [],
            "other": []
        }
    })
}

pub fn empty_contacts_payload() -> Value {
    json!({
        "tail_number": "N123AB",
        "airline": "Executive Jet Management",
        "contacts": {"dom": [], "occ": [], "other": []}
    })
}
