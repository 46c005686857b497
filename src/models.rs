use crate::reducer::{first_present_key, Scalar};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============ Aircraft Lookup Payload ============

/// Response body of `GET /api/aircraft`.
///
/// Every field is optional; absent sub-records deserialize to their defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawPrimaryPayload {
    /// Normalized tail number echoed by the upstream service.
    pub tail_number: Option<Scalar>,
    pub fr24: Option<Fr24Info>,
    pub registry: Option<RegistryInfo>,
    pub adsb: Option<AdsbInfo>,
    pub links: Option<Links>,

    pub inferred_operation: Option<Scalar>,
    pub is_fractional: Option<Scalar>,
    pub buyer_roles_hint: Option<Vec<Option<Scalar>>>,

    pub last_spotted: Option<LastSpotted>,
    // List elements are optional too: a `null` entry is skipped, not fatal.
    pub top_airports_7d: Option<Vec<Option<AirportHit>>>,
    pub top_airports_30d: Option<Vec<Option<AirportHit>>>,
    pub top_airports_90d: Option<Vec<Option<AirportHit>>>,
    pub recent_flights: Option<Vec<Option<FlightRecord>>>,

    pub likely_base: Option<OperatingBase>,
    pub overnights_top: Option<Vec<Option<OvernightStat>>>,
    pub chase: Option<ChaseScore>,
}

/// Flight-tracking metadata.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Fr24Info {
    pub model: Option<Scalar>,
    pub airline: Option<Scalar>,
    pub operator: Option<Scalar>,
    pub type_code: Option<Scalar>,
    pub airline_code: Option<Scalar>,
    pub operator_code: Option<Scalar>,
    pub mode_s: Option<Scalar>,
    pub serial_msn: Option<Scalar>,
    pub source_url: Option<String>,
}

/// Aircraft registry record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryInfo {
    pub owner: Option<Scalar>,
    pub status: Option<Scalar>,
    pub airworthiness_class: Option<Scalar>,
    pub certificate_issue_date: Option<Scalar>,
    pub airworthiness_date: Option<Scalar>,
    pub expiration: Option<Scalar>,
    pub engine: Option<Scalar>,
    pub serial_number: Option<Scalar>,
    pub model_year: Option<Scalar>,
    /// Tri-state: explicit yes, explicit no, or not reported.
    pub fractional_owner: Option<Scalar>,
    pub seats: Option<Scalar>,
    pub engines_count: Option<Scalar>,
    pub source_url: Option<String>,
}

/// Live ADS-B panel.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AdsbInfo {
    pub callsign: Option<Scalar>,
    pub hex: Option<Scalar>,
    pub registration: Option<Scalar>,
    pub icao_type: Option<Scalar>,
    pub type_full: Option<Scalar>,
    pub type_desc: Option<Scalar>,
    pub category: Option<Scalar>,
    pub squawk: Option<Scalar>,
    pub groundspeed_kt: Option<Scalar>,
    pub baro_altitude: Option<Scalar>,
    pub ground_track: Option<Scalar>,
    pub true_heading: Option<Scalar>,
    pub mag_heading: Option<Scalar>,
    pub position: Option<Scalar>,
    /// Provider's own free-text age, e.g. "5 h".
    pub last_seen: Option<Scalar>,
    pub source: Option<Scalar>,
    pub message_rate: Option<Scalar>,
    /// Epoch seconds of the last position; sometimes delivered as text.
    pub pos_epoch: Option<Scalar>,
}

/// Outbound links resolved by the upstream service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Links {
    pub fr24_url: Option<String>,
    pub registry_source_url: Option<String>,
    pub adsb_globe_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LastSpotted {
    pub place_code: Option<Scalar>,
    pub place_city: Option<Scalar>,
    pub epoch: Option<Scalar>,
    pub source: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AirportHit {
    pub code: Option<Scalar>,
    pub count: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FlightRecord {
    pub date_local: Option<Scalar>,
    pub from_airport: Option<Scalar>,
    pub to_airport: Option<Scalar>,
    pub callsign: Option<Scalar>,
    pub flight_time: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OperatingBase {
    pub code: Option<Scalar>,
    /// Fraction in `[0, 1]`.
    pub confidence: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OvernightStat {
    pub airport: Option<Scalar>,
    pub overnights: Option<Scalar>,
    pub avg_ground_hours: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ChaseScore {
    pub score: Option<Scalar>,
    pub reasons: Option<Vec<Option<Scalar>>>,
}

// ============ Contacts Lookup Payload ============

/// Response body of `GET /api/contacts-by-tail`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawContactsPayload {
    pub tail_number: Option<Scalar>,
    pub airline: Option<Scalar>,
    pub contacts: Option<ContactGroups>,
}

/// Contacts grouped by role.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactGroups {
    pub airline: Option<Scalar>,
    /// Maintenance (Director of Maintenance).
    pub dom: Option<Vec<Option<ContactEntry>>>,
    /// Dispatch / operations control.
    pub occ: Option<Vec<Option<ContactEntry>>>,
    pub other: Option<Vec<Option<ContactEntry>>>,
}

/// Phone number keys, most preferred first. The directory exports have used
/// both names over time.
pub const PHONE_FIELDS: &[&str] = &["corporate_phone", "phone"];

/// One directory row. No field is required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactEntry {
    pub name: Option<Scalar>,
    pub title: Option<Scalar>,
    pub email: Option<Scalar>,
    pub company: Option<Scalar>,
    /// Remaining keys, including the phone synonyms in [`PHONE_FIELDS`].
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContactEntry {
    /// Phone number from the first present synonym key.
    pub fn phone(&self) -> Option<Scalar> {
        first_present_key(&self.extra, PHONE_FIELDS)
    }
}
