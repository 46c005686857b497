/// Source normalizers: raw provider records to view-model sections.
///
/// Each function is pure. Absent fields never error, they render as the
/// `unknown` sentinel, and every section always carries its full label set.
use crate::models::{
    AdsbInfo, AirportHit, ChaseScore, ContactEntry, Fr24Info, LastSpotted, Links,
    OperatingBase, OvernightStat, RawContactsPayload, RawPrimaryPayload, RegistryInfo,
};
use crate::reducer::{join_present, reduce, reduce_join, FieldValue, Scalar, UNKNOWN};
use crate::time_format::format_ago;
use crate::view::{
    ActivitySection, ContactGroup, ContactLine, ContactPiece, ContactsSection, FlightRow, Pill,
    Section, TargetingSection, NO_CONTACTS_MESSAGE,
};

/// Upper bound of the chase score.
pub const MAX_CHASE_SCORE: i64 = 5;

const DOT: &str = " · ";

/// Canonical tail number for a user query: trimmed, leading `#` removed,
/// upper-cased and `N`-prefixed. `None` when nothing is left.
pub fn normalize_tail(raw: &str) -> Option<String> {
    let cleaned = raw.trim().trim_start_matches('#').trim().to_uppercase();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.starts_with('N') {
        Some(cleaned)
    } else {
        Some(format!("N{}", cleaned))
    }
}

fn present(value: &Option<Scalar>) -> Option<&Scalar> {
    value.as_ref().filter(|v| v.is_present())
}

/// Integers and floats only; numeric-looking strings do not count.
fn numeric(value: &Option<Scalar>) -> Option<f64> {
    match value {
        Some(Scalar::Int(i)) => Some(*i as f64),
        Some(Scalar::Float(f)) if f.is_finite() => Some(*f),
        _ => None,
    }
}

fn epoch(value: &Option<Scalar>) -> Option<i64> {
    value.as_ref().and_then(Scalar::as_i64).filter(|e| *e != 0)
}

/// First candidate URL that is non-blank once trimmed.
fn present_url<'a>(candidates: [Option<&'a String>; 2]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(|url| url.trim())
        .find(|url| !url.is_empty())
}

// ============ Flight Meta ============

/// Identity (tail number) and flight-tracking metadata.
///
/// The tail falls back to the normalized query when the payload does not echo one.
pub fn flight_meta(payload: &RawPrimaryPayload, query_tail: &str) -> (Section, Section) {
    let default_fr24 = Fr24Info::default();
    let default_links = Links::default();
    let fr24 = payload.fr24.as_ref().unwrap_or(&default_fr24);
    let links = payload.links.as_ref().unwrap_or(&default_links);

    let query_tail = Scalar::from(query_tail);
    let identity = Section::new().field(
        "Tail Number",
        reduce([payload.tail_number.as_ref(), Some(&query_tail)]),
    );

    let meta = Section::new()
        .field("Model", reduce([fr24.model.as_ref()]))
        .field("Airline", reduce([fr24.airline.as_ref()]))
        .field("Operator", reduce([fr24.operator.as_ref()]))
        .field("Type Code", reduce([fr24.type_code.as_ref()]))
        .field("Airline Code", reduce([fr24.airline_code.as_ref()]))
        .field("Operator Code", reduce([fr24.operator_code.as_ref()]))
        .field("Mode S Hex", reduce([fr24.mode_s.as_ref()]))
        .field("Serial / MSN", reduce([fr24.serial_msn.as_ref()]))
        .link(
            "Flightradar24",
            present_url([fr24.source_url.as_ref(), links.fr24_url.as_ref()]),
        );

    (identity, meta)
}

// ============ Registry ============

/// Three-way rendering of an optional flag. Only real booleans count.
pub fn yes_no(flag: &Option<Scalar>) -> String {
    match flag.as_ref().and_then(Scalar::as_bool) {
        Some(true) => "YES".to_string(),
        Some(false) => "NO".to_string(),
        None => UNKNOWN.to_string(),
    }
}

pub fn registry(payload: &RawPrimaryPayload) -> Section {
    let default_registry = RegistryInfo::default();
    let default_links = Links::default();
    let reg = payload.registry.as_ref().unwrap_or(&default_registry);
    let links = payload.links.as_ref().unwrap_or(&default_links);

    Section::new()
        .field("Owner", reduce([reg.owner.as_ref()]))
        .field("Status", reduce([reg.status.as_ref()]))
        .field("Airworthiness Class", reduce([reg.airworthiness_class.as_ref()]))
        .field("Certificate Issued", reduce([reg.certificate_issue_date.as_ref()]))
        .field("Airworthiness Date", reduce([reg.airworthiness_date.as_ref()]))
        .field("Expiration", reduce([reg.expiration.as_ref()]))
        .field("Engine", reduce([reg.engine.as_ref()]))
        .field("Serial Number", reduce([reg.serial_number.as_ref()]))
        .field("Model Year", reduce([reg.model_year.as_ref()]))
        .field("Seats", reduce([reg.seats.as_ref()]))
        .field("Engines", reduce([reg.engines_count.as_ref()]))
        .field("Fractional Owner", yes_no(&reg.fractional_owner))
        .link(
            "FAA Registry",
            present_url([reg.source_url.as_ref(), links.registry_source_url.as_ref()]),
        )
}

// ============ Telemetry ============

/// Live ADS-B panel.
///
/// Last Seen prefers the precise position epoch, then the provider's own
/// free-text age.
pub fn telemetry(payload: &RawPrimaryPayload, query_tail: &str, now: i64) -> Section {
    let default_adsb = AdsbInfo::default();
    let default_fr24 = Fr24Info::default();
    let default_links = Links::default();
    let adsb = payload.adsb.as_ref().unwrap_or(&default_adsb);
    let fr24 = payload.fr24.as_ref().unwrap_or(&default_fr24);
    let links = payload.links.as_ref().unwrap_or(&default_links);

    let query_tail = Scalar::from(query_tail);
    let last_seen = match epoch(&adsb.pos_epoch) {
        Some(e) => format_ago(now, Some(e)),
        None => reduce([adsb.last_seen.as_ref()]),
    };

    Section::new()
        .field("Callsign", reduce([adsb.callsign.as_ref()]))
        .field("Hex", reduce([adsb.hex.as_ref(), fr24.mode_s.as_ref()]))
        .field(
            "Registration",
            reduce([
                adsb.registration.as_ref(),
                payload.tail_number.as_ref(),
                Some(&query_tail),
            ]),
        )
        .field(
            "Type",
            reduce_join([adsb.icao_type.as_ref(), adsb.type_full.as_ref()], DOT),
        )
        .field(
            "Description",
            reduce_join([adsb.type_desc.as_ref(), adsb.category.as_ref()], DOT),
        )
        .field("Last Seen", last_seen)
        .field("Altitude", reduce([adsb.baro_altitude.as_ref()]))
        .field(
            "Speed / Track",
            reduce_join(
                [adsb.groundspeed_kt.as_ref(), adsb.ground_track.as_ref()],
                DOT,
            ),
        )
        .field(
            "Heading",
            reduce_join([adsb.true_heading.as_ref(), adsb.mag_heading.as_ref()], " / "),
        )
        .field("Squawk", reduce([adsb.squawk.as_ref()]))
        .field("Position", reduce([adsb.position.as_ref()]))
        .field(
            "Source",
            reduce_join([adsb.source.as_ref(), adsb.message_rate.as_ref()], DOT),
        )
        .link("ADS-B Exchange", links.adsb_globe_url.as_deref())
}

// ============ Targeting ============

/// `CODE (conf NN%)`; the percentage only appears for a numeric confidence.
pub fn likely_base(base: Option<&OperatingBase>) -> String {
    let Some(base) = base else {
        return UNKNOWN.to_string();
    };
    let Some(code) = present(&base.code) else {
        return UNKNOWN.to_string();
    };

    match numeric(&base.confidence) {
        Some(conf) => format!("{} (conf {}%)", code, (conf * 100.0).round() as i64),
        None => code.to_string(),
    }
}

/// `AIRPORT · N overnights · avg H.Hh ground`, dropping unreported parts.
pub fn overnight_line(stat: &OvernightStat) -> String {
    let airport = reduce([stat.airport.as_ref()]);
    let nights = stat.overnights.as_ref().and_then(Scalar::as_i64).map(|n| {
        format!("{} overnight{}", n, if n == 1 { "" } else { "s" })
    });
    let avg = numeric(&stat.avg_ground_hours).map(|h| format!("avg {:.1}h ground", h));

    join_present([Some(airport), nights, avg], DOT).unwrap_or_else(|| UNKNOWN.to_string())
}

fn chase(chase: Option<&ChaseScore>) -> (u8, Vec<String>) {
    let Some(chase) = chase else {
        return (0, Vec::new());
    };

    let score = chase
        .score
        .as_ref()
        .and_then(Scalar::as_i64)
        .unwrap_or(0)
        .clamp(0, MAX_CHASE_SCORE) as u8;
    let reasons = present_texts(chase.reasons.as_deref());

    (score, reasons)
}

fn present_texts(values: Option<&[Option<Scalar>]>) -> Vec<String> {
    values
        .unwrap_or_default()
        .iter()
        .flatten()
        .filter(|v| v.is_present())
        .map(|v| v.display())
        .collect()
}

pub fn targeting(payload: &RawPrimaryPayload) -> TargetingSection {
    let fractional = payload.is_fractional.as_ref().and_then(Scalar::as_bool) == Some(true);
    let operation = match present(&payload.inferred_operation) {
        Some(op) if fractional => format!("{} (fractional)", op),
        Some(op) => op.to_string(),
        None => UNKNOWN.to_string(),
    };

    let (chase_score, chase_reasons) = chase(payload.chase.as_ref());

    let overnights = payload
        .overnights_top
        .as_deref()
        .unwrap_or_default()
        .iter()
        .flatten()
        .map(overnight_line)
        .collect();

    let summary = Section::new()
        .field("Operation", operation)
        .field("Likely Base", likely_base(payload.likely_base.as_ref()))
        .field("Chase Score", format!("{}/{}", chase_score, MAX_CHASE_SCORE))
        .field("Chase Reasons", chase_reasons.join(", "));

    TargetingSection {
        summary,
        role_tags: present_texts(payload.buyer_roles_hint.as_deref()),
        overnights,
        chase_score,
        chase_reasons,
    }
}

// ============ Activity ============

/// `{ago} · CODE (City)`, dropping whichever side is missing.
pub fn last_spotted(spotted: Option<&LastSpotted>, now: i64) -> String {
    let Some(spotted) = spotted else {
        return UNKNOWN.to_string();
    };

    let ago = epoch(&spotted.epoch).map(|e| format_ago(now, Some(e)));
    let place = match (present(&spotted.place_code), present(&spotted.place_city)) {
        (Some(code), Some(city)) => Some(format!("{} ({})", code, city)),
        (Some(code), None) => Some(code.to_string()),
        (None, Some(city)) => Some(city.to_string()),
        (None, None) => None,
    };

    reduce_join([ago, place], DOT)
}

fn pills(hits: Option<&[Option<AirportHit>]>) -> Vec<Pill> {
    hits.unwrap_or_default()
        .iter()
        .flatten()
        .map(|hit| Pill {
            label: reduce([hit.code.as_ref()]),
            count: hit.count.as_ref().and_then(Scalar::as_i64).unwrap_or(0),
        })
        .collect()
}

pub fn activity(payload: &RawPrimaryPayload, now: i64) -> ActivitySection {
    ActivitySection {
        summary: Section::new().field(
            "Last Spotted",
            last_spotted(payload.last_spotted.as_ref(), now),
        ),
        top_airports_7d: pills(payload.top_airports_7d.as_deref()),
        top_airports_30d: pills(payload.top_airports_30d.as_deref()),
        top_airports_90d: pills(payload.top_airports_90d.as_deref()),
    }
}

// ============ Flight History ============

/// Rows in upstream order.
pub fn flight_history(payload: &RawPrimaryPayload) -> Vec<FlightRow> {
    payload
        .recent_flights
        .as_deref()
        .unwrap_or_default()
        .iter()
        .flatten()
        .map(|f| FlightRow {
            date: reduce([f.date_local.as_ref()]),
            origin: reduce([f.from_airport.as_ref()]),
            destination: reduce([f.to_airport.as_ref()]),
            callsign: reduce([f.callsign.as_ref()]),
            duration: reduce([f.flight_time.as_ref()]),
        })
        .collect()
}

// ============ Contacts Directory ============

pub const DOM_GROUP: &str = "DOM / Maintenance";
pub const OCC_GROUP: &str = "OCC / Dispatch";
pub const OTHER_GROUP: &str = "Other";

pub fn contact_line(entry: &ContactEntry) -> ContactLine {
    let mut pieces = Vec::new();

    if let Some(title) = present(&entry.title) {
        pieces.push(ContactPiece::Text {
            text: title.to_string(),
        });
    }
    if let Some(email) = present(&entry.email) {
        let address = email.to_string();
        pieces.push(ContactPiece::Email {
            href: format!("mailto:{}", address),
            address,
        });
    }
    if let Some(phone) = entry.phone() {
        pieces.push(ContactPiece::Text {
            text: phone.to_string(),
        });
    }
    if let Some(company) = present(&entry.company) {
        pieces.push(ContactPiece::Text {
            text: company.to_string(),
        });
    }

    ContactLine {
        name: reduce([entry.name.as_ref()]),
        pieces,
    }
}

fn contact_group(label: &'static str, entries: Option<&[Option<ContactEntry>]>) -> ContactGroup {
    let entries: Vec<ContactLine> = entries
        .unwrap_or_default()
        .iter()
        .flatten()
        .map(contact_line)
        .collect();
    let empty_message = entries.is_empty().then_some(NO_CONTACTS_MESSAGE);

    ContactGroup {
        label,
        entries,
        empty_message,
    }
}

/// Contacts section for a successfully fetched payload.
///
/// A payload without a `contacts` record still loads, with every group empty.
pub fn contacts(payload: &RawContactsPayload) -> ContactsSection {
    let groups = payload.contacts.as_ref();
    let airline = reduce([
        payload.airline.as_ref(),
        groups.and_then(|g| g.airline.as_ref()),
    ]);

    ContactsSection::Loaded {
        airline,
        groups: vec![
            contact_group(DOM_GROUP, groups.and_then(|g| g.dom.as_deref())),
            contact_group(OCC_GROUP, groups.and_then(|g| g.occ.as_deref())),
            contact_group(OTHER_GROUP, groups.and_then(|g| g.other.as_deref())),
        ],
    }
}
