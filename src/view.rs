//! Display-ready view model handed to the renderer.
//!
//! Everything in here is already formatted: the renderer only lays out
//! strings and never decides fallbacks.

use serde::Serialize;

/// Shown for a contact group that was fetched but is empty.
pub const NO_CONTACTS_MESSAGE: &str = "No contacts found.";

/// Shown in place of the whole contacts section when its fetch failed.
pub const CONTACTS_UNAVAILABLE_MESSAGE: &str = "Contacts not available.";

/// One label/value row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// Outbound link with the provider it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub url: String,
}

/// Ordered label/value rows plus optional links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            label,
            value: value.into(),
        });
        self
    }

    /// Adds a link only when a non-empty URL is present.
    pub fn link(mut self, label: &'static str, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.links.push(Link {
                label,
                url: url.to_string(),
            });
        }
        self
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.label).collect()
    }
}

/// Airport with a visit count, rendered as a pill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pill {
    pub label: String,
    pub count: i64,
}

impl Pill {
    pub fn render(&self) -> String {
        format!("{} ({})", self.label, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetingSection {
    /// Operation, Likely Base, Chase Score, Chase Reasons.
    pub summary: Section,
    pub role_tags: Vec<String>,
    /// Ranked overnight airports, already rendered.
    pub overnights: Vec<String>,
    pub chase_score: u8,
    pub chase_reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySection {
    /// Last Spotted.
    pub summary: Section,
    pub top_airports_7d: Vec<Pill>,
    pub top_airports_30d: Vec<Pill>,
    pub top_airports_90d: Vec<Pill>,
}

/// One row of the flight history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightRow {
    pub date: String,
    pub origin: String,
    pub destination: String,
    pub callsign: String,
    pub duration: String,
}

/// Piece of a contact's detail line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContactPiece {
    Text { text: String },
    Email { address: String, href: String },
}

impl ContactPiece {
    pub fn as_text(&self) -> &str {
        match self {
            ContactPiece::Text { text } => text,
            ContactPiece::Email { address, .. } => address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLine {
    pub name: String,
    pub pieces: Vec<ContactPiece>,
}

impl ContactLine {
    /// Middle-dot join of the detail pieces.
    pub fn detail(&self) -> String {
        self.pieces
            .iter()
            .map(ContactPiece::as_text)
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactGroup {
    pub label: &'static str,
    pub entries: Vec<ContactLine>,
    /// Set exactly when `entries` is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ContactsSection {
    /// Contacts fetch not settled yet.
    Loading,
    Loaded {
        airline: String,
        groups: Vec<ContactGroup>,
    },
    Unavailable {
        message: &'static str,
    },
}

impl ContactsSection {
    pub fn unavailable() -> Self {
        ContactsSection::Unavailable {
            message: CONTACTS_UNAVAILABLE_MESSAGE,
        }
    }

    pub fn group(&self, label: &str) -> Option<&ContactGroup> {
        match self {
            ContactsSection::Loaded { groups, .. } => groups.iter().find(|g| g.label == label),
            _ => None,
        }
    }
}

/// The merged, display-ready result of one lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub identity: Section,
    pub flight_meta: Section,
    pub registry: Section,
    pub telemetry: Section,
    pub targeting: TargetingSection,
    pub activity: ActivitySection,
    pub flight_history: Vec<FlightRow>,
    pub contacts: ContactsSection,
}
