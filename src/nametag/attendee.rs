use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::EventkitResult;

pub const NAME_HEADER: &str = "이름";
pub const ORGANIZATION_HEADER: &str = "소속";
pub const ROLE_HEADER: &str = "종류";

/// Substituted when the organization cell is empty.
pub const PLACEHOLDER_ORGANIZATION: &str = "🚀Stealth";

/// Roles that earn a display-name prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Host,
    Speaker,
}

impl Role {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "호스트" => Some(Self::Host),
            "스피커" => Some(Self::Speaker),
            _ => None,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Host => "[Host]",
            Self::Speaker => "[Speaker]",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attendee {
    /// Display name, role prefix included.
    pub name: String,
    pub organization: String,
}

impl Attendee {
    pub fn new(name: &str, organization: &str, role: Option<Role>) -> Self {
        let name = match role {
            Some(r) => format!("{} {name}", r.prefix()),
            None => name.to_string(),
        };
        let organization = if organization.is_empty() {
            PLACEHOLDER_ORGANIZATION.to_string()
        } else {
            organization.to_string()
        };
        Self { name, organization }
    }
}

/// Loaded attendees plus how many rows were dropped along the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttendeeLoad {
    pub attendees: Vec<Attendee>,
    pub skipped: usize,
}

pub fn load_attendees(path: &Path) -> EventkitResult<AttendeeLoad> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read attendee table '{}'", path.display()))?;
    let load = parse_attendees(&text)
        .with_context(|| format!("parse attendee table '{}'", path.display()))?;
    tracing::info!(
        path = %path.display(),
        attendees = load.attendees.len(),
        skipped = load.skipped,
        "loaded attendee table"
    );
    Ok(load)
}

/// Parse a header-aware CSV attendee table.
///
/// Rows without a name, and rows the CSV reader cannot decode, are skipped and
/// counted rather than reported as errors.
pub fn parse_attendees(text: &str) -> EventkitResult<AttendeeLoad> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().context("read attendee header row")?.clone();
    let column = |label: &str| headers.iter().position(|h| h.trim() == label);
    let name_col = column(NAME_HEADER);
    let org_col = column(ORGANIZATION_HEADER);
    let role_col = column(ROLE_HEADER);

    if name_col.is_none() {
        tracing::warn!(header = NAME_HEADER, "attendee table has no name column");
    }

    let mut load = AttendeeLoad::default();
    for (row, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row = row + 2, error = %e, "skipping unreadable attendee row");
                load.skipped += 1;
                continue;
            }
        };

        let field = |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("").trim();
        let name = field(name_col);
        if name.is_empty() {
            tracing::debug!(row = row + 2, "skipping attendee row without a name");
            load.skipped += 1;
            continue;
        }

        let role = Role::from_label(field(role_col));
        load.attendees
            .push(Attendee::new(name, field(org_col), role));
    }

    Ok(load)
}

#[cfg(test)]
#[path = "../../tests/unit/nametag/attendee.rs"]
mod tests;
