use serde::{Serialize, Serializer};

/// Fixed dashboard ordering of operational areas; anything not listed
/// sorts last.
const AREA_PRIORITY: &[(&str, u8)] = &[
    ("OPERATIONS", 1),
    ("MAINTENANCE", 2),
    ("TRAINING", 3),
    ("SMS", 4),
    ("COMPLIANCE", 5),
    ("ICT", 6),
];

const OTHER_PRIORITY: u8 = 7;

/// An operational area as a map key that orders by `(priority, name)`,
/// so area-keyed maps iterate and serialize in dashboard order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Area {
    priority: u8,
    name: String,
}

impl Area {
    pub fn new(name: &str) -> Self {
        let priority = AREA_PRIORITY
            .iter()
            .find(|(area, _)| *area == name)
            .map(|(_, p)| *p)
            .unwrap_or(OTHER_PRIORITY);
        Self {
            priority,
            name: name.to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }
}

impl Serialize for Area {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
