use serde::{Deserialize, Serialize};

/// One reportable location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub region: String,
    /// Opaque reference to an illustrative image; never interpreted here.
    pub image_ref: String,
}

/// The static location catalog, supplied at startup and never mutated.
///
/// Reports reference locations by id; the catalog is also the validation
/// set for `locationId` on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    locations: Vec<Location>,
}

impl Catalog {
    /// The default catalog: the five city zones reports have always used.
    #[must_use]
    pub fn builtin() -> Self {
        let zones = [
            ("1", "Zona Sul", "zona-sul"),
            ("2", "Zona Norte", "zona-norte"),
            ("3", "Zona Oeste", "zona-oeste"),
            ("4", "Zona Leste", "zona-leste"),
            ("5", "Centro", "centro"),
        ];

        Self {
            locations: zones
                .into_iter()
                .map(|(id, name, slug)| Location {
                    id: id.to_string(),
                    name: name.to_string(),
                    region: "São Paulo".to_string(),
                    image_ref: format!("https://picsum.photos/seed/{slug}/400/200"),
                })
                .collect(),
        }
    }

    /// Build a catalog from explicit entries (project config override).
    #[must_use]
    pub const fn from_locations(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// Look up a location by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// All locations in catalog order.
    #[must_use]
    pub fn as_slice(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
