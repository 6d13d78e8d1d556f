// src/domain/taxonomy.rs

/// The two property types the model knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyType {
    #[default]
    Apartment,
    House,
}

const HOUSE_SUBTYPES: [&str; 14] = [
    "chalet",
    "bungalow",
    "town-house",
    "villa",
    "castle",
    "farmhouse",
    "mansion",
    "mixed-use-building",
    "country-cottage",
    "manor-house",
    "house",
    "other-property",
    "exceptional-property",
    "apartment-block",
];

const APARTMENT_SUBTYPES: [&str; 9] = [
    "flat-studio",
    "loft",
    "service-flat",
    "duplex",
    "triplex",
    "apartment",
    "penthouse",
    "kot",
    "ground-floor",
];

impl PropertyType {
    pub const ALL: [PropertyType; 2] = [PropertyType::Apartment, PropertyType::House];

    /// Label shown on the type pills and sent as the `type` feature.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Apartment => "APARTMENT",
            PropertyType::House => "HOUSE",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// Subtype tags as listed in the taxonomy.
    pub fn subtype_tags(self) -> &'static [&'static str] {
        match self {
            PropertyType::Apartment => &APARTMENT_SUBTYPES,
            PropertyType::House => &HOUSE_SUBTYPES,
        }
    }

    /// Subtypes in feature form (`town-house` -> `TOWN_HOUSE`), sorted.
    pub fn subtype_options(self) -> Vec<String> {
        let mut options: Vec<String> = self
            .subtype_tags()
            .iter()
            .map(|tag| tag.to_uppercase().replace('-', "_"))
            .collect();
        options.sort();
        options
    }

    /// Each type has a subtype of the same name; it is the preselected one.
    pub fn default_subtype(self) -> &'static str {
        self.as_str()
    }

    pub fn allows_subtype(self, subtype: &str) -> bool {
        self.subtype_options().iter().any(|s| s == subtype)
    }
}
