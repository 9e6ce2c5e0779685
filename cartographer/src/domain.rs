//! Typed result trees hydrated from the store.
//!
//! Field names follow the node property names in the graph, which is why
//! several are renamed. Every field defaults, so the empty placeholder tree
//! the store yields for "no match" still hydrates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const COUNTRY_NODE: &str = "Country";
pub const CURRENCY_NODE: &str = "Currency";
pub const PROVINCE_NODE: &str = "Province";
pub const CITY_NODE: &str = "City";
pub const REGENCY_NODE: &str = "Regency";
pub const DISTRICT_NODE: &str = "District";
pub const VILLAGE_NODE: &str = "Village";

/// Argument names that select a node pointing into the root, and its label.
pub const INCOMING: &[(&str, &str)] = &[
    ("country", COUNTRY_NODE),
    ("province", PROVINCE_NODE),
    ("city", CITY_NODE),
    ("regency", REGENCY_NODE),
    ("district", DISTRICT_NODE),
    ("village", VILLAGE_NODE),
];

/// Argument names that select a node the root points to, and its label.
pub const OUTGOING: &[(&str, &str)] = &[("currencies", CURRENCY_NODE)];

/// Exposes the identifying key of a hydrated tree.
///
/// An empty id marks the placeholder the store produces when nothing matched.
pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    pub id: String,
    pub name: String,
    #[serde(rename = "ISO3166Alpha2")]
    pub iso3166_alpha2: String,
    #[serde(rename = "ISO3166Alpha3")]
    pub iso3166_alpha3: String,
    #[serde(rename = "ISO3166Numeric")]
    pub iso3166_numeric: String,
    #[serde(rename = "dialCode")]
    pub calling_code: String,
    pub currencies: Vec<Currency>,
    /// JSON-encoded [`Flag`], as stored on the node. See [`Country::flag`].
    pub flags: String,
    /// `flags` decoded by [`Country::decode_flag`]; never read from the store.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub flag: Option<Flag>,
    #[serde(flatten)]
    pub regions: Regions,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Country {
    /// Decodes the flag image set stored as a JSON string property.
    pub fn flag(&self) -> serde_json::Result<Flag> {
        serde_json::from_str(&self.flags)
    }

    /// Fills `flag` from `flags`. A country stored without flags keeps `None`.
    pub fn decode_flag(&mut self) -> serde_json::Result<()> {
        if !self.flags.is_empty() {
            self.flag = Some(self.flag()?);
        }
        Ok(())
    }
}

impl Identified for Country {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    pub id: String,
    #[serde(rename = "ISO4217Name")]
    pub iso4217_name: String,
    #[serde(rename = "ISO4217Numeric")]
    pub iso4217_numeric: String,
    #[serde(rename = "ISO4217MinorUnit")]
    pub iso4217_minor_unit: String,
    #[serde(rename = "ISO4217Alphabetic")]
    pub iso4217_alphabetic: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Currency {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flag {
    pub flat: Size,
    pub shiny: Size,
}

/// Flag image URLs by pixel size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Size {
    pub sixteen: String,
    pub twenty_four: String,
    pub thirty_two: String,
    pub forty_eight: String,
    pub sixty_four: String,
}

/// An administrative division: province, city, regency, district or village.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(flatten)]
    pub regions: Regions,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Region {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Child divisions, grouped by tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Regions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provinces: Vec<Region>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cities: Vec<Region>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regencies: Vec<Region>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub districts: Vec<Region>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub villages: Vec<Region>,
}

/// Looks up the label for a relation argument name.
pub fn relation_label(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(arg, _)| *arg == name)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn country_reads_store_property_names() {
        let country: Country = serde_json::from_value(json!({
            "id": "c1",
            "name": "Indonesia",
            "ISO3166Alpha2": "ID",
            "ISO3166Alpha3": "IDN",
            "ISO3166Numeric": "360",
            "dialCode": "62",
            "currencies": [{"id": "k1", "ISO4217Alphabetic": "IDR"}],
            "provinces": [{"id": "p1", "name": "DI Yogyakarta", "code": "34"}],
            "createdAt": "2019-10-01T10:00:00Z",
            "_type": "Country",
            "_id": 17
        }))
        .unwrap();

        assert_eq!(country.iso3166_alpha3, "IDN");
        assert_eq!(country.calling_code, "62");
        assert_eq!(country.currencies[0].iso4217_alphabetic, "IDR");
        assert_eq!(country.regions.provinces[0].code, "34");
        assert!(country.created_at.is_some());
        assert!(country.updated_at.is_none());
    }

    #[test]
    fn empty_tree_hydrates_to_placeholder() {
        let region: Region = serde_json::from_value(json!({})).unwrap();
        assert_eq!(region.id(), "");
        assert!(region.regions.cities.is_empty());
    }

    #[test]
    fn flag_decodes_from_string_property() {
        let country = Country {
            flags: r#"{"flat":{"sixteen":"f16.png","sixtyFour":"f64.png"},"shiny":{"twentyFour":"s24.png"}}"#
                .to_string(),
            ..Country::default()
        };
        let flag = country.flag().unwrap();
        assert_eq!(flag.flat.sixteen, "f16.png");
        assert_eq!(flag.flat.sixty_four, "f64.png");
        assert_eq!(flag.shiny.twenty_four, "s24.png");
    }

    #[test]
    fn missing_flag_is_an_error() {
        assert!(Country::default().flag().is_err());
    }

    #[test]
    fn decoded_flag_is_serialized_next_to_raw_property() {
        let mut country = Country {
            flags: r#"{"flat":{"sixteen":"f16.png"}}"#.to_string(),
            ..Country::default()
        };
        country.decode_flag().unwrap();
        let json = serde_json::to_value(&country).unwrap();
        assert_eq!(json["flag"]["flat"]["sixteen"], "f16.png");

        let mut bare = Country::default();
        bare.decode_flag().unwrap();
        assert!(serde_json::to_value(&bare).unwrap().get("flag").is_none());
    }

    #[test]
    fn stored_flag_key_is_not_read() {
        let country: Country =
            serde_json::from_value(json!({"flag": {"flat": {"sixteen": "x"}}})).unwrap();
        assert!(country.flag.is_none());
    }

    #[test]
    fn empty_child_tiers_are_not_serialized() {
        let region = Region {
            id: "r1".into(),
            ..Region::default()
        };
        let json = serde_json::to_value(&region).unwrap();
        assert!(json.get("cities").is_none());
        assert_eq!(json["id"], "r1");
    }

    #[test]
    fn relation_tables() {
        assert_eq!(relation_label(INCOMING, "province"), Some(PROVINCE_NODE));
        assert_eq!(relation_label(OUTGOING, "currencies"), Some(CURRENCY_NODE));
        assert_eq!(relation_label(OUTGOING, "province"), None);
    }
}
