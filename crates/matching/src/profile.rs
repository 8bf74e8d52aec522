//! Volunteer, NGO and cause records as they arrive from the API layer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A volunteer or NGO profile.
///
/// Text fields are free-form. `interests` and `skills` are comma separated
/// but also accept a JSON array of strings, which is joined with `", "`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Optional identifier, carried through batch results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Comma-separated interests or cause categories
    #[serde(default, deserialize_with = "text_or_list")]
    pub interests: String,
    /// Comma-separated skills, if the profile states them explicitly
    #[serde(
        default,
        deserialize_with = "optional_text_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub skills: Option<String>,
    /// City name
    #[serde(default)]
    pub city: String,
    /// Availability description ("weekends", "flexible", ...)
    #[serde(default)]
    pub availability: String,
    /// Accumulated impact score of a volunteer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<f64>,
}

impl Profile {
    /// Creates a profile from interests and city.
    pub fn new(interests: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            interests: interests.into(),
            city: city.into(),
            ..Self::default()
        }
    }

    /// Sets the explicit skills field.
    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.skills = Some(skills.into());
        self
    }

    /// Sets the availability text.
    pub fn with_availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = availability.into();
        self
    }

    /// Sets the impact score.
    pub fn with_impact_score(mut self, score: f64) -> Self {
        self.impact_score = Some(score);
        self
    }

    /// Returns the skills field if it holds anything but whitespace.
    pub fn stated_skills(&self) -> Option<&str> {
        self.skills.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// A volunteer opportunity posted by an NGO.
///
/// The stored document is kept whole in `document`. Serializing writes it
/// back as received, with any edited field overlaid under the key it
/// arrived as, so filtering hands back exactly what it was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cause {
    /// Identifier (`_id` or `id`)
    pub id: Option<String>,
    /// Title of the cause (`name` or `title`)
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Category label ("education", "healthcare", ...)
    pub category: String,
    /// City the cause runs in
    pub city: String,
    /// Latitude, if geocoded
    pub lat: Option<f64>,
    /// Longitude, if geocoded
    pub lng: Option<f64>,
    /// The document as received
    pub document: Map<String, Value>,
}

const ID_KEYS: &[&str] = &["_id", "id"];
const NAME_KEYS: &[&str] = &["name", "title"];

impl Cause {
    /// Creates a cause with a name, category and city.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            city: city.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Reads the typed fields out of a stored document.
    pub fn from_document(document: Map<String, Value>) -> Self {
        Self {
            id: first_text(&document, ID_KEYS),
            name: first_text(&document, NAME_KEYS).unwrap_or_default(),
            description: first_text(&document, &["description"]).unwrap_or_default(),
            category: first_text(&document, &["category"]).unwrap_or_default(),
            city: first_text(&document, &["city"]).unwrap_or_default(),
            lat: document.get("lat").and_then(Value::as_f64),
            lng: document.get("lng").and_then(Value::as_f64),
            document,
        }
    }

    /// The stored document with edited fields written back.
    ///
    /// A field is only written when it differs from what the document
    /// already says, and empty fields the document never had stay absent.
    pub fn to_document(&self) -> Map<String, Value> {
        let read = Self::from_document(self.document.clone());
        let mut document = self.document.clone();

        if self.id != read.id {
            put(&mut document, ID_KEYS, self.id.clone().map(Value::String));
        }
        for (keys, value, was) in [
            (NAME_KEYS, &self.name, &read.name),
            (&["description"][..], &self.description, &read.description),
            (&["category"][..], &self.category, &read.category),
            (&["city"][..], &self.city, &read.city),
        ] {
            let absent = !keys.iter().any(|key| document.contains_key(*key));
            if value != was && !(value.is_empty() && absent) {
                put(&mut document, keys, Some(Value::String(value.clone())));
            }
        }
        for (key, value, was) in [("lat", self.lat, read.lat), ("lng", self.lng, read.lng)] {
            if value != was {
                put(&mut document, &[key], value.map(Value::from));
            }
        }

        document
    }

    /// Builds the NGO-side profile the scoring engine compares against.
    ///
    /// The category stands in for the NGO's interests.
    pub fn as_profile(&self) -> Profile {
        Profile {
            id: self.id.clone(),
            name: Some(self.name.clone()),
            interests: self.category.clone(),
            city: self.city.clone(),
            ..Profile::default()
        }
    }
}

impl Serialize for Cause {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cause {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_document)
    }
}

/// First of `keys` holding a string or number.
fn first_text(document: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match document.get(*key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Writes `value` under every spelling of the field the document already
/// uses, or the first spelling if it has none. `None` removes the field.
fn put(document: &mut Map<String, Value>, keys: &[&str], value: Option<Value>) {
    let present: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| document.contains_key(*key))
        .collect();

    match value {
        Some(value) if present.is_empty() => {
            document.insert(keys[0].to_string(), value);
        }
        Some(value) => {
            for key in present {
                document.insert(key.to_string(), value.clone());
            }
        }
        None => {
            for key in present {
                document.remove(key);
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl TextOrList {
    fn into_text(self) -> String {
        match self {
            TextOrList::Text(text) => text,
            TextOrList::List(items) => items.join(", "),
        }
    }
}

fn text_or_list<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrList>::deserialize(deserializer)?
        .map(TextOrList::into_text)
        .unwrap_or_default())
}

fn optional_text_or_list<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrList>::deserialize(deserializer)?.map(TextOrList::into_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_from_text_fields() {
        let profile: Profile = serde_json::from_value(json!({
            "interests": "education, teaching",
            "skills": "mentoring",
            "city": "Bangalore",
            "availability": "weekends",
            "impactScore": 250
        }))
        .unwrap();

        assert_eq!(profile.interests, "education, teaching");
        assert_eq!(profile.stated_skills(), Some("mentoring"));
        assert_eq!(profile.impact_score, Some(250.0));
    }

    #[test]
    fn test_profile_from_lists() {
        let profile: Profile = serde_json::from_value(json!({
            "interests": ["education", "teaching", "children"],
            "skills": ["teaching", "mentoring"]
        }))
        .unwrap();

        assert_eq!(profile.interests, "education, teaching, children");
        assert_eq!(profile.skills.as_deref(), Some("teaching, mentoring"));
        assert!(profile.city.is_empty());
    }

    #[test]
    fn test_profile_missing_and_null_fields() {
        let profile: Profile =
            serde_json::from_value(json!({ "interests": null, "skills": null })).unwrap();
        assert!(profile.interests.is_empty());
        assert!(profile.skills.is_none());
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_blank_skills_are_not_stated() {
        let profile = Profile::new("education", "Pune").with_skills("   ");
        assert_eq!(profile.stated_skills(), None);
    }

    #[test]
    fn test_cause_keeps_unknown_fields() {
        let value = json!({
            "_id": "c1",
            "title": "Coding Classes for Kids",
            "category": "technology",
            "city": "Bangalore",
            "status": "active",
            "volunteersNeeded": 4
        });
        let cause: Cause = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(cause.id.as_deref(), Some("c1"));
        assert_eq!(cause.name, "Coding Classes for Kids");
        assert_eq!(cause.document["status"], "active");
        assert!(cause.description.is_empty());

        let back = serde_json::to_value(&cause).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_cause_accepts_both_id_spellings() {
        let value = json!({ "_id": "c1", "id": "legacy-7", "name": "Food Bank" });
        let cause: Cause = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(cause.id.as_deref(), Some("c1"));
        assert_eq!(serde_json::to_value(&cause).unwrap(), value);
    }

    #[test]
    fn test_cause_edits_keep_stored_spelling() {
        let value = json!({ "_id": 42, "title": "Beach Cleanup", "city": "Pune" });
        let mut cause: Cause = serde_json::from_value(value).unwrap();
        assert_eq!(cause.id.as_deref(), Some("42"));

        cause.name = "Beach Cleanup Drive".into();
        cause.category = "environment".into();
        let back = serde_json::to_value(&cause).unwrap();

        assert_eq!(
            back,
            json!({
                "_id": 42,
                "title": "Beach Cleanup Drive",
                "category": "environment",
                "city": "Pune"
            })
        );
    }

    #[test]
    fn test_built_cause_serializes_canonical_keys() {
        let cause = Cause::new("Night School", "education", "Delhi");
        let back = serde_json::to_value(&cause).unwrap();
        assert_eq!(
            back,
            json!({ "name": "Night School", "category": "education", "city": "Delhi" })
        );
    }

    #[test]
    fn test_cause_as_profile() {
        let cause = Cause::new("Clinic Support", "healthcare", "Mumbai");
        let profile = cause.as_profile();
        assert_eq!(profile.interests, "healthcare");
        assert_eq!(profile.city, "Mumbai");
        assert_eq!(profile.name.as_deref(), Some("Clinic Support"));
    }
}
