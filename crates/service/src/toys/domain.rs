use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open set of client-supplied fields (`name`, `color`, anything else).
pub type ToyFields = Map<String, Value>;

/// A toy record. On the wire it is one flat object: `id` followed by its fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Toy {
    pub id: u64,
    #[serde(flatten)]
    pub fields: ToyFields,
}

impl Toy {
    /// Build a toy, dropping any `id` key the fields carry.
    pub fn new(id: u64, mut fields: ToyFields) -> Self {
        fields.retain(|k, _| k != "id");
        Self { id, fields }
    }

    /// Shallow merge: existing keys are overwritten, new keys appended, `id` ignored.
    pub fn merge(&mut self, patch: ToyFields) {
        for (key, value) in patch {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// The two records every fresh store starts with.
pub fn seed_toys() -> Vec<Toy> {
    vec![named(1, "Toy Car", "Red"), named(2, "Toy Robot", "Blue")]
}

fn named(id: u64, name: &str, color: &str) -> Toy {
    let mut fields = ToyFields::new();
    fields.insert("name".into(), Value::from(name));
    fields.insert("color".into(), Value::from(color));
    Toy::new(id, fields)
}
