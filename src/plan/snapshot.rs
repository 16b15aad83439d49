//! JSON import and export.
//!
//! A plan snapshot is `{"partesEntreno": [...], "groups": [...]}` plus an
//! optional `exportedAt` timestamp and threshold pace. An example set is
//! `{"entrenamientos": {key: {nombre, descripcion, partesEntreno, groups}}}`
//! from which one training is picked before loading.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::confirm::Confirmer;
use super::item::{Collection, Group, PlanItem};
use super::store::PlanStore;
use super::types::{PlanResult, SnapshotError};

const LOOSE_KEY: &str = "partesEntreno";
const GROUPS_KEY: &str = "groups";
const EXAMPLES_KEY: &str = "entrenamientos";

/// Exported plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(rename = "partesEntreno", alias = "looseItems", default)]
    pub loose_items: Vec<PlanItem>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_pace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

impl Snapshot {
    /// Snapshot of `store`, stamped with the current time.
    pub fn capture(store: &PlanStore) -> Self {
        let collection = store.collection().clone();
        Self {
            loose_items: collection.loose_items,
            groups: collection.groups,
            threshold_pace: Some(store.threshold().to_string()),
            exported_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    pub fn into_collection(self) -> Collection {
        Collection {
            loose_items: self.loose_items,
            groups: self.groups,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, SnapshotError> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.map_err(|e| SnapshotError::InvalidJson(e.to_string()))
    }
}

/// One named training in an example set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleTraining {
    #[serde(rename = "nombre", alias = "name", default)]
    pub name: String,
    #[serde(rename = "descripcion", alias = "description", default)]
    pub description: String,
    #[serde(rename = "partesEntreno", alias = "looseItems", default)]
    pub loose_items: Vec<PlanItem>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl ExampleTraining {
    pub fn collection(&self) -> Collection {
        Collection {
            loose_items: self.loose_items.clone(),
            groups: self.groups.clone(),
        }
    }
}

/// Named trainings in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExampleSet {
    pub trainings: Vec<(String, ExampleTraining)>,
}

impl ExampleSet {
    pub fn len(&self) -> usize {
        self.trainings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trainings.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.trainings.iter().map(|(key, _)| key.as_str())
    }

    /// Pick a training by key, or by 1-based position when no key matches.
    pub fn select(&self, choice: &str) -> Result<&ExampleTraining, SnapshotError> {
        let choice = choice.trim();
        if let Some((_, training)) = self.trainings.iter().find(|(key, _)| key == choice) {
            return Ok(training);
        }
        choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.trainings.get(index))
            .map(|(_, training)| training)
            .ok_or_else(|| SnapshotError::UnknownExample(choice.to_string()))
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, SnapshotError> {
        let mut map = serde_json::Map::new();
        for (key, training) in &self.trainings {
            let value = serde_json::to_value(training).map_err(|e| SnapshotError::InvalidJson(e.to_string()))?;
            map.insert(key.clone(), value);
        }
        let mut root = serde_json::Map::new();
        root.insert(EXAMPLES_KEY.to_string(), Value::Object(map));

        let root = Value::Object(root);
        let result = if pretty {
            serde_json::to_string_pretty(&root)
        } else {
            serde_json::to_string(&root)
        };
        result.map_err(|e| SnapshotError::InvalidJson(e.to_string()))
    }
}

/// Parsed import.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportPayload {
    Plan(Snapshot),
    Examples(ExampleSet),
}

/// Path of the first item or group in `container` that fails to decode,
/// e.g. `partesEntreno[2]` or `groups[0].parts[1]`.
fn first_invalid_entry(container: &serde_json::Map<String, Value>) -> Option<(String, serde_json::Error)> {
    if let Some(Value::Array(items)) = container.get(LOOSE_KEY) {
        for (index, item) in items.iter().enumerate() {
            if let Err(e) = PlanItem::deserialize(item) {
                return Some((format!("{}[{}]", LOOSE_KEY, index), e));
            }
        }
    }
    if let Some(Value::Array(groups)) = container.get(GROUPS_KEY) {
        for (index, group) in groups.iter().enumerate() {
            let members = group
                .get("parts")
                .or_else(|| group.get("members"))
                .and_then(Value::as_array);
            for (member_index, member) in members.into_iter().flatten().enumerate() {
                if let Err(e) = PlanItem::deserialize(member) {
                    return Some((format!("{}[{}].parts[{}]", GROUPS_KEY, index, member_index), e));
                }
            }
            if let Err(e) = Group::deserialize(group) {
                return Some((format!("{}[{}]", GROUPS_KEY, index), e));
            }
        }
    }
    None
}

/// Decode `container`, naming the offending entry when an item is malformed.
fn decode<T: serde::de::DeserializeOwned>(container: serde_json::Map<String, Value>) -> Result<T, String> {
    match first_invalid_entry(&container) {
        Some((path, e)) => Err(format!("{}: {}", path, e)),
        None => serde_json::from_value(Value::Object(container)).map_err(|e| e.to_string()),
    }
}

/// Parse a plan snapshot or an example set.
///
/// Input without any of the recognized top-level keys is rejected whole.
pub fn parse_snapshot(json: &str) -> Result<ImportPayload, SnapshotError> {
    let value: Value = serde_json::from_str(json).map_err(|e| SnapshotError::InvalidJson(e.to_string()))?;
    let Value::Object(mut root) = value else {
        return Err(SnapshotError::MissingKeys);
    };

    if let Some(examples) = root.remove(EXAMPLES_KEY) {
        let Value::Object(entries) = examples else {
            return Err(SnapshotError::InvalidJson(format!("\"{}\" must be an object", EXAMPLES_KEY)));
        };
        let mut trainings = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            let Value::Object(entry) = entry else {
                return Err(SnapshotError::InvalidJson(format!("{}: expected an object", key)));
            };
            let training: ExampleTraining =
                decode(entry).map_err(|e| SnapshotError::InvalidJson(format!("{}.{}", key, e)))?;
            trainings.push((key, training));
        }
        if trainings.is_empty() {
            return Err(SnapshotError::EmptyExampleSet);
        }
        return Ok(ImportPayload::Examples(ExampleSet { trainings }));
    }

    if !root.contains_key(LOOSE_KEY) && !root.contains_key(GROUPS_KEY) {
        return Err(SnapshotError::MissingKeys);
    }
    let snapshot: Snapshot = decode(root).map_err(SnapshotError::InvalidJson)?;
    Ok(ImportPayload::Plan(snapshot))
}

pub fn load_snapshot_file(path: &Path) -> Result<ImportPayload, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io(e.to_string()))?;
    parse_snapshot(&content)
}

pub fn save_snapshot_file(store: &PlanStore, path: &Path, pretty: bool) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SnapshotError::Io(e.to_string()))?;
    }
    let json = Snapshot::capture(store).to_json(pretty)?;
    std::fs::write(path, json).map_err(|e| SnapshotError::Io(e.to_string()))?;
    info!("Exported plan to {}", path.display());
    Ok(())
}

impl PlanStore {
    /// Export the current plan as JSON.
    pub fn export_json(&self, pretty: bool) -> Result<String, SnapshotError> {
        Snapshot::capture(self).to_json(pretty)
    }

    /// Load an import, fully replacing the current plan.
    ///
    /// Example sets need `choice` (key or 1-based index); without one the
    /// first training is loaded. A snapshot carrying a valid threshold pace
    /// applies it.
    pub fn import_payload(
        &mut self,
        payload: ImportPayload,
        choice: Option<&str>,
        confirmer: &mut dyn Confirmer,
    ) -> PlanResult<()> {
        match payload {
            ImportPayload::Plan(snapshot) => {
                let pace = snapshot.threshold_pace.clone();
                self.replace_plan(snapshot.into_collection(), confirmer)?;
                if let Some(pace) = pace {
                    if let Err(e) = self.set_threshold_pace(&pace) {
                        warn!("Ignoring imported threshold pace: {}", e);
                    }
                }
            }
            ImportPayload::Examples(set) => {
                let training = set.select(choice.unwrap_or("1"))?;
                info!("Loading example training '{}'", training.name);
                self.replace_plan(training.collection(), confirmer)?;
            }
        }
        Ok(())
    }

    /// Parse and load a JSON import.
    pub fn import_json(&mut self, json: &str, choice: Option<&str>, confirmer: &mut dyn Confirmer) -> PlanResult<()> {
        let payload = parse_snapshot(json).map_err(|e| {
            warn!("Rejected import: {}", e);
            e
        })?;
        self.import_payload(payload, choice, confirmer)
    }
}
