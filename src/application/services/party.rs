//! Party planning service: decode records, build the tree, solve.

use serde_json::{Map, Value};
use tracing::{debug, instrument, trace, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::{FieldNames, Settings};
use crate::domain::{
    IndependentSetSolver, NodeId, NodeRecord, Parent, RequiredSet, Solution, TreeArena,
    TreeBuilder, TreeView,
};

/// Outcome of one planning run.
#[derive(Debug)]
pub struct PartyPlan {
    pub tree: TreeArena,
    pub solution: Solution,
    /// Required ids the local forcing could not keep in the selection
    pub missing_required: Vec<NodeId>,
}

/// Service for planning a party from raw JSON input.
pub struct PartyService {
    settings: Settings,
}

impl PartyService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Decode a JSON array of records using the configured field names.
    ///
    /// Absent fields are left unset so the tree builder reports them; a
    /// `null` parent marks the root. Wrong JSON types are input errors.
    #[instrument(level = "debug", skip(self, content))]
    pub fn parse_records(&self, content: &str) -> ApplicationResult<Vec<NodeRecord>> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ApplicationError::invalid_input(format!("malformed JSON: {e}")))?;
        let Value::Array(items) = json else {
            return Err(ApplicationError::invalid_input(
                "expected a JSON array of records",
            ));
        };

        let fields = &self.settings.fields;
        let records = items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(object) => decode_record(index, object, fields),
                _ => Err(ApplicationError::invalid_input(format!(
                    "record #{index} is not an object"
                ))),
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        debug!(records = records.len(), "records decoded");
        Ok(records)
    }

    /// Parse, build and solve in one go.
    #[instrument(level = "debug", skip(self, content, required))]
    pub fn plan(&self, content: &str, required: &RequiredSet) -> ApplicationResult<PartyPlan> {
        let records = self.parse_records(content)?;
        let tree = TreeBuilder::new().build(&records)?;
        trace!(tree = %tree.to_tree_string(), "org chart");
        let solution = IndependentSetSolver::new(&tree)
            .with_strategy(self.settings.strategy)
            .solve(required)?;

        let missing_required: Vec<NodeId> = if required.is_empty() {
            Vec::new()
        } else {
            solution
                .missing_required(required)
                .into_iter()
                .cloned()
                .collect()
        };
        if !missing_required.is_empty() {
            warn!(?missing_required, "required ids were skipped by an ancestor's choice");
        }

        Ok(PartyPlan {
            tree,
            solution,
            missing_required,
        })
    }
}

fn decode_record(
    index: usize,
    object: &Map<String, Value>,
    fields: &FieldNames,
) -> ApplicationResult<NodeRecord> {
    let wrong_type = |field: &str, expected: &str| {
        ApplicationError::invalid_input(format!(
            "record #{index}: field '{field}' must be {expected}"
        ))
    };

    let mut record = NodeRecord::empty();

    record.id = match object.get(&fields.id) {
        None | Some(Value::Null) => None,
        Some(value) => Some(token(value).ok_or_else(|| wrong_type(&fields.id, "a string or integer"))?),
    };

    record.value = match object.get(&fields.value) {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => number.as_f64(),
        Some(_) => return Err(wrong_type(&fields.value, "a number")),
    };

    record.parent = match object.get(&fields.parent) {
        None => None,
        Some(Value::Null) => Some(Parent::Root),
        Some(value) => Some(Parent::Node(
            token(value).ok_or_else(|| wrong_type(&fields.parent, "a string, integer or null"))?,
        )),
    };

    Ok(record)
}

/// Ids may be JSON strings or integers.
fn token(value: &Value) -> Option<NodeId> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}
