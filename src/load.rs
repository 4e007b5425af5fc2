use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::parse::{parse_hex_id, parse_version};
use crate::{
    CriterionError, Entry, FeatureMask, FloatCriterion, LoadError, LoadOptions, MultiGpuStyle,
    OsCriterion, RuleSet, StringCriterion, Version, VersionCriterion,
};

type Object = Map<String, Value>;

/// Where an entry object sits in the configuration tree.
#[derive(Clone, Copy)]
enum Tier {
    TopLevel { index: usize },
    Exception { parent: u32 },
}

pub(crate) fn load(tree: &Value, options: &LoadOptions) -> Result<RuleSet, LoadError> {
    let root = tree.as_object().ok_or(LoadError::RootNotObject)?;
    let schema_version = schema_version(root)?;
    let list = root
        .get("entries")
        .and_then(Value::as_array)
        .ok_or(LoadError::MissingEntries)?;
    let browser_version: Version = options
        .browser_version()
        .parse()
        .map_err(LoadError::InvalidBrowserVersion)?;

    let mut entries = Vec::with_capacity(list.len());
    let mut seen = HashSet::new();
    for (index, item) in list.iter().enumerate() {
        let object = item
            .as_object()
            .ok_or(LoadError::EntryNotObject { index })?;
        let supported = supports_browser(object, &browser_version)
            .map_err(|source| LoadError::MalformedBrowserVersion { index, source })?;
        if !supported {
            debug!(index, %browser_version, "entry does not apply to this browser version");
            continue;
        }
        let entry = parse_entry(object, Tier::TopLevel { index })?;
        if !seen.insert(entry.id) {
            return Err(LoadError::DuplicateId { id: entry.id });
        }
        entries.push(entry);
    }

    let max_entry_id = entries.iter().map(Entry::id).max().unwrap_or(0);
    let contains_unknown_fields = entries
        .iter()
        .any(|e| e.has_unknown_fields || e.has_unknown_features);
    entries.retain(|e| options.keeps(e));

    Ok(RuleSet {
        schema_version,
        entries,
        max_entry_id,
        contains_unknown_fields,
    })
}

fn schema_version(root: &Object) -> Result<(u16, u16), LoadError> {
    let text = root
        .get("version")
        .and_then(Value::as_str)
        .ok_or(LoadError::MissingSchemaVersion)?;
    match parse_version(text).as_deref() {
        Ok(&[major, minor]) => Ok((major, minor)),
        _ => Err(LoadError::InvalidSchemaVersion {
            version: text.to_owned(),
        }),
    }
}

fn supports_browser(object: &Object, browser_version: &Version) -> Result<bool, CriterionError> {
    let fields = match object.get("browser_version") {
        None => return Ok(true),
        Some(Value::Object(fields)) => fields,
        Some(_) => return Err(wrong_type("browser_version", "an object")),
    };
    let criterion = VersionCriterion::parse(
        op_or_any(fields)?,
        "",
        text(fields, "number")?,
        text(fields, "number2")?,
    )?;
    Ok(criterion.contains(browser_version))
}

fn parse_entry(object: &Object, tier: Tier) -> Result<Entry, LoadError> {
    let mut entry = Entry::default();
    let mut reader = FieldReader::new(object);

    if let Tier::TopLevel { index } = tier {
        entry.id = reader
            .integer("id")
            .and_then(|id| u32::try_from(id).ok())
            .filter(|&id| id != 0)
            .ok_or(LoadError::InvalidId { index })?;
        if let Some(disabled) = reader.boolean("disabled") {
            entry.disabled = disabled;
        }
    }
    let owner = match tier {
        Tier::TopLevel { .. } => entry.id,
        Tier::Exception { parent } => parent,
    };
    reader.owner = owner;

    if let Some(description) = reader.string("description") {
        description.clone_into(&mut entry.description);
    }
    if let Some(list) = reader.list("cr_bugs") {
        entry.cr_bugs = bug_list(list).ok_or(LoadError::MalformedBugList {
            id: owner,
            field: "cr_bugs",
        })?;
    }
    if let Some(list) = reader.list("webkit_bugs") {
        entry.webkit_bugs = bug_list(list).ok_or(LoadError::MalformedBugList {
            id: owner,
            field: "webkit_bugs",
        })?;
    }

    if let Some(os) = reader.criterion("os", "an object", Value::as_object) {
        entry.os = reader.accept("os", os_criterion(os));
    }
    if let Some(vendor_id) = reader.criterion("vendor_id", "a string", Value::as_str) {
        let parsed = parse_hex_id(vendor_id).map_err(CriterionError::from);
        entry.vendor_id = reader.accept("vendor_id", parsed).unwrap_or(0);
    }
    if let Some(list) = reader.criterion("device_id", "a list", Value::as_array) {
        let parsed = list
            .iter()
            .map(|item| -> Result<u32, CriterionError> {
                let text = item
                    .as_str()
                    .ok_or_else(|| CriterionError::InvalidNumber(item.to_string()))?;
                Ok(parse_hex_id(text)?)
            })
            .collect::<Result<Vec<u32>, CriterionError>>();
        entry.device_ids = reader.accept("device_id", parsed).unwrap_or_default();
    }
    if let Some(style) = reader.criterion("multi_gpu_style", "a string", Value::as_str) {
        let parsed = MultiGpuStyle::from_token(style)
            .ok_or_else(|| CriterionError::UnknownMultiGpuStyle(style.to_owned()));
        entry.multi_gpu_style = reader.accept("multi_gpu_style", parsed).unwrap_or_default();
    }
    entry.driver_vendor = reader.string_criterion("driver_vendor");
    if let Some(version) = reader.criterion("driver_version", "an object", Value::as_object) {
        entry.driver_version = reader.accept("driver_version", version_criterion(version));
    }
    if let Some(date) = reader.criterion("driver_date", "an object", Value::as_object) {
        entry.driver_date = reader.accept("driver_date", date_criterion(date));
    }
    entry.gl_vendor = reader.string_criterion("gl_vendor");
    entry.gl_renderer = reader.string_criterion("gl_renderer");
    entry.perf_graphics = reader.float_criterion("perf_graphics");
    entry.perf_gaming = reader.float_criterion("perf_gaming");
    entry.perf_overall = reader.float_criterion("perf_overall");

    if let Tier::TopLevel { .. } = tier {
        let id = entry.id;
        let list = reader
            .list("blacklist")
            .ok_or(LoadError::MissingBlacklist { id })?;
        if list.is_empty() {
            return Err(LoadError::EmptyBlacklist { id });
        }
        for item in list {
            let name = item
                .as_str()
                .ok_or(LoadError::MalformedBlacklist { id })?;
            match FeatureMask::from_name(name) {
                Some(mask) => entry.features |= mask,
                None => {
                    warn!(entry = id, feature = name, "unknown blacklisted feature");
                    entry.has_unknown_features = true;
                }
            }
        }

        if let Some(list) = reader.list("exceptions") {
            for (index, item) in list.iter().enumerate() {
                let object = item
                    .as_object()
                    .ok_or(LoadError::ExceptionNotObject { id, index })?;
                let exception = parse_entry(object, Tier::Exception { parent: id })?;
                if exception.has_unknown_fields {
                    warn!(entry = id, exception = index, "dropping exception with unknown fields");
                    entry.has_unknown_fields = true;
                } else {
                    entry.exceptions.push(exception);
                }
            }
        }

        // Evaluated by `load` before the entry is parsed.
        reader.mark_known("browser_version");
    }

    if reader.recognized != object.len() {
        warn!(entry = owner, "entry has unknown fields");
        entry.has_unknown_fields = true;
    }
    entry.malformed = reader.malformed;
    Ok(entry)
}

/// Reads known keys of one entry object, counting each key that is present
/// with the expected type and recording criteria that fail to build.
struct FieldReader<'a> {
    object: &'a Object,
    owner: u32,
    recognized: usize,
    malformed: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    fn new(object: &'a Object) -> Self {
        Self {
            object,
            owner: 0,
            recognized: 0,
            malformed: Vec::new(),
        }
    }

    /// Count a key that is validated elsewhere.
    fn mark_known(&mut self, key: &str) {
        if self.object.contains_key(key) {
            self.recognized += 1;
        }
    }

    fn get<T: ?Sized>(
        &mut self,
        key: &str,
        cast: impl FnOnce(&'a Value) -> Option<&'a T>,
    ) -> Option<&'a T> {
        let value = self.object.get(key).and_then(cast)?;
        self.recognized += 1;
        Some(value)
    }

    fn list(&mut self, key: &str) -> Option<&'a Vec<Value>> {
        self.get(key, Value::as_array)
    }

    fn string(&mut self, key: &str) -> Option<&'a str> {
        self.get(key, Value::as_str)
    }

    fn integer(&mut self, key: &str) -> Option<u64> {
        let value = self.object.get(key).and_then(Value::as_u64)?;
        self.recognized += 1;
        Some(value)
    }

    fn boolean(&mut self, key: &str) -> Option<bool> {
        let value = self.object.get(key).and_then(Value::as_bool)?;
        self.recognized += 1;
        Some(value)
    }

    /// Like `get`, but a present value of the wrong type makes the criterion
    /// malformed instead of absent. The key still counts as unknown.
    fn criterion<T: ?Sized>(
        &mut self,
        key: &'static str,
        expected: &'static str,
        cast: impl FnOnce(&'a Value) -> Option<&'a T>,
    ) -> Option<&'a T> {
        let value = self.object.get(key)?;
        match cast(value) {
            Some(value) => {
                self.recognized += 1;
                Some(value)
            }
            None => {
                self.reject(key, &wrong_type(key, expected));
                None
            }
        }
    }

    fn accept<T>(&mut self, field: &'static str, result: Result<T, CriterionError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.reject(field, &err);
                None
            }
        }
    }

    fn reject(&mut self, field: &'static str, err: &CriterionError) {
        warn!(entry = self.owner, field, %err, "malformed criterion");
        self.malformed.push(field);
    }

    fn string_criterion(&mut self, key: &'static str) -> Option<StringCriterion> {
        let fields = self.criterion(key, "an object", Value::as_object)?;
        self.accept(key, string_fields(fields))
    }

    fn float_criterion(&mut self, key: &'static str) -> Option<FloatCriterion> {
        let fields = self.criterion(key, "an object", Value::as_object)?;
        self.accept(key, float_fields(fields))
    }
}

fn os_criterion(os: &Object) -> Result<OsCriterion, CriterionError> {
    let os_type = text(os, "type")?;
    match os.get("version") {
        None => OsCriterion::parse(os_type, "any", "", ""),
        Some(Value::Object(version)) => OsCriterion::parse(
            os_type,
            op_or_any(version)?,
            text(version, "number")?,
            text(version, "number2")?,
        ),
        Some(_) => Err(wrong_type("version", "an object")),
    }
}

fn string_fields(fields: &Object) -> Result<StringCriterion, CriterionError> {
    StringCriterion::parse(text(fields, "op")?, text(fields, "value")?)
}

fn float_fields(fields: &Object) -> Result<FloatCriterion, CriterionError> {
    FloatCriterion::parse(
        text(fields, "op")?,
        text(fields, "value")?,
        text(fields, "value2")?,
    )
}

fn version_criterion(fields: &Object) -> Result<VersionCriterion, CriterionError> {
    VersionCriterion::parse(
        op_or_any(fields)?,
        text(fields, "style")?,
        text(fields, "number")?,
        text(fields, "number2")?,
    )
}

fn date_criterion(fields: &Object) -> Result<VersionCriterion, CriterionError> {
    VersionCriterion::parse_date(
        op_or_any(fields)?,
        text(fields, "number")?,
        text(fields, "number2")?,
    )
}

/// A criterion payload string; absent reads as empty.
fn text<'a>(object: &'a Object, key: &'static str) -> Result<&'a str, CriterionError> {
    match object.get(key) {
        None => Ok(""),
        Some(value) => value.as_str().ok_or_else(|| wrong_type(key, "a string")),
    }
}

fn op_or_any<'a>(object: &'a Object) -> Result<&'a str, CriterionError> {
    match object.get("op") {
        None => Ok("any"),
        Some(_) => text(object, "op"),
    }
}

fn wrong_type(field: &'static str, expected: &'static str) -> CriterionError {
    CriterionError::WrongType { field, expected }
}

fn bug_list(list: &[Value]) -> Option<Vec<i64>> {
    list.iter().map(Value::as_i64).collect()
}
