//! camelCase <-> snake_case translation for style records.
//!
//! The wire format is the frontend's `Project` shape; the `projects` table uses snake_case
//! columns. Writes go through `to_storage`, reads through `from_storage`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// External name -> storage column, for every field whose names differ
const FIELD_MAP: &[(&str, &str)] = &[
    ("poNumbers", "po_numbers"),
    ("updatedAt", "updated_at"),
    ("techPackFiles", "tech_pack_files"),
    ("ppMeetings", "pp_meetings"),
    ("materialControl", "material_control"),
    ("orderSheet", "order_sheet"),
    ("materialRemarks", "material_remarks"),
    ("materialAttachments", "material_attachments"),
    ("materialComments", "material_comments"),
    ("productImage", "product_image"),
    ("productColors", "product_colors"),
];

/// Value substituted when a column is missing from a stored row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadDefault {
    Null,
    EmptyList,
    EmptyString,
}

impl ReadDefault {
    fn value(self) -> Value {
        match self {
            ReadDefault::Null => Value::Null,
            ReadDefault::EmptyList => Value::Array(Vec::new()),
            ReadDefault::EmptyString => Value::String(String::new()),
        }
    }
}

/// The complete external shape, in wire order: (external name, storage column, read default)
const RECORD_FIELDS: &[(&str, &str, ReadDefault)] = &[
    ("id", "id", ReadDefault::Null),
    ("title", "title", ReadDefault::Null),
    ("productImage", "product_image", ReadDefault::Null),
    ("productColors", "product_colors", ReadDefault::EmptyList),
    ("poNumbers", "po_numbers", ReadDefault::EmptyList),
    ("updatedAt", "updated_at", ReadDefault::Null),
    ("status", "status", ReadDefault::Null),
    ("techPackFiles", "tech_pack_files", ReadDefault::EmptyList),
    ("pages", "pages", ReadDefault::EmptyList),
    ("comments", "comments", ReadDefault::EmptyList),
    ("inspections", "inspections", ReadDefault::EmptyList),
    ("ppMeetings", "pp_meetings", ReadDefault::EmptyList),
    ("materialControl", "material_control", ReadDefault::EmptyList),
    ("invoices", "invoices", ReadDefault::EmptyList),
    ("packing", "packing", ReadDefault::Null),
    ("orderSheet", "order_sheet", ReadDefault::Null),
    ("consumption", "consumption", ReadDefault::Null),
    ("materialRemarks", "material_remarks", ReadDefault::EmptyString),
    ("materialAttachments", "material_attachments", ReadDefault::EmptyList),
    ("materialComments", "material_comments", ReadDefault::EmptyList),
];

/// Storage columns filled on create when the caller left them out entirely
const CREATE_DEFAULTS: &[&str] = &[
    "po_numbers",
    "tech_pack_files",
    "pages",
    "comments",
    "inspections",
    "pp_meetings",
    "material_control",
    "invoices",
    "material_attachments",
    "material_comments",
];

pub const DEFAULT_STATUS: &str = "DRAFT";

/// Number of keys every `from_storage` result carries
pub const RECORD_FIELD_COUNT: usize = RECORD_FIELDS.len();

/// Storage column for an external field name; unknown names map to themselves
pub fn storage_name(external: &str) -> &str {
    FIELD_MAP
        .iter()
        .find(|(ext, _)| *ext == external)
        .map(|(_, col)| *col)
        .unwrap_or(external)
}

/// Rewrite known keys to storage columns, dropping null values.
///
/// A `null` can therefore never clear a column through this path; callers omit the key
/// instead. Unknown keys pass through untouched.
pub fn to_storage(data: &Map<String, Value>) -> Map<String, Value> {
    data.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (storage_name(key).to_string(), value.clone()))
        .collect()
}

/// Project a stored row onto the fixed 20-field external shape.
///
/// Total: unknown columns are dropped and missing ones take their documented default. A
/// column stored as `null` counts as missing for list and remarks fields.
pub fn from_storage(row: &Map<String, Value>) -> Map<String, Value> {
    RECORD_FIELDS
        .iter()
        .map(|(external, column, default)| {
            let value = match row.get(*column) {
                Some(Value::Null) | None => default.value(),
                Some(v) => v.clone(),
            };
            (external.to_string(), value)
        })
        .collect()
}

/// Fill status, remarks and collection defaults for keys the caller did not supply
pub fn apply_create_defaults(data: &mut Map<String, Value>) {
    data.entry("status")
        .or_insert_with(|| Value::String(DEFAULT_STATUS.to_string()));
    data.entry("material_remarks")
        .or_insert_with(|| Value::String(String::new()));
    for column in CREATE_DEFAULTS {
        data.entry(*column).or_insert_with(|| Value::Array(Vec::new()));
    }
}

/// `proj-<epoch millis>`
pub fn new_style_id(now: DateTime<Utc>) -> String {
    format!("proj-{}", now.timestamp_millis())
}

/// ISO-8601 timestamp stored in `updated_at`
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}
