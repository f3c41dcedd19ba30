//! The custom search attributes this application requires, and the diff
//! against whatever the namespace already has.

use std::collections::HashMap;

use temporal_sdk_core_protos::temporal::api::enums::v1::IndexedValueType;

/// Attributes every namespace we run against must expose. Workflows are
/// queried by these from the rest of the application.
pub const REQUIRED: [&str; 4] = ["workflowId", "nodeId", "botId", "organizationId"];

/// All four are plain identifier strings; they are registered as `Text`.
pub const ATTRIBUTE_TYPE: IndexedValueType = IndexedValueType::Text;

/// Required attributes absent from `existing`, in [`REQUIRED`] order.
///
/// An attribute that is already registered is never touched again, whatever
/// type it was registered with; custom attributes we don't know about are
/// ignored.
pub fn missing(existing: &HashMap<String, i32>) -> Vec<&'static str> {
    REQUIRED
        .iter()
        .copied()
        .filter(|name| !existing.contains_key(*name))
        .collect()
}

/// The name→type map for an `AddSearchAttributes` call covering `names`.
pub fn registration_request(names: &[&'static str]) -> HashMap<String, i32> {
    names
        .iter()
        .map(|name| (name.to_string(), ATTRIBUTE_TYPE as i32))
        .collect()
}
