//! Configuration layers and the precedence rules for combining them.
//!
//! Layers are flat key/value maps. Overlaying is shallow: a key present in the
//! higher layer replaces the lower layer's value wholesale, nested objects
//! included.

use serde_json::{Map, Value};

/// A configuration layer: app defaults, host settings, remote config, or the merged result.
pub type ConfigMap = Map<String, Value>;

/// Key holding the locally derived API endpoint in merged output.
pub const API_URL_KEY: &str = "apiUrl";

/// Copy every key of `overlay` onto `base`, replacing existing values.
pub fn overlay(base: &mut ConfigMap, overlay: &ConfigMap) {
    for (key, value) in overlay {
        base.insert(key.clone(), value.clone());
    }
}

/// Combine the layers in precedence order: app < host < remote, then stamp `apiUrl`.
pub fn merge_layers(
    app: &ConfigMap,
    host: &ConfigMap,
    remote: &ConfigMap,
    api_url: String,
) -> ConfigMap {
    let mut merged = app.clone();
    overlay(&mut merged, host);
    overlay(&mut merged, remote);
    merged.insert(API_URL_KEY.to_string(), Value::String(api_url));
    merged
}
