//! JSON serialization capability shared by every entity of the result model.
//!
//! Each entity derives (or hand-writes) its serde representation; this trait
//! layers the value-tree and JSON text/stream conversions on top of it once, so
//! a [`Hit`](crate::core::hit::Hit) and a whole
//! [`Session`](crate::core::session::Session) are persisted the same way.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Conversion to and from JSON for result-model entities.
pub trait JsonCodec: Serialize + DeserializeOwned {
    /// Convert into a JSON value tree
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be represented as JSON.
    fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Rebuild from a JSON value tree
    ///
    /// # Errors
    ///
    /// Returns an error if required keys are missing or the data is
    /// internally inconsistent.
    fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Serialize to compact JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be represented as JSON.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be represented as JSON.
    fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize as JSON into a writer
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    fn to_writer<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer(writer, self)
    }

    /// Parse from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON, missing keys or inconsistent data.
    fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse JSON from a reader
    ///
    /// # Errors
    ///
    /// Returns an error on read failure, malformed JSON, missing keys or
    /// inconsistent data.
    fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}
