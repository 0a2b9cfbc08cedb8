// SPDX-License-Identifier: GPL-3.0-or-later

//! Serializes typed element trees into indented XML.

use quick_xml::{errors::serialize::SeError, se::Serializer};
use serde::Serialize;

/// Declaration written in front of standalone documents.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" ?>";

/// Serializes `value` as indented XML, using the serde name of the type as the root element.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as XML.
pub fn to_pretty_xml<T: Serialize>(value: &T) -> Result<String, SeError> {
    let mut buffer = String::new();
    let mut serializer = Serializer::new(&mut buffer);
    serializer.indent(' ', 2);
    value.serialize(serializer)?;
    Ok(buffer)
}

/// Same as [`to_pretty_xml`], prefixed with [`XML_DECLARATION`].
///
/// # Errors
///
/// Returns an error if the value cannot be represented as XML.
pub fn to_pretty_document<T: Serialize>(value: &T) -> Result<String, SeError> {
    Ok(format!("{XML_DECLARATION}\n{}", to_pretty_xml(value)?))
}
