// SPDX-License-Identifier: GPL-3.0-or-later

//! Localized alarm message block referenced by `MessageID`.

use quick_xml::errors::serialize::SeError;
use serde::Serialize;

use crate::markup;

/// Message id shared by every generated alarm and its message.
pub const MESSAGE_ID: u32 = 0;

/// Language of generated messages.
pub const MESSAGE_LANG: &str = "en-US";

/// `<Message id="0">` wrapper holding the localized texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "Message")]
pub struct MessageBlock {
    /// Matches `MessageID` in the alarm record.
    #[serde(rename = "@id")]
    pub id: u32,

    /// Localized texts.
    #[serde(rename = "Msgs")]
    pub msgs: Msgs,
}

/// `Msgs` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Msgs {
    /// One entry per language.
    #[serde(rename = "Msg")]
    pub msgs: Vec<Msg>,
}

/// `<Msg xml:lang="en-US">text</Msg>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Msg {
    /// Language tag.
    #[serde(rename = "@xml:lang")]
    pub lang: String,

    /// Message text, with `%Tag1` substituted by the HMI.
    #[serde(rename = "$value")]
    pub text: String,
}

impl MessageBlock {
    /// Builds the English message `/*S:0 %Tag1*/ {alarm_name} - {message}`.
    ///
    /// The text is kept as entered. [`MessageBlock::to_xml`] escapes `<`, `>` and `&`, so
    /// `Level > 90 & rising` renders as `Level &gt; 90 &amp; rising`.
    pub fn english(alarm_name: &str, message: &str) -> Self {
        Self {
            id: MESSAGE_ID,
            msgs: Msgs {
                msgs: vec![Msg {
                    lang: MESSAGE_LANG.into(),
                    text: format!("/*S:0 %Tag1*/ {alarm_name} - {message}"),
                }],
            },
        }
    }

    /// The first message text, if any.
    pub fn text(&self) -> Option<&str> {
        self.msgs.msgs.first().map(|m| m.text.as_str())
    }

    /// Renders the block as indented XML, without a declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be written as XML.
    pub fn to_xml(&self) -> Result<String, SeError> {
        markup::to_pretty_xml(self)
    }
}
