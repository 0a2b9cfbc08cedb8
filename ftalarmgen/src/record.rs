// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed element tree of a FactoryTalk View SE discrete alarm definition.
//!
//! The tree mirrors the `FTAlarmElement` markup imported by the HMI alarm server. It is built by
//! [`crate::builder`] and only turned into text by [`AlarmRecord::to_xml`].

use quick_xml::errors::serialize::SeError;
use serde::{Serialize, Serializer};

use crate::{config::HandshakeSignal, markup};

/// Serializes `true` as `Yes` and `false` as `No`.
fn yes_no<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "Yes" } else { "No" })
}

/// Root `FTAlarmElement` of an alarm definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "FTAlarmElement")]
pub struct AlarmRecord {
    /// Display name, `<device> <custom name>`.
    #[serde(rename = "@name")]
    pub name: String,

    /// Whether the alarm is enabled.
    #[serde(rename = "@inuse", serialize_with = "yes_no")]
    pub in_use: bool,

    /// Whether the alarm stays active until reset.
    #[serde(rename = "@latched")]
    pub latched: bool,

    /// Whether operators must acknowledge the alarm.
    #[serde(rename = "@ackRequired")]
    pub ack_required: bool,

    /// Alarm kind.
    #[serde(rename = "@style")]
    pub style: AlarmStyle,

    /// Trigger and tag bindings.
    #[serde(rename = "DiscreteElement")]
    pub discrete: DiscreteElement,
}

impl AlarmRecord {
    /// Renders the record as an indented XML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the record contains values that cannot be written as XML.
    pub fn to_xml(&self) -> Result<String, SeError> {
        markup::to_pretty_document(self)
    }
}

/// Alarm kinds supported by the HMI. Only discrete alarms are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmStyle {
    /// Boolean trigger.
    Discrete,
}

impl Serialize for AlarmStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            AlarmStyle::Discrete => "Discrete",
        })
    }
}

/// Condition under which a discrete alarm becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerStyle {
    /// Active while the data item is true.
    DiscreteTrue,
}

impl Serialize for TriggerStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            TriggerStyle::DiscreteTrue => "DiscreteTrue",
        })
    }
}

/// Where the alarm severity comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// Severity is read from a controller tag.
    Tag(String),

    /// Fixed severity entered by an operator. Expected to be 0-1000 but never checked.
    Value(String),
}

impl Severity {
    /// The tag path or value as written into the record.
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Tag(tag) => tag,
            Severity::Value(value) => value,
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// `DiscreteElement` body of an alarm definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscreteElement {
    /// Tag that triggers the alarm.
    #[serde(rename = "DataItem")]
    pub data_item: String,

    /// Trigger condition.
    #[serde(rename = "Style")]
    pub style: TriggerStyle,

    /// Severity tag or fixed value.
    #[serde(rename = "Severity")]
    pub severity: Severity,

    /// Seconds the trigger must hold before the alarm activates.
    #[serde(rename = "DelayInterval")]
    pub delay_interval: u32,

    /// Whether enabling is driven by a tag.
    #[serde(rename = "EnableTag")]
    pub enable_tag: bool,

    /// Free-form data attached to the alarm.
    #[serde(rename = "UserData")]
    pub user_data: String,

    /// Command run when the alarm activates.
    #[serde(rename = "RSVCmd")]
    pub rsv_cmd: String,

    /// Free-form classification.
    #[serde(rename = "AlarmClass")]
    pub alarm_class: String,

    /// Alarm group.
    #[serde(rename = "GroupID")]
    pub group_id: String,

    /// Status tags written back to the controller, when enabled.
    #[serde(rename = "HandshakeTags", skip_serializing_if = "Option::is_none")]
    pub handshake_tags: Option<HandshakeTags>,

    /// Acknowledges every alarm.
    #[serde(rename = "RemoteAckAllDataItem")]
    pub remote_ack_all: RemoteCommand,

    /// Disables the alarm.
    #[serde(rename = "RemoteDisableDataItem")]
    pub remote_disable: RemoteCommand,

    /// Enables the alarm.
    #[serde(rename = "RemoteEnableDataItem")]
    pub remote_enable: RemoteCommand,

    /// Suppresses the alarm.
    #[serde(rename = "RemoteSuppressDataItem")]
    pub remote_suppress: RemoteCommand,

    /// Unsuppresses the alarm.
    #[serde(rename = "RemoteUnSuppressDataItem")]
    pub remote_unsuppress: RemoteCommand,

    /// Shelves every alarm.
    #[serde(rename = "RemoteShelveAllDataItem")]
    pub remote_shelve_all: RemoteCommand,

    /// Unshelves the alarm.
    #[serde(rename = "RemoteUnShelveDataItem")]
    pub remote_unshelve: RemoteCommand,

    /// Tag holding the shelve duration.
    #[serde(rename = "RemoteShelveDuration")]
    pub remote_shelve_duration: String,

    /// Message shown for the alarm. Always `0`, matching the generated message block.
    #[serde(rename = "MessageID")]
    pub message_id: u32,

    /// Values substituted into the alarm message.
    #[serde(rename = "Params")]
    pub params: Params,
}

/// `HandshakeTags` block. Every element is always present; disabled ones are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HandshakeTags {
    /// See [`HandshakeSignal::InAlarm`].
    #[serde(rename = "InAlarmDataItem")]
    pub in_alarm: String,

    /// See [`HandshakeSignal::Disabled`].
    #[serde(rename = "DisabledDataItem")]
    pub disabled: String,

    /// See [`HandshakeSignal::Acked`].
    #[serde(rename = "AckedDataItem")]
    pub acked: String,

    /// See [`HandshakeSignal::Suppressed`].
    #[serde(rename = "SuppressedDataItem")]
    pub suppressed: String,

    /// See [`HandshakeSignal::Shelved`].
    #[serde(rename = "ShelvedDataItem")]
    pub shelved: String,
}

impl HandshakeTags {
    /// The tag path for `signal`, empty if the signal is disabled.
    pub fn get(&self, signal: HandshakeSignal) -> &str {
        match signal {
            HandshakeSignal::InAlarm => &self.in_alarm,
            HandshakeSignal::Disabled => &self.disabled,
            HandshakeSignal::Acked => &self.acked,
            HandshakeSignal::Suppressed => &self.suppressed,
            HandshakeSignal::Shelved => &self.shelved,
        }
    }

    /// Mutable access to the tag path for `signal`.
    pub fn get_mut(&mut self, signal: HandshakeSignal) -> &mut String {
        match signal {
            HandshakeSignal::InAlarm => &mut self.in_alarm,
            HandshakeSignal::Disabled => &mut self.disabled,
            HandshakeSignal::Acked => &mut self.acked,
            HandshakeSignal::Suppressed => &mut self.suppressed,
            HandshakeSignal::Shelved => &mut self.shelved,
        }
    }
}

/// A single unbound remote command, e.g. `<RemoteAckAllDataItem AutoReset="false"/>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoteCommand {
    /// Whether the HMI resets the command tag after acting on it.
    #[serde(rename = "@AutoReset")]
    pub auto_reset: bool,
}

/// `Params` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Params {
    /// Bound parameters, in order.
    #[serde(rename = "Param")]
    pub params: Vec<Param>,
}

/// `<Param key="Tag1">/Area::[CLX]Device.Cfg_Tag</Param>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Placeholder name used in messages, e.g. `Tag1`.
    #[serde(rename = "@key")]
    pub key: String,

    /// Tag path substituted for the placeholder.
    #[serde(rename = "$value")]
    pub value: String,
}
