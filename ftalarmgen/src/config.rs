// SPDX-License-Identifier: GPL-3.0-or-later

//! Provides structs that define the expected naming configuration file.

use serde::{Deserialize, Serialize};

/// Occurs when the configuration file does not provide a required option.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required option {0}")]
pub struct MissingOption(pub &'static str);

/// Naming conventions used to derive tag paths from PLC alarm names.
///
/// Loaded once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingConfig {
    /// Inserted between the device and the alarm name for the alarm bit, e.g. `.ALM.`.
    pub tag_alm_prefix: String,

    /// Inserted between the device and the alarm name for configuration tags, e.g. `.Cfg_`.
    pub tag_cfg_prefix: String,

    /// Inserted between the device and the alarm name for status (handshake) tags, e.g. `.Sts_`.
    pub tag_sts_prefix: String,

    /// Alarm group every generated alarm is placed in.
    pub default_group_id: String,

    /// HMI area prefix, e.g. `/Area::`.
    pub default_data_area: String,

    /// Shortcut to the controller, e.g. `[CLX]`.
    pub default_plc_path: String,

    /// Reference a severity tag in the controller instead of asking for a fixed value.
    pub use_tag_severity: bool,

    /// Emit the `HandshakeTags` block.
    pub use_handshake_tags: bool,

    /// Write the in-alarm state back to the controller.
    pub handshake_inalarm: bool,

    /// Write the disabled state back to the controller.
    pub handshake_disabled: bool,

    /// Write the acknowledged state back to the controller.
    pub handshake_acked: bool,

    /// Write the suppressed state back to the controller.
    pub handshake_suppressed: bool,

    /// Write the shelved state back to the controller.
    pub handshake_shelved: bool,
}

impl NamingConfig {
    /// Default value for `NamingConfig.default_data_area`
    fn default_data_area() -> String {
        "/Area::".into()
    }

    /// Default value for `NamingConfig.default_plc_path`
    fn default_plc_path() -> String {
        "[CLX]".into()
    }

    /// Indicates if the handshake tag for `signal` should be populated.
    pub fn handshake_enabled(&self, signal: HandshakeSignal) -> bool {
        match signal {
            HandshakeSignal::InAlarm => self.handshake_inalarm,
            HandshakeSignal::Disabled => self.handshake_disabled,
            HandshakeSignal::Acked => self.handshake_acked,
            HandshakeSignal::Suppressed => self.handshake_suppressed,
            HandshakeSignal::Shelved => self.handshake_shelved,
        }
    }
}

/// Alarm sub-states that can be written back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeSignal {
    /// Alarm is active.
    InAlarm,

    /// Alarm was disabled by an operator.
    Disabled,

    /// Alarm was acknowledged.
    Acked,

    /// Alarm is suppressed.
    Suppressed,

    /// Alarm is shelved.
    Shelved,
}

impl HandshakeSignal {
    /// Every signal, in the order the HMI expects them.
    pub const ALL: [HandshakeSignal; 5] = [
        HandshakeSignal::InAlarm,
        HandshakeSignal::Disabled,
        HandshakeSignal::Acked,
        HandshakeSignal::Suppressed,
        HandshakeSignal::Shelved,
    ];

    /// Appended to the status tag path. The in-alarm tag is the bare status tag.
    pub fn suffix(&self) -> &'static str {
        match self {
            HandshakeSignal::InAlarm => "",
            HandshakeSignal::Disabled => "Disabled",
            HandshakeSignal::Acked => "Acked",
            HandshakeSignal::Suppressed => "Suppressed",
            HandshakeSignal::Shelved => "Shelved",
        }
    }
}

/// The configuration file as written, where any option may be absent.
///
/// Use [`PartialNamingConfig::resolve`] to turn it into a [`NamingConfig`], so that missing options
/// are reported at load time instead of while building alarms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartialNamingConfig {
    /// See [`NamingConfig::tag_alm_prefix`].
    pub tag_alm_prefix: Option<String>,
    /// See [`NamingConfig::tag_cfg_prefix`].
    pub tag_cfg_prefix: Option<String>,
    /// See [`NamingConfig::tag_sts_prefix`].
    pub tag_sts_prefix: Option<String>,
    /// See [`NamingConfig::default_group_id`].
    pub default_group_id: Option<String>,
    /// See [`NamingConfig::default_data_area`].
    pub default_data_area: Option<String>,
    /// See [`NamingConfig::default_plc_path`].
    pub default_plc_path: Option<String>,
    /// See [`NamingConfig::use_tag_severity`].
    pub use_tag_severity: Option<bool>,
    /// See [`NamingConfig::use_handshake_tags`].
    pub use_handshake_tags: Option<bool>,
    /// See [`NamingConfig::handshake_inalarm`].
    pub handshake_inalarm: Option<bool>,
    /// See [`NamingConfig::handshake_disabled`].
    pub handshake_disabled: Option<bool>,
    /// See [`NamingConfig::handshake_acked`].
    pub handshake_acked: Option<bool>,
    /// See [`NamingConfig::handshake_suppressed`].
    pub handshake_suppressed: Option<bool>,
    /// See [`NamingConfig::handshake_shelved`].
    pub handshake_shelved: Option<bool>,
}

/// Unwraps a partial option or names the missing key.
fn required<T>(value: Option<T>, name: &'static str) -> Result<T, MissingOption> {
    value.ok_or(MissingOption(name))
}

impl PartialNamingConfig {
    /// Checks that every required option is present.
    ///
    /// # Errors
    ///
    /// Returns the name of the first missing option, in file order.
    pub fn resolve(self) -> Result<NamingConfig, MissingOption> {
        Ok(NamingConfig {
            tag_alm_prefix: required(self.tag_alm_prefix, "tag_alm_prefix")?,
            tag_cfg_prefix: required(self.tag_cfg_prefix, "tag_cfg_prefix")?,
            tag_sts_prefix: required(self.tag_sts_prefix, "tag_sts_prefix")?,
            default_group_id: required(self.default_group_id, "default_group_id")?,
            default_data_area: self
                .default_data_area
                .unwrap_or_else(NamingConfig::default_data_area),
            default_plc_path: self
                .default_plc_path
                .unwrap_or_else(NamingConfig::default_plc_path),
            use_tag_severity: required(self.use_tag_severity, "use_tag_severity")?,
            use_handshake_tags: required(self.use_handshake_tags, "use_handshake_tags")?,
            handshake_inalarm: required(self.handshake_inalarm, "handshake_inalarm")?,
            handshake_disabled: required(self.handshake_disabled, "handshake_disabled")?,
            handshake_acked: required(self.handshake_acked, "handshake_acked")?,
            handshake_suppressed: required(self.handshake_suppressed, "handshake_suppressed")?,
            handshake_shelved: required(self.handshake_shelved, "handshake_shelved")?,
        })
    }
}
