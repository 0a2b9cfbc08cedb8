// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns an operator's alarm request into an alarm record, polling tags and an optional message.
//!
//! Every tag path follows the same convention:
//!
//! ```text
//! <area><path><device><role prefix><sanitized alarm>[<role suffix>]
//! ```
//!
//! e.g. `/Area::[CLX]DCV901212.ALM.FullStall` for the alarm bit of `FullStall`.

use std::fmt;

use tracing::debug;

use crate::{
    config::{HandshakeSignal, NamingConfig},
    message::{MessageBlock, MESSAGE_ID},
    record::{
        AlarmRecord, AlarmStyle, DiscreteElement, HandshakeTags, Param, Params, RemoteCommand,
        Severity, TriggerStyle,
    },
    sanitize::sanitize_name,
};

/// Parameter key bound to the device configuration tag.
pub const TAG1_KEY: &str = "Tag1";

/// Member of the device UDT the `Tag1` parameter points to.
const CFG_TAG_MEMBER: &str = ".Cfg_Tag";

/// HMI area and controller shortcut prepended to every tag path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLocation {
    /// e.g. `/Area::`
    pub area: String,

    /// e.g. `[CLX]`
    pub path: String,
}

impl TagLocation {
    /// Uses the configured default area and controller path.
    pub fn from_config(config: &NamingConfig) -> Self {
        Self {
            area: config.default_data_area.clone(),
            path: config.default_plc_path.clone(),
        }
    }

    /// `<area><path><device>`
    fn device_root(&self, device: &str) -> String {
        format!("{}{}{}", self.area, self.path, device)
    }
}

/// One alarm as entered by an operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmRequest {
    /// Device (UDT instance) the alarm belongs to.
    pub device: String,

    /// Alarm member name as entered in the PLC. Sanitized by [`build`].
    pub original_alarm: String,

    /// Human readable alarm name. Used verbatim.
    pub custom_name: String,

    /// Optional message text. Empty is treated as no message.
    pub message: Option<String>,

    /// Fixed severity, used when the configuration does not reference severity tags.
    pub severity: Option<String>,
}

/// Tags the polling subsystem must refresh for an alarm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingTagSet {
    /// Alarm bit.
    pub alarm: String,

    /// Device configuration tag.
    pub config: String,

    /// Severity configuration tag.
    pub severity: String,
}

impl PollingTagSet {
    /// Tag paths in output order.
    pub fn tags(&self) -> [&str; 3] {
        [&self.alarm, &self.config, &self.severity]
    }
}

impl fmt::Display for PollingTagSet {
    /// One `<Tag>…</Tag>` line per tag.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in self.tags() {
            writeln!(f, "<Tag>{tag}</Tag>")?;
        }
        Ok(())
    }
}

/// Everything generated for a single alarm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAlarm {
    /// Polling tag lines.
    pub polling: PollingTagSet,

    /// Present only if the request carried a non-empty message.
    pub message: Option<MessageBlock>,

    /// Alarm definition.
    pub record: AlarmRecord,
}

/// Builds the alarm definition, polling tags and message for `request`.
///
/// Only `request.original_alarm` is sanitized; callers are responsible for `custom_name`.
pub fn build(
    request: &AlarmRequest,
    location: &TagLocation,
    config: &NamingConfig,
) -> GeneratedAlarm {
    let alarm = sanitize_name(&request.original_alarm);
    let root = location.device_root(&request.device);

    let alarm_tag = format!("{root}{}{alarm}", config.tag_alm_prefix);
    let severity_tag = format!("{root}{}{alarm}Severity", config.tag_cfg_prefix);

    let severity = if config.use_tag_severity {
        Severity::Tag(severity_tag.clone())
    } else {
        Severity::Value(request.severity.clone().unwrap_or_default())
    };

    let handshake_tags = config
        .use_handshake_tags
        .then(|| build_handshake_tags(&root, &alarm, config));

    let record = AlarmRecord {
        name: format!("{} {}", request.device, request.custom_name),
        in_use: true,
        latched: false,
        ack_required: true,
        style: AlarmStyle::Discrete,
        discrete: DiscreteElement {
            data_item: alarm_tag.clone(),
            style: TriggerStyle::DiscreteTrue,
            severity,
            delay_interval: 0,
            enable_tag: false,
            user_data: String::new(),
            rsv_cmd: String::new(),
            alarm_class: String::new(),
            group_id: config.default_group_id.clone(),
            handshake_tags,
            remote_ack_all: RemoteCommand::default(),
            remote_disable: RemoteCommand::default(),
            remote_enable: RemoteCommand::default(),
            remote_suppress: RemoteCommand::default(),
            remote_unsuppress: RemoteCommand::default(),
            remote_shelve_all: RemoteCommand::default(),
            remote_unshelve: RemoteCommand::default(),
            remote_shelve_duration: String::new(),
            message_id: MESSAGE_ID,
            params: Params {
                params: vec![Param {
                    key: TAG1_KEY.into(),
                    value: format!("{root}{CFG_TAG_MEMBER}"),
                }],
            },
        },
    };

    let polling = PollingTagSet {
        alarm: alarm_tag,
        config: format!("{root}{}Tag", config.tag_cfg_prefix),
        severity: severity_tag,
    };

    let message = request
        .message
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(|m| MessageBlock::english(&request.custom_name, m));

    debug!(
        device = %request.device,
        %alarm,
        message = message.is_some(),
        "built alarm"
    );

    GeneratedAlarm {
        polling,
        message,
        record,
    }
}

/// Fills in the status tag of every enabled signal, leaving the others empty.
fn build_handshake_tags(root: &str, alarm: &str, config: &NamingConfig) -> HandshakeTags {
    let mut tags = HandshakeTags::default();
    for signal in HandshakeSignal::ALL {
        if config.handshake_enabled(signal) {
            *tags.get_mut(signal) =
                format!("{root}{}{alarm}{}", config.tag_sts_prefix, signal.suffix());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NamingConfig {
        NamingConfig {
            tag_alm_prefix: ".ALM.".into(),
            tag_cfg_prefix: ".Cfg_".into(),
            tag_sts_prefix: ".Sts_".into(),
            default_group_id: "1".into(),
            default_data_area: "/Area::".into(),
            default_plc_path: "[CLX]".into(),
            use_tag_severity: true,
            use_handshake_tags: true,
            handshake_inalarm: true,
            handshake_disabled: true,
            handshake_acked: true,
            handshake_suppressed: true,
            handshake_shelved: true,
        }
    }

    fn location() -> TagLocation {
        TagLocation {
            area: "/Area::".into(),
            path: "[CLX]".into(),
        }
    }

    fn request(original: &str, custom: &str, message: &str) -> AlarmRequest {
        AlarmRequest {
            device: "DCV901212".into(),
            original_alarm: original.into(),
            custom_name: custom.into(),
            message: Some(message.into()),
            severity: None,
        }
    }

    /// Builds `FullStall` on `DCV901212` with the given naming config.
    fn build_full_stall(config: &NamingConfig) -> GeneratedAlarm {
        let req = request("FullStall", "Full Stall", "");
        build(&req, &location(), config)
    }

    #[test]
    fn builds_data_item_and_severity_tag() {
        let out = build_full_stall(&config());
        let discrete = &out.record.discrete;

        assert_eq!(out.record.name, "DCV901212 Full Stall");
        assert_eq!(discrete.data_item, "/Area::[CLX]DCV901212.ALM.FullStall");
        assert_eq!(
            discrete.severity,
            Severity::Tag("/Area::[CLX]DCV901212.Cfg_FullStallSeverity".into())
        );
        assert!(discrete.severity.as_str().ends_with("FullStallSeverity"));
        assert_eq!(discrete.group_id, "1");
        assert_eq!(discrete.message_id, 0);
        assert!(out.message.is_none());
    }

    #[test]
    fn fixed_attributes() {
        let record = build_full_stall(&config()).record;
        assert!(record.in_use);
        assert!(!record.latched);
        assert!(record.ack_required);
        assert_eq!(record.style, AlarmStyle::Discrete);
        assert_eq!(record.discrete.style, TriggerStyle::DiscreteTrue);
        assert_eq!(record.discrete.delay_interval, 0);
        assert!(!record.discrete.enable_tag);
        assert_eq!(record.discrete.remote_ack_all, RemoteCommand::default());
        assert!(!record.discrete.remote_unshelve.auto_reset);
        assert!(record.discrete.remote_shelve_duration.is_empty());
    }

    #[test]
    fn sanitizes_original_but_not_custom_name() {
        let req = request("Full-Stall!", "Full-Stall!", "");
        let out = build(&req, &location(), &config());
        assert_eq!(out.record.name, "DCV901212 Full-Stall!");
        assert_eq!(
            out.record.discrete.data_item,
            "/Area::[CLX]DCV901212.ALM.FullStall"
        );
    }

    #[test]
    fn operator_severity_when_tag_severity_disabled() {
        let config = NamingConfig {
            use_tag_severity: false,
            ..config()
        };
        let mut req = request("FullStall", "Full Stall", "");
        req.severity = Some("750".into());
        let out = build(&req, &location(), &config);
        assert_eq!(out.record.discrete.severity, Severity::Value("750".into()));

        // Not validated
        req.severity = Some("very bad".into());
        let out = build(&req, &location(), &config);
        assert_eq!(out.record.discrete.severity.as_str(), "very bad");

        // Polling still lists the severity tag
        assert_eq!(
            out.polling.severity,
            "/Area::[CLX]DCV901212.Cfg_FullStallSeverity"
        );
    }

    #[test]
    fn tag1_param_always_present() {
        for use_tag_severity in [true, false] {
            for use_handshake_tags in [true, false] {
                let config = NamingConfig {
                    use_tag_severity,
                    use_handshake_tags,
                    ..config()
                };
                let out = build_full_stall(&config);
                assert_eq!(
                    out.record.discrete.params.params,
                    vec![Param {
                        key: "Tag1".into(),
                        value: "/Area::[CLX]DCV901212.Cfg_Tag".into(),
                    }]
                );
            }
        }
    }

    #[test]
    fn polling_tags() {
        let out = build_full_stall(&config());
        assert_eq!(
            out.polling.to_string(),
            "<Tag>/Area::[CLX]DCV901212.ALM.FullStall</Tag>\n\
             <Tag>/Area::[CLX]DCV901212.Cfg_Tag</Tag>\n\
             <Tag>/Area::[CLX]DCV901212.Cfg_FullStallSeverity</Tag>\n"
        );
    }

    #[test]
    fn message_block_only_for_non_empty_message() {
        let req = request("FullStall", "Full Stall", "Conveyor stalled");
        let block = build(&req, &location(), &config())
            .message
            .expect("message block");
        let text = block.text().unwrap();
        assert!(text.contains("%Tag1*/ Full Stall - Conveyor stalled"));

        assert!(build_full_stall(&config()).message.is_none());

        let mut req = request("FullStall", "Full Stall", "");
        req.message = None;
        assert!(build(&req, &location(), &config()).message.is_none());
    }

    #[test]
    fn no_handshake_tags_when_disabled() {
        let config = NamingConfig {
            use_handshake_tags: false,
            ..config()
        };
        let out = build_full_stall(&config);
        assert!(out.record.discrete.handshake_tags.is_none());

        let xml = out.record.to_xml().unwrap();
        assert!(!xml.contains("HandshakeTags"));
        assert!(!xml.contains(".Sts_"));
    }

    #[test]
    fn handshake_flags_toggle_only_their_own_tag() {
        for mask in 0u8..32 {
            let flag = |bit: u8| mask & (1 << bit) != 0;
            let config = NamingConfig {
                handshake_inalarm: flag(0),
                handshake_disabled: flag(1),
                handshake_acked: flag(2),
                handshake_suppressed: flag(3),
                handshake_shelved: flag(4),
                ..config()
            };
            let out = build_full_stall(&config);
            let tags = out.record.discrete.handshake_tags.expect("handshake block");

            for (bit, signal) in HandshakeSignal::ALL.into_iter().enumerate() {
                let expected = if flag(bit as u8) {
                    format!("/Area::[CLX]DCV901212.Sts_FullStall{}", signal.suffix())
                } else {
                    String::new()
                };
                assert_eq!(tags.get(signal), expected, "mask {mask:05b}, {signal:?}");
            }
        }
    }
}
