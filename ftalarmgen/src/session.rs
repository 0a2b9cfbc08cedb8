// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive alarm entry loop.
//!
//! A session asks for a device, then for any number of alarms on that device, and appends the
//! generated alarms to a report named after the device. It repeats until the operator declines to
//! start another device.

use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, info, span, Level};

use crate::{
    builder::{self, AlarmRequest, TagLocation},
    config::NamingConfig,
    prompt::Console,
    report::{report_file_name, ReportError, ReportRenderer, ReportSection},
    resources::{ResourceError, Resources},
    sanitize::sanitize_name,
};

/// Guidance shown when asking for a fixed severity.
const SEVERITY_BANDS: &str = "0-250 = Low\n251-500 = Medium\n501-750 = High\n751-1000 = Urgent\n";

/// Errors that may occur during a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Occurs when reading from or writing to the console fails.
    #[error(transparent)]
    Console(#[from] io::Error),

    /// Occurs when the resource loader encounters an error.
    #[error("failed to load resource ({0})")]
    Resource(#[from] ResourceError),

    /// Occurs when writing the report fails.
    #[error("failed to write report ({0})")]
    Report(#[from] ReportError),
}

/// Current local time.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// State shared by every alarm entered during one run.
pub struct Session {
    /// Naming conventions.
    config: NamingConfig,

    /// Area and controller path prepended to every tag.
    location: TagLocation,

    /// Report section renderer.
    renderer: ReportRenderer,

    /// Directory reports are written to.
    output_dir: PathBuf,

    /// Source of report timestamps.
    clock: fn() -> NaiveDateTime,
}

impl Session {
    /// Creates a session using the configured default area and controller path.
    pub fn new(config: NamingConfig, renderer: ReportRenderer, output_dir: PathBuf) -> Self {
        Self {
            location: TagLocation::from_config(&config),
            config,
            renderer,
            output_dir,
            clock: local_now,
        }
    }

    /// Loads the configuration and report template, then creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource cannot be loaded or the template does not parse.
    pub fn load(resources: &Resources, output_dir: PathBuf) -> Result<Self, SessionError> {
        let config = resources.config()?;
        let renderer = ReportRenderer::new(&resources.template()?)?;
        Ok(Self::new(config, renderer, output_dir))
    }

    /// Replaces the clock used to timestamp reports.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// The naming configuration in use.
    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Runs device sessions until the operator is done or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if console I/O fails or a report cannot be written.
    ///
    /// # Returns
    ///
    /// Paths of the reports written, in order.
    pub fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<Vec<PathBuf>, SessionError> {
        let _span = span!(Level::INFO, "session").entered();
        let mut written = Vec::new();

        while let Some(device) = console.ask("Enter Device Name (e.g., DCV901212): ")? {
            if let Some(path) = self.run_device(console, &device)? {
                written.push(path);
            }
            if !console.confirm("Do you want to create another alarm set?")? {
                break;
            }
        }

        console.say("Exiting the program.")?;
        Ok(written)
    }

    /// Collects alarms for `device` and appends them to its report.
    ///
    /// Returns `None` if no alarms were entered, in which case no file is written.
    fn run_device<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        device: &str,
    ) -> Result<Option<PathBuf>, SessionError> {
        let _span = span!(Level::INFO, "device", device = %device).entered();

        let mut requests = Vec::new();
        while let Some(request) = self.ask_alarm(console, device)? {
            requests.push(request);
            if !console.confirm("Do you want to add another alarm?")? {
                console.say("\n")?;
                break;
            }
        }

        if requests.is_empty() {
            info!("no alarms entered");
            return Ok(None);
        }

        let now = (self.clock)();
        let sections = requests
            .iter()
            .map(|request| {
                let alarm = builder::build(request, &self.location, &self.config);
                ReportSection::new(request, &alarm, now)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let path = self.output_dir.join(report_file_name(device, now));
        self.renderer.append(&path, &sections)?;

        let shown = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        let notice = format!("Alarm data has been written to: {}\n", shown.display());
        console.say(&notice)?;
        Ok(Some(path))
    }

    /// Asks for one alarm. Returns `None` once the operator enters an empty alarm name.
    fn ask_alarm<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        device: &str,
    ) -> Result<Option<AlarmRequest>, SessionError> {
        let prompt = "Enter Alarm as entered on PLC (e.g., FullStall): ";
        let original_alarm = match console.ask(prompt)? {
            Some(alarm) if !alarm.is_empty() => alarm,
            _ => return Ok(None),
        };

        let custom = console.ask_or_empty(&format!(
            "Enter human-readable alarm name for '{original_alarm}' (or press Enter to skip): "
        ))?;
        // A skipped name falls back to the alarm as typed, unsanitized
        let custom_name = if custom.is_empty() {
            original_alarm.clone()
        } else {
            sanitize_name(&custom)
        };

        let message = if console.confirm(&format!(
            "Do you want to generate a message for '{custom_name}'?"
        ))? {
            Some(console.ask_or_empty("Enter message for alarm: ")?)
        } else {
            None
        };

        let severity = if self.config.use_tag_severity {
            None
        } else {
            Some(console.ask_or_empty(&format!(
                "Enter severity level for alarm '{custom_name}'\n{SEVERITY_BANDS}: "
            ))?)
        };

        debug!(%original_alarm, %custom_name, "alarm entered");
        Ok(Some(AlarmRequest {
            device: device.into(),
            original_alarm,
            custom_name,
            message,
            severity,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use std::io::Cursor;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap()
    }

    fn session(dir: &tempfile::TempDir, config: NamingConfig) -> Session {
        let template = Resources::default().template().unwrap();
        let renderer = ReportRenderer::new(&template).unwrap();
        Session::new(config, renderer, dir.path().to_path_buf()).with_clock(fixed_now)
    }

    fn builtin() -> NamingConfig {
        Resources::default().config().unwrap()
    }

    /// Runs a session on `input`, returning the written paths and the console transcript.
    fn run(session: &Session, input: &str) -> (Vec<PathBuf>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let written = session.run(&mut console).unwrap();
        let (_, output) = console.into_inner();
        (written, String::from_utf8(output).unwrap())
    }

    #[test]
    fn writes_one_report_per_device() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, builtin());
        let input = "DCV901212\n\
                     FullStall\nFull Stall\nY\nConveyor stalled\nY\n\
                     Overload\n\nN\nN\n\
                     N\n";
        let (written, transcript) = run(&session, input);

        let expected = dir.path().join("DCV901212_20240305_1407.txt");
        assert_eq!(written, vec![expected]);
        assert!(transcript.contains("Alarm data has been written to: "));
        assert!(transcript.ends_with("Exiting the program.\n"));

        let report = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(report.matches("======= End of Alarm").count(), 2);
        assert!(report.contains("%Tag1*/ Full Stall - Conveyor stalled"));
        assert_eq!(report.matches("Generated Message:").count(), 1);
        assert!(report.contains("<DataItem>/Area::[CLX]DCV901212.ALM.Overload</DataItem>"));
        assert!(report.contains("name=\"DCV901212 Overload\""));
    }

    #[test]
    fn custom_name_sanitized_only_when_given() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, builtin());
        let input = "M1\n\
                     Full-Stall!\n\nN\nY\n\
                     Trip\n#Motor Trip!\nN\nN\n\
                     N\n";
        let (written, _) = run(&session, input);
        let report = fs::read_to_string(&written[0]).unwrap();

        assert!(report.contains("name=\"M1 Full-Stall!\""));
        assert!(report.contains("<DataItem>/Area::[CLX]M1.ALM.FullStall</DataItem>"));
        assert!(report.contains("name=\"M1 Motor Trip\""));
    }

    #[test]
    fn asks_for_severity_without_severity_tags() {
        let dir = tempfile::tempdir().unwrap();
        let config = NamingConfig {
            use_tag_severity: false,
            ..builtin()
        };
        let session = session(&dir, config);
        let input = "DCV901212\nFullStall\n\nN\n600\nN\nN\n";
        let (written, transcript) = run(&session, input);

        assert!(transcript.contains("Enter severity level for alarm 'FullStall'"));
        assert!(transcript.contains("751-1000 = Urgent"));
        let report = fs::read_to_string(&written[0]).unwrap();
        assert!(report.contains("<Severity>600</Severity>"));
    }

    #[test]
    fn no_severity_prompt_with_severity_tags() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, builtin());
        let (_, transcript) = run(&session, "DCV901212\nFullStall\n\nN\nN\nN\n");
        assert!(!transcript.contains("Enter severity level"));
    }

    #[test]
    fn empty_alarm_list_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, builtin());
        let (written, _) = run(&session, "DCV901212\n\nN\n");
        assert!(written.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn multiple_devices() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, builtin());
        let input = "A1\nHigh\n\nN\nN\nY\n\
                     B2\nLow\n\nN\nN\nN\n";
        let (written, _) = run(&session, input);
        assert_eq!(
            written,
            vec![
                dir.path().join("A1_20240305_1407.txt"),
                dir.path().join("B2_20240305_1407.txt"),
            ]
        );
    }

    #[test]
    fn same_device_appends_to_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, builtin());
        let input = "A1\nHigh\n\nN\nN\nY\n\
                     A1\nLow\n\nN\nN\nN\n";
        let (written, _) = run(&session, input);
        assert_eq!(written[0], written[1]);

        let report = fs::read_to_string(&written[0]).unwrap();
        assert!(report.contains("Alarm 'High'"));
        assert!(report.contains("Alarm 'Low'"));
    }

    #[test]
    fn end_of_input_ends_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, builtin());

        let (written, _) = run(&session, "");
        assert!(written.is_empty());

        // Input ends right after the message question; the alarm is still written
        let (written, _) = run(&session, "DCV901212\nFullStall\nFull Stall\n");
        assert_eq!(written.len(), 1);
        let report = fs::read_to_string(&written[0]).unwrap();
        assert!(report.contains("Alarm 'Full Stall'"));
        assert!(!report.contains("Generated Message:"));
    }

    #[test]
    fn load_uses_resources() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::load(&Resources::default(), dir.path().to_path_buf()).unwrap();
        assert_eq!(session.config(), &builtin());
    }
}
