// SPDX-License-Identifier: GPL-3.0-or-later

//! Renders generated alarms into the human readable report file.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
};

use chrono::NaiveDateTime;
use quick_xml::errors::serialize::SeError;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, info, span, Level};

use crate::builder::{AlarmRequest, GeneratedAlarm};

/// Name the section template is registered under.
const TEMPLATE_NAME: &str = "report.txt";

/// Format of the `Generated on` line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors that may occur when writing a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Occurs when writing the report file fails.
    #[error(transparent)]
    Output(#[from] io::Error),

    /// Occurs when the template renderer encounters an error.
    #[error("failed to render template ({0})")]
    Template(#[from] tera::Error),

    /// Occurs when an alarm or message cannot be written as XML.
    #[error("failed to serialize markup ({0})")]
    Markup(#[from] SeError),
}

/// Everything shown in the report for one alarm, already rendered to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    /// Local time the alarm was generated.
    pub generated_on: String,

    /// Device the alarm belongs to.
    pub device: String,

    /// Human readable alarm name.
    pub alarm_name: String,

    /// `<Tag>` lines.
    pub polling: String,

    /// Message block markup.
    pub message: Option<String>,

    /// Alarm definition markup.
    pub record: String,
}

impl ReportSection {
    /// Serializes a generated alarm for the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the record or message cannot be written as XML.
    pub fn new(
        request: &AlarmRequest,
        alarm: &GeneratedAlarm,
        generated_on: NaiveDateTime,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            generated_on: generated_on.format(TIMESTAMP_FORMAT).to_string(),
            device: request.device.clone(),
            alarm_name: request.custom_name.clone(),
            polling: alarm.polling.to_string(),
            message: alarm.message.as_ref().map(|m| m.to_xml()).transpose()?,
            record: alarm.record.to_xml()?,
        })
    }
}

/// Returns `<device>_<YYYYMMDD_HHMM>.txt`.
pub fn report_file_name(device: &str, at: NaiveDateTime) -> String {
    format!("{device}_{}.txt", at.format("%Y%m%d_%H%M"))
}

/// Renders report sections with a Tera template.
pub struct ReportRenderer {
    /// Holds the section template.
    tera: Tera,
}

impl ReportRenderer {
    /// Prepares the section template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not parse.
    pub fn new(template: &str) -> Result<Self, ReportError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Self { tera })
    }

    /// Renders a single section.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering the template fails.
    pub fn render(&self, section: &ReportSection) -> Result<String, ReportError> {
        let context = Context::from_serialize(section)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }

    /// Renders `sections` in order to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn write(
        &self,
        sections: &[ReportSection],
        output: &mut impl Write,
    ) -> Result<(), ReportError> {
        for section in sections {
            output.write_all(self.render(section)?.as_bytes())?;
        }
        Ok(())
    }

    /// Appends `sections` to the report at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or rendering or writing fails.
    pub fn append(&self, path: &Path, sections: &[ReportSection]) -> Result<(), ReportError> {
        let _span = span!(Level::INFO, "report").entered();
        debug!(path = %path.display(), sections = sections.len(), "appending to report");

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write(sections, &mut file)?;
        file.flush()?;

        info!(path = %path.display(), "wrote report");
        Ok(())
    }
}
