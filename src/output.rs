//! `key=value` outputs for build pipelines.

use chrono::{Datelike, Timelike};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::domain::VersionRecord;

/// Destination for output lines
pub trait OutputSink {
    fn write_line(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Appends lines to a file, creating it when missing
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn append<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(FileSink { file })
    }
}

impl OutputSink for FileSink {
    fn write_line(&mut self, key: &str, value: &str) -> io::Result<()> {
        writeln!(self.file, "{}={}", key, value)
    }
}

/// Writes lines to any writer, e.g. stderr or an in-memory buffer
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write_line(&mut self, key: &str, value: &str) -> io::Result<()> {
        writeln!(self.writer, "{}={}", key, value)
    }
}

/// All output fields for an emitted version, in emission order.
pub fn output_fields(record: &VersionRecord) -> Vec<(&'static str, String)> {
    let date = record.timestamp;
    let commit_short: String = record.commit.chars().take(7).collect();

    vec![
        ("tag", record.tag.clone()),
        ("tag_prefix", record.prefix.clone()),
        ("tag_suffix", record.suffix_text()),
        ("version", record.version()),
        ("version_short", record.short_version()),
        ("version_major", record.major.to_string()),
        ("version_minor", record.minor.to_string()),
        ("version_patch", record.patch.to_string()),
        ("version_build", record.build.to_string()),
        ("commit", record.commit.clone()),
        ("commit_short", commit_short),
        ("date", date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
        ("date_year", date.year().to_string()),
        ("date_month", format!("{:02}", date.month())),
        ("date_day", format!("{:02}", date.day())),
        ("date_weekday", date.format("%A").to_string()),
        ("date_hours", format!("{:02}", date.hour())),
        ("date_minutes", format!("{:02}", date.minute())),
        ("date_seconds", format!("{:02}", date.second())),
        (
            "date_milliseconds",
            format!("{:03}", date.timestamp_subsec_millis().min(999)),
        ),
    ]
}

/// Write every output field of `record` to `sink`
pub fn write_outputs<S: OutputSink + ?Sized>(
    record: &VersionRecord,
    sink: &mut S,
) -> io::Result<()> {
    for (key, value) in output_fields(record) {
        sink.write_line(key, &value)?;
    }
    Ok(())
}
