use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::DocumentFormat;

/// Destination for serialized submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }
}

/// Controls how a submission is serialized and where it goes.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }

    pub fn add_destination(mut self, destination: OutputDestination) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Same options restricted to file destinations, for writes while the terminal is owned
    /// by the UI.
    pub fn files_only(&self) -> Self {
        Self {
            format: self.format,
            pretty: self.pretty,
            destinations: self
                .destinations
                .iter()
                .filter(|destination| matches!(destination, OutputDestination::File(_)))
                .cloned()
                .collect(),
        }
    }

    pub fn writes_stdout(&self) -> bool {
        self.destinations.contains(&OutputDestination::Stdout)
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// Serialize and write `value` according to the configured format and destinations.
pub fn emit<T: Serialize + ?Sized>(value: &T, options: &OutputOptions) -> Result<()> {
    if options.destinations.is_empty() {
        return Ok(());
    }
    let payload = serialize_value(value, options)?;
    for destination in &options.destinations {
        write_payload(destination, &payload).with_context(|| match destination {
            OutputDestination::Stdout => "failed to write to stdout".to_string(),
            OutputDestination::File(path) => {
                format!("failed to write to file {}", path.display())
            }
        })?;
    }
    Ok(())
}

pub fn serialize_value<T: Serialize + ?Sized>(value: &T, options: &OutputOptions) -> Result<String> {
    match options.format {
        DocumentFormat::Json => {
            if options.pretty {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            } else {
                serde_json::to_string(value).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if options.pretty {
                toml::to_string_pretty(value).context("failed to serialize TOML")
            } else {
                toml::to_string(value).context("failed to serialize TOML")
            }
        }
    }
}

fn write_payload(destination: &OutputDestination, payload: &str) -> Result<()> {
    match destination {
        OutputDestination::Stdout => {
            let mut stdout = io::stdout();
            stdout
                .write_all(payload.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .context("failed to flush stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
        OutputDestination::File(path) => {
            let mut file = File::create(path)?;
            file.write_all(payload.as_bytes())?;
            file.write_all(b"\n")?;
            file.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::fs;

    fn payload() -> IndexMap<String, String> {
        IndexMap::from([
            ("email".to_string(), "a@b.com".to_string()),
            ("password".to_string(), "hunter22".to_string()),
        ])
    }

    #[test]
    fn writes_nothing_when_not_configured() {
        let options = OutputOptions::new(DocumentFormat::Json).with_destinations(Vec::new());
        emit(&payload(), &options).unwrap();
    }

    #[test]
    fn writes_to_file_destination_in_field_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submission.json");
        let options = OutputOptions::new(DocumentFormat::Json)
            .with_pretty(false)
            .with_destinations(vec![OutputDestination::file(&path)]);
        emit(&payload(), &options).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim_end(),
            r#"{"email":"a@b.com","password":"hunter22"}"#
        );
    }

    #[test]
    fn files_only_drops_stdout() {
        let options = OutputOptions::default().add_destination(OutputDestination::file("a.json"));
        assert!(options.writes_stdout());
        let files = options.files_only();
        assert!(!files.writes_stdout());
        assert_eq!(files.destinations, vec![OutputDestination::file("a.json")]);
    }

    #[test]
    fn reports_unwritable_destinations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let options = OutputOptions::default().with_destinations(vec![OutputDestination::file(&path)]);
        let err = emit(&payload(), &options).unwrap_err();
        assert!(err.to_string().contains("failed to write to file"));
    }
}
