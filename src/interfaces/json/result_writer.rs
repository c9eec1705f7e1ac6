use crate::domain::conversion::ConversionResult;
use crate::error::{ConverterError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;

const INDENT: &[u8] = b"    ";

/// Writes conversion results as indented JSON.
///
/// Keys keep the order the result was built in: the base currency first,
/// then each requested currency.
pub struct ResultWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Serializes `result` followed by a trailing newline.
    pub fn write_result(&mut self, result: &ConversionResult) -> Result<()> {
        self.write_json(result)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_json(&mut self, result: &ConversionResult) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = Serializer::with_formatter(&mut self.writer, formatter);
        result.serialize(&mut serializer)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Renders `result` as the text offered for clipboard export.
pub fn render(result: &ConversionResult) -> Result<String> {
    let mut writer = ResultWriter::new(Vec::new());
    writer.write_json(result)?;
    String::from_utf8(writer.into_inner()).map_err(|e| ConverterError::Unexpected(e.to_string()))
}
