/// The expectation document: the canonical fixture this tool writes.
///
/// Sections and fields keep insertion order so fixtures are stable and
/// diffable. `TestFile` is always the first section because the export
/// engine writes `TestFile.Filename` before anything else; the serializer
/// simply emits sections in first-touch order.
use std::io::Write;

#[derive(Debug, Default)]
pub struct ExpectationDocument {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl ExpectationDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a field, creating its section on first touch. Re-writing an
    /// existing field replaces the value in place.
    pub fn set(&mut self, section: &str, field: &str, value: &str) {
        let index = match self.sections.iter().position(|(name, _)| name == section) {
            Some(index) => index,
            None => {
                self.sections.push((section.to_string(), Vec::new()));
                self.sections.len() - 1
            }
        };
        let entries = &mut self.sections[index].1;
        match entries.iter_mut().find(|(name, _)| name.as_str() == field) {
            Some((_, existing)) => *existing = value.to_string(),
            None => entries.push((field.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, section: &str, field: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)
            .and_then(|(_, entries)| entries.iter().find(|(name, _)| name == field))
            .map(|(_, value)| value.as_str())
    }

    /// Serialize to the same section/key=value grammar the raw parser
    /// accepts, one blank line after each section.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (section, entries) in &self.sections {
            out.push('[');
            out.push_str(section);
            out.push_str("]\n");
            for (field, value) in entries {
                out.push_str(field);
                out.push('=');
                out.push_str(value);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.serialize().as_bytes())
    }
}
