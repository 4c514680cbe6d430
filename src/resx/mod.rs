pub mod fileref;
mod temporal;
pub mod typename;
pub mod value;

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use quick_xml::{
    Reader,
    events::{BytesStart, BytesText, Event},
};
use tracing::debug;

use crate::error::ResxError;
use fileref::decode_utf16;
use typename::KnownType;
use value::{ResourceValue, decode_mime_value};

pub const RESX_MIME_TYPE: &str = "text/microsoft-resx";

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEntry {
    key: String,
    value: ResourceValue,
}

impl ResourceEntry {
    pub fn new<K: Into<String>, V: Into<ResourceValue>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &ResourceValue {
        &self.value
    }

    pub fn into_parts(self) -> (String, ResourceValue) {
        (self.key, self.value)
    }
}

/// The string table of one `.resx` file, in document order.
#[derive(Debug, Clone, Default)]
pub struct ResxDocument {
    entries: Vec<ResourceEntry>,
}

impl ResxDocument {
    /// Reads a `.resx` file. Linked files are resolved relative to the file's directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ResxError> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|source| ResxError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let text = decode_document(&bytes)?;

        let base_dir = path.parent().unwrap_or(Path::new("")).to_path_buf();

        let document = Self::from_str_with_base(&text, &base_dir)?;

        debug!(
            "Read {} entries from {}",
            document.entries.len(),
            path.display()
        );

        Ok(document)
    }

    pub fn from_str_with_base(text: &str, base_dir: &Path) -> Result<Self, ResxError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        ResxParser::new(base_dir).parse(text)
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ResourceEntry> {
        self.entries
    }
}

#[derive(Debug, Default)]
struct DataNode {
    name: String,
    type_name: Option<String>,
    mime_type: Option<String>,
    value: Option<String>,
}

impl DataNode {
    fn resolve(self, base_dir: &Path) -> Result<ResourceEntry, ResxError> {
        let text = self.value.unwrap_or_default();

        let value = match (self.mime_type, self.type_name) {
            (Some(mime_type), _) => decode_mime_value(&self.name, &mime_type, &text)?,
            (None, None) => ResourceValue::String(text),
            (None, Some(type_name)) => match KnownType::from_type_name(&type_name) {
                Some(known) => known.convert(&self.name, &text, base_dir)?,
                None => {
                    return Err(ResxError::UnsupportedType {
                        key: self.name,
                        type_name,
                    });
                }
            },
        };

        Ok(ResourceEntry {
            key: self.name,
            value,
        })
    }
}

#[derive(Debug)]
enum OpenNode {
    Data(DataNode),
    Header { name: String, value: Option<String> },
}

impl OpenNode {
    fn set_value(&mut self, text: String) {
        match self {
            Self::Data(node) => node.value = Some(text),
            Self::Header { value, .. } => *value = Some(text),
        }
    }
}

struct ResxParser {
    base_dir: PathBuf,
    depth: usize,
    saw_root: bool,
    open: Option<OpenNode>,
    capture: Option<String>,
    keys: HashSet<String>,
    entries: Vec<ResourceEntry>,
}

impl ResxParser {
    fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            depth: 0,
            saw_root: false,
            open: None,
            capture: None,
            keys: HashSet::new(),
            entries: vec![],
        }
    }

    fn parse(mut self, text: &str) -> Result<ResxDocument, ResxError> {
        let mut reader = Reader::from_str(text);

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    self.on_open(&e, false)?;
                    self.depth += 1;
                }
                Event::Empty(e) => self.on_open(&e, true)?,
                Event::End(e) => {
                    self.depth = self.depth.saturating_sub(1);
                    self.on_close(e.name().as_ref())?;
                }
                Event::Text(t) => {
                    if let Some(capture) = self.capture.as_mut() {
                        // Line breaks are normalised before character references are expanded
                        let raw = normalise_newlines(&String::from_utf8_lossy(&t));
                        capture.push_str(&BytesText::from_escaped(raw).unescape()?);
                    }
                }
                Event::CData(c) => {
                    if let Some(capture) = self.capture.as_mut() {
                        capture.push_str(&normalise_newlines(&String::from_utf8_lossy(&c)));
                    }
                }
                Event::Eof => break,
                _ => (),
            }
        }

        if !self.saw_root {
            return Err(ResxError::NotResx(String::new()));
        }

        Ok(ResxDocument {
            entries: self.entries,
        })
    }

    fn on_open(&mut self, e: &BytesStart, empty: bool) -> Result<(), ResxError> {
        let name = e.name();

        match (self.depth, name.as_ref()) {
            (0, b"root") => self.saw_root = true,
            (0, other) => {
                return Err(ResxError::NotResx(
                    String::from_utf8_lossy(other).into_owned(),
                ));
            }
            (1, b"data") => {
                let node = DataNode {
                    name: attribute(e, b"name")?.ok_or(ResxError::MissingName)?,
                    type_name: attribute(e, b"type")?,
                    mime_type: attribute(e, b"mimetype")?,
                    value: None,
                };

                self.open = Some(OpenNode::Data(node));
                if empty {
                    self.close_node()?;
                }
            }
            (1, b"resheader") => {
                self.open = Some(OpenNode::Header {
                    name: attribute(e, b"name")?.unwrap_or_default(),
                    value: None,
                });
                if empty {
                    self.close_node()?;
                }
            }
            (2, b"value") => {
                if let Some(open) = self.open.as_mut() {
                    if empty {
                        open.set_value(String::new());
                    } else {
                        self.capture = Some(String::new());
                    }
                }
            }
            _ => (),
        }

        Ok(())
    }

    fn on_close(&mut self, name: &[u8]) -> Result<(), ResxError> {
        match (self.depth, name) {
            (2, b"value") => {
                if let (Some(open), Some(text)) = (self.open.as_mut(), self.capture.take()) {
                    open.set_value(text);
                }
            }
            (1, b"data") | (1, b"resheader") => self.close_node()?,
            _ => (),
        }

        Ok(())
    }

    fn close_node(&mut self) -> Result<(), ResxError> {
        match self.open.take() {
            Some(OpenNode::Data(node)) => {
                if !self.keys.insert(node.name.clone()) {
                    return Err(ResxError::DuplicateKey(node.name));
                }

                let entry = node.resolve(&self.base_dir)?;
                self.entries.push(entry);
            }
            Some(OpenNode::Header { name, value }) => {
                let value = value.unwrap_or_default();

                if name == "resmimetype" && value.trim() != RESX_MIME_TYPE {
                    return Err(ResxError::UnsupportedHeader { name, value });
                }
            }
            None => (),
        }

        Ok(())
    }
}

fn attribute(e: &BytesStart, key: &[u8]) -> Result<Option<String>, ResxError> {
    for attr in e.attributes() {
        let attr = attr?;

        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }

    Ok(None)
}

/// Decodes a resource file by its byte order mark, or by how its first `<` is stored when
/// there is none. Anything else is UTF-8.
fn decode_document(bytes: &[u8]) -> Result<String, ResxError> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8_document(rest),
        [0xFF, 0xFE, rest @ ..] => utf16_document(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16_document(rest, u16::from_be_bytes),
        [b'<', 0, ..] => utf16_document(bytes, u16::from_le_bytes),
        [0, b'<', ..] => utf16_document(bytes, u16::from_be_bytes),
        _ => utf8_document(bytes),
    }
}

fn utf8_document(bytes: &[u8]) -> Result<String, ResxError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| ResxError::NotUtf8)
}

fn utf16_document(bytes: &[u8], order: fn([u8; 2]) -> u16) -> Result<String, ResxError> {
    decode_utf16(bytes, order).ok_or(ResxError::NotUtf16)
}

/// XML readers hand back `\n` for every line break.
fn normalise_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
