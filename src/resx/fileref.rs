use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    error::ResxError,
    resx::{typename::KnownType, value::ResourceValue},
};

// path;type[;encoding], the path may be double quoted
static FILE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?:"(?P<quoted>[^"]*)"|(?P<plain>[^;"]*?))\s*;\s*(?P<type>[^;]+?)\s*(?:;\s*(?P<encoding>[^;]*?)\s*)?$"#,
    )
    .expect("file reference pattern is valid")
});

/// A `System.Resources.ResXFileRef` value: an entry whose content lives in a linked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    path: PathBuf,
    type_name: String,
    encoding: Option<String>,
}

impl FileRef {
    pub fn parse(text: &str) -> Option<Self> {
        let caps = FILE_REF.captures(text)?;

        let raw_path = caps
            .name("quoted")
            .or_else(|| caps.name("plain"))
            .map(|m| m.as_str())
            .filter(|p| !p.is_empty())?;

        Some(Self {
            // Visual Studio writes Windows separators
            path: PathBuf::from(raw_path.replace('\\', "/")),
            type_name: caps["type"].to_string(),
            encoding: caps
                .name("encoding")
                .map(|m| m.as_str().to_string())
                .filter(|e| !e.is_empty()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Reads the linked file. Text references become strings, everything else is passed
    /// through as raw bytes.
    pub(crate) fn resolve(&self, key: &str, base_dir: &Path) -> Result<ResourceValue, ResxError> {
        let full_path = base_dir.join(&self.path);

        let bytes = fs::read(&full_path).map_err(|source| ResxError::Io {
            path: full_path.clone(),
            source,
        })?;

        match KnownType::from_type_name(&self.type_name) {
            Some(KnownType::String) => Ok(ResourceValue::String(self.decode_text(key, &bytes)?)),
            _ => Ok(ResourceValue::Binary(bytes)),
        }
    }

    fn decode_text(&self, key: &str, bytes: &[u8]) -> Result<String, ResxError> {
        let wide = self.encoding.as_deref().is_some_and(|e| {
            e.eq_ignore_ascii_case("unicode") || e.to_ascii_lowercase().starts_with("utf-16")
        });

        match bytes {
            [0xEF, 0xBB, 0xBF, rest @ ..] => utf8(key, rest),
            [0xFF, 0xFE, rest @ ..] => utf16(key, rest, u16::from_le_bytes),
            [0xFE, 0xFF, rest @ ..] => utf16(key, rest, u16::from_be_bytes),
            rest if wide => utf16(key, rest, u16::from_le_bytes),
            _ => utf8(key, bytes),
        }
    }
}

fn utf8(key: &str, bytes: &[u8]) -> Result<String, ResxError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| ResxError::invalid_value(key, "UTF-8 text", e))
}

fn utf16(key: &str, bytes: &[u8], order: fn([u8; 2]) -> u16) -> Result<String, ResxError> {
    decode_utf16(bytes, order).ok_or_else(|| {
        ResxError::invalid_value(
            key,
            "UTF-16 text",
            format!("{} bytes are not UTF-16", bytes.len()),
        )
    })
}

/// Decodes UTF-16 code units stored in the given byte order. `None` for an odd byte count
/// or unpaired surrogates.
pub(crate) fn decode_utf16(bytes: &[u8], order: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| order([chunk[0], chunk[1]]))
        .collect();

    String::from_utf16(&units).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_references() {
        let file_ref = FileRef::parse(
            r"..\Resources\logo.png;System.Byte[], mscorlib, Version=4.0.0.0, Culture=neutral",
        )
        .unwrap();
        assert_eq!(file_ref.path(), Path::new("../Resources/logo.png"));
        assert_eq!(
            file_ref.type_name(),
            "System.Byte[], mscorlib, Version=4.0.0.0, Culture=neutral"
        );
        assert_eq!(file_ref.encoding(), None);

        let file_ref =
            FileRef::parse(r#""My Texts\hello world.txt";System.String, mscorlib;utf-8"#).unwrap();
        assert_eq!(file_ref.path(), Path::new("My Texts/hello world.txt"));
        assert_eq!(file_ref.type_name(), "System.String, mscorlib");
        assert_eq!(file_ref.encoding(), Some("utf-8"));
    }

    #[test]
    fn rejects_malformed_references() {
        assert_eq!(FileRef::parse("logo.png"), None);
        assert_eq!(FileRef::parse(";System.String"), None);
        assert_eq!(FileRef::parse(""), None);
    }

    #[test]
    fn resolves_text_and_binary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.txt"), b"\xEF\xBB\xBFHello there").unwrap();
        std::fs::write(dir.path().join("blob.bin"), [1u8, 2, 3]).unwrap();

        let text = FileRef::parse("hello.txt;System.String, mscorlib").unwrap();
        assert_eq!(
            text.resolve("greeting", dir.path()).unwrap(),
            ResourceValue::from("Hello there")
        );

        let blob = FileRef::parse("blob.bin;System.Byte[], mscorlib").unwrap();
        assert_eq!(
            blob.resolve("blob", dir.path()).unwrap(),
            ResourceValue::Binary(vec![1, 2, 3])
        );
    }

    #[test]
    fn decodes_utf16_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend("Hi".encode_utf16().flat_map(|u| u.to_le_bytes()));
        std::fs::write(dir.path().join("wide.txt"), bytes).unwrap();

        let text = FileRef::parse("wide.txt;System.String, mscorlib;utf-16").unwrap();
        assert_eq!(
            text.resolve("wide", dir.path()).unwrap(),
            ResourceValue::from("Hi")
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FileRef::parse("nope.txt;System.String").unwrap();

        assert!(matches!(
            missing.resolve("nope", dir.path()),
            Err(ResxError::Io { .. })
        ));
    }
}
