use std::path::Path;

pub const JSON_EXTENSION: &str = "json";

/// Derives the name of the JSON file generated for a resource file.
///
/// The leading namespace segment of the stem is dropped: `App.Strings.resx` becomes
/// `Strings.json` and `Strings.en-US.resx` becomes `en-US.json`. A stem without any dot is
/// used whole, so `Strings.resx` becomes `Strings.json`.
///
/// Returns `None` when nothing is left to name the file after.
pub fn output_file_name<P: AsRef<Path>>(resource: P) -> Option<String> {
    let stem = resource.as_ref().file_stem()?.to_str()?;

    let name = match stem.split_once('.') {
        Some((_, rest)) => rest,
        None => stem,
    };

    if name.is_empty() {
        return None;
    }

    Some(format!("{name}.{JSON_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_segment() {
        assert_eq!(
            output_file_name("Resources/App.Strings.resx").as_deref(),
            Some("Strings.json")
        );
        assert_eq!(
            output_file_name("Strings.en-US.resx").as_deref(),
            Some("en-US.json")
        );
        assert_eq!(
            output_file_name("App.Strings.en-US.resx").as_deref(),
            Some("Strings.en-US.json")
        );
    }

    #[test]
    fn keeps_stems_without_dots() {
        assert_eq!(
            output_file_name("Strings.resx").as_deref(),
            Some("Strings.json")
        );
        assert_eq!(output_file_name("Strings").as_deref(), Some("Strings.json"));
    }

    #[test]
    fn rejects_unnameable_paths() {
        assert_eq!(output_file_name(""), None);
        assert_eq!(output_file_name(".."), None);
        assert_eq!(output_file_name("Strings..resx"), None);
    }
}
