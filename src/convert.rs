use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    culture::CultureTag,
    document::OutputDocument,
    error::ConvertError,
    filetime::BuildStamp,
    naming::output_file_name,
    resx::ResxDocument,
};

pub const NOTHING_TO_CONVERT: &str = "Skipping conversion of resource files to JSON, as no resource files were found. Check that your .resx files are included as embedded resources.";

/// Converts `.resx` string tables into JSON documents for client side code.
///
/// Each resource file produces `<output dir>/<name>.json` plus an identical copy at
/// `<project>/<name>.json`, where the output dir is the output path joined onto the project
/// path (an absolute output path is used as is). The output dir must already exist.
#[derive(Debug, Clone)]
pub struct ResourceConverter {
    project_path: PathBuf,
    output_path: PathBuf,
    stamp: BuildStamp,
    assembly_name: Option<String>,
    pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    source: PathBuf,
    output_file: PathBuf,
    project_copy: PathBuf,
}

impl GeneratedFile {
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    pub fn project_copy(&self) -> &Path {
        &self.project_copy
    }

    pub fn file_name(&self) -> String {
        self.output_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The result of a run that did not hit a fatal error.
///
/// `success` is false only when there was nothing to convert, which callers should not treat
/// as a build failure.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub success: bool,
    pub log: Vec<String>,
    pub generated: Vec<GeneratedFile>,
}

impl RunOutcome {
    fn message(&mut self, message: String) {
        info!("{message}");
        self.log.push(message);
    }
}

impl ResourceConverter {
    pub fn new<P: Into<PathBuf>, O: Into<PathBuf>>(
        project_path: P,
        output_path: O,
        stamp: BuildStamp,
    ) -> Self {
        Self {
            project_path: project_path.into(),
            output_path: output_path.into(),
            stamp,
            assembly_name: None,
            pretty: false,
        }
    }

    /// Accepted for build integration, the assembly name does not take part in file naming.
    pub fn with_assembly_name(mut self, assembly_name: Option<String>) -> Self {
        self.assembly_name = assembly_name;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn output_dir(&self) -> PathBuf {
        self.project_path.join(&self.output_path)
    }

    pub fn stamp(&self) -> BuildStamp {
        self.stamp
    }

    pub fn assembly_name(&self) -> Option<&str> {
        self.assembly_name.as_deref()
    }

    /// Converts every resource file in order. The first failure aborts the run, files
    /// already written stay on disk.
    pub fn run<P: AsRef<Path>>(&self, resource_files: &[P]) -> Result<RunOutcome, ConvertError> {
        let mut outcome = RunOutcome::default();

        if resource_files.is_empty() {
            outcome.message(NOTHING_TO_CONVERT.to_string());
            return Ok(outcome);
        }

        debug!(
            "Build marker {}, assembly {:?}, output dir {}",
            self.stamp.filetime(),
            self.assembly_name,
            self.output_dir().display()
        );

        outcome.message("Started converting Resx To JSON".to_string());

        for resource_file in resource_files {
            let resource_file = resource_file.as_ref();

            outcome.message(format!("Started converting Resx {}", resource_file.display()));

            let generated = self.convert_file(resource_file)?;

            outcome.message(format!("Generated file {}", generated.file_name()));
            outcome.generated.push(generated);
        }

        outcome.success = true;

        Ok(outcome)
    }

    /// Converts a single resource file and writes both copies of its JSON document.
    pub fn convert_file<P: AsRef<Path>>(
        &self,
        resource_file: P,
    ) -> Result<GeneratedFile, ConvertError> {
        let resource_file = resource_file.as_ref();

        let file_name = output_file_name(resource_file)
            .ok_or_else(|| ConvertError::InvalidResourcePath(resource_file.to_path_buf()))?;

        let document = self.document_for(resource_file)?;
        let json = document
            .to_json(self.pretty)
            .map_err(|source| ConvertError::Serialize {
                path: resource_file.to_path_buf(),
                source,
            })?;

        let output_file = self.output_dir().join(&file_name);
        fs::write(&output_file, json).map_err(|source| ConvertError::Io {
            path: output_file.clone(),
            source,
        })?;

        let project_copy = self.project_path.join(&file_name);
        if !is_same_file(&output_file, &project_copy) {
            fs::copy(&output_file, &project_copy).map_err(|source| ConvertError::Io {
                path: project_copy.clone(),
                source,
            })?;
        }

        Ok(GeneratedFile {
            source: resource_file.to_path_buf(),
            output_file,
            project_copy,
        })
    }

    /// Builds the document for a resource file without writing anything.
    pub fn document_for<P: AsRef<Path>>(
        &self,
        resource_file: P,
    ) -> Result<OutputDocument, ConvertError> {
        let resource_file = resource_file.as_ref();

        let culture = CultureTag::from_resource_path(resource_file);
        match &culture {
            Some(culture) => debug!(
                "{} has culture {} ({})",
                resource_file.display(),
                culture.name(),
                culture.lcid()
            ),
            None => debug!("{} has the neutral culture", resource_file.display()),
        }

        let resx =
            ResxDocument::from_path(resource_file).map_err(|source| ConvertError::Resource {
                path: resource_file.to_path_buf(),
                source,
            })?;

        Ok(OutputDocument::assemble(
            resx.into_entries(),
            culture.as_ref(),
            self.stamp,
        ))
    }
}

/// Copying a file onto itself would truncate it.
fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }

    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ntest::timeout;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::error::ResxError;

    const STAMP: BuildStamp = BuildStamp::from_filetime(133_000_000_000_000_000);

    fn resx(entries: &[(&str, &str)]) -> String {
        let data: String = entries
            .iter()
            .map(|(k, v)| {
                format!(
                    "  <data name=\"{k}\" xml:space=\"preserve\">\n    <value>{v}</value>\n  </data>\n"
                )
            })
            .collect();

        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root>\n  <resheader name=\"resmimetype\">\n    <value>text/microsoft-resx</value>\n  </resheader>\n{data}</root>\n"
        )
    }

    struct Project {
        dir: tempfile::TempDir,
    }

    impl Project {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir_all(dir.path().join("bin")).unwrap();
            Self { dir }
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn add_resx(&self, name: &str, entries: &[(&str, &str)]) -> PathBuf {
            let path = self.root().join("Resources").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, resx(entries)).unwrap();
            path
        }

        fn converter(&self) -> ResourceConverter {
            ResourceConverter::new(self.root(), "bin", STAMP)
        }

        fn read_json(&self, path: &Path) -> HashMap<String, Value> {
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
        }
    }

    #[test]
    fn neutral_resource_scenario() {
        let project = Project::new();
        let strings = project.add_resx("Strings.resx", &[("Hello", "World")]);

        let outcome = project.converter().run(&[strings]).unwrap();
        assert!(outcome.success);

        let output = project.root().join("bin").join("Strings.json");
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            r#"{"Hello":"World","lcid":0,"lang":"","r2jng":133000000000000000}"#
        );
        assert_eq!(
            fs::read(&output).unwrap(),
            fs::read(project.root().join("Strings.json")).unwrap()
        );
    }

    #[test]
    fn culture_resource_scenario() {
        let project = Project::new();
        let strings = project.add_resx("Strings.en-US.resx", &[("Hello", "World")]);

        let outcome = project.converter().run(&[strings]).unwrap();
        let generated = &outcome.generated[0];

        assert_eq!(generated.file_name(), "en-US.json");

        let json = project.read_json(generated.output_file());
        assert_eq!(json["Hello"], "World");
        assert_eq!(json["lcid"], 1033);
        assert_eq!(json["lang"], "en-US");
        assert_eq!(json.len(), 4);
    }

    #[test]
    fn empty_input_is_a_skip() {
        let project = Project::new();

        let outcome = project.converter().run::<PathBuf>(&[]).unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.log, vec![NOTHING_TO_CONVERT.to_string()]);
        assert!(outcome.generated.is_empty());
        assert_eq!(fs::read_dir(project.root().join("bin")).unwrap().count(), 0);
    }

    #[test]
    #[timeout(5000)]
    fn batch_shares_one_build_marker() {
        let project = Project::new();
        let files = vec![
            project.add_resx("App.Strings.resx", &[("Hello", "World")]),
            project.add_resx("App.Strings.de.resx", &[("Hello", "Welt")]),
            project.add_resx("App.Strings.fr-FR.resx", &[("Hello", "Monde")]),
            project.add_resx("App.Errors.xx-YY.resx", &[("Oops", "Oops")]),
        ];

        let outcome = project.converter().run(&files).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.generated.len(), files.len());
        assert_eq!(
            fs::read_dir(project.root().join("bin")).unwrap().count(),
            files.len()
        );

        let documents: Vec<HashMap<String, Value>> = outcome
            .generated
            .iter()
            .map(|g| project.read_json(g.output_file()))
            .collect();

        for (generated, document) in outcome.generated.iter().zip(&documents) {
            assert_eq!(document["r2jng"], Value::from(STAMP.filetime()));
            assert_eq!(
                fs::read(generated.output_file()).unwrap(),
                fs::read(generated.project_copy()).unwrap()
            );
        }

        let cultures: Vec<(&Value, &Value)> =
            documents.iter().map(|d| (&d["lcid"], &d["lang"])).collect();
        assert_eq!(
            cultures,
            [
                (&Value::from(0), &Value::from("")),
                (&Value::from(7), &Value::from("de")),
                (&Value::from(1036), &Value::from("fr-FR")),
                (&Value::from(0), &Value::from("")),
            ]
        );

        // Start message, then two per file
        assert_eq!(outcome.log.len(), 1 + 2 * files.len());
        assert_eq!(outcome.log[2], "Generated file Strings.json");
    }

    #[test]
    fn first_failure_aborts_the_batch() {
        let project = Project::new();
        let good = project.add_resx("App.First.resx", &[("Hello", "World")]);
        let bad = project.root().join("Resources").join("App.Broken.resx");
        fs::write(&bad, "<root><data name=\"x\"><value>unterminated</root>").unwrap();
        let never = project.add_resx("App.Never.resx", &[("Hello", "World")]);

        let err = project.converter().run(&[good, bad.clone(), never]).unwrap_err();

        assert!(matches!(
            err,
            ConvertError::Resource { ref path, source: ResxError::Xml(_) } if *path == bad
        ));
        assert!(project.root().join("bin").join("First.json").exists());
        assert!(!project.root().join("bin").join("Never.json").exists());
    }

    #[test]
    fn missing_output_dir_is_an_io_error() {
        let project = Project::new();
        let strings = project.add_resx("Strings.resx", &[("Hello", "World")]);

        let converter = ResourceConverter::new(project.root(), "does-not-exist", STAMP);

        assert!(matches!(
            converter.run(&[strings]),
            Err(ConvertError::Io { .. })
        ));
    }

    #[test]
    fn output_dir_may_be_the_project_dir() {
        let project = Project::new();
        let strings = project.add_resx("Strings.resx", &[("Hello", "World")]);

        let converter = ResourceConverter::new(project.root(), ".", STAMP);
        let generated = converter.convert_file(&strings).unwrap();

        let json = project.read_json(generated.project_copy());
        assert_eq!(json["Hello"], "World");
    }

    #[test]
    fn absolute_output_path_wins() {
        let project = Project::new();
        let elsewhere = tempfile::tempdir().unwrap();
        let strings = project.add_resx("Strings.resx", &[("Hello", "World")]);

        let converter = ResourceConverter::new(project.root(), elsewhere.path(), STAMP)
            .with_assembly_name(Some("My.App".to_string()))
            .with_pretty(true);
        let generated = converter.convert_file(&strings).unwrap();

        assert_eq!(generated.output_file(), elsewhere.path().join("Strings.json"));
        assert_eq!(generated.project_copy(), project.root().join("Strings.json"));

        let text = fs::read_to_string(generated.output_file()).unwrap();
        assert!(text.contains("\n  \"Hello\": \"World\""));
    }
}
