//! Command implementations
//!
//! Inputs are loaded into an [`InMemoryBackend`] and read back through
//! [`LinkedDataForms`], so the tool shows exactly what an edit form shows.

use anyhow::{bail, Context};
use clap::ArgMatches;
use ldm_core::{EditContext, FormConfig, FormKey, InMemoryBackend, LinkedDataForms};
use ldm_graph::{jsonld, Graph, Iri};
use ldm_property::PropertyDescriptor;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// What a command printed and whether it passed
#[derive(Debug)]
pub(crate) struct Outcome {
    pub(crate) output: String,
    pub(crate) success: bool,
}

impl Outcome {
    fn passed(output: String) -> Self {
        Self { output, success: true }
    }
}

pub(crate) async fn run(matches: &ArgMatches) -> anyhow::Result<Outcome> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => load_config(path)?,
        None => FormConfig::default(),
    };
    match matches.subcommand() {
        Some(("describe", args)) => describe(SubjectInputs::from_args(args)?, config, args.get_flag("json")).await,
        Some(("validate", args)) => validate(SubjectInputs::from_args(args)?, config).await,
        Some(("namespaces", args)) => namespaces(read_graph(path_arg(args, "vocabulary")?)?, args.get_flag("json")).await,
        _ => bail!("no command given"),
    }
}

fn load_config(path: &Path) -> anyhow::Result<FormConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn path_arg<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a PathBuf> {
    args.get_one::<PathBuf>(name)
        .with_context(|| format!("missing --{name}"))
}

fn read_graph(path: &Path) -> anyhow::Result<Graph> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let graph = jsonld::parse_str(&text).with_context(|| format!("decoding JSON-LD in {}", path.display()))?;
    debug!(path = %path.display(), statements = graph.len(), "loaded graph");
    Ok(graph)
}

/// Graphs and subject named on the command line
struct SubjectInputs {
    vocabulary: Graph,
    metadata: Graph,
    meta_vocabulary: Graph,
    context: EditContext,
    subject: Iri,
}

impl SubjectInputs {
    fn from_args(args: &ArgMatches) -> anyhow::Result<Self> {
        let meta_vocabulary = match args.get_one::<PathBuf>("meta-vocabulary") {
            Some(path) => read_graph(path)?,
            None => Graph::new(),
        };
        let context = match args.get_one::<String>("context").map(String::as_str) {
            Some("vocabulary") => EditContext::Vocabulary,
            _ => EditContext::Metadata,
        };
        let subject = args.get_one::<String>("subject").context("missing subject")?;
        Ok(Self {
            vocabulary: read_graph(path_arg(args, "vocabulary")?)?,
            metadata: read_graph(path_arg(args, "metadata")?)?,
            meta_vocabulary,
            context,
            subject: Iri::new(subject.as_str()),
        })
    }

    /// Load the subject into a form and return its visible properties
    async fn properties(self, config: FormConfig) -> anyhow::Result<(LinkedDataForms<InMemoryBackend>, FormKey)> {
        let backend = InMemoryBackend::new(self.metadata, self.vocabulary, self.meta_vocabulary);
        if !backend.graph(self.context).has_subject(&self.subject) {
            bail!("subject <{}> not found in the {} graph", self.subject, self.context);
        }
        let forms = LinkedDataForms::new(Arc::new(backend), config);
        let key = FormKey::from(&self.subject);
        forms
            .initialize_form(key.clone(), self.subject, self.context)
            .await
            .context("loading subject")?;
        Ok((forms, key))
    }
}

async fn describe(inputs: SubjectInputs, config: FormConfig, json: bool) -> anyhow::Result<Outcome> {
    let (forms, key) = inputs.properties(config).await?;
    let properties = forms.effective_properties(&key)?;
    let output = if json {
        let mut text = serde_json::to_string_pretty(&properties)?;
        text.push('\n');
        text
    } else {
        render(&properties)?
    };
    Ok(Outcome::passed(output))
}

async fn validate(inputs: SubjectInputs, config: FormConfig) -> anyhow::Result<Outcome> {
    let subject = inputs.subject.clone();
    let (forms, key) = inputs.properties(config).await?;
    let mut output = String::new();
    let mut violations = 0;
    for property in forms.effective_properties(&key)? {
        for message in forms.validate_property(&key, &property.key)? {
            writeln!(output, "{}: {message}", property.label)?;
            violations += 1;
        }
    }
    if violations == 0 {
        writeln!(output, "<{subject}> conforms")?;
    }
    Ok(Outcome {
        output,
        success: violations == 0,
    })
}

async fn namespaces(vocabulary: Graph, json: bool) -> anyhow::Result<Outcome> {
    let backend = InMemoryBackend::new(Graph::new(), vocabulary, Graph::new());
    let forms = LinkedDataForms::new(Arc::new(backend), FormConfig::default());
    let namespaces = forms.namespaces().await?;
    if json {
        let mut text = serde_json::to_string_pretty(&namespaces)?;
        text.push('\n');
        return Ok(Outcome::passed(text));
    }
    let mut output = String::new();
    for namespace in &namespaces {
        let marker = if namespace.is_default { "\tdefault" } else { "" };
        writeln!(output, "{}\t{}{marker}", namespace.prefix, namespace.iri)?;
    }
    Ok(Outcome::passed(output))
}

fn render(properties: &[PropertyDescriptor]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for property in properties {
        let max = property
            .max_values_count
            .map_or_else(|| "*".to_string(), |m| m.to_string());
        let read_only = if property.is_editable { "" } else { " (read-only)" };
        writeln!(out, "{} [{}..{max}]{read_only}", property.label, property.min_values_count)?;
        for value in &property.values {
            match (value.label(), value.id()) {
                (Some(label), Some(id)) => writeln!(out, "  {label} <{id}>")?,
                _ => writeln!(out, "  {}", value.display_text())?,
            }
        }
        for error in &property.errors {
            writeln!(out, "  ! {error}")?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command;
    use ldm_graph::vocab::rdfs;
    use ldm_test_utils::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct Files {
        dir: TempDir,
    }

    impl Files {
        fn new(metadata: &Graph) -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("vocabulary.json"), jsonld::to_json(&vocabulary()).to_string()).unwrap();
            std::fs::write(dir.path().join("metadata.json"), jsonld::to_json(metadata).to_string()).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> String {
            self.dir.path().join(name).display().to_string()
        }

        async fn run(&self, args: &[&str]) -> anyhow::Result<Outcome> {
            let vocabulary = self.path("vocabulary.json");
            let metadata = self.path("metadata.json");
            let mut argv = vec!["ldm"];
            argv.extend_from_slice(&args[..1]);
            argv.extend(["--vocabulary", vocabulary.as_str()]);
            if args[0] != "namespaces" {
                argv.extend(["--metadata", metadata.as_str()]);
            }
            argv.extend_from_slice(&args[1..]);
            run(&command().try_get_matches_from(argv)?).await
        }
    }

    #[tokio::test]
    async fn describe_lists_properties_in_order() {
        let files = Files::new(&metadata());
        let outcome = files.run(&["describe", COLLECTION_1]).await.unwrap();
        assert!(outcome.success);
        let headers: Vec<&str> = outcome.output.lines().filter(|l| !l.starts_with(' ')).collect();
        assert_eq!(headers[0], "Name [1..1]");
        assert_eq!(headers[2], "Authors [0..*]");
        assert!(outcome.output.contains("Created by [0..1] (read-only)\n  John <http://example.com/iri/user1>\n"));
        assert!(outcome.output.contains("Keyword [0..*]\n  alpha\n  beta\n"));
    }

    #[tokio::test]
    async fn describe_as_json() {
        let files = Files::new(&metadata());
        let outcome = files.run(&["describe", COLLECTION_1, "--json"]).await.unwrap();
        let properties: Vec<PropertyDescriptor> = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(properties.len(), 11);
        assert_eq!(properties[0].key, rdfs::LABEL);
    }

    #[tokio::test]
    async fn config_hides_properties() {
        let files = Files::new(&metadata());
        let config = files.path("ldm.toml");
        std::fs::write(&config, format!("hidden_properties = [\"{KEYWORD}\"]\n")).unwrap();
        let outcome = files
            .run(&["describe", COLLECTION_1, "--config", config.as_str()])
            .await
            .unwrap();
        assert!(!outcome.output.contains("Keyword"));
    }

    #[tokio::test]
    async fn validate_reports_violations() {
        let files = Files::new(&metadata());
        let outcome = files.run(&["validate", COLLECTION_1]).await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.output, format!("<{COLLECTION_1}> conforms\n"));

        let mut unnamed = metadata();
        unnamed.remove_property(&iri(COLLECTION_1), &iri(rdfs::LABEL));
        let files = Files::new(&unnamed);
        let outcome = files.run(&["validate", COLLECTION_1]).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.output, "Name: too few values: at least 1 required\n");
    }

    #[tokio::test]
    async fn unknown_subject_is_an_error() {
        let files = Files::new(&metadata());
        let error = files
            .run(&["describe", "http://example.com/iri/missing"])
            .await
            .unwrap_err();
        assert!(error.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn namespaces_as_text() {
        let files = Files::new(&metadata());
        let outcome = files.run(&["namespaces"]).await.unwrap();
        assert_eq!(
            outcome.output,
            "ex\thttp://example.com/ontology#\tdefault\nfs\thttps://fairspace.nl/ontology#\n"
        );
    }
}
