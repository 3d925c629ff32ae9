use solidref_core::{
    BuildError, Corpus, CorpusSource, DirectorySource, DocumentVariant, EmbeddedSource,
    LoadError, PrincipleId, SourceDocument,
};
use std::fs;
use std::path::Path;

const README: &str = include_str!("../corpus/README.md");
const README_V2: &str = include_str!("../corpus/README_v2.md");

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

fn source_document(label: &str, text: &str) -> SourceDocument {
    SourceDocument {
        variant: DocumentVariant::new(label).unwrap(),
        origin: format!("test:{label}"),
        text: text.to_string(),
    }
}

#[test]
fn embedded_source_lists_both_readmes() {
    assert_eq!(
        EmbeddedSource::document_names(),
        vec!["README.md", "README_v2.md"]
    );
    let documents = EmbeddedSource.load_documents().unwrap();
    let variants: Vec<&str> = documents.iter().map(|d| d.variant.as_str()).collect();
    assert_eq!(variants, vec!["readme", "readme-v2"]);
}

#[test]
fn directory_source_matches_embedded_corpus() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "README_v2.md", README_V2);
    write(dir.path(), "README.md", README);
    write(dir.path(), "notes.txt", "not markdown");
    fs::create_dir(dir.path().join("nested.md")).unwrap();

    let from_dir = Corpus::load(&DirectorySource::new(dir.path()).unwrap()).unwrap();
    let embedded = Corpus::load(&EmbeddedSource).unwrap();
    assert_eq!(from_dir, embedded);
}

#[test]
fn first_document_owns_principles_it_defines() {
    let embedded = Corpus::load(&EmbeddedSource).unwrap();
    let srp = embedded.catalog().get(PrincipleId::Srp);
    assert!(srp.definition.starts_with("A class should have one"));
    assert_eq!(embedded.title("readme"), Some("SOLID Principles"));
    assert_eq!(embedded.title("README_v2"), Some("SOLID in Five Minutes"));
    assert_eq!(embedded.title("missing"), None);

    // `A_short.md` sorts before `README.md`: its SRP and DIP win and
    // README's examples for those two are dropped.
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A_short.md", README_V2);
    write(dir.path(), "README.md", README);
    let corpus = Corpus::load(&DirectorySource::new(dir.path()).unwrap()).unwrap();

    let srp = corpus.catalog().get(PrincipleId::Srp);
    assert!(srp.definition.starts_with("Every module should be responsible"));
    assert!(corpus.examples().examples_for("SRP").unwrap().is_empty());
    assert!(corpus.examples().examples_for("DIP").unwrap().is_empty());
    assert_eq!(corpus.examples().examples_for("OCP").unwrap().len(), 2);

    // Citations still come from every document.
    assert!(corpus.citations().resolve(3, "a-short").is_ok());
    assert!(corpus.citations().resolve(6, "readme").is_ok());
}

#[test]
fn duplicate_variant_is_rejected() {
    let err = Corpus::from_documents(vec![
        source_document("README", README),
        source_document("readme", README_V2),
    ])
    .unwrap_err();
    match err {
        LoadError::DuplicateVariant(variant) => assert_eq!(variant.as_str(), "readme"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn corpus_missing_a_principle_is_rejected() {
    let err = Corpus::from_documents(vec![source_document("short", README_V2)]).unwrap_err();
    match err {
        LoadError::Build(BuildError::MissingPrinciple(id)) => assert_eq!(id, PrincipleId::Ocp),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parse_errors_surface_with_variant_and_line() {
    let broken = "## Single Responsibility Principle (SRP)\n### Violation\n";
    let err = Corpus::from_documents(vec![source_document("broken", broken)]).unwrap_err();
    match &err {
        LoadError::Parse(parse) => {
            assert_eq!(parse.variant.as_str(), "broken");
            assert_eq!(parse.line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("broken:2: "));
}

#[test]
fn directory_source_requires_absolute_path_with_documents() {
    assert!(matches!(
        DirectorySource::new("relative/corpus"),
        Err(LoadError::InvalidPath(_))
    ));
    assert!(matches!(DirectorySource::new(""), Err(LoadError::InvalidPath(_))));

    let empty = tempfile::tempdir().unwrap();
    write(empty.path(), "readme.txt", "plain text");
    let source = DirectorySource::new(empty.path()).unwrap();
    assert!(matches!(
        source.load_documents(),
        Err(LoadError::NoDocuments(_))
    ));

    let gone = empty.path().join("does-not-exist");
    let source = DirectorySource::new(&gone).unwrap();
    assert!(matches!(source.load_documents(), Err(LoadError::Io { .. })));
}
