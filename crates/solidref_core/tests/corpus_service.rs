use solidref_core::{
    CorpusConfig, CorpusService, ExampleKind, LookupTarget, NotFoundError, PrincipleId,
};
use std::fs;

fn embedded_service() -> CorpusService {
    CorpusService::from_config(&CorpusConfig::default()).unwrap()
}

#[test]
fn service_answers_catalog_and_example_queries() {
    let service = embedded_service();

    assert_eq!(service.all().len(), 5);
    assert_eq!(service.lookup("isp").unwrap().id, PrincipleId::Isp);
    assert_eq!(service.examples_for("OCP").unwrap().len(), 2);
    assert_eq!(
        service
            .examples_of_kind("OCP", ExampleKind::Violation)
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        service.examples_for("XYZ").unwrap_err(),
        NotFoundError::principle("XYZ")
    );
}

#[test]
fn resolve_default_uses_configured_variant() {
    let service = embedded_service();
    assert_eq!(service.default_variant().as_str(), "readme");
    assert_eq!(
        service.resolve_default(1).unwrap(),
        "https://en.wikipedia.org/wiki/SOLID"
    );

    let config = CorpusConfig::from_parts(None, Some("README_v2"), None).unwrap();
    let service = CorpusService::from_config(&config).unwrap();
    assert_eq!(
        service.resolve_default(2).unwrap(),
        "https://en.wikipedia.org/wiki/SOLID"
    );
    assert_eq!(
        service.resolve_default(5).unwrap_err().target,
        LookupTarget::Citation
    );
}

#[test]
fn citations_for_collects_markers_of_a_principle() {
    let service = embedded_service();

    let citations = service.citations_for("SRP", "readme").unwrap();
    let markers: Vec<u32> = citations.iter().map(|c| c.marker).collect();
    assert_eq!(markers, vec![2]);
    assert_eq!(
        citations[0].url,
        "https://blog.cleancoder.com/uncle-bob/2014/05/08/SingleReponsibilityPrinciple.html"
    );

    // Marker 6 is not listed by the short document.
    assert!(service
        .citations_for("DIP", "readme-v2")
        .unwrap()
        .is_empty());

    assert_eq!(
        service.citations_for("SRP", "unknown").unwrap_err(),
        NotFoundError::variant("unknown")
    );
    assert_eq!(
        service.citations_for("XYZ", "readme").unwrap_err().target,
        LookupTarget::Principle
    );
}

#[test]
fn variants_are_listed_with_titles() {
    let service = embedded_service();
    let variants: Vec<&str> = service.variants().iter().map(|v| v.as_str()).collect();
    assert_eq!(variants, vec!["readme", "readme-v2"]);
    assert_eq!(service.corpus().title("readme"), Some("SOLID Principles"));
}

#[test]
fn directory_config_loads_documents_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("README.md"),
        include_str!("../corpus/README.md"),
    )
    .unwrap();
    let dir_str = dir.path().to_str().unwrap();

    let config = CorpusConfig::from_parts(Some(dir_str), None, Some(5)).unwrap();
    let service = CorpusService::from_config(&config).unwrap();
    assert_eq!(service.variants().len(), 1);
    assert_eq!(service.lookup("LSP").unwrap().id, PrincipleId::Lsp);
    assert!(service.search_text("rectangle").unwrap().len() <= 5);
}

#[test]
fn config_with_missing_directory_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let config =
        CorpusConfig::from_parts(Some(missing.to_str().unwrap()), None, None).unwrap();
    assert!(CorpusService::from_config(&config).is_err());
}
