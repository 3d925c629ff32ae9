use solidref_core::db::open_index_in_memory;
use solidref_core::search::fts::{index_corpus, search_corpus};
use solidref_core::{
    Corpus, CorpusService, EmbeddedSource, HitKind, PrincipleId, SearchError, SearchQuery,
};

fn service() -> CorpusService {
    CorpusService::new(Corpus::load(&EmbeddedSource).unwrap())
}

#[test]
fn index_contains_every_principle_and_example() {
    let corpus = Corpus::load(&EmbeddedSource).unwrap();
    let mut conn = open_index_in_memory().unwrap();

    let indexed = index_corpus(&mut conn, corpus.catalog(), corpus.examples()).unwrap();
    assert_eq!(indexed, 15);

    let hits = search_corpus(&conn, &SearchQuery::new("saveToDatabase")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].principle, PrincipleId::Srp);
    assert_eq!(hits[0].kind, HitKind::Violation);
    assert_eq!(hits[0].title, "SRP violation");
    assert!(hits[0].snippet.contains("**saveToDatabase**"));
}

#[test]
fn search_finds_examples_of_one_principle() {
    let service = service();

    let hits = service.search_text("rectangle").unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|hit| hit.principle == PrincipleId::Lsp));
    let mut kinds: Vec<HitKind> = hits.iter().map(|hit| hit.kind).collect();
    kinds.sort_by_key(|kind| *kind as u8);
    assert_eq!(kinds, vec![HitKind::Violation, HitKind::Adherence]);
}

#[test]
fn search_matches_principle_names_and_definitions() {
    let service = service();

    let hits = service.search_text("Substitution").unwrap();
    assert!(hits
        .iter()
        .any(|hit| hit.principle == PrincipleId::Lsp && hit.kind == HitKind::Principle));

    let hits = service.search_text("depend abstractions").unwrap();
    assert!(hits
        .iter()
        .any(|hit| hit.principle == PrincipleId::Dip && hit.kind == HitKind::Principle));
}

#[test]
fn search_can_filter_by_principle() {
    let service = service();

    let mut query = SearchQuery::new("rectangle");
    query.principle = Some(PrincipleId::Srp);
    assert!(service.search(&query).unwrap().is_empty());

    query.principle = Some(PrincipleId::Lsp);
    assert_eq!(service.search(&query).unwrap().len(), 2);
}

#[test]
fn search_respects_limit() {
    let service = service();

    let mut query = SearchQuery::new("rectangle");
    query.limit = 1;
    assert_eq!(service.search(&query).unwrap().len(), 1);

    query.limit = 0;
    assert!(service.search(&query).unwrap().is_empty());
}

#[test]
fn blank_query_returns_no_hits() {
    let service = service();
    assert!(service.search_text("   ").unwrap().is_empty());
}

#[test]
fn plain_query_with_fts_punctuation_is_safe() {
    let service = service();
    assert!(service.search_text("\"rectangle OR (").is_ok());
    assert_eq!(service.search_text("rectangle's").unwrap().len(), 0);
}

#[test]
fn raw_fts_syntax_supports_operators() {
    let service = service();

    let mut query = SearchQuery::new("rectangle OR saveToDatabase");
    query.raw_fts_syntax = true;
    assert_eq!(service.search(&query).unwrap().len(), 3);
}

#[test]
fn raw_fts_syntax_reports_invalid_query() {
    let service = service();

    let mut query = SearchQuery::new("\"unterminated");
    query.raw_fts_syntax = true;

    let err = service.search(&query).unwrap_err();
    assert!(matches!(err, SearchError::InvalidQuery { .. }));
}
