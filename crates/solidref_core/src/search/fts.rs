//! SQLite FTS5 keyword search over the loaded corpus.
//!
//! # Responsibility
//! - Index principle text and example prose/snippets once per connection.
//! - Return typed hits tied to principle identifiers.
//!
//! # Invariants
//! - Indexing is all-or-nothing (single transaction).
//! - Result ordering is deterministic: rank, then principle order, then row id.

use crate::catalog::example_store::ExampleStore;
use crate::catalog::principle_catalog::PrincipleCatalog;
use crate::db::DbError;
use crate::model::example::{Example, ExampleKind};
use crate::model::principle::{Principle, PrincipleId};
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default number of hits returned by [`SearchQuery::new`].
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for query parsing, DB interaction and result decoding.
#[derive(Debug)]
pub enum SearchError {
    /// Query text cannot be parsed by FTS5 syntax.
    InvalidQuery {
        query: String,
        message: String,
    },
    Db(DbError),
    InvalidData(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery { query, message } => {
                write!(f, "invalid full-text query `{query}`: {message}")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidQuery { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// What an indexed entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Principle,
    Violation,
    Adherence,
}

impl HitKind {
    fn as_db(self) -> &'static str {
        match self {
            Self::Principle => "principle",
            Self::Violation => "violation",
            Self::Adherence => "adherence",
        }
    }

    fn parse_db(value: &str) -> Option<Self> {
        match value {
            "principle" => Some(Self::Principle),
            "violation" => Some(Self::Violation),
            "adherence" => Some(Self::Adherence),
            _ => None,
        }
    }
}

impl From<ExampleKind> for HitKind {
    fn from(value: ExampleKind) -> Self {
        match value {
            ExampleKind::Violation => Self::Violation,
            ExampleKind::Adherence => Self::Adherence,
        }
    }
}

/// Search options.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    /// Restrict hits to one principle.
    pub principle: Option<PrincipleId>,
    /// Maximum number of hits to return.
    pub limit: u32,
    /// Pass `text` through as a raw FTS5 expression.
    ///
    /// Off by default so punctuation in plain queries cannot cause syntax errors.
    pub raw_fts_syntax: bool,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            principle: None,
            limit: DEFAULT_SEARCH_LIMIT,
            raw_fts_syntax: false,
        }
    }
}

/// Single search hit returned by [`search_corpus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub principle: PrincipleId,
    pub kind: HitKind,
    pub title: String,
    pub snippet: String,
}

/// Writes every principle and example into the index.
///
/// Returns the number of indexed entries.
pub fn index_corpus(
    conn: &mut Connection,
    catalog: &PrincipleCatalog,
    store: &ExampleStore,
) -> SearchResult<usize> {
    let tx = conn.transaction()?;
    let mut indexed = 0usize;
    {
        let mut insert = tx.prepare(
            "INSERT INTO entries (principle, principle_order, kind, title, body)
             VALUES (?1, ?2, ?3, ?4, ?5);",
        )?;
        for principle in catalog.all() {
            let order = principle.id.ordinal() as i64;
            insert.execute(params![
                principle.id.as_str(),
                order,
                HitKind::Principle.as_db(),
                principle.name.as_str(),
                principle_body(principle),
            ])?;
            indexed += 1;

            for example in store.examples_for_id(principle.id) {
                insert.execute(params![
                    principle.id.as_str(),
                    order,
                    HitKind::from(example.kind).as_db(),
                    format!("{} {}", principle.id, example.kind.as_str()),
                    example_body(example),
                ])?;
                indexed += 1;
            }
        }
    }
    tx.commit()?;

    info!(
        "event=search_index module=search status=ok entries={}",
        indexed
    );
    Ok(indexed)
}

/// Searches indexed entries and returns ranked hits.
///
/// Returns an empty list for blank queries and `limit == 0`.
pub fn search_corpus(conn: &Connection, query: &SearchQuery) -> SearchResult<Vec<SearchHit>> {
    let Some(match_expr) = build_match_expression(query) else {
        return Ok(Vec::new());
    };

    if query.limit == 0 {
        return Ok(Vec::new());
    }

    let mut sql = String::from(
        "SELECT
            entries.principle AS principle,
            entries.kind AS kind,
            entries.title AS title,
            snippet(entries_fts, -1, '**', '**', ' ... ', 12) AS snippet
         FROM entries_fts
         JOIN entries ON entries.id = entries_fts.rowid
         WHERE entries_fts MATCH ?",
    );
    let mut bind_values: Vec<Value> = vec![Value::Text(match_expr.clone())];

    if let Some(principle) = query.principle {
        sql.push_str(" AND entries.principle = ?");
        bind_values.push(Value::Text(principle.as_str().to_string()));
    }

    sql.push_str(" ORDER BY bm25(entries_fts), entries.principle_order ASC, entries.id ASC LIMIT ?");
    bind_values.push(Value::Integer(i64::from(query.limit)));

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt
        .query(params_from_iter(bind_values))
        .map_err(|err| map_query_error(err, &match_expr))?;
    let mut hits = Vec::new();

    while let Some(row) = rows
        .next()
        .map_err(|err| map_query_error(err, &match_expr))?
    {
        hits.push(parse_search_hit(row)?);
    }

    Ok(hits)
}

fn principle_body(principle: &Principle) -> String {
    let mut body = principle.definition.clone();
    if !principle.goal.is_empty() {
        body.push('\n');
        body.push_str(&principle.goal);
    }
    for benefit in &principle.benefits {
        body.push('\n');
        body.push_str(benefit);
    }
    body
}

fn example_body(example: &Example) -> String {
    if example.explanation.is_empty() {
        return example.snippet.clone();
    }
    format!("{}\n\n{}", example.explanation, example.snippet)
}

fn parse_search_hit(row: &Row<'_>) -> SearchResult<SearchHit> {
    let principle_text: String = row.get("principle")?;
    let principle = PrincipleId::parse(&principle_text)
        .ok_or_else(|| SearchError::InvalidData(format!("invalid principle `{principle_text}`")))?;

    let kind_text: String = row.get("kind")?;
    let kind = HitKind::parse_db(&kind_text)
        .ok_or_else(|| SearchError::InvalidData(format!("invalid kind `{kind_text}`")))?;

    Ok(SearchHit {
        principle,
        kind,
        title: row.get("title")?,
        snippet: row.get("snippet")?,
    })
}

fn build_match_expression(query: &SearchQuery) -> Option<String> {
    let text = query.text.trim();
    if text.is_empty() {
        return None;
    }

    if query.raw_fts_syntax {
        return Some(text.to_string());
    }

    let terms = text
        .split_whitespace()
        .map(escape_fts_term)
        .collect::<Vec<_>>();

    if terms.is_empty() {
        return None;
    }

    Some(terms.join(" AND "))
}

fn escape_fts_term(raw: &str) -> String {
    let escaped = raw.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

fn map_query_error(err: rusqlite::Error, query: &str) -> SearchError {
    if is_match_syntax_error(&err) {
        return SearchError::InvalidQuery {
            query: query.to_string(),
            message: err.to_string(),
        };
    }

    SearchError::Db(DbError::Sqlite(err))
}

fn is_match_syntax_error(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            let msg = message.to_lowercase();
            (msg.contains("fts5") && msg.contains("syntax"))
                || msg.contains("malformed match expression")
                || msg.contains("unterminated")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{build_match_expression, escape_fts_term, SearchQuery};

    #[test]
    fn plain_terms_are_quoted_and_joined() {
        let expr = build_match_expression(&SearchQuery::new("open  closed")).unwrap();
        assert_eq!(expr, "\"open\" AND \"closed\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(escape_fts_term("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn raw_syntax_passes_through_trimmed() {
        let mut query = SearchQuery::new("  open OR closed ");
        query.raw_fts_syntax = true;
        assert_eq!(
            build_match_expression(&query).as_deref(),
            Some("open OR closed")
        );
    }

    #[test]
    fn blank_text_has_no_expression() {
        assert!(build_match_expression(&SearchQuery::new(" \t ")).is_none());
    }
}
