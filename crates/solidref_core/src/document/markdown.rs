//! Line-oriented parser for SOLID reference documents.
//!
//! # Responsibility
//! - Recognise principle sections, labelled fields, example subsections,
//!   fenced snippets and reference lists.
//! - Reject structurally broken documents with a precise line number.
//!
//! # Invariants
//! - Headings inside fenced code blocks are never interpreted.
//! - Citation markers are unique within one document.
//! - An example always has a snippet and an owning principle.
//!
//! # Recognised layout
//! ```text
//! # Title
//! ## Single Responsibility Principle (SRP)
//! **Definition:** ...
//! **Goal:** ...
//! **Benefits:**
//! - ...
//! ### Violation
//! prose + fenced code block
//! ### Adherence
//! prose + fenced code block
//! ## References
//! [1]: https://... "optional title"
//! - [2] https://...
//! 3. Author, Title, https://...
//! ```
//!
//! Code fences open with three or more backticks or tildes and close on a
//! line of the same character at least as long.

use crate::document::SourceDocument;
use crate::model::citation::{is_valid_citation_url, Citation, DocumentVariant};
use crate::model::example::{Example, ExampleKind};
use crate::model::principle::{Principle, PrincipleId};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s+(.+?)\s*#*\s*$").expect("valid title regex"));
static H2_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+(.+?)\s*$").expect("valid h2 regex"));
static H3_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^###\s+(.+?)\s*$").expect("valid h3 regex"));
static PRINCIPLE_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+[.)]\s+)?(.+?)\s*\(\s*([A-Za-z]{3})\s*\)$")
        .expect("valid principle heading regex")
});
static REFERENCES_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(references|citations|sources)$").expect("valid references regex")
});
static VIOLATION_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(violation|violating|bad example)").expect("valid violation regex")
});
static ADHERENCE_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(adherence|adhering|good example)").expect("valid adherence regex")
});
static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*\*(definition|goal|benefits)\s*:?\s*\*\*\s*:?\s*(.*)$")
        .expect("valid field regex")
});
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.+?)\s*$").expect("valid bullet regex"));
static FENCE_OPEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(`{3,}|~{3,})\s*([\w+#.-]*)[^`]*$").expect("valid fence regex")
});
static CITATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*+]\s+)?(?:\[(\d+)\]:?|(\d+)[.)])\s+(.+?)\s*$")
        .expect("valid citation regex")
});
static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>\x22']+").expect("valid url regex"));
static ANY_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][\w+.-]*://[^\s<>\x22']*").expect("valid scheme regex"));

/// Records extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub variant: DocumentVariant,
    pub title: Option<String>,
    pub principles: Vec<Principle>,
    pub examples: Vec<Example>,
    pub citations: Vec<Citation>,
}

/// Structural problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorReason {
    DuplicatePrinciple(PrincipleId),
    MissingDefinition(PrincipleId),
    ExampleOutsidePrinciple,
    MissingSnippet,
    UnterminatedFence,
    DuplicateCitation(u32),
    InvalidCitationUrl(String),
    MissingCitationUrl(u32),
}

/// Parse failure with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub variant: DocumentVariant,
    /// 1-based line number.
    pub line: usize,
    pub reason: ParseErrorReason,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: ", self.variant, self.line)?;
        match &self.reason {
            ParseErrorReason::DuplicatePrinciple(id) => {
                write!(f, "principle {id} appears twice in one document")
            }
            ParseErrorReason::MissingDefinition(id) => {
                write!(f, "principle {id} has no **Definition:** field")
            }
            ParseErrorReason::ExampleOutsidePrinciple => {
                write!(f, "example heading outside a principle section")
            }
            ParseErrorReason::MissingSnippet => write!(f, "example has no fenced code snippet"),
            ParseErrorReason::UnterminatedFence => write!(f, "code fence is never closed"),
            ParseErrorReason::DuplicateCitation(marker) => {
                write!(f, "citation [{marker}] is listed twice")
            }
            ParseErrorReason::InvalidCitationUrl(url) => {
                write!(f, "citation url `{url}` is not an http(s) url")
            }
            ParseErrorReason::MissingCitationUrl(marker) => {
                write!(f, "citation [{marker}] has no url")
            }
        }
    }
}

impl Error for ParseError {}

/// Parses one source document.
pub fn parse_document(document: &SourceDocument) -> Result<ParsedDocument, ParseError> {
    let mut parser = Parser::new(document.variant.clone());
    for (index, line) in document.text.lines().enumerate() {
        parser.feed(index + 1, line)?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Definition,
    Goal,
}

#[derive(Debug)]
struct ExampleDraft {
    kind: ExampleKind,
    line: usize,
    paragraphs: Vec<String>,
    snippet: Option<(Option<String>, String)>,
}

#[derive(Debug)]
struct PrincipleDraft {
    id: PrincipleId,
    name: String,
    line: usize,
    definition: Option<String>,
    goal: String,
    benefits: Vec<String>,
    open_field: Option<Field>,
    in_benefits: bool,
    example: Option<ExampleDraft>,
}

#[derive(Debug)]
enum Section {
    Preamble,
    Principle(Box<PrincipleDraft>),
    References,
    Other,
}

#[derive(Debug)]
struct Fence {
    line: usize,
    marker: char,
    width: usize,
    language: Option<String>,
    lines: Vec<String>,
}

impl Fence {
    fn is_closed_by(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.len() >= self.width && trimmed.chars().all(|c| c == self.marker)
    }
}

struct Parser {
    variant: DocumentVariant,
    title: Option<String>,
    section: Section,
    fence: Option<Fence>,
    seen_principles: BTreeSet<PrincipleId>,
    seen_markers: BTreeSet<u32>,
    principles: Vec<Principle>,
    examples: Vec<Example>,
    citations: Vec<Citation>,
}

impl Parser {
    fn new(variant: DocumentVariant) -> Self {
        Self {
            variant,
            title: None,
            section: Section::Preamble,
            fence: None,
            seen_principles: BTreeSet::new(),
            seen_markers: BTreeSet::new(),
            principles: Vec::new(),
            examples: Vec::new(),
            citations: Vec::new(),
        }
    }

    fn error(&self, line: usize, reason: ParseErrorReason) -> ParseError {
        ParseError {
            variant: self.variant.clone(),
            line,
            reason,
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        if self.fence.is_some() {
            if self.fence.as_ref().is_some_and(|fence| fence.is_closed_by(line)) {
                if let Some(fence) = self.fence.take() {
                    self.close_fence(fence);
                }
            } else if let Some(fence) = self.fence.as_mut() {
                fence.lines.push(line.to_string());
            }
            return Ok(());
        }

        if let Some(captures) = FENCE_OPEN_RE.captures(line) {
            let opener = &captures[1];
            let language = Some(captures[2].to_string()).filter(|lang| !lang.is_empty());
            self.fence = Some(Fence {
                line: line_no,
                marker: opener.chars().next().unwrap_or('`'),
                width: opener.len(),
                language,
                lines: Vec::new(),
            });
            return Ok(());
        }

        if let Some(captures) = TITLE_RE.captures(line) {
            if self.title.is_none() {
                self.title = Some(captures[1].to_string());
            }
            return Ok(());
        }

        if let Some(captures) = H2_RE.captures(line) {
            let heading = captures[1].to_string();
            return self.start_section(line_no, &heading);
        }

        if let Some(captures) = H3_RE.captures(line) {
            let heading = captures[1].to_string();
            return self.start_subsection(line_no, &heading);
        }

        if let Section::Principle(draft) = &mut self.section {
            feed_principle_line(draft, line);
            return Ok(());
        }
        if matches!(self.section, Section::References) {
            return self.feed_reference_line(line_no, line);
        }
        Ok(())
    }

    fn close_fence(&mut self, fence: Fence) {
        if let Section::Principle(draft) = &mut self.section {
            if let Some(example) = draft.example.as_mut() {
                // Only the first block is the snippet; later blocks are ignored.
                if example.snippet.is_none() {
                    example.snippet = Some((fence.language, fence.lines.join("\n")));
                }
            }
        }
    }

    fn start_section(&mut self, line_no: usize, heading: &str) -> Result<(), ParseError> {
        self.finish_section()?;

        if REFERENCES_HEADING_RE.is_match(heading) {
            self.section = Section::References;
            return Ok(());
        }

        let principle = PRINCIPLE_HEADING_RE.captures(heading).and_then(|captures| {
            PrincipleId::parse(&captures[2]).map(|id| (id, captures[1].trim().to_string()))
        });
        let Some((id, name)) = principle else {
            self.section = Section::Other;
            return Ok(());
        };

        if !self.seen_principles.insert(id) {
            return Err(self.error(line_no, ParseErrorReason::DuplicatePrinciple(id)));
        }
        self.section = Section::Principle(Box::new(PrincipleDraft {
            id,
            name,
            line: line_no,
            definition: None,
            goal: String::new(),
            benefits: Vec::new(),
            open_field: None,
            in_benefits: false,
            example: None,
        }));
        Ok(())
    }

    fn start_subsection(&mut self, line_no: usize, heading: &str) -> Result<(), ParseError> {
        let kind = if VIOLATION_HEADING_RE.is_match(heading) {
            Some(ExampleKind::Violation)
        } else if ADHERENCE_HEADING_RE.is_match(heading) {
            Some(ExampleKind::Adherence)
        } else {
            None
        };

        if !matches!(self.section, Section::Principle(_)) {
            if kind.is_some() {
                return Err(self.error(line_no, ParseErrorReason::ExampleOutsidePrinciple));
            }
            return Ok(());
        }

        self.finish_example()?;
        if let Section::Principle(draft) = &mut self.section {
            draft.open_field = None;
            draft.in_benefits = false;
            draft.example = kind.map(|kind| ExampleDraft {
                kind,
                line: line_no,
                paragraphs: Vec::new(),
                snippet: None,
            });
        }
        Ok(())
    }

    fn feed_reference_line(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        let Some(captures) = CITATION_RE.captures(line) else {
            if !line.trim().is_empty() {
                debug!(
                    "event=document_parse module=document status=skip variant={} line={} reason=not_a_citation",
                    self.variant, line_no
                );
            }
            return Ok(());
        };
        let marker_text = captures
            .get(1)
            .or_else(|| captures.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        // Oversized numbers are not citation markers.
        let Ok(marker) = marker_text.parse::<u32>() else {
            return Ok(());
        };
        let url = match extract_citation_url(&captures[3]) {
            CitationUrl::Http(url) => url,
            CitationUrl::Other(url) => {
                return Err(self.error(line_no, ParseErrorReason::InvalidCitationUrl(url)));
            }
            CitationUrl::Missing => {
                return Err(self.error(line_no, ParseErrorReason::MissingCitationUrl(marker)));
            }
        };

        if !is_valid_citation_url(&url) {
            return Err(self.error(line_no, ParseErrorReason::InvalidCitationUrl(url)));
        }
        if !self.seen_markers.insert(marker) {
            return Err(self.error(line_no, ParseErrorReason::DuplicateCitation(marker)));
        }
        self.citations.push(Citation {
            marker,
            url,
            variant: self.variant.clone(),
        });
        Ok(())
    }

    fn finish_example(&mut self) -> Result<(), ParseError> {
        let Section::Principle(draft) = &mut self.section else {
            return Ok(());
        };
        let Some(example) = draft.example.take() else {
            return Ok(());
        };
        let principle = draft.id;
        let Some((language, snippet)) = example.snippet else {
            return Err(self.error(example.line, ParseErrorReason::MissingSnippet));
        };
        self.examples.push(Example {
            principle,
            kind: example.kind,
            language,
            snippet,
            explanation: example
                .paragraphs
                .into_iter()
                .filter(|paragraph| !paragraph.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n"),
        });
        Ok(())
    }

    fn finish_section(&mut self) -> Result<(), ParseError> {
        self.finish_example()?;
        let section = std::mem::replace(&mut self.section, Section::Other);
        let Section::Principle(draft) = section else {
            return Ok(());
        };
        let draft = *draft;
        let Some(definition) = draft.definition else {
            return Err(self.error(draft.line, ParseErrorReason::MissingDefinition(draft.id)));
        };
        self.principles.push(Principle {
            id: draft.id,
            name: draft.name,
            definition,
            goal: draft.goal,
            benefits: draft.benefits,
        });
        Ok(())
    }

    fn finish(mut self) -> Result<ParsedDocument, ParseError> {
        if let Some(fence) = self.fence.take() {
            return Err(self.error(fence.line, ParseErrorReason::UnterminatedFence));
        }
        self.finish_section()?;
        Ok(ParsedDocument {
            variant: self.variant,
            title: self.title,
            principles: self.principles,
            examples: self.examples,
            citations: self.citations,
        })
    }
}

fn feed_principle_line(draft: &mut PrincipleDraft, line: &str) {
    let trimmed = line.trim();

    if let Some(example) = draft.example.as_mut() {
        if trimmed.is_empty() {
            example.paragraphs.push(String::new());
        } else {
            append_prose(&mut example.paragraphs, trimmed);
        }
        return;
    }

    if trimmed.is_empty() {
        draft.open_field = None;
        return;
    }

    if let Some(captures) = FIELD_RE.captures(trimmed) {
        let value = captures[2].trim().to_string();
        draft.open_field = None;
        draft.in_benefits = false;
        match captures[1].to_ascii_lowercase().as_str() {
            "definition" => {
                draft.definition = Some(value);
                draft.open_field = Some(Field::Definition);
            }
            "goal" => {
                draft.goal = value;
                draft.open_field = Some(Field::Goal);
            }
            _ => {
                draft.in_benefits = true;
                if !value.is_empty() {
                    draft.benefits.push(value);
                }
            }
        }
        return;
    }

    if draft.in_benefits {
        if let Some(captures) = BULLET_RE.captures(line) {
            draft.benefits.push(captures[1].to_string());
            return;
        }
        draft.in_benefits = false;
    }

    match draft.open_field {
        Some(Field::Definition) => {
            if let Some(definition) = draft.definition.as_mut() {
                join_with_space(definition, trimmed);
            }
        }
        Some(Field::Goal) => join_with_space(&mut draft.goal, trimmed),
        None => {}
    }
}

enum CitationUrl {
    Http(String),
    Other(String),
    Missing,
}

/// Finds the URL in a reference entry: `<url> "title"`, `Author, url`, ...
fn extract_citation_url(entry: &str) -> CitationUrl {
    if let Some(found) = HTTP_URL_RE.find(entry) {
        return CitationUrl::Http(trim_url_punctuation(found.as_str()).to_string());
    }
    match ANY_URL_RE.find(entry) {
        Some(found) => CitationUrl::Other(trim_url_punctuation(found.as_str()).to_string()),
        None => CitationUrl::Missing,
    }
}

/// Drops sentence punctuation glued to the end of a URL.
///
/// A closing parenthesis is kept when it balances one inside the URL.
fn trim_url_punctuation(url: &str) -> &str {
    let mut trimmed = url;
    loop {
        let next = trimmed.trim_end_matches(['.', ',', ';', ':', '!', '?']);
        let next = match next.strip_suffix(')') {
            Some(stripped) if next.matches('(').count() < next.matches(')').count() => stripped,
            _ => next,
        };
        if next.len() == trimmed.len() {
            return trimmed;
        }
        trimmed = next;
    }
}

/// Appends a line to the current paragraph, starting one when needed.
fn append_prose(paragraphs: &mut Vec<String>, line: &str) {
    match paragraphs.last_mut() {
        Some(last) if !last.is_empty() => join_with_space(last, line),
        Some(last) => last.push_str(line),
        None => paragraphs.push(line.to_string()),
    }
}

fn join_with_space(target: &mut String, text: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}
