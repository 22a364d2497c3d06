//! Core data models for proto-linter
//!
//! A [`SchemaDocument`] is the already-parsed form of one `.proto` file. The
//! linter never parses schema text itself; documents arrive as JSON
//! descriptors and are decoded with serde.

use crate::error::LintError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location attached to every declaration. Only used for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub filename: String,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(filename: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// One parsed schema file with its top-level declarations in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub filename: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Every declaration kind a schema document can contain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Syntax(Syntax),
    Package(Package),
    Import(Import),
    #[serde(rename = "option")]
    ProtoOption(ProtoOption),
    Message(Message),
    Enum(Enum),
    EnumValue(EnumValue),
    Field(Field),
    Service(Service),
    Rpc(Rpc),
    Comment(Comment),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syntax {
    pub value: String,
    #[serde(default)]
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    pub filename: String,
    #[serde(default)]
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtoOption {
    pub name: String,
    #[serde(default)]
    pub constant: String,
    #[serde(default)]
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub integer: i32,
    #[serde(default)]
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub sequence: i32,
    #[serde(default)]
    pub repeated: bool,
    #[serde(default)]
    pub position: Position,
}

/// A named grouping of RPCs; children are kept in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Comment lines kept by the parser, without the comment markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub position: Position,
}

/// A remote call declaration inside a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rpc {
    pub name: String,
    pub request_type: String,
    pub returns_type: String,
    #[serde(default)]
    pub streams_request: bool,
    #[serde(default)]
    pub streams_returns: bool,
    #[serde(default)]
    pub position: Position,
}

impl Element {
    pub fn position(&self) -> &Position {
        match self {
            Element::Syntax(e) => &e.position,
            Element::Package(e) => &e.position,
            Element::Import(e) => &e.position,
            Element::ProtoOption(e) => &e.position,
            Element::Message(e) => &e.position,
            Element::Enum(e) => &e.position,
            Element::EnumValue(e) => &e.position,
            Element::Field(e) => &e.position,
            Element::Service(e) => &e.position,
            Element::Rpc(e) => &e.position,
            Element::Comment(e) => &e.position,
        }
    }

    fn position_mut(&mut self) -> &mut Position {
        match self {
            Element::Syntax(e) => &mut e.position,
            Element::Package(e) => &mut e.position,
            Element::Import(e) => &mut e.position,
            Element::ProtoOption(e) => &mut e.position,
            Element::Message(e) => &mut e.position,
            Element::Enum(e) => &mut e.position,
            Element::EnumValue(e) => &mut e.position,
            Element::Field(e) => &mut e.position,
            Element::Service(e) => &mut e.position,
            Element::Rpc(e) => &mut e.position,
            Element::Comment(e) => &mut e.position,
        }
    }

    /// The `kind` tag used in descriptors
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Syntax(_) => "syntax",
            Element::Package(_) => "package",
            Element::Import(_) => "import",
            Element::ProtoOption(_) => "option",
            Element::Message(_) => "message",
            Element::Enum(_) => "enum",
            Element::EnumValue(_) => "enum_value",
            Element::Field(_) => "field",
            Element::Service(_) => "service",
            Element::Rpc(_) => "rpc",
            Element::Comment(_) => "comment",
        }
    }

    /// Whether this element may appear directly inside `parent`
    /// (`None` is the document top level)
    fn allowed_in(&self, parent: Option<&Element>) -> bool {
        match (parent, self) {
            (_, Element::Comment(_)) => true,
            (None, Element::Rpc(_) | Element::Field(_) | Element::EnumValue(_)) => false,
            (None, _) => true,
            (Some(Element::Service(_)), Element::Rpc(_) | Element::ProtoOption(_)) => true,
            (
                Some(Element::Message(_)),
                Element::Field(_) | Element::Message(_) | Element::Enum(_) | Element::ProtoOption(_),
            ) => true,
            (Some(Element::Enum(_)), Element::EnumValue(_) | Element::ProtoOption(_)) => true,
            (Some(_), _) => false,
        }
    }

    /// Nested declarations, empty for leaf kinds
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Message(e) => &e.elements,
            Element::Enum(e) => &e.elements,
            Element::Service(e) => &e.elements,
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match self {
            Element::Message(e) => Some(&mut e.elements),
            Element::Enum(e) => Some(&mut e.elements),
            Element::Service(e) => Some(&mut e.elements),
            _ => None,
        }
    }

    fn validate(&self, parent: Option<&Element>) -> Result<(), LintError> {
        if !self.allowed_in(parent) {
            return Err(LintError::MisplacedElement {
                position: self.position().clone(),
                kind: self.kind(),
                parent: parent.map_or("document", Element::kind),
            });
        }

        let missing = |kind: &'static str, field: &'static str| -> Result<(), LintError> {
            Err(LintError::missing_field(self.position(), kind, field))
        };
        match self {
            Element::Service(s) if s.name.is_empty() => missing("service", "name"),
            Element::Message(m) if m.name.is_empty() => missing("message", "name"),
            Element::Enum(e) if e.name.is_empty() => missing("enum", "name"),
            Element::Rpc(rpc) if rpc.name.is_empty() => missing("rpc", "name"),
            Element::Rpc(rpc) if rpc.request_type.is_empty() => missing("rpc", "request_type"),
            Element::Rpc(rpc) if rpc.returns_type.is_empty() => missing("rpc", "returns_type"),
            _ => self
                .children()
                .iter()
                .try_for_each(|child| child.validate(Some(self))),
        }
    }
}

impl SchemaDocument {
    /// Decode a JSON descriptor. Positions without a filename inherit the
    /// document's filename.
    pub fn from_json(filename: &str, json: &str) -> Result<Self, LintError> {
        let mut document: SchemaDocument =
            serde_json::from_str(json).map_err(|source| LintError::InvalidDescriptor {
                filename: filename.to_string(),
                source,
            })?;
        if document.filename.is_empty() {
            document.filename = filename.to_string();
        }
        let name = document.filename.clone();
        assign_filename(&mut document.elements, &name);
        Ok(document)
    }

    /// Check that every name and type reference the rules depend on is
    /// present, and that each element sits where protobuf allows it (no RPCs
    /// outside a service, no fields outside a message).
    pub fn validate(&self) -> Result<(), LintError> {
        self.elements.iter().try_for_each(|e| e.validate(None))
    }

    /// All services declared at the top level, in source order
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.elements.iter().filter_map(|e| match e {
            Element::Service(s) => Some(s),
            _ => None,
        })
    }
}

fn assign_filename(elements: &mut [Element], filename: &str) {
    for element in elements {
        let position = element.position_mut();
        if position.filename.is_empty() {
            position.filename = filename.to_string();
        }
        if let Some(children) = element.children_mut() {
            assign_filename(children, filename);
        }
    }
}

/// A positioned diagnostic produced by one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub lint_id: String,
    pub position: Position,
    pub message: String,
}

impl Failure {
    pub fn new(lint_id: impl Into<String>, position: Position, message: impl Into<String>) -> Self {
        Self {
            lint_id: lint_id.into(),
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.position, self.message, self.lint_id)
    }
}

/// Injected failure callback, stamping every failure with the emitting rule's id.
///
/// One sink belongs to one rule invocation; it must not be shared between
/// rules running concurrently.
pub struct FailureSink<'a> {
    lint_id: &'a str,
    add: &'a mut dyn FnMut(Failure),
}

impl<'a> FailureSink<'a> {
    pub fn new(lint_id: &'a str, add: &'a mut dyn FnMut(Failure)) -> Self {
        Self { lint_id, add }
    }

    pub fn add_failure(&mut self, position: &Position, message: impl Into<String>) {
        (self.add)(Failure::new(self.lint_id, position.clone(), message));
    }
}

/// Outcome of running one rule over the whole document collection
#[derive(Debug)]
pub struct RuleOutcome {
    pub rule_id: String,
    pub failures: Vec<Failure>,
    pub error: Option<LintError>,
}

/// Result of running a set of rules
#[derive(Debug, Default)]
pub struct LintReport {
    pub outcomes: Vec<RuleOutcome>,
    pub files_scanned: usize,
}

impl LintReport {
    /// All failures, ordered by file, line, column and rule id
    pub fn failures(&self) -> Vec<&Failure> {
        let mut failures: Vec<&Failure> = self
            .outcomes
            .iter()
            .flat_map(|o| o.failures.iter())
            .collect();
        failures.sort_by(|a, b| {
            (&a.position, &a.lint_id).cmp(&(&b.position, &b.lint_id))
        });
        failures
    }

    /// Infrastructure errors keyed by the rule that hit them
    pub fn errors(&self) -> Vec<(&str, &LintError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error.as_ref().map(|e| (o.rule_id.as_str(), e)))
            .collect()
    }

    /// Drop failures for which `keep` returns false
    pub fn retain_failures(&mut self, mut keep: impl FnMut(&Failure) -> bool) {
        for outcome in &mut self.outcomes {
            outcome.failures.retain(|f| keep(f));
        }
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| !o.failures.is_empty())
    }
}
