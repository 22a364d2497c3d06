//! Traversal of schema documents
//!
//! Rules implement only the `visit_*` handlers they care about; every other
//! node kind falls through to a no-op default.

use crate::error::LintError;
use crate::models::{
    Comment, Element, Enum, EnumValue, Field, Import, Message, Package, ProtoOption, Rpc,
    SchemaDocument, Service, Syntax,
};

pub trait Visitor {
    /// Called before the elements of each document are visited
    fn on_start(&mut self, _document: &SchemaDocument) -> Result<(), LintError> {
        Ok(())
    }

    fn visit_syntax(&mut self, _syntax: &Syntax) {}
    fn visit_package(&mut self, _package: &Package) {}
    fn visit_import(&mut self, _import: &Import) {}
    fn visit_option(&mut self, _option: &ProtoOption) {}
    fn visit_message(&mut self, _message: &Message) {}
    fn visit_enum(&mut self, _enum: &Enum) {}
    fn visit_enum_value(&mut self, _value: &EnumValue) {}
    fn visit_field(&mut self, _field: &Field) {}
    fn visit_service(&mut self, _service: &Service) {}
    fn visit_rpc(&mut self, _rpc: &Rpc) {}
    fn visit_comment(&mut self, _comment: &Comment) {}

    /// Called after the elements of each document are visited
    fn finally(&mut self) -> Result<(), LintError> {
        Ok(())
    }
}

impl Element {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Element::Syntax(e) => visitor.visit_syntax(e),
            Element::Package(e) => visitor.visit_package(e),
            Element::Import(e) => visitor.visit_import(e),
            Element::ProtoOption(e) => visitor.visit_option(e),
            Element::Message(e) => visitor.visit_message(e),
            Element::Enum(e) => visitor.visit_enum(e),
            Element::EnumValue(e) => visitor.visit_enum_value(e),
            Element::Field(e) => visitor.visit_field(e),
            Element::Service(e) => visitor.visit_service(e),
            Element::Rpc(e) => visitor.visit_rpc(e),
            Element::Comment(e) => visitor.visit_comment(e),
        }
    }
}

/// Forward the visit to every child of a service, in declaration order
pub fn walk_service<V: Visitor + ?Sized>(visitor: &mut V, service: &Service) {
    for child in &service.elements {
        child.accept(visitor);
    }
}

/// Walk the top-level declarations of every document in order.
///
/// A structurally invalid document aborts the walk before any of its
/// elements are visited.
pub fn run_visitor<V: Visitor + ?Sized>(
    visitor: &mut V,
    documents: &[SchemaDocument],
) -> Result<(), LintError> {
    for document in documents {
        document.validate()?;
        visitor.on_start(document)?;
        for element in &document.elements {
            element.accept(visitor);
        }
        visitor.finally()?;
    }
    Ok(())
}
