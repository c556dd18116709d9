//! Attribution of documentation comments to declarations
//!
//! [`DocVisitor`] walks a [`Program`] once, in source order. A documentation
//! comment is held in the pending slot of the [`TraversalContext`] until the
//! next node decides its fate:
//!
//! - a documentable declaration consumes it (if the comment ends before the
//!   declaration starts)
//! - any other statement discards it
//! - another documentation comment replaces it
//!
//! Modifier scopes are transparent: the comment passes through them to the
//! declaration they wrap. Their modifiers stay active for everything nested
//! inside, including class and module bodies.

use crate::ast::{
    ClassDecl, ConstructorDecl, DocComment, EnumDecl, InterfaceDecl, MethodDecl, ModifierScope,
    ModuleDecl, Node, Program, Span, VariableDecl,
};
use crate::comment_data::{
    ClassCommentData, CommentData, ConstructorCommentData, EnumCommentData, FieldCommentData,
    InterfaceCommentData, MethodCommentData, ModuleCommentData,
};
use crate::comment_parser::{is_doc_comment, CommentParser, TagIssue};
use crate::diagnostics::{
    Diagnostic, DiagnosticSeverity, DiagnosticsCollector, QuillError, QuillResult,
};
use crate::doc_tags::DocCommentTags;
use crate::modifiers::{Modifier, ModifierSet, Modifiers};
use crate::type_name::{signature_of, type_name_or_var};
use tracing::debug;

/// Lexical state of one traversal
#[derive(Debug, Clone, Default)]
pub struct TraversalContext {
    modules: Vec<String>,
    classes: Vec<String>,
    pending: Option<DocComment>,
    modifiers: ModifierSet,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push every component of a dotted module name, returning how many
    pub fn push_module(&mut self, name: &str) -> usize {
        let before = self.modules.len();
        self.modules.extend(name.split('.').map(String::from));
        self.modules.len() - before
    }

    pub fn pop_modules(&mut self, count: usize) {
        let len = self.modules.len().saturating_sub(count);
        self.modules.truncate(len);
    }

    pub fn push_class(&mut self, name: &str) {
        self.classes.push(name.to_string());
    }

    pub fn pop_class(&mut self) {
        self.classes.pop();
    }

    /// Innermost enclosing class (or interface)
    pub fn current_class(&self) -> Option<&str> {
        self.classes.last().map(String::as_str)
    }

    /// Join of module and class stacks; empty parts are omitted
    pub fn scope_fqn(&self) -> String {
        self.modules
            .iter()
            .chain(self.classes.iter())
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// FQN of a member declared in the current scope
    pub fn member_fqn(&self, name: &str) -> String {
        let scope = self.scope_fqn();
        if scope.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", scope, name)
        }
    }

    /// Hold a documentation comment, returning one that was never consumed
    pub fn set_pending(&mut self, comment: DocComment) -> Option<DocComment> {
        self.pending.replace(comment)
    }

    /// Consume the pending comment if it precedes `span`
    ///
    /// The slot is empty afterwards either way.
    pub fn take_pending_for(&mut self, span: Span) -> Option<DocComment> {
        self.pending.take().filter(|c| c.span.is_before(&span))
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn modifiers(&self) -> ModifierSet {
        self.modifiers
    }

    /// Add `modifier` to the active set, returning the previous set
    pub fn enter_modifier(&mut self, modifier: Modifier) -> ModifierSet {
        let previous = self.modifiers;
        self.modifiers = previous.with(modifier);
        previous
    }

    pub fn restore_modifiers(&mut self, previous: ModifierSet) {
        self.modifiers = previous;
    }
}

/// Walks a program and collects documented declarations in source order
#[derive(Debug, Default)]
pub struct DocVisitor {
    parser: CommentParser,
    ctx: TraversalContext,
    documented: Vec<CommentData>,
    diagnostics: DiagnosticsCollector,
}

impl DocVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visitor using a configured comment parser
    pub fn with_parser(parser: CommentParser) -> Self {
        Self {
            parser,
            ..Default::default()
        }
    }

    /// Visit every node of `program`
    ///
    /// Fails only on structural problems in the tree; irregular comment
    /// content is reported through [`DocVisitor::diagnostics`].
    pub fn visit_program(&mut self, program: &Program) -> QuillResult<()> {
        self.visit_nodes(&program.body)?;
        if let Some(comment) = self.ctx.pending.take() {
            self.report_unattributed(&comment);
        }
        Ok(())
    }

    /// Documented declarations so far, in source order
    pub fn documented(&self) -> &[CommentData] {
        &self.documented
    }

    pub fn diagnostics(&self) -> &DiagnosticsCollector {
        &self.diagnostics
    }

    pub fn context(&self) -> &TraversalContext {
        &self.ctx
    }

    /// Consume the visitor, returning its entries and diagnostics
    pub fn finish(self) -> (Vec<CommentData>, DiagnosticsCollector) {
        (self.documented, self.diagnostics)
    }

    fn visit_nodes(&mut self, nodes: &[Node]) -> QuillResult<()> {
        for node in nodes {
            self.visit_node(node)?;
        }
        Ok(())
    }

    fn visit_node(&mut self, node: &Node) -> QuillResult<()> {
        match node {
            Node::DocComment(comment) => self.visit_comment(comment),
            Node::Module(module) => self.visit_module(module)?,
            Node::Class(class) => self.visit_class(class)?,
            Node::Interface(interface) => self.visit_interface(interface)?,
            Node::Enum(decl) => self.visit_enum(decl)?,
            Node::Constructor(ctor) => self.visit_constructor(ctor)?,
            Node::Method(method) => self.visit_method(method)?,
            Node::Variable(var) => self.visit_variable(var)?,
            Node::Modifier(scope) => self.visit_modifier_scope(scope)?,
            Node::Statement(_) => self.ctx.clear_pending(),
        }
        Ok(())
    }

    fn visit_comment(&mut self, comment: &DocComment) {
        // Plain comments neither document nor intervene
        if !is_doc_comment(&comment.text) {
            return;
        }
        if let Some(previous) = self.ctx.set_pending(comment.clone()) {
            self.report_unattributed(&previous);
        }
    }

    fn visit_module(&mut self, module: &ModuleDecl) -> QuillResult<()> {
        if module.name_parts().any(str::is_empty) {
            return Err(QuillError::structural(format!(
                "module name `{}` has an empty component",
                module.name
            )));
        }

        let pushed = self.ctx.push_module(&module.name);
        let fqn = self.ctx.scope_fqn();
        if let Some((tags, modifiers)) = self.attribute(module.span, &fqn) {
            self.documented.push(CommentData::Module(ModuleCommentData {
                fqn,
                modifiers,
                tags,
            }));
        }

        let result = self.visit_body(&module.body);
        self.ctx.pop_modules(pushed);
        result
    }

    fn visit_class(&mut self, class: &ClassDecl) -> QuillResult<()> {
        require_name("class", &class.name)?;

        self.ctx.push_class(&class.name);
        let fqn = self.ctx.scope_fqn();
        if let Some((tags, modifiers)) = self.attribute(class.span, &fqn) {
            self.documented.push(CommentData::Class(ClassCommentData {
                fqn,
                modifiers,
                tags,
            }));
        }

        let result = self.visit_body(&class.body);
        self.ctx.pop_class();
        result
    }

    fn visit_interface(&mut self, interface: &InterfaceDecl) -> QuillResult<()> {
        require_name("interface", &interface.name)?;

        self.ctx.push_class(&interface.name);
        let fqn = self.ctx.scope_fqn();
        if let Some((tags, modifiers)) = self.attribute(interface.span, &fqn) {
            self.documented
                .push(CommentData::Interface(InterfaceCommentData {
                    fqn,
                    modifiers,
                    tags,
                }));
        }

        let result = self.visit_body(&interface.body);
        self.ctx.pop_class();
        result
    }

    fn visit_body(&mut self, body: &[Node]) -> QuillResult<()> {
        let result = self.visit_nodes(body);
        self.leave_scope();
        result
    }

    fn visit_modifier_scope(&mut self, scope: &ModifierScope) -> QuillResult<()> {
        let saved = self.ctx.enter_modifier(scope.modifier);
        let result = self.visit_nodes(&scope.body);
        self.ctx.restore_modifiers(saved);
        self.leave_scope();
        result
    }

    fn visit_enum(&mut self, decl: &EnumDecl) -> QuillResult<()> {
        require_name("enum", &decl.name)?;

        let fqn = self.ctx.member_fqn(&decl.name);
        if let Some((tags, modifiers)) = self.attribute(decl.span, &fqn) {
            self.documented.push(CommentData::Enum(EnumCommentData {
                fqn,
                modifiers,
                tags,
                members: decl.members.clone(),
            }));
        }
        Ok(())
    }

    fn visit_constructor(&mut self, ctor: &ConstructorDecl) -> QuillResult<()> {
        let class_name = self
            .ctx
            .current_class()
            .map(String::from)
            .ok_or_else(|| QuillError::structural("constructor declared outside of a class"))?;

        let class_fqn = self.ctx.scope_fqn();
        let fqn = self.ctx.member_fqn(&class_name);
        if let Some((tags, modifiers)) = self.attribute(ctor.span, &fqn) {
            self.documented
                .push(CommentData::Constructor(ConstructorCommentData {
                    fqn,
                    class_fqn,
                    modifiers,
                    tags,
                    signature: signature_of(&ctor.params, None),
                }));
        }
        Ok(())
    }

    fn visit_method(&mut self, method: &MethodDecl) -> QuillResult<()> {
        require_name("method", &method.name)?;

        let fqn = self.ctx.member_fqn(&method.name);
        if let Some((tags, modifiers)) = self.attribute(method.span, &fqn) {
            self.documented.push(CommentData::Method(MethodCommentData {
                fqn,
                name: method.name.clone(),
                modifiers,
                tags,
                signature: signature_of(&method.params, method.return_type.as_ref()),
            }));
        }
        Ok(())
    }

    /// Only the first declarator of a variable statement is documented
    fn visit_variable(&mut self, var: &VariableDecl) -> QuillResult<()> {
        let first = var
            .declarators
            .first()
            .ok_or_else(|| QuillError::structural("variable statement without declarators"))?;
        require_name("variable", &first.name)?;

        let fqn = self.ctx.member_fqn(&first.name);
        if let Some((tags, modifiers)) = self.attribute(var.span, &fqn) {
            self.documented.push(CommentData::Field(FieldCommentData {
                fqn,
                modifiers,
                tags,
                type_name: type_name_or_var(var.var_type.as_ref()),
            }));
        }
        Ok(())
    }

    /// Consume the pending comment for a declaration at `span`
    fn attribute(&mut self, span: Span, fqn: &str) -> Option<(DocCommentTags, Modifiers)> {
        let comment = self.ctx.take_pending_for(span)?;
        let parsed = self.parser.parse(&comment.text);
        debug!(fqn = %fqn, params = parsed.tags.params.len(), "quill.attribute");

        for issue in parsed.issues {
            self.report_issue(fqn, issue);
        }
        Some((parsed.tags, Modifiers::from(self.ctx.modifiers())))
    }

    /// A comment left pending at the end of a body documents nothing
    fn leave_scope(&mut self) {
        if let Some(comment) = self.ctx.pending.take() {
            self.report_unattributed(&comment);
        }
    }

    fn report_issue(&mut self, fqn: &str, issue: TagIssue) {
        let code = match issue {
            TagIssue::UnknownTag(_) => "unknown-tag",
            TagIssue::DroppedExample(_) => "dropped-example",
            TagIssue::UnnamedParam => "unnamed-param",
        };
        let severity = if issue.is_lossy() {
            DiagnosticSeverity::Warning
        } else {
            DiagnosticSeverity::Info
        };
        self.diagnostics.add(
            Diagnostic::new(severity, issue.to_string())
                .for_fqn(fqn)
                .with_code(code),
        );
    }

    fn report_unattributed(&mut self, comment: &DocComment) {
        self.diagnostics.add(
            Diagnostic::hint(format!(
                "documentation comment at {}..{} documents nothing",
                comment.span.start, comment.span.end
            ))
            .with_code("unattributed-comment"),
        );
    }
}

fn require_name(kind: &str, name: &str) -> QuillResult<()> {
    if name.is_empty() {
        return Err(QuillError::structural(format!("{} without a name", kind)));
    }
    Ok(())
}
