//! Arena-allocated expression trees and lifted definitions.
//!
//! Nodes are `Copy` and hold their children by arena reference, so the
//! parser can move finished expressions around its operand stack freely.
//! Names are views into the source text or into arena-allocated strings.

use crate::span::Span;

// =============================================================================
// Expressions
// =============================================================================

/// An expression node.
#[derive(Debug, Clone, Copy)]
pub struct Expr<'a> {
    pub kind: ExprKind<'a>,
    pub span: Span,
}

/// Expression kinds.
#[derive(Debug, Clone, Copy)]
pub enum ExprKind<'a> {
    Ident(&'a str),
    /// Saturated to the `i32` range at parse time.
    Int(i32),
    /// `owner.field`
    Access { owner: &'a Expr<'a>, field: &'a str },
    /// `owner.method(args...)`
    Call {
        owner: &'a Expr<'a>,
        method: &'a str,
        args: &'a [Expr<'a>],
    },
    /// `{ field, ... }` in source order.
    Object(&'a [Field<'a>]),
}

impl<'a> Expr<'a> {
    pub fn new(kind: ExprKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn ident(name: &'a str, span: Span) -> Self {
        Self::new(ExprKind::Ident(name), span)
    }

    pub fn int(value: i32, span: Span) -> Self {
        Self::new(ExprKind::Int(value), span)
    }

    /// Compare two trees ignoring spans.
    pub fn same_shape(&self, other: &Expr<'_>) -> bool {
        match (&self.kind, &other.kind) {
            (ExprKind::Ident(a), ExprKind::Ident(b)) => a == b,
            (ExprKind::Int(a), ExprKind::Int(b)) => a == b,
            (
                ExprKind::Access { owner: o1, field: f1 },
                ExprKind::Access { owner: o2, field: f2 },
            ) => f1 == f2 && o1.same_shape(o2),
            (
                ExprKind::Call { owner: o1, method: m1, args: a1 },
                ExprKind::Call { owner: o2, method: m2, args: a2 },
            ) => {
                m1 == m2
                    && o1.same_shape(o2)
                    && a1.len() == a2.len()
                    && a1.iter().zip(a2.iter()).all(|(x, y)| x.same_shape(y))
            }
            (ExprKind::Object(f1), ExprKind::Object(f2)) => {
                f1.len() == f2.len() && f1.iter().zip(f2.iter()).all(|(x, y)| x.same_shape(y))
            }
            _ => false,
        }
    }

    /// Whether an object literal occurs anywhere in this tree.
    pub fn contains_object(&self) -> bool {
        match &self.kind {
            ExprKind::Ident(_) | ExprKind::Int(_) => false,
            ExprKind::Access { owner, .. } => owner.contains_object(),
            ExprKind::Call { owner, args, .. } => {
                owner.contains_object() || args.iter().any(Expr::contains_object)
            }
            ExprKind::Object(_) => true,
        }
    }
}

// =============================================================================
// Object fields
// =============================================================================

/// Whether a field binds a plain value or a parameterized body.
///
/// Kept as an explicit tag so that `f(): e` (a method with no parameters)
/// stays distinct from `f: e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Data,
    Method,
}

/// A field of an object literal.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub name: &'a str,
    pub kind: FieldKind,
    /// Parameter names; always empty for data fields.
    pub params: &'a [&'a str],
    pub def: Expr<'a>,
    pub span: Span,
}

impl<'a> Field<'a> {
    pub fn is_method(&self) -> bool {
        self.kind == FieldKind::Method
    }

    pub fn same_shape(&self, other: &Field<'_>) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.params == other.params
            && self.def.same_shape(&other.def)
    }
}

// =============================================================================
// Lifted definitions
// =============================================================================

/// A top-level object definition produced by lifting one object literal.
#[derive(Debug, Clone, Copy)]
pub struct ObjDefn<'a> {
    /// Issue order of the literal; also its index in the output buffer.
    pub id: u32,
    pub name: &'a str,
    /// Retained data fields, source order, definitions already lifted.
    pub fields: &'a [Field<'a>],
    /// Span of the original literal.
    pub span: Span,
}

/// A top-level method definition lifted out of an object literal.
#[derive(Debug, Clone, Copy)]
pub struct MethodDefn<'a> {
    /// Id of the object literal that defined the method.
    pub object: u32,
    pub name: &'a str,
    /// The field name as written in the literal.
    pub field: &'a str,
    /// Hygiene-marked parameter names, not including the receiver.
    pub params: &'a [&'a str],
    pub body: Expr<'a>,
    pub span: Span,
}
