//! Object lifting.
//!
//! Moves every object literal out of an expression tree into a flat list of
//! top-level object definitions, and every method field into a top-level
//! method definition. Each literal is replaced by a reference to its
//! definition, so the residual tree contains no object literals.
//!
//! Naming:
//! - object `k` (k-th literal in `{` order) becomes `obj<k>`
//! - method `f` of object `k` becomes `m<k>f`
//! - every user identifier and parameter gets the `x` prefix
//!
//! Synthesized names start with `o` or `m` and user names with `x`, so the
//! two can never collide.

use crate::arena::Arena;
use crate::ast::*;
use crate::span::Span;
use rustc_hash::FxHashSet;
use std::fmt;

/// Prefix added to every user identifier.
pub const HYGIENE_MARKER: char = 'x';
/// Prefix of synthesized object names.
pub const OBJECT_PREFIX: &str = "obj";
/// Prefix of synthesized method names.
pub const METHOD_PREFIX: &str = "m";

/// Output of the lifting pass.
#[derive(Debug)]
pub struct Lifted<'a> {
    /// Object definitions; `objects[k].id == k`.
    pub objects: Vec<ObjDefn<'a>>,
    pub methods: Vec<MethodDefn<'a>>,
    pub residual: Expr<'a>,
}

/// Lift all object literals out of `expr`.
pub fn lift<'a>(arena: &'a Arena, expr: &Expr<'a>) -> Lifted<'a> {
    let mut lifter = Lifter::new(arena);
    let residual = lifter.lift(expr);
    let (objects, methods) = lifter.finish();
    Lifted {
        objects,
        methods,
        residual,
    }
}

/// Lifting state: output buffers and the names issued so far.
///
/// One `Lifter` may lift several roots; ids keep counting across them.
pub struct Lifter<'a> {
    arena: &'a Arena,
    /// Append-only; an object's index is its id.
    objects: Vec<ObjDefn<'a>>,
    methods: Vec<MethodDefn<'a>>,
    /// Data fields of the literals currently being lifted.
    retained: Vec<Field<'a>>,
    /// Synthesized names handed out so far. Only filled in debug builds.
    issued: FxHashSet<&'a str>,
}

impl<'a> Lifter<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        Self {
            arena,
            objects: Vec::new(),
            methods: Vec::new(),
            retained: Vec::new(),
            issued: FxHashSet::default(),
        }
    }

    /// Lift one tree, returning its residual expression.
    pub fn lift(&mut self, expr: &Expr<'a>) -> Expr<'a> {
        let residual = self.lift_expr(expr);
        debug_assert!(!residual.contains_object());
        residual
    }

    /// Hand out the definitions collected so far, in discovery order.
    pub fn finish(self) -> (Vec<ObjDefn<'a>>, Vec<MethodDefn<'a>>) {
        debug_assert!(self.retained.is_empty());
        (self.objects, self.methods)
    }

    fn lift_expr(&mut self, expr: &Expr<'a>) -> Expr<'a> {
        let arena = self.arena;
        match expr.kind {
            ExprKind::Ident(name) => Expr::ident(self.mark(name), expr.span),
            ExprKind::Int(_) => *expr,
            ExprKind::Access { owner, field } => {
                let owner = self.lift_expr(owner);
                Expr::new(
                    ExprKind::Access {
                        owner: arena.alloc(owner),
                        field,
                    },
                    expr.span,
                )
            }
            ExprKind::Call { owner, method, args } => {
                let owner = arena.alloc(self.lift_expr(owner));
                let args = arena.alloc_slice_from_iter(args.iter().map(|arg| self.lift_expr(arg)));
                Expr::new(ExprKind::Call { owner, method, args }, expr.span)
            }
            ExprKind::Object(fields) => self.lift_object(fields, expr.span),
        }
    }

    fn lift_object(&mut self, fields: &'a [Field<'a>], span: Span) -> Expr<'a> {
        let id = self.objects.len() as u32;
        let name = self.issue(format_args!("{OBJECT_PREFIX}{id}"));
        // Claim index `id` now; literals nested in the fields come after it.
        self.objects.push(ObjDefn {
            id,
            name,
            fields: &[],
            span,
        });

        let retained_base = self.retained.len();
        for field in fields {
            match field.kind {
                FieldKind::Method => self.lift_method(id, field),
                FieldKind::Data => {
                    let def = self.lift_expr(&field.def);
                    self.retained.push(Field { def, ..*field });
                }
            }
        }

        let arena = self.arena;
        let kept = arena.alloc_slice(&self.retained[retained_base..]);
        self.retained.truncate(retained_base);
        self.objects[id as usize].fields = kept;

        Expr::ident(name, span)
    }

    fn lift_method(&mut self, object: u32, field: &Field<'a>) {
        let name = self.issue(format_args!("{METHOD_PREFIX}{object}{}", field.name));
        let arena = self.arena;
        let params = arena.alloc_slice_from_iter(field.params.iter().map(|param| self.mark(param)));

        let slot = self.methods.len();
        self.methods.push(MethodDefn {
            object,
            name,
            field: field.name,
            params,
            body: field.def,
            span: field.span,
        });
        let body = self.lift_expr(&field.def);
        self.methods[slot].body = body;
    }

    /// Apply the hygiene marker to a user name.
    fn mark(&self, name: &str) -> &'a str {
        self.arena.alloc_fmt(format_args!("{HYGIENE_MARKER}{name}"))
    }

    fn issue(&mut self, args: fmt::Arguments<'_>) -> &'a str {
        let name = self.arena.alloc_fmt(args);
        if cfg!(debug_assertions) {
            let fresh = self.issued.insert(name);
            assert!(fresh, "generated name `{name}` issued twice");
        }
        name
    }
}
