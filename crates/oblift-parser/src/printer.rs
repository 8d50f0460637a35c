//! Source printer.
//!
//! Renders expression trees and lifted definitions back to concrete syntax.
//! Printed expressions parse back to the same shape, so the output can be
//! fed to the parser again.

use crate::ast::*;
use crate::lift::Lifted;

/// Name printed for the implicit receiver of lifted methods.
pub const RECEIVER: &str = "self";

/// The printer.
pub struct Printer {
    /// Output buffer.
    output: String,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Take the printed text.
    pub fn finish(self) -> String {
        self.output
    }

    // === Output helpers ===

    fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn emit_char(&mut self, c: char) {
        self.output.push(c);
    }

    fn emit_list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            each(self, item);
        }
    }

    // === Expressions ===

    pub fn print_expr(&mut self, expr: &Expr<'_>) {
        match expr.kind {
            ExprKind::Ident(name) => self.emit(name),
            ExprKind::Int(value) => self.output.push_str(&value.to_string()),
            ExprKind::Access { owner, field } => {
                self.print_expr(owner);
                self.emit_char('.');
                self.emit(field);
            }
            ExprKind::Call { owner, method, args } => {
                self.print_expr(owner);
                self.emit_char('.');
                self.emit(method);
                self.emit_char('(');
                self.emit_list(args, |p, arg| p.print_expr(arg));
                self.emit_char(')');
            }
            ExprKind::Object(fields) => self.print_fields(fields),
        }
    }

    fn print_fields(&mut self, fields: &[Field<'_>]) {
        self.emit_char('{');
        self.emit_list(fields, |p, field| p.print_field(field));
        self.emit_char('}');
    }

    fn print_field(&mut self, field: &Field<'_>) {
        self.emit(field.name);
        if field.is_method() {
            self.emit_char('(');
            self.emit_list(field.params, |p, param| p.emit(param));
            self.emit_char(')');
        }
        self.emit(": ");
        self.print_expr(&field.def);
    }

    // === Definitions ===

    /// `obj0 = {baz: 7}`
    pub fn print_object(&mut self, obj: &ObjDefn<'_>) {
        self.emit(obj.name);
        self.emit(" = ");
        self.print_fields(obj.fields);
    }

    /// `m0foo(self, xn) = xn.add(2, 3)`
    pub fn print_method(&mut self, method: &MethodDefn<'_>) {
        self.emit(method.name);
        self.emit_char('(');
        self.emit(RECEIVER);
        for param in method.params {
            self.emit(", ");
            self.emit(param);
        }
        self.emit(") = ");
        self.print_expr(&method.body);
    }

    /// Objects, then methods, then the residual, one per line.
    pub fn print_lifted(&mut self, lifted: &Lifted<'_>) {
        for obj in &lifted.objects {
            self.print_object(obj);
            self.emit_char('\n');
        }
        for method in &lifted.methods {
            self.print_method(method);
            self.emit_char('\n');
        }
        self.print_expr(&lifted.residual);
        self.emit_char('\n');
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a single expression.
pub fn print_expr(expr: &Expr<'_>) -> String {
    let mut printer = Printer::new();
    printer.print_expr(expr);
    printer.finish()
}

/// Print the full output of a lifting pass.
pub fn print_lifted(lifted: &Lifted<'_>) -> String {
    let mut printer = Printer::new();
    printer.print_lifted(lifted);
    printer.finish()
}
