use crate::ast::*;
use crate::span::Spanned;

use super::expr::quote_string;
use super::FormatCtx;

impl FormatCtx {
    pub(super) fn emit_stmt(&mut self, stmt: &Spanned<Stmt>) {
        self.emit_leading_comments(stmt.span.start);
        match &stmt.node {
            Stmt::Import(decl) => self.emit_import(decl),
            Stmt::Binding { kind, name, init } => {
                self.output.push_str(kind.as_str());
                self.output.push(' ');
                self.output.push_str(&name.node);
                self.output.push_str(" = ");
                self.emit_expr(&init.node);
            }
            Stmt::ExportDefault(expr) => {
                self.output.push_str("export default ");
                self.emit_expr(&expr.node);
            }
            Stmt::Expr(expr) => self.emit_expr(&expr.node),
        }
        self.output.push_str(";\n");
    }

    fn emit_import(&mut self, decl: &ImportDecl) {
        self.output.push_str("import ");
        if decl.is_side_effect_only() {
            self.output.push_str(&quote_string(&decl.source.node));
            return;
        }

        let mut clauses = Vec::new();
        if let Some(default) = &decl.default {
            clauses.push(default.node.clone());
        }
        if let Some(ns) = &decl.namespace {
            clauses.push(format!("* as {}", ns.node));
        }
        if !decl.named.is_empty() {
            let specs: Vec<String> = decl
                .named
                .iter()
                .map(|spec| match &spec.local {
                    Some(local) if local.node != spec.imported.node => {
                        format!("{} as {}", spec.imported.node, local.node)
                    }
                    _ => spec.imported.node.clone(),
                })
                .collect();
            clauses.push(format!("{{ {} }}", specs.join(", ")));
        }

        self.output.push_str(&clauses.join(", "));
        self.output.push_str(" from ");
        self.output.push_str(&quote_string(&decl.source.node));
    }
}
