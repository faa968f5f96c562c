use fxhash::FxHashSet;
use journey_core::{journey_atom, CompatibilityTables, JourneyAtom};
use smallvec::SmallVec;
use swc_core::{
    common::{Spanned, DUMMY_SP},
    ecma::ast::{
        AssignPat, AssignPatProp, CallExpr, Decl, ExportDecl, Expr, Ident, IdentName, ImportDecl,
        ImportNamedSpecifier, ImportSpecifier, KeyValuePatProp, Lit, Module, ModuleDecl,
        ModuleExportName, ModuleItem, ObjectPatProp, Pat, PropName, Stmt, VarDeclarator,
    },
};

use crate::{
    atoms::{REQUIRE, STEP},
    utils::{ident, is_call_to, str_lit},
    TransformContext,
};

/// Symbol added to a rewritten import, as `(local, imported)`
type InjectedBinding = (JourneyAtom, JourneyAtom);

/// Rewrites `import { test, expect } from '@playwright/test'`
/// to `import { journey as test, expect, step } from '@elastic/synthetics'`.
///
/// Imports of other modules are left alone.
/// A namespace import cannot take named specifiers,
/// its symbols are injected later by [`inject_deferred_import`].
pub fn rewrite_import_decl(import_decl: &mut ImportDecl, ctx: &mut TransformContext) {
    let tables = ctx.tables();
    if &*import_decl.src.value != tables.source_package {
        return;
    }

    for specifier in import_decl.specifiers.iter_mut() {
        let ImportSpecifier::Named(named_spec) = specifier else {
            continue;
        };

        // `imported_word` is the exported symbol, `local` is the binding:
        // `import { foo as bar }` -> `imported_word` is `foo`, `local` is `bar`
        let (imported_word, span) = match named_spec.imported {
            Some(ModuleExportName::Ident(ref imported)) => (&imported.sym, imported.span),
            Some(ModuleExportName::Str(ref imported)) => (&imported.value, imported.span),
            None => (&named_spec.local.sym, named_spec.local.span),
        };

        let translated = tables.translate(imported_word);
        if translated != &**imported_word {
            named_spec.imported = Some(ModuleExportName::Ident(ident(translated, span)));
        }
    }

    import_decl.src = Box::new(str_lit(tables.target_package, import_decl.src.span));

    // Type-only imports cannot carry the runtime symbols
    if import_decl.type_only {
        return;
    }

    let has_namespace = import_decl
        .specifiers
        .iter()
        .any(|specifier| matches!(specifier, ImportSpecifier::Namespace(_)));
    if has_namespace {
        ctx.deferred_import.get_or_insert(import_decl.span);
        return;
    }

    for (local, imported) in take_unbound_bindings(ctx) {
        import_decl.specifiers.push(named_specifier(local, imported));
    }
}

/// Adds `import { step } from '@elastic/synthetics'` after a namespace import of the testing package,
/// unless another import already received the symbols
pub fn inject_deferred_import(body: &mut Vec<ModuleItem>, ctx: &mut TransformContext) {
    let Some(anchor) = ctx.deferred_import.take() else {
        return;
    };

    let specifiers: Vec<ImportSpecifier> = take_unbound_bindings(ctx)
        .into_iter()
        .map(|(local, imported)| named_specifier(local, imported))
        .collect();
    if specifiers.is_empty() {
        return;
    }

    let position = body
        .iter()
        .position(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import_decl)) => import_decl.span == anchor,
            _ => false,
        })
        .map_or(0, |idx| idx + 1);

    let import_decl = ImportDecl {
        span: DUMMY_SP,
        specifiers,
        src: Box::new(str_lit(ctx.tables().target_package, DUMMY_SP)),
        type_only: false,
        with: None,
        phase: Default::default(),
    };
    body.insert(position, ModuleItem::ModuleDecl(ModuleDecl::Import(import_decl)));
}

/// Names bound by the top-level imports and declarations of a module
pub fn collect_top_level_bindings(module: &Module) -> FxHashSet<JourneyAtom> {
    let mut bindings = FxHashSet::default();

    for item in module.body.iter() {
        match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import_decl)) => {
                for specifier in import_decl.specifiers.iter() {
                    bindings.insert(specifier_local(specifier).sym.to_owned());
                }
            }

            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl { decl, .. }))
            | ModuleItem::Stmt(Stmt::Decl(decl)) => decl_bindings(decl, &mut bindings),

            _ => {}
        }
    }

    bindings
}

fn decl_bindings(decl: &Decl, out: &mut FxHashSet<JourneyAtom>) {
    match decl {
        Decl::Var(var_decl) => {
            for declarator in var_decl.decls.iter() {
                pat_bindings(&declarator.name, out);
            }
        }
        Decl::Fn(fn_decl) => {
            out.insert(fn_decl.ident.sym.to_owned());
        }
        Decl::Class(class_decl) => {
            out.insert(class_decl.ident.sym.to_owned());
        }
        _ => {}
    }
}

fn pat_bindings(pat: &Pat, out: &mut FxHashSet<JourneyAtom>) {
    match pat {
        Pat::Ident(binding) => {
            out.insert(binding.id.sym.to_owned());
        }
        Pat::Array(array_pat) => {
            for elem in array_pat.elems.iter().flatten() {
                pat_bindings(elem, out);
            }
        }
        Pat::Object(object_pat) => {
            for prop in object_pat.props.iter() {
                match prop {
                    ObjectPatProp::KeyValue(key_value) => pat_bindings(&key_value.value, out),
                    ObjectPatProp::Assign(assign_prop) => {
                        out.insert(assign_prop.key.sym.to_owned());
                    }
                    ObjectPatProp::Rest(rest_pat) => pat_bindings(&rest_pat.arg, out),
                }
            }
        }
        Pat::Assign(assign_pat) => pat_bindings(&assign_pat.left, out),
        Pat::Rest(rest_pat) => pat_bindings(&rest_pat.arg, out),
        _ => {}
    }
}

fn named_specifier(local: JourneyAtom, imported: JourneyAtom) -> ImportSpecifier {
    let imported = if imported == local {
        None
    } else {
        Some(ModuleExportName::Ident(ident(imported, DUMMY_SP)))
    };

    ImportSpecifier::Named(ImportNamedSpecifier {
        span: DUMMY_SP,
        local: ident(local, DUMMY_SP),
        imported,
        is_type_only: false,
    })
}

/// Rewrites the object pattern of `const { test } = require('@playwright/test')`
/// the same way as [`rewrite_import_decl`] does for imports.
///
/// The `require` argument itself is handled by [`rewrite_require_source`].
pub fn rewrite_require_destructuring(declarator: &mut VarDeclarator, ctx: &mut TransformContext) {
    let tables = ctx.tables();

    let is_framework_require = match declarator.init.as_deref() {
        Some(Expr::Call(call_expr)) => is_require_of(call_expr, tables.source_package),
        _ => false,
    };
    if !is_framework_require {
        return;
    }

    let Pat::Object(ref mut object_pat) = declarator.name else {
        return;
    };

    for prop in object_pat.props.iter_mut() {
        if let Some(renamed) = translate_pat_prop(prop, tables) {
            *prop = renamed;
        }
    }

    for (local, imported) in injected_bindings(ctx) {
        let is_bound = object_pat.props.iter().any(|prop| match prop {
            ObjectPatProp::Assign(assign_prop) => assign_prop.key.sym == local,
            ObjectPatProp::KeyValue(KeyValuePatProp { value, .. }) => {
                matches!(value.as_ref(), Pat::Ident(binding) if binding.id.sym == local)
            }
            ObjectPatProp::Rest(_) => false,
        });
        if is_bound || !ctx.bind(&local) {
            continue;
        }

        let injected = if imported == local {
            ObjectPatProp::Assign(AssignPatProp {
                span: DUMMY_SP,
                key: ident(local, DUMMY_SP).into(),
                value: None,
            })
        } else {
            ObjectPatProp::KeyValue(KeyValuePatProp {
                key: PropName::Ident(IdentName {
                    span: DUMMY_SP,
                    sym: imported,
                }),
                value: Box::new(Pat::Ident(ident(local, DUMMY_SP).into())),
            })
        };
        object_pat.props.push(injected);
    }
}

/// Replaces the argument of `require('@playwright/test')` with the journey package
pub fn rewrite_require_source(call_expr: &mut CallExpr, ctx: &TransformContext) {
    let tables = ctx.tables();
    if !is_require_of(call_expr, tables.source_package) {
        return;
    }

    let arg = &mut call_expr.args[0];
    let span = arg.expr.span();
    arg.expr = Box::new(Expr::Lit(Lit::Str(str_lit(tables.target_package, span))));
}

fn specifier_local(specifier: &ImportSpecifier) -> &Ident {
    match specifier {
        ImportSpecifier::Named(named) => &named.local,
        ImportSpecifier::Default(default) => &default.local,
        ImportSpecifier::Namespace(namespace) => &namespace.local,
    }
}

/// Checks for `require('<package>')`
fn is_require_of(call_expr: &CallExpr, package: &str) -> bool {
    if !is_call_to(call_expr, &REQUIRE) {
        return false;
    }

    match call_expr.args.first() {
        Some(arg) if arg.spread.is_none() => {
            matches!(arg.expr.as_ref(), Expr::Lit(Lit::Str(s)) if &*s.value == package)
        }
        _ => false,
    }
}

/// Renames the key of a destructured property.
/// Shorthands like `{ test }` become `{ journey: test }`, so the local binding survives.
fn translate_pat_prop(prop: &mut ObjectPatProp, tables: &CompatibilityTables) -> Option<ObjectPatProp> {
    match prop {
        ObjectPatProp::KeyValue(key_value) => {
            if let PropName::Ident(ref mut key) = key_value.key {
                let translated = tables.translate(&key.sym);
                if translated != &*key.sym {
                    key.sym = journey_atom!(translated);
                }
            }
            None
        }

        ObjectPatProp::Assign(assign_prop) => {
            let translated = journey_atom!(tables.translate(&assign_prop.key.sym));
            if translated == assign_prop.key.sym {
                return None;
            }

            let binding = Pat::Ident(assign_prop.key.clone().into());
            let value = match assign_prop.value.take() {
                // `{ test = fallback }` -> `{ journey: test = fallback }`
                Some(default_value) => Pat::Assign(AssignPat {
                    span: assign_prop.span,
                    left: Box::new(binding),
                    right: default_value,
                }),
                None => binding,
            };

            Some(ObjectPatProp::KeyValue(KeyValuePatProp {
                key: PropName::Ident(IdentName {
                    span: assign_prop.key.span,
                    sym: translated,
                }),
                value: Box::new(value),
            }))
        }

        ObjectPatProp::Rest(_) => None,
    }
}

/// `step` always, plus every collected lifecycle hook
fn injected_bindings(ctx: &TransformContext) -> SmallVec<[InjectedBinding; 4]> {
    let tables = ctx.tables();
    let mut bindings = SmallVec::new();

    bindings.push((STEP.to_owned(), journey_atom!(tables.translate(&STEP))));
    for hook in ctx.hooks {
        bindings.push((hook.as_atom(), journey_atom!(tables.translate(hook.as_str()))));
    }

    bindings
}

/// Injected symbols not bound in the module yet, bound from now on
fn take_unbound_bindings(ctx: &mut TransformContext) -> SmallVec<[InjectedBinding; 4]> {
    let mut bindings = injected_bindings(ctx);
    bindings.retain(|(local, _)| ctx.bind(local));
    bindings
}
