use journey_core::{CompatibilityTables, HookSet};
use swc_core::ecma::{
    ast::{CallExpr, Module},
    visit::{Visit, VisitWith},
};

use crate::utils::member_callee_prop;

/// Collects the hooks called as `x.hook(...)` anywhere in the module.
/// `step` and `describe` are never collected.
pub fn collect_hooks(module: &Module, tables: &CompatibilityTables) -> HookSet {
    let mut collector = HookCollector {
        tables,
        hooks: HookSet::default(),
    };
    module.visit_with(&mut collector);
    collector.hooks
}

struct HookCollector<'t> {
    tables: &'t CompatibilityTables,
    hooks: HookSet,
}

impl Visit for HookCollector<'_> {
    fn visit_call_expr(&mut self, n: &CallExpr) {
        let hook = member_callee_prop(n).and_then(|prop| self.tables.supported_hook(prop));

        if let Some(hook) = hook {
            if !hook.is_structural() {
                self.hooks |= hook;
            }
        }

        n.visit_children_with(self);
    }
}
