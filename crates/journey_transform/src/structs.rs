use fxhash::FxHashSet;
use journey_core::{CompatibilityTables, Diagnostic, HookSet, JourneyAtom};
use swc_core::common::{comments::SingleThreadedComments, SourceMap, Span};

/// Everything a transformation needs to know about the file it works on
#[derive(Clone, Copy)]
pub struct TransformOptions<'o> {
    /// Name used when reporting diagnostics
    pub filename: &'o str,
    pub tables: &'o CompatibilityTables,
    /// Source map the module was parsed with, used for line numbers and snippets
    pub source_map: &'o SourceMap,
    /// Comments of the module, receives the commented-out assertions
    pub comments: &'o SingleThreadedComments,
}

/// Per-file state of a transformation.
/// Created for each module and dropped once the module is transformed.
pub struct TransformContext<'o> {
    pub options: TransformOptions<'o>,
    /// Hooks found by the collector, drive the import injection
    pub hooks: HookSet,
    /// Names bound at the top level of the module, injected symbols included
    pub bindings: FxHashSet<JourneyAtom>,
    /// Namespace import of the testing package.
    /// Symbols are injected with an import of their own placed after it.
    pub deferred_import: Option<Span>,
    /// Statements which were already rewritten, keyed by their span
    pub visited: FxHashSet<Span>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'o> TransformContext<'o> {
    pub fn new(options: TransformOptions<'o>) -> TransformContext<'o> {
        TransformContext {
            options,
            hooks: HookSet::default(),
            bindings: FxHashSet::default(),
            deferred_import: None,
            visited: FxHashSet::default(),
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub fn tables(&self) -> &'o CompatibilityTables {
        self.options.tables
    }

    /// Binds `name` at the top level.
    /// Returns `false` when the module already has such a binding.
    pub fn bind(&mut self, name: &JourneyAtom) -> bool {
        if self.bindings.contains(name) {
            return false;
        }

        self.bindings.insert(name.to_owned())
    }

    /// Marks a statement as rewritten.
    /// Returns `false` when it has been rewritten before.
    /// Synthesized statements have no identity and are always considered new.
    pub fn mark_visited(&mut self, span: Span) -> bool {
        if span.is_dummy() {
            return true;
        }

        self.visited.insert(span)
    }
}
