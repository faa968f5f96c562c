use std::str::FromStr;

use phf::{phf_map, phf_set};

use crate::Hook;

/// Package which the converted files import from
pub const SOURCE_PACKAGE: &str = "@playwright/test";

/// Package which the journey files import from
pub const TARGET_PACKAGE: &str = "@elastic/synthetics";

/// Symbols renamed when moving from the test framework to the journey DSL.
/// Anything absent keeps its name.
pub static TRANSLATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "test" => "journey",
    "expect" => "expect",
    "step" => "step",
};

/// Hooks without a journey counterpart, removed together with their statement
pub static UNSUPPORTED_HOOKS: phf::Set<&'static str> = phf_set! {
    "configure",
    "parallel",
    "beforeEach",
    "afterEach",
    "fixme",
    "skip",
    "fail",
    "use",
    "info",
    "only",
    "setTimeout",
    "extend",
};

/// Assertion matchers the journey runner lacks, with the closest replacement
pub static UNSUPPORTED_MATCHERS: phf::Map<&'static str, &'static str> = phf_map! {
    "toHaveTitle" => "await page.title()",
    "toHaveURL" => "await page.url()",
    "toBeChecked" => "await locator.isChecked()",
    "toBeDisabled" => "await locator.isDisabled()",
    "toBeEditable" => "await locator.isEditable()",
    "toBeEnabled" => "await locator.isEnabled()",
    "toBeFocused" => "await locator.isFocused()",
    "toBeVisible" => "await locator.isVisible()",
    "toBeHidden" => "await locator.isHidden()",
    "toContainText" => "await locator.textContent()",
    "toHaveAttribute" => "await locator.getAttribute()",
    "toHaveCount" => "await locator.count()",
    "toHaveId" => "await locator.getAttribute()",
    "toHaveText" => "await locator.textContent()",
    "toHaveValue" => "await locator.getAttribute()",
    "toHaveValues" => "await locator.getAttribute()",
    "toBeOK" => "await response.status()",
};

/// Lookup tables shared by every file of a run.
///
/// Everything here is `'static`, so one instance can be handed by reference
/// to any number of concurrent transformations.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityTables {
    pub translations: &'static phf::Map<&'static str, &'static str>,
    pub unsupported_hooks: &'static phf::Set<&'static str>,
    pub unsupported_matchers: &'static phf::Map<&'static str, &'static str>,
    pub source_package: &'static str,
    pub target_package: &'static str,
}

impl Default for CompatibilityTables {
    fn default() -> Self {
        CompatibilityTables {
            translations: &TRANSLATIONS,
            unsupported_hooks: &UNSUPPORTED_HOOKS,
            unsupported_matchers: &UNSUPPORTED_MATCHERS,
            source_package: SOURCE_PACKAGE,
            target_package: TARGET_PACKAGE,
        }
    }
}

impl CompatibilityTables {
    /// Returns the journey name of `name`, or `name` itself when it has no translation
    #[inline]
    pub fn translate<'n>(&self, name: &'n str) -> &'n str {
        match self.translations.get(name) {
            Some(translated) => *translated,
            None => name,
        }
    }

    #[inline]
    pub fn supported_hook(&self, name: &str) -> Option<Hook> {
        Hook::from_str(name).ok()
    }

    #[inline]
    pub fn is_unsupported_hook(&self, name: &str) -> bool {
        self.unsupported_hooks.contains(name)
    }

    /// Suggested replacement expression for an unsupported matcher
    #[inline]
    pub fn matcher_suggestion(&self, name: &str) -> Option<&'static str> {
        self.unsupported_matchers.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_translates_known_symbols() {
        let tables = CompatibilityTables::default();
        assert_eq!(tables.translate("test"), "journey");
        assert_eq!(tables.translate("expect"), "expect");
        assert_eq!(tables.translate("step"), "step");
        assert_eq!(tables.translate("beforeAll"), "beforeAll");
        assert_eq!(tables.translate("devices"), "devices");
    }

    #[test]
    fn supported_and_unsupported_hooks_do_not_overlap() {
        let tables = CompatibilityTables::default();
        for hook in tables.unsupported_hooks.iter() {
            assert!(tables.supported_hook(hook).is_none(), "{hook} is in both sets");
        }
        assert!(tables.is_unsupported_hook("skip"));
        assert!(!tables.is_unsupported_hook("beforeAll"));
    }

    #[test]
    fn it_suggests_matcher_replacements() {
        let tables = CompatibilityTables::default();
        assert_eq!(
            tables.matcher_suggestion("toBeVisible"),
            Some("await locator.isVisible()")
        );
        assert_eq!(
            tables.matcher_suggestion("toBeOK"),
            Some("await response.status()")
        );
        assert_eq!(tables.matcher_suggestion("toBe"), None);
        assert_eq!(tables.unsupported_matchers.len(), 17);
    }
}
