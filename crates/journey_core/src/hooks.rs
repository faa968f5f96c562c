use crate::JourneyAtom;
use flagset::{flags, FlagSet};
use strum_macros::{AsRefStr, EnumString, IntoStaticStr};

flags! {
    /// Lifecycle hooks which have a counterpart in the journey DSL
    #[derive(AsRefStr, EnumString, IntoStaticStr)]
    pub enum Hook: u8 {
        #[strum(serialize = "beforeAll")]
        BeforeAll,
        #[strum(serialize = "afterAll")]
        AfterAll,
        #[strum(serialize = "step")]
        Step,
        #[strum(serialize = "describe")]
        Describe,
    }
}

impl Hook {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    #[inline]
    pub fn as_atom(self) -> JourneyAtom {
        self.as_str().into()
    }

    /// `step` and `describe` need restructuring rather than an import,
    /// so they never end up in a [`HookSet`] produced by the collector.
    #[inline]
    pub fn is_structural(self) -> bool {
        matches!(self, Hook::Step | Hook::Describe)
    }
}

pub type HookSet = FlagSet<Hook>;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn it_parses_hook_names() {
        assert_eq!(Hook::from_str("beforeAll").ok(), Some(Hook::BeforeAll));
        assert_eq!(Hook::from_str("afterAll").ok(), Some(Hook::AfterAll));
        assert_eq!(Hook::from_str("step").ok(), Some(Hook::Step));
        assert_eq!(Hook::from_str("describe").ok(), Some(Hook::Describe));
        assert!(Hook::from_str("beforeEach").is_err());
        assert!(Hook::from_str("BeforeAll").is_err());
    }

    #[test]
    fn it_iterates_in_declaration_order() {
        let mut set = HookSet::default();
        set |= Hook::AfterAll;
        set |= Hook::BeforeAll;

        let names: Vec<&str> = set.into_iter().map(Hook::as_str).collect();
        assert_eq!(names, vec!["beforeAll", "afterAll"]);
    }
}
