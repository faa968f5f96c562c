mod diagnostic;
mod hooks;
mod tables;

pub use diagnostic::*;
pub use hooks::{Hook, HookSet};
pub use tables::*;

/// The atom type used for every symbol the converter reads or produces
pub type JourneyAtom = swc_core::ecma::atoms::Atom;

/// Creates a [`JourneyAtom`] from a string
#[macro_export]
macro_rules! journey_atom {
    ($s: expr) => {
        $crate::JourneyAtom::from($s)
    };
}
