//! Helper module to provide the framework keywords as static symbols (`JourneyAtom`)

use journey_core::{journey_atom, JourneyAtom};

lazy_static! {
    pub static ref TEST: JourneyAtom = journey_atom!("test");
    pub static ref EXPECT: JourneyAtom = journey_atom!("expect");
    pub static ref STEP: JourneyAtom = journey_atom!("step");
    pub static ref REQUIRE: JourneyAtom = journey_atom!("require");

    /// Step name used when a test has no usable title
    pub static ref DEFAULT_STEP_NAME: JourneyAtom = journey_atom!("step");
}
