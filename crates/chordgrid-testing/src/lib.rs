//! Testing utilities and harness for chordgrid layouts

pub mod recording_provider;
pub mod recording_sink;
pub mod testing;

pub use recording_provider::*;
pub use recording_sink::*;

pub mod prelude {
    pub use crate::recording_provider::*;
    pub use crate::recording_sink::*;
    pub use crate::testing::*;
}
