//! Scroll-driven scene choreography and pointer-driven canvas effects.
//!
//! Everything here is platform independent; the `scrollfx-web` crate binds
//! it to the browser.

pub mod camera;
pub mod card;
pub mod constants;
pub mod driver;
pub mod ease;
pub mod error;
pub mod opacity;
pub mod piecewise;
pub mod pointer;
pub mod progress;
pub mod ripple;
pub mod scene;
pub mod surface;
pub mod tilt;
pub mod timeline;
pub mod waves;

pub use camera::*;
pub use card::*;
pub use constants::*;
pub use driver::*;
pub use ease::*;
pub use error::*;
pub use opacity::*;
pub use piecewise::*;
pub use pointer::*;
pub use progress::*;
pub use ripple::*;
pub use scene::*;
pub use surface::*;
pub use tilt::*;
pub use timeline::*;
pub use waves::*;
