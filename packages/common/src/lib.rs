//! Identity, id-keyed containers and slice arithmetic shared by the syntree
//! packages.

pub mod error;
pub mod id;
pub mod id_map;
pub mod result;
pub mod slice;

pub use error::*;
pub use id::*;
pub use id_map::*;
pub use result::*;
pub use slice::*;
