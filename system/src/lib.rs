pub extern crate rand;
pub extern crate serde;
pub extern crate serde_json;

mod color;
mod display_name;
mod error;
mod id;
mod message;
mod session_store;
mod types;

pub use color::*;
pub use display_name::*;
pub use error::*;
pub use id::*;
pub use message::*;
pub use session_store::*;
pub use types::*;
