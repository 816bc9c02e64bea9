//! Lua table-literal format
//!
//! Every text entry of a mission archive is a Lua chunk made of one
//! top-level table assignment. This module decodes such chunks into
//! [`Table`]s and encodes tables back into the same layout.

mod reader;
mod value;
mod writer;

pub use reader::decode;
pub use value::{Key, Table, Value};
pub use writer::{encode, encode_table};
