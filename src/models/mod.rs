pub mod movie;

pub use movie::{MovieRecord, NewMovie};
