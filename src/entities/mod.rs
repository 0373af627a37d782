pub mod prelude;

pub mod movies;
