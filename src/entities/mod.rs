pub mod prelude;

pub mod titles;
