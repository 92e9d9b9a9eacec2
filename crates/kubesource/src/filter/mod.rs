pub mod matcher;

pub use matcher::included;
