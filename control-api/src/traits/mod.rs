pub mod clock;
pub mod id_source;
