pub mod c;
pub mod cpp;
pub mod native;
pub mod python;
