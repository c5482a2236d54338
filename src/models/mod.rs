pub mod batch;
pub mod common;
pub mod gallery;
pub mod image;
pub mod prompt;

pub use batch::*;
pub use common::*;
pub use gallery::*;
pub use image::*;
pub use prompt::*;
