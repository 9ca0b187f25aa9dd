pub mod carousel;
pub mod rounded_cover;
pub mod slide;

pub use carousel::{carousel_section, loading};
pub use rounded_cover::rounded_cover;
pub use slide::{slide_card, SlideMessages};
