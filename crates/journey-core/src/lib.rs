pub mod card;
pub mod carousel;
pub mod gallery;
