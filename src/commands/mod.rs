pub mod inspect;
pub mod replace;
