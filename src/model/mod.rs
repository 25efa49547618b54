mod comparison;
mod form;
mod league;
mod standings;
mod team;

pub use comparison::*;
pub use form::*;
pub use league::*;
pub use standings::*;
pub use team::*;
