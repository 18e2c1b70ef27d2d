pub mod function;
pub mod helpers;
pub mod laguerre;
pub mod parsing;
pub mod simpson;
