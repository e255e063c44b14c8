mod append;

pub use append::append;
