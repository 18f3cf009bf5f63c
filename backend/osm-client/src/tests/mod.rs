mod error;
mod xml;
