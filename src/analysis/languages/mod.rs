//! Language-specific analyzer implementations.

mod docstring;
mod generic;
mod python;

pub use generic::GenericAnalyzer;
pub use python::PythonAnalyzer;
