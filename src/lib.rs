pub mod error;
pub mod filter;
pub mod model;
pub mod partition;
pub mod render;

pub use error::ConvertError;

/// Convert one xdot JSON document into DOT text.
///
/// The input is the JSON Graphviz produces with `-Txdot_json` (or
/// `-Tjson`); the output reproduces the graph's topology and user
/// attributes while dropping the computed layout metadata. The returned
/// string has no trailing newline.
pub fn convert(input: &str) -> Result<String, ConvertError> {
    let graph = model::parse(input)?;
    render::render(&graph)
}
