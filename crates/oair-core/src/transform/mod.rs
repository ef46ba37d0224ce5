pub mod name_normalizer;
pub mod operation_normalizer;
pub mod param_classifier;
pub mod path_normalizer;
pub mod path_template;
pub mod ref_collector;
pub mod ref_resolver;
pub mod schema_normalizer;
pub mod spec_normalizer;
pub mod type_projector;

pub use ref_collector::TsRefs;
pub use ref_resolver::RefResolver;
pub use spec_normalizer::normalize;

use crate::config::NormalizeConfig;
use crate::error::TransformError;
use crate::ir::IrSpec;
use crate::parse::ApiDocument;

/// Adapt either dialect into the shared model and normalize it.
pub fn normalize_document(
    document: &ApiDocument,
    config: &NormalizeConfig,
) -> Result<IrSpec, TransformError> {
    let spec = document.to_spec()?;
    normalize(&spec, config)
}
