use indexmap::IndexMap;

use crate::error::TransformError;
use crate::ir::{ClassifiedParameter, ParameterFlags, ParameterLocation};
use crate::model::Parameter;

use super::ref_collector::{TsRefs, collect_refs, union_refs};
use super::ref_resolver::RefResolver;
use super::type_projector::project_type;

/// Parameters of one operation grouped by where they travel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedParameters {
    /// Buckets in first-seen order; a bucket is never empty.
    pub by_location: IndexMap<ParameterLocation, Vec<ClassifiedParameter>>,
    pub flags: ParameterFlags,
    /// References contributed by every parameter schema.
    pub ts_refs: TsRefs,
}

impl ClassifiedParameters {
    pub fn get(&self, location: ParameterLocation) -> &[ClassifiedParameter] {
        self.by_location
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Assign every parameter to exactly one location bucket.
pub fn classify(
    parameters: &[Parameter],
    resolver: &RefResolver<'_>,
) -> Result<ClassifiedParameters, TransformError> {
    let mut classified = ClassifiedParameters::default();
    let mut refs = Vec::with_capacity(parameters.len());

    for param in parameters {
        let location = ParameterLocation::parse(&param.location).ok_or_else(|| {
            TransformError::UnknownParameterLocation {
                name: param.name.clone(),
                location: param.location.clone(),
            }
        })?;

        refs.push(collect_refs(param.schema.as_ref(), resolver)?);
        classified.flags.set(location);
        classified
            .by_location
            .entry(location)
            .or_default()
            .push(ClassifiedParameter {
                name: param.name.clone(),
                location,
                required: param.required,
                description: param.description.clone(),
                ts_type: project_type(param.schema.as_ref(), resolver)?,
            });
    }

    classified.ts_refs = union_refs(refs);
    Ok(classified)
}
