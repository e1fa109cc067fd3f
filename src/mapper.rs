//! Applies a test-data record to a form page through its field mapping.

use crate::data::TestDataRecord;
use crate::mapping::template::{expand_index, expand_value};
use crate::mapping::{ControlKind, FieldMapping, FieldSpec};
use crate::surface::FormSurface;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Apply every present field of `record` to `surface`, in the mapping's
/// declared order. Absent, empty, and `"null"` fields are skipped silently;
/// the control keeps its default state. One interaction attempt per field;
/// the first surface failure aborts the rest of the page.
pub async fn apply<S: FormSurface>(
    record: &TestDataRecord,
    mapping: &FieldMapping,
    surface: &S,
) -> Result<()> {
    debug!("filling page '{}'", mapping.page);
    for spec in &mapping.fields {
        let Some(value) = record.present(&spec.field) else {
            debug!("skip {}: not present", spec.field);
            continue;
        };
        apply_field(spec, value, surface).await?;
    }
    Ok(())
}

async fn apply_field<S: FormSurface>(spec: &FieldSpec, value: &str, surface: &S) -> Result<()> {
    match &spec.kind {
        ControlKind::Text => {
            info!("text: {} = '{}'", spec.field, value);
            surface
                .set_text(&spec.selector, value)
                .await
                .map_err(|e| Error::interaction(&spec.field, &spec.selector, e))?;
        }
        ControlKind::SelectByValue => {
            info!("select_by_value: {} = '{}'", spec.field, value);
            surface
                .choose_by_value(&spec.selector, value)
                .await
                .map_err(|e| Error::interaction(&spec.field, &spec.selector, e))?;
        }
        ControlKind::SelectByLabel => {
            info!("select_by_label: {} = '{}'", spec.field, value);
            surface
                .choose_by_label(&spec.selector, value)
                .await
                .map_err(|e| Error::interaction(&spec.field, &spec.selector, e))?;
        }
        ControlKind::CheckboxGroup => {
            for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let selector = expand_value(&spec.selector, token);
                info!("check: {} += '{}'", spec.field, token);
                surface
                    .set_checked(&selector)
                    .await
                    .map_err(|e| Error::interaction(&spec.field, &selector, e))?;
            }
        }
        ControlKind::RadioExclusive(exclusive) => {
            let label = exclusive.resolve(value);
            let selector = expand_value(&spec.selector, label);
            info!("radio: {} = '{}'", spec.field, label);
            surface
                .set_checked(&selector)
                .await
                .map_err(|e| Error::interaction(&spec.field, &selector, e))?;
        }
        ControlKind::RadioIndexed(indexed) => {
            let Some(position) = indexed.position_of(value) else {
                warn!(
                    "unmapped value '{}' for field '{}'; skipping",
                    value, spec.field
                );
                return Ok(());
            };
            let selector = expand_index(&spec.selector, position);
            info!("radio: {} = '{}' (position {})", spec.field, value.trim(), position);
            surface
                .set_checked(&selector)
                .await
                .map_err(|e| Error::interaction(&spec.field, &selector, e))?;
        }
    }
    Ok(())
}
