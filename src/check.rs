//! Version comparator: declared anchor vs. resolved registry versions
//!
//! Pure computation. Status invariant:
//! - Outdated iff a latest version exists and is strictly greater than the
//!   declared anchor
//! - UpToDate iff a latest version exists and is not greater
//! - Unresolved otherwise: missing/unparseable anchor (which takes priority
//!   over a successful resolution) or a failed registry lookup

use crate::domain::{ComparisonResult, DeclaredDependency, Status};
use crate::error::RegistryError;
use crate::registry::ResolvedVersions;

/// Compare one declared dependency against its resolution outcome
pub fn compare(
    declared: &DeclaredDependency,
    resolved: Result<ResolvedVersions, RegistryError>,
) -> ComparisonResult {
    let declared_display = declared.declared_display();

    // without a baseline there is nothing to judge, even on a good lookup
    let Some(anchor) = &declared.anchor else {
        return ComparisonResult::unresolved(&declared.name, declared.ecosystem, declared_display);
    };

    let latest = match resolved {
        Ok(versions) => match versions.latest() {
            Some(latest) => latest.clone(),
            None => {
                return ComparisonResult::unresolved(
                    &declared.name,
                    declared.ecosystem,
                    declared_display,
                )
            }
        },
        Err(_) => {
            return ComparisonResult::unresolved(
                &declared.name,
                declared.ecosystem,
                declared_display,
            )
        }
    };

    let status = if latest > *anchor {
        Status::Outdated
    } else {
        Status::UpToDate
    };

    ComparisonResult {
        name: declared.name.clone(),
        ecosystem: declared.ecosystem,
        declared: declared_display,
        latest: Some(latest),
        status,
    }
}
