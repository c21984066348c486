use std::collections::BTreeSet;

use crate::models::Category;

/// A declared, non-empty allow-list. Empty lists constrain nothing.
#[inline]
pub fn declared(values: Option<&[String]>) -> Option<&[String]> {
    values.filter(|v| !v.is_empty())
}

/// Check whether a profile value is a member of a declared allow-list
///
/// An unrecognized profile value (`None`) is never a member.
#[inline]
pub fn matches_dimension(values: Option<&[String]>, profile_value: Option<&str>) -> bool {
    match (declared(values), profile_value) {
        (Some(values), Some(value)) => values.iter().any(|v| v == value),
        _ => false,
    }
}

/// Check whether any of the profile's interests appear in the allow-list
#[inline]
pub fn shares_interest(values: Option<&[String]>, interests: &BTreeSet<Category>) -> bool {
    declared(values).is_some_and(|values| {
        values
            .iter()
            .any(|v| Category::from_label(v).is_some_and(|c| interests.contains(&c)))
    })
}
