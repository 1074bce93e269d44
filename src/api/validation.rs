use super::ApiError;
use crate::domain::{ShowId, ShowSort};

pub fn validate_show_id(id: i32) -> Result<ShowId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid show ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(ShowId::new(id))
}

pub fn validate_sort(sort: Option<&str>) -> Result<ShowSort, ApiError> {
    sort.map_or(Ok(ShowSort::default()), str::parse)
        .map_err(ApiError::validation)
}
