use crate::session::TrackerSession;
use crate::store::TrackerStore;

use super::{report_failure, CategorySummary};

pub fn get_categories<S: TrackerStore>(session: &TrackerSession<S>) -> Vec<CategorySummary> {
    session.categories().iter().map(CategorySummary::from).collect()
}

pub fn create_category<S: TrackerStore>(
    session: &mut TrackerSession<S>,
    title: &str,
) -> Result<Vec<CategorySummary>, String> {
    session
        .create_category(title)
        .map_err(report_failure("create category"))?;
    Ok(get_categories(session))
}

pub fn delete_category<S: TrackerStore>(
    session: &mut TrackerSession<S>,
    title: &str,
) -> Result<Vec<CategorySummary>, String> {
    session
        .delete_category(title)
        .map_err(report_failure("delete category"))?;
    Ok(get_categories(session))
}
