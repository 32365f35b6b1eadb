use crate::filter::VisibleQuery;
use crate::session::{NewTracker, TrackerEdit, TrackerSession};
use crate::store::TrackerStore;
use chrono::NaiveDate;
use uuid::Uuid;

use super::{report_failure, CategoryResponse, TrackerResponse, VisibleResponse};

/// Visible list for the main screen. Reports filter and date changes.
pub fn get_visible<S: TrackerStore>(
    session: &mut TrackerSession<S>,
    query: &VisibleQuery,
    today: NaiveDate,
) -> VisibleResponse {
    let visible = session.show(query, today);
    let placeholder = session.placeholder(&visible, &query.search_text);
    VisibleResponse {
        selected_date: visible.selected_date,
        categories: visible
            .categories
            .iter()
            .map(|c| CategoryResponse::new(c, session.ledger(), visible.selected_date))
            .collect(),
        placeholder,
    }
}

/// Flip completion of `id` on `date` and return the updated card.
pub fn toggle_completion<S: TrackerStore>(
    session: &mut TrackerSession<S>,
    id: Uuid,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<TrackerResponse, String> {
    session
        .toggle_completion(id, date, today)
        .map_err(report_failure("toggle completion"))?;
    card(session, id, date)
}

pub fn toggle_pin<S: TrackerStore>(
    session: &mut TrackerSession<S>,
    id: Uuid,
    today: NaiveDate,
) -> Result<TrackerResponse, String> {
    let tracker = session.toggle_pin(id).map_err(report_failure("toggle pin"))?;
    Ok(TrackerResponse::new(&tracker, session.ledger(), today))
}

pub fn create_tracker<S: TrackerStore>(
    session: &mut TrackerSession<S>,
    new: NewTracker,
    today: NaiveDate,
) -> Result<TrackerResponse, String> {
    let tracker = session
        .create_tracker(new)
        .map_err(report_failure("create tracker"))?;
    Ok(TrackerResponse::new(&tracker, session.ledger(), today))
}

pub fn update_tracker<S: TrackerStore>(
    session: &mut TrackerSession<S>,
    id: Uuid,
    edit: TrackerEdit,
    today: NaiveDate,
) -> Result<TrackerResponse, String> {
    let tracker = session
        .update_tracker(id, edit)
        .map_err(report_failure("update tracker"))?;
    Ok(TrackerResponse::new(&tracker, session.ledger(), today))
}

pub fn delete_tracker<S: TrackerStore>(
    session: &mut TrackerSession<S>,
    id: Uuid,
) -> Result<(), String> {
    session.delete_tracker(id).map_err(report_failure("delete tracker"))
}

fn card<S: TrackerStore>(
    session: &TrackerSession<S>,
    id: Uuid,
    date: NaiveDate,
) -> Result<TrackerResponse, String> {
    session
        .find_tracker(id)
        .map(|t| TrackerResponse::new(t, session.ledger(), date))
        .ok_or_else(|| crate::error::AppError::NotFound { entity: "Tracker" }.to_string())
}
