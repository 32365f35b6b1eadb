use crate::session::TrackerSession;
use crate::store::TrackerStore;

use super::StatisticsResponse;

pub fn get_statistics<S: TrackerStore>(session: &TrackerSession<S>) -> StatisticsResponse {
    StatisticsResponse::from(session.compute_statistics())
}
