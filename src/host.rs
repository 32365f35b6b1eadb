//! Length-prefixed JSON host for an out-of-process UI shell.
//!
//! Each message is a 4-byte little-endian length followed by that many bytes
//! of JSON. Every request gets exactly one response.

use crate::analytics::{Event, Item, Screen};
use crate::commands::{
    self, CategorySummary, StatisticsResponse, TrackerResponse, VisibleResponse,
};
use crate::constants::MAX_MESSAGE_SIZE;
use crate::error::AppError;
use crate::filter::VisibleQuery;
use crate::session::{NewTracker, TrackerEdit, TrackerSession};
use crate::store::TrackerStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Visible { query: VisibleQuery },
    ToggleCompletion { id: Uuid, date: NaiveDate },
    TogglePin { id: Uuid },
    Statistics,
    Categories,
    CreateCategory { title: String },
    DeleteCategory { title: String },
    CreateTracker { tracker: NewTracker },
    UpdateTracker { id: Uuid, edit: TrackerEdit },
    DeleteTracker { id: Uuid },
    /// UI event the core cannot observe, such as an edit sheet being cancelled.
    Report {
        event: Event,
        screen: Screen,
        #[serde(default)]
        item: Option<Item>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Visible(VisibleResponse),
    Ok,
    Statistics(StatisticsResponse),
    Categories { categories: Vec<CategorySummary> },
    Tracker(TrackerResponse),
    Error { message: String },
}

impl From<Result<Response, String>> for Response {
    fn from(result: Result<Response, String>) -> Self {
        result.unwrap_or_else(|message| Response::Error { message })
    }
}

pub struct Host<S: TrackerStore> {
    session: TrackerSession<S>,
    today: Box<dyn Fn() -> NaiveDate>,
}

impl<S: TrackerStore> Host<S> {
    /// Host using the local calendar day as "today".
    pub fn new(session: TrackerSession<S>) -> Self {
        Self::with_clock(session, Box::new(|| chrono::Local::now().date_naive()))
    }

    pub fn with_clock(session: TrackerSession<S>, today: Box<dyn Fn() -> NaiveDate>) -> Self {
        Self { session, today }
    }

    /// Serve requests until the reader fails.
    ///
    /// A closed reader surfaces as `UnexpectedEof`.
    pub fn run<R: Read, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> io::Result<()> {
        self.session.opened();
        let result = self.serve(reader, writer);
        self.session.closed();
        result
    }

    fn serve<R: Read, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> io::Result<()> {
        loop {
            let frame = read_frame(reader)?;
            let response = match serde_json::from_slice::<Request>(&frame) {
                Ok(request) => self.handle(request),
                Err(e) => {
                    log::warn!("Malformed request: {e}");
                    Response::Error {
                        message: AppError::Protocol(e.to_string()).to_string(),
                    }
                }
            };
            write_message(writer, &response)?;
        }
    }

    pub fn handle(&mut self, request: Request) -> Response {
        let today = (self.today)();
        let session = &mut self.session;
        match request {
            Request::Visible { query } => {
                Response::Visible(commands::get_visible(session, &query, today))
            }
            Request::ToggleCompletion { id, date } => {
                commands::toggle_completion(session, id, date, today)
                    .map(Response::Tracker)
                    .into()
            }
            Request::TogglePin { id } => {
                commands::toggle_pin(session, id, today).map(Response::Tracker).into()
            }
            Request::Statistics => {
                session.report(Event::Open, Screen::Statistics, None);
                Response::Statistics(commands::get_statistics(session))
            }
            Request::Categories => Response::Categories {
                categories: commands::get_categories(session),
            },
            Request::CreateCategory { title } => commands::create_category(session, &title)
                .map(|categories| Response::Categories { categories })
                .into(),
            Request::DeleteCategory { title } => commands::delete_category(session, &title)
                .map(|categories| Response::Categories { categories })
                .into(),
            Request::CreateTracker { tracker } => {
                commands::create_tracker(session, tracker, today)
                    .map(Response::Tracker)
                    .into()
            }
            Request::UpdateTracker { id, edit } => {
                commands::update_tracker(session, id, edit, today)
                    .map(Response::Tracker)
                    .into()
            }
            Request::DeleteTracker { id } => {
                commands::delete_tracker(session, id).map(|()| Response::Ok).into()
            }
            Request::Report {
                event,
                screen,
                item,
            } => {
                session.report(event, screen, item);
                Response::Ok
            }
        }
    }
}

fn read_frame<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = usize::try_from(u32::from_le_bytes(len_bytes))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if len > MAX_MESSAGE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Message too large: {len} bytes (max: {MAX_MESSAGE_SIZE} bytes)"),
        ));
    }

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

pub fn write_message<W: Write, T: Serialize>(writer: &mut W, message: &T) -> io::Result<()> {
    let json = serde_json::to_vec(message)?;
    let len = u32::try_from(json.len())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&json)?;
    writer.flush()
}
