//! Headless probe for the VenueDesk core.
//!
//! # Responsibility
//! - Resolve config, start logging and open the catalog database.
//! - Render the events table and the active work-request board to stdout.

use log::{error, info};
use std::error::Error;
use std::process::ExitCode;
use venuedesk_core::db::open_db;
use venuedesk_core::view_model::columns::{
    RELATION_EVENTS, RELATION_EVENT_TYPES, RELATION_ROOM_TYPES, RELATION_WORK_REQUEST_TYPES,
};
use venuedesk_core::{
    core_version, event_table, init_from_config, work_request_table, AppConfig, CachedRelation,
    EntityStore, EventTypeKind, JoinedTableModel, RoomTypeKind, SqliteCatalogStore,
    SqliteEventStore, SqliteWorkRequestStore, WorkRequestFilter, WorkRequestTypeKind,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("venuedesk: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env();
    init_from_config(&config)?;
    println!("venuedesk_core version={}", core_version());

    let conn = open_db(&config.db_path)?;
    info!(
        "event=cli_run module=cli status=start db_path={}",
        config.db_path.display()
    );

    let event_types = SqliteCatalogStore::<EventTypeKind>::try_new(&conn)?;
    let rooms = SqliteCatalogStore::<RoomTypeKind>::try_new(&conn)?;
    let request_types = SqliteCatalogStore::<WorkRequestTypeKind>::try_new(&conn)?;
    let events = SqliteEventStore::try_new(&conn)?;
    let requests = SqliteWorkRequestStore::try_new(&conn)?;

    let room_labels = CachedRelation::load(&rooms)?;

    let event_rows = events.get_all()?;
    let events_table = event_table(&events, event_rows)
        .with_relation(RELATION_EVENT_TYPES, CachedRelation::load(&event_types)?)
        .with_relation(RELATION_ROOM_TYPES, room_labels.clone());
    print_table("Events", &events_table)?;

    let board_rows = requests.list_filtered(&WorkRequestFilter::active())?;
    let board = work_request_table(&requests, board_rows)
        .with_relation(RELATION_ROOM_TYPES, room_labels)
        .with_relation(
            RELATION_WORK_REQUEST_TYPES,
            CachedRelation::load(&request_types)?,
        )
        .with_relation(RELATION_EVENTS, CachedRelation::load(&events)?);
    print_table("Active work requests", &board)?;

    info!("event=cli_run module=cli status=ok");
    Ok(())
}

fn print_table<R, S>(
    title: &str,
    table: &JoinedTableModel<'_, R, S>,
) -> Result<(), Box<dyn Error>>
where
    R: venuedesk_core::Entity,
    S: EntityStore<R>,
{
    println!("\n{title} ({} rows)", table.row_count());

    let headers = (0..table.column_count())
        .map(|column| table.column_header(column))
        .collect::<Result<Vec<_>, _>>()?;
    println!("{}", headers.join(" | "));

    for row in 0..table.row_count() {
        let cells = (0..table.column_count())
            .map(|column| table.cell_value(row, column).map(|cell| cell.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        let marker = match table.row_style(row)? {
            Some(style) => format!(" [{style:?}]"),
            None => String::new(),
        };
        println!("{}{marker}", cells.join(" | "));
    }
    Ok(())
}
