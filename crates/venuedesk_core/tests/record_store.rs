use venuedesk_core::db::open_db_in_memory;
use venuedesk_core::{
    EntityStore, Event, EventFilter, EventType, EventTypeKind, Section, SqliteCatalogStore,
    SqliteEventStore, SqliteWorkRequestStore, StoreError, WorkRequest, WorkRequestFilter,
    WorkRequestStatus, WorkRequestStore, WorkRequestType, WorkRequestTypeKind,
};

#[test]
fn event_roundtrip_keeps_references() {
    let conn = open_db_in_memory().unwrap();
    let types = SqliteCatalogStore::<EventTypeKind>::try_new(&conn).unwrap();
    let events = SqliteEventStore::try_new(&conn).unwrap();

    let lecture = types.create(&EventType::new("Lecture")).unwrap();
    let mut draft = Event::new("Rust meetup", Section::Education, 1_700_000_000_000);
    draft.type_id = Some(lecture.id);
    draft.description = "Monthly".to_string();

    let created = events.create(&draft).unwrap();
    let loaded = events.get_by_id(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.type_id, Some(lecture.id));
    assert_eq!(loaded.room_id, None);
}

#[test]
fn event_title_must_not_be_blank() {
    let conn = open_db_in_memory().unwrap();
    let events = SqliteEventStore::try_new(&conn).unwrap();

    let err = events
        .create(&Event::new(" ", Section::Entertainment, 0))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[test]
fn events_filter_by_section() {
    let conn = open_db_in_memory().unwrap();
    let events = SqliteEventStore::try_new(&conn).unwrap();

    events
        .create(&Event::new("Quiz", Section::Entertainment, 0))
        .unwrap();
    events
        .create(&Event::new("Workshop", Section::Education, 0))
        .unwrap();

    let education = events
        .list_filtered(&EventFilter {
            section: Some(Section::Education),
        })
        .unwrap();
    assert_eq!(education.len(), 1);
    assert_eq!(education[0].title, "Workshop");
    assert_eq!(events.get_all().unwrap().len(), 2);
}

#[test]
fn deleting_referenced_type_clears_the_foreign_key() {
    let conn = open_db_in_memory().unwrap();
    let types = SqliteCatalogStore::<EventTypeKind>::try_new(&conn).unwrap();
    let events = SqliteEventStore::try_new(&conn).unwrap();

    let lecture = types.create(&EventType::new("Lecture")).unwrap();
    let mut draft = Event::new("Talk", Section::Enlightenment, 0);
    draft.type_id = Some(lecture.id);
    let created = events.create(&draft).unwrap();

    types.delete(lecture.id).unwrap();
    assert_eq!(events.get_by_id(created.id).unwrap().type_id, None);
}

#[test]
fn work_requests_filter_by_status_and_type() {
    let conn = open_db_in_memory().unwrap();
    let types = SqliteCatalogStore::<WorkRequestTypeKind>::try_new(&conn).unwrap();
    let requests = SqliteWorkRequestStore::try_new(&conn).unwrap();

    let cleaning = types.create(&WorkRequestType::new("Cleaning")).unwrap();
    let lighting = types.create(&WorkRequestType::new("Lighting")).unwrap();

    let mut active_cleaning = WorkRequest::new(WorkRequestStatus::Active, 10, 1);
    active_cleaning.type_id = Some(cleaning.id);
    let mut active_lighting = WorkRequest::new(WorkRequestStatus::Active, 10, 1);
    active_lighting.type_id = Some(lighting.id);
    let mut done_cleaning = WorkRequest::new(WorkRequestStatus::Completed, 10, 1);
    done_cleaning.type_id = Some(cleaning.id);

    let first = requests.create(&active_cleaning).unwrap();
    requests.create(&active_lighting).unwrap();
    requests.create(&done_cleaning).unwrap();

    assert_eq!(
        requests
            .list_filtered(&WorkRequestFilter::active())
            .unwrap()
            .len(),
        2
    );
    let board = requests
        .list_filtered(&WorkRequestFilter {
            status: Some(WorkRequestStatus::Active),
            type_id: Some(cleaning.id),
        })
        .unwrap();
    assert_eq!(board, vec![first]);
}

#[test]
fn work_request_update_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let requests = SqliteWorkRequestStore::try_new(&conn).unwrap();

    let mut request = requests
        .create(&WorkRequest::new(WorkRequestStatus::Draft, 100, 50))
        .unwrap();
    request.status = WorkRequestStatus::Active;
    request.created_at = 999;
    requests.update(&request).unwrap();

    let loaded = requests.get_by_id(request.id).unwrap();
    assert_eq!(loaded.status, WorkRequestStatus::Active);
    assert_eq!(loaded.created_at, 50);
}

#[test]
fn set_status_changes_only_the_status() {
    let conn = open_db_in_memory().unwrap();
    let requests = SqliteWorkRequestStore::try_new(&conn).unwrap();

    let mut draft = WorkRequest::new(WorkRequestStatus::Active, 100, 50);
    draft.description = "Replace bulbs".to_string();
    let request = requests.create(&draft).unwrap();

    requests
        .set_status(request.id, WorkRequestStatus::Completed)
        .unwrap();
    let loaded = requests.get_by_id(request.id).unwrap();
    assert_eq!(loaded.status, WorkRequestStatus::Completed);
    assert_eq!(loaded.description, "Replace bulbs");

    assert!(matches!(
        requests.set_status(uuid::Uuid::new_v4(), WorkRequestStatus::Active),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn status_serializes_as_snake_case() {
    assert_eq!(
        serde_json::to_string(&WorkRequestStatus::Completed).unwrap(),
        "\"completed\""
    );
    assert_eq!(
        serde_json::to_string(&Section::Enlightenment).unwrap(),
        "\"enlightenment\""
    );
}
