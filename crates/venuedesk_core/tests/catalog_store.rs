use venuedesk_core::db::open_db_in_memory;
use venuedesk_core::{
    Area, AreaKind, CatalogStore, EntityKind, EntityStore, EventType, EventTypeKind, RoomType,
    RoomTypeKind, SqliteCatalogStore, StoreError, ValidationError,
};
use uuid::Uuid;

#[test]
fn create_assigns_id_and_lists_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::<EventTypeKind>::try_new(&conn).unwrap();

    let lecture = store.create(&EventType::new("Lecture")).unwrap();
    let concert = store.create(&EventType::new("Concert")).unwrap();

    assert!(!lecture.id.is_nil());
    assert_ne!(lecture.id, concert.id);

    let names: Vec<String> = store
        .get_all()
        .unwrap()
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["Lecture", "Concert"]);
    assert_eq!(store.get_by_id(concert.id).unwrap(), concert);
}

#[test]
fn update_and_delete_report_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::<EventTypeKind>::try_new(&conn).unwrap();

    let ghost = EventType::new("Ghost");
    let missing_id = Uuid::new_v4();
    let mut ghost_with_id = ghost.clone();
    ghost_with_id.id = missing_id;

    assert!(matches!(
        store.update(&ghost_with_id),
        Err(StoreError::NotFound { kind: EntityKind::EventType, id }) if id == missing_id
    ));
    assert!(matches!(
        store.delete(missing_id),
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.get_by_id(missing_id),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn rename_persists_and_delete_removes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::<RoomTypeKind>::try_new(&conn).unwrap();

    let mut hall = store.create(&RoomType::new("Hall")).unwrap();
    hall.name = "Main hall".to_string();
    store.update(&hall).unwrap();
    assert_eq!(store.get_by_id(hall.id).unwrap().name, "Main hall");

    store.delete(hall.id).unwrap();
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn blank_names_are_rejected_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::<EventTypeKind>::try_new(&conn).unwrap();

    let err = store.create(&EventType::new("  ")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::BlankName { .. })
    ));
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn duplicate_names_fail_as_store_errors() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::<EventTypeKind>::try_new(&conn).unwrap();

    store.create(&EventType::new("Lecture")).unwrap();
    assert!(matches!(
        store.create(&EventType::new("Lecture")),
        Err(StoreError::Db(_))
    ));
    assert_eq!(store.get_all().unwrap().len(), 1);
}

#[test]
fn name_exists_is_exact_and_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCatalogStore::<EventTypeKind>::try_new(&conn).unwrap();
    store.create(&EventType::new("Lecture")).unwrap();

    assert!(store.name_exists("Lecture", None).unwrap());
    assert!(!store.name_exists("lecture", None).unwrap());
    assert!(!store.name_exists("Lecture ", None).unwrap());
}

#[test]
fn areas_are_scoped_to_their_room() {
    let conn = open_db_in_memory().unwrap();
    let rooms = SqliteCatalogStore::<RoomTypeKind>::try_new(&conn).unwrap();
    let areas = SqliteCatalogStore::<AreaKind>::try_new(&conn).unwrap();

    let hall = rooms.create(&RoomType::new("Hall")).unwrap();
    let foyer = rooms.create(&RoomType::new("Foyer")).unwrap();

    areas.create(&Area::in_room(hall.id, "Stage")).unwrap();
    areas.create(&Area::in_room(foyer.id, "Stage")).unwrap();
    areas.create(&Area::in_room(hall.id, "Balcony")).unwrap();

    let hall_areas: Vec<String> = areas
        .list_in_scope(hall.id)
        .unwrap()
        .into_iter()
        .map(|area| area.name)
        .collect();
    assert_eq!(hall_areas, vec!["Stage", "Balcony"]);
    assert!(areas.name_exists("Balcony", Some(hall.id)).unwrap());
    assert!(!areas.name_exists("Balcony", Some(foyer.id)).unwrap());

    assert!(matches!(
        areas.create(&Area::new("Nowhere")),
        Err(StoreError::Validation(ValidationError::MissingParent { .. }))
    ));
    assert!(matches!(
        rooms.list_in_scope(hall.id),
        Err(StoreError::Validation(ValidationError::UnexpectedParent { .. }))
    ));
}

#[test]
fn deleting_room_cascades_to_its_areas() {
    let conn = open_db_in_memory().unwrap();
    let rooms = SqliteCatalogStore::<RoomTypeKind>::try_new(&conn).unwrap();
    let areas = SqliteCatalogStore::<AreaKind>::try_new(&conn).unwrap();

    let hall = rooms.create(&RoomType::new("Hall")).unwrap();
    areas.create(&Area::in_room(hall.id, "Stage")).unwrap();

    rooms.delete(hall.id).unwrap();
    assert!(areas.get_all().unwrap().is_empty());
}
