use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;

use schedule_cell::error::ScheduleError;
use schedule_cell::models::DaySlots;
use schedule_cell::services::parser::parse_schedule_text;
use schedule_cell::services::SlotStoreService;
use shared_storage::DocumentStore;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn slots(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

fn new_service(dir: &tempfile::TempDir) -> SlotStoreService {
    SlotStoreService::new(Arc::new(DocumentStore::new(dir.path())))
}

#[tokio::test]
async fn replace_then_list_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let service = new_service(&dir);

    let schedule = vec![
        DaySlots {
            date: date("2025-05-23"),
            slots: slots(&["10:00", "13:00"]),
        },
        DaySlots {
            date: date("2025-05-24"),
            slots: slots(&["09:30"]),
        },
    ];
    service
        .replace_slots("tetsuya", "Tetsuya", schedule.clone())
        .await
        .unwrap();

    assert_eq!(service.list_slots("tetsuya").await.unwrap(), schedule);
    assert_eq!(
        service.provider_name("tetsuya").await.unwrap(),
        Some("Tetsuya".to_string())
    );
}

#[tokio::test]
async fn unknown_provider_lists_empty() {
    let dir = tempfile::tempdir().unwrap();
    let service = new_service(&dir);

    assert!(service.list_slots("nobody").await.unwrap().is_empty());
    assert_eq!(service.provider_name("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn replace_drops_empty_dates() {
    let dir = tempfile::tempdir().unwrap();
    let service = new_service(&dir);

    service
        .replace_slots(
            "chigusa",
            "Chigusa",
            vec![DaySlots {
                date: date("2025-06-01"),
                slots: vec![],
            }],
        )
        .await
        .unwrap();

    let listed = service.list_slots("chigusa").await.unwrap();
    assert!(listed.iter().all(|day| day.date != date("2025-06-01")));
    assert!(listed.is_empty());
}

#[tokio::test]
async fn replace_collapses_duplicate_labels() {
    let dir = tempfile::tempdir().unwrap();
    let service = new_service(&dir);

    let schedule = parse_schedule_text("2025-05-23:10:00,10:00,13:00");
    service
        .replace_slots("tetsuya", "Tetsuya", schedule)
        .await
        .unwrap();

    let listed = service.list_slots("tetsuya").await.unwrap();
    assert_eq!(listed[0].slots, slots(&["10:00", "13:00"]));
}

#[tokio::test]
async fn consume_removes_exactly_one_label() {
    let dir = tempfile::tempdir().unwrap();
    let service = new_service(&dir);

    service
        .replace_slots(
            "tetsuya",
            "Tetsuya",
            vec![DaySlots {
                date: date("2025-05-23"),
                slots: slots(&["10:00", "13:00"]),
            }],
        )
        .await
        .unwrap();

    service
        .consume_slot("tetsuya", date("2025-05-23"), "10:00")
        .await
        .unwrap();

    let listed = service.list_slots("tetsuya").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].slots, slots(&["13:00"]));
}

#[tokio::test]
async fn consuming_last_label_removes_the_date_entry() {
    let dir = tempfile::tempdir().unwrap();
    let service = new_service(&dir);

    service
        .replace_slots(
            "tetsuya",
            "Tetsuya",
            vec![
                DaySlots {
                    date: date("2025-05-23"),
                    slots: slots(&["10:00"]),
                },
                DaySlots {
                    date: date("2025-05-24"),
                    slots: slots(&["09:30"]),
                },
            ],
        )
        .await
        .unwrap();

    service
        .consume_slot("tetsuya", date("2025-05-23"), "10:00")
        .await
        .unwrap();

    let listed = service.list_slots("tetsuya").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].date, date("2025-05-24"));
}

#[tokio::test]
async fn consuming_missing_slot_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = new_service(&dir);

    service
        .replace_slots(
            "tetsuya",
            "Tetsuya",
            vec![DaySlots {
                date: date("2025-05-23"),
                slots: slots(&["10:00"]),
            }],
        )
        .await
        .unwrap();

    let result = service
        .consume_slot("tetsuya", date("2025-05-23"), "11:00")
        .await;
    assert_matches!(result, Err(ScheduleError::SlotNotFound { .. }));

    let result = service
        .consume_slot("someone-else", date("2025-05-23"), "10:00")
        .await;
    assert_matches!(result, Err(ScheduleError::SlotNotFound { .. }));
}

#[tokio::test]
async fn concurrent_consumers_race_to_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let service = new_service(&dir);

    service
        .replace_slots(
            "tetsuya",
            "Tetsuya",
            vec![DaySlots {
                date: date("2025-05-23"),
                slots: slots(&["10:00", "13:00"]),
            }],
        )
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .consume_slot("tetsuya", date("2025-05-23"), "10:00")
                .await
        }));
    }

    let mut wins = 0;
    let mut losses = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => wins += 1,
            Err(ScheduleError::SlotNotFound { .. }) => losses += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(losses, 7);

    let listed = service.list_slots("tetsuya").await.unwrap();
    assert_eq!(listed[0].slots, slots(&["13:00"]));
}

#[tokio::test]
async fn restore_puts_a_consumed_slot_back() {
    let dir = tempfile::tempdir().unwrap();
    let service = new_service(&dir);

    service
        .replace_slots(
            "tetsuya",
            "Tetsuya",
            vec![DaySlots {
                date: date("2025-05-23"),
                slots: slots(&["10:00"]),
            }],
        )
        .await
        .unwrap();

    service
        .consume_slot("tetsuya", date("2025-05-23"), "10:00")
        .await
        .unwrap();
    assert!(service.list_slots("tetsuya").await.unwrap().is_empty());

    service
        .restore_slot("tetsuya", date("2025-05-23"), "10:00")
        .await
        .unwrap();

    let listed = service.list_slots("tetsuya").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].slots, slots(&["10:00"]));
}
