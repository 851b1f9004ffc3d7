//! Startup seeding of the demonstration tasks.

use crate::board::helpers::{BoardEnv, env};
use rstest::rstest;
use taskboard::app::TaskBoard;
use taskboard::config::AppConfig;
use taskboard::task::domain::{PageRequest, Priority};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opening_seeds_four_tasks_on_one_page(env: BoardEnv) {
    let board = env.open().await;

    let page = board
        .tasks()
        .get_tasks_paged(PageRequest::new(0, 10).expect("valid page"))
        .await
        .expect("paging should succeed");
    let names: Vec<&str> = page.content.iter().map(|t| t.name().as_str()).collect();

    assert_eq!(page.total_elements, 4);
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_next);
    assert!(!page.has_previous);
    assert_eq!(names, ["painting", "shopping", "gardening", "cleaning"]);
    assert!(env.upload_dir().is_dir());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeding_can_be_disabled(env: BoardEnv) {
    let config = AppConfig {
        seed_tasks: false,
        ..env.config.clone()
    };

    let board = TaskBoard::open(&config)
        .await
        .expect("task board should open");

    assert!(
        board
            .tasks()
            .get_all_tasks()
            .await
            .expect("listing should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_tasks_can_be_paged_by_priority(env: BoardEnv) {
    let board = env.open().await;

    let second = board
        .tasks()
        .get_tasks_by_priority_paged(Priority::Medium, PageRequest::new(1, 1).expect("page"))
        .await
        .expect("paging should succeed");

    assert_eq!(second.total_elements, 2);
    assert!(second.has_previous);
    assert!(!second.has_next);
    assert_eq!(
        second.content.first().map(|t| t.name().as_str()),
        Some("gardening")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_page_past_the_end_is_empty(env: BoardEnv) {
    let board = env.open().await;

    let page = board
        .tasks()
        .get_tasks_paged(PageRequest::new(5, 10).expect("valid page"))
        .await
        .expect("paging should succeed");

    assert!(page.content.is_empty());
    assert_eq!(page.total_elements, 4);
    assert!(page.has_previous);
}
