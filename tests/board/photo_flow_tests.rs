//! Photo upload, attachment and deletion through the wired board.

use crate::board::helpers::{BoardEnv, env, jpeg};
use rstest::rstest;
use taskboard::app::TaskBoardError;
use taskboard::error::FailureKind;
use taskboard::task::domain::{Priority, TaskId};
use taskboard::task::services::CreateTaskRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_then_attach_is_visible_from_both_sides(env: BoardEnv) {
    let board = env.open().await;
    let task = board
        .tasks()
        .get_task_by_name("cleaning")
        .await
        .expect("lookup should succeed")
        .expect("seeded task should exist");

    let photo = board
        .photos()
        .upload_photo(jpeg("a.jpg", &[1, 2, 3]))
        .await
        .expect("upload should succeed");
    let attached = board
        .attachments()
        .add_photo_to_task(task.id(), photo.id())
        .await
        .expect("attach should succeed")
        .expect("task should exist");

    assert_eq!(photo.size(), 3);
    assert_ne!(photo.id().as_str(), photo.filename().as_str());
    assert_eq!(attached.photos(), std::slice::from_ref(&photo));
    assert_eq!(
        board
            .photos()
            .get_photos_by_task_id(task.id())
            .await
            .expect("listing should succeed"),
        vec![photo]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_to_task_stores_and_attaches_in_one_call(env: BoardEnv) {
    let board = env.open().await;
    let task = board
        .tasks()
        .add_task(CreateTaskRequest::new("framing", Priority::High))
        .await
        .expect("task creation should succeed");

    let (updated, photo) = board
        .upload_photo_to_task(task.id(), jpeg("frame.png", b"png bytes"))
        .await
        .expect("upload to task should succeed");
    let download = board
        .photos()
        .download_photo(photo.id())
        .await
        .expect("download should succeed");

    assert!(updated.has_photo(photo.id()));
    assert_eq!(download.data, b"png bytes".to_vec());
    assert_eq!(download.photo.original_name().as_str(), "frame.png");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_to_an_unknown_task_stores_nothing(env: BoardEnv) {
    let board = env.open().await;
    let missing = TaskId::new("missing").expect("valid task id");

    let result = board
        .upload_photo_to_task(&missing, jpeg("a.jpg", &[1]))
        .await;

    let Err(err) = result else {
        panic!("upload to unknown task should fail");
    };
    assert_eq!(err.kind(), FailureKind::NotFound);
    assert!(matches!(err, TaskBoardError::TaskNotFound(_)));
    assert!(
        board
            .photos()
            .get_all_photos()
            .await
            .expect("listing should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_attached_photo_cleans_up_the_task(env: BoardEnv) {
    let board = env.open().await;
    let task = board
        .tasks()
        .get_task_by_name("gardening")
        .await
        .expect("lookup should succeed")
        .expect("seeded task should exist");
    let (_, photo) = board
        .upload_photo_to_task(task.id(), jpeg("lawn.jpg", &[4, 5, 6]))
        .await
        .expect("upload to task should succeed");

    assert!(board.delete_photo(photo.id()).await.expect("delete"));
    assert!(!board.delete_photo(photo.id()).await.expect("second delete"));

    let reloaded = board
        .tasks()
        .get_task_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert!(reloaded.photos().is_empty());
    assert!(!env.upload_dir().join(photo.filename().as_str()).exists());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_task_keeps_its_photos(env: BoardEnv) {
    let board = env.open().await;
    let task = board
        .tasks()
        .get_task_by_name("painting")
        .await
        .expect("lookup should succeed")
        .expect("seeded task should exist");
    let (_, photo) = board
        .upload_photo_to_task(task.id(), jpeg("fence.jpg", &[7]))
        .await
        .expect("upload to task should succeed");

    assert!(board.remove_task(task.id()).await.expect("remove"));

    assert!(
        board
            .photos()
            .get_photos_by_task_id(task.id())
            .await
            .expect("listing should succeed")
            .is_empty()
    );
    assert!(
        board
            .photos()
            .get_photo(photo.id())
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_task_removed_by_name_leaves_no_photos_for_its_successor(env: BoardEnv) {
    let board = env.open().await;
    let task = board
        .tasks()
        .add_task(CreateTaskRequest::new("roofing", Priority::Medium).with_id("roof"))
        .await
        .expect("task creation should succeed");
    board
        .upload_photo_to_task(task.id(), jpeg("roof.jpg", &[5, 5]))
        .await
        .expect("upload to task should succeed");

    assert!(board.remove_task_by_name("Roofing").await.expect("remove"));
    let successor = board
        .tasks()
        .add_task(CreateTaskRequest::new("re-roofing", Priority::Low).with_id("roof"))
        .await
        .expect("task creation should succeed");

    assert!(successor.photos().is_empty());
    assert!(
        board
            .photos()
            .get_photos_by_task_id(successor.id())
            .await
            .expect("listing should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_payload_limit_follows_the_configuration(env: BoardEnv) {
    let board = env.open().await;

    assert_eq!(board.photos().max_payload_bytes(), env.config.max_photo_bytes);
}
