//! Then steps for task photo attachment scenarios.

use super::world::{TaskPhotoWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::photo::services::PhotoLibraryError;
use taskboard::task::services::TaskLifecycleError;

#[then("the page holds {count:usize} tasks across {pages:usize} page")]
fn page_holds_tasks(
    world: &TaskPhotoWorld,
    count: usize,
    pages: usize,
) -> Result<(), eyre::Report> {
    let page = world
        .last_page
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing page in scenario world"))?;
    if page.content.len() != count || page.total_elements != count {
        return Err(eyre::eyre!(
            "expected {count} tasks, found {} of {}",
            page.content.len(),
            page.total_elements
        ));
    }
    if page.total_pages != pages {
        return Err(eyre::eyre!(
            "expected {pages} pages, found {}",
            page.total_pages
        ));
    }
    Ok(())
}

#[then("the page has neither a next nor a previous page")]
fn page_is_alone(world: &TaskPhotoWorld) -> Result<(), eyre::Report> {
    let page = world
        .last_page
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing page in scenario world"))?;
    if page.has_next || page.has_previous {
        return Err(eyre::eyre!(
            "expected a single page, found has_next={} has_previous={}",
            page.has_next,
            page.has_previous
        ));
    }
    Ok(())
}

#[then(r#"the photo count of task "{name}" is {count:usize}"#)]
fn task_photo_count(
    world: &TaskPhotoWorld,
    name: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let task = world.task_named(&name)?;
    if task.photos().len() != count {
        return Err(eyre::eyre!(
            "expected {count} photos on {name}, found {}",
            task.photos().len()
        ));
    }
    Ok(())
}

#[then(r#"the photos indexed for task "{name}" include the uploaded photo"#)]
fn index_lists_photo(world: &TaskPhotoWorld, name: String) -> Result<(), eyre::Report> {
    let task = world.task_named(&name)?;
    let photo = world.photo()?;
    let indexed = run_async(world.board()?.photos().get_photos_by_task_id(task.id()))
        .map_err(|err| eyre::eyre!("index lookup failed: {err}"))?;
    if !indexed.contains(photo) {
        return Err(eyre::eyre!("photo {} is not indexed for {name}", photo.id()));
    }
    Ok(())
}

#[then("task creation fails with a duplicate name conflict")]
fn duplicate_name_conflict(world: &TaskPhotoWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result in scenario world"))?;
    if !matches!(result, Err(TaskLifecycleError::DuplicateName(_))) {
        return Err(eyre::eyre!("expected duplicate name error, got {result:?}"));
    }
    Ok(())
}

#[then("the uploaded photo can no longer be downloaded")]
fn photo_is_gone(world: &TaskPhotoWorld) -> Result<(), eyre::Report> {
    let download = world
        .last_download
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing download result in scenario world"))?;
    if !matches!(download, Err(PhotoLibraryError::NotFound(_))) {
        return Err(eyre::eyre!("expected photo to be gone, got {download:?}"));
    }
    Ok(())
}
