//! When steps for task photo attachment scenarios.

use super::world::{TaskPhotoWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::photo::services::UploadPhotoRequest;
use taskboard::task::{
    domain::{PageRequest, Priority},
    services::CreateTaskRequest,
};

#[when("page {page:usize} of size {size:usize} is requested")]
fn request_page(world: &mut TaskPhotoWorld, page: usize, size: usize) -> Result<(), eyre::Report> {
    let request = PageRequest::new(page, size).wrap_err("build page request")?;
    let result = run_async(world.board()?.tasks().get_tasks_paged(request))
        .wrap_err("request task page")?;
    world.last_page = Some(result);
    Ok(())
}

#[when(r#"a photo "{name}" of {size:usize} bytes is uploaded"#)]
fn upload_photo(world: &mut TaskPhotoWorld, name: String, size: usize) -> Result<(), eyre::Report> {
    let request = UploadPhotoRequest::new(name, "image/jpeg", vec![7_u8; size]);
    let photo = run_async(world.board()?.photos().upload_photo(request))
        .wrap_err("upload photo")?;
    world.last_photo = Some(photo);
    Ok(())
}

#[when(r#"the photo is attached to the task "{name}""#)]
fn attach_photo(world: &mut TaskPhotoWorld, name: String) -> Result<(), eyre::Report> {
    let task = world.task_named(&name)?;
    let photo_id = world.photo()?.id().clone();
    let attached = run_async(
        world
            .board()?
            .attachments()
            .add_photo_to_task(task.id(), &photo_id),
    )
    .wrap_err("attach photo")?;
    if attached.is_none() {
        return Err(eyre::eyre!("task {name} vanished while attaching"));
    }
    Ok(())
}

#[when(r#"a task named "{name}" is created"#)]
fn create_task(world: &mut TaskPhotoWorld, name: String) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(name, Priority::Low);
    let result = run_async(world.board()?.tasks().add_task(request));
    world.last_create_result = Some(result);
    Ok(())
}

#[when("the uploaded photo is deleted")]
fn delete_photo(world: &mut TaskPhotoWorld) -> Result<(), eyre::Report> {
    let photo_id = world.photo()?.id().clone();
    let deleted = run_async(world.board()?.delete_photo(&photo_id)).wrap_err("delete photo")?;
    if !deleted {
        return Err(eyre::eyre!("expected photo {photo_id} to be deleted"));
    }
    let download = run_async(world.board()?.photos().download_photo(&photo_id));
    world.last_download = Some(download);
    Ok(())
}
