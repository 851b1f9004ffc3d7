//! Given steps for task photo attachment scenarios.

use super::world::{TaskPhotoWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::app::TaskBoard;

#[given("a task board seeded with the demonstration tasks")]
fn seeded_task_board(world: &mut TaskPhotoWorld) -> Result<(), eyre::Report> {
    world.config.seed_tasks = true;
    let board = run_async(TaskBoard::open(&world.config)).wrap_err("open task board")?;
    world.board = Some(board);
    Ok(())
}
