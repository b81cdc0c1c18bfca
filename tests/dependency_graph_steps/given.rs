//! Given steps for dependency graph BDD scenarios.

use super::world::DependencyWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskpilot::task::domain::TaskDraft;

#[given(r#"a task titled "{title}""#)]
fn task_titled(world: &mut DependencyWorld, title: String) -> Result<(), eyre::Report> {
    let task = world
        .repository
        .create(TaskDraft::new(title.as_str())?)
        .wrap_err("create scenario task")?;
    world.ids_by_title.insert(title, task.id().clone());
    Ok(())
}

#[given(r#""{task}" depends on "{dependency}""#)]
fn task_depends_on(
    world: &mut DependencyWorld,
    task: String,
    dependency: String,
) -> Result<(), eyre::Report> {
    let task_id = world.id_of(&task)?;
    let dependency_id = world.id_of(&dependency)?;
    let added = world
        .repository
        .add_dependency(&task_id, &dependency_id)
        .wrap_err("add scenario dependency")?;
    if !added {
        return Err(eyre::eyre!("setup edge {task} -> {dependency} was rejected"));
    }
    Ok(())
}
