//! When steps for dependency graph BDD scenarios.

use super::world::DependencyWorld;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{task}" is made to depend on "{dependency}""#)]
fn make_dependent(
    world: &mut DependencyWorld,
    task: String,
    dependency: String,
) -> Result<(), eyre::Report> {
    let task_id = world.id_of(&task)?;
    let dependency_id = world.id_of(&dependency)?;
    let accepted = world
        .repository
        .add_dependency(&task_id, &dependency_id)
        .wrap_err("add dependency")?;
    world.last_request_accepted = Some(accepted);
    Ok(())
}

#[when(r#"the dependency of "{task}" on "{dependency}" is removed"#)]
fn remove_dependency(
    world: &mut DependencyWorld,
    task: String,
    dependency: String,
) -> Result<(), eyre::Report> {
    let task_id = world.id_of(&task)?;
    let dependency_id = world.id_of(&dependency)?;
    let removed = world
        .repository
        .remove_dependency(&task_id, &dependency_id)
        .wrap_err("remove dependency")?;
    if !removed {
        return Err(eyre::eyre!("edge {task} -> {dependency} was not present"));
    }
    Ok(())
}

#[when(r#"the dependency closure of "{task}" is requested"#)]
fn request_closure(world: &mut DependencyWorld, task: String) -> Result<(), eyre::Report> {
    let task_id = world.id_of(&task)?;
    let closure = world
        .repository
        .transitive_closure(&task_id)
        .wrap_err("compute transitive closure")?;
    world.last_closure = Some(closure);
    Ok(())
}
