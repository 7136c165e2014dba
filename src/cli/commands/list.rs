//! currmap list - List every stored entity of one kind

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::core::skill_set::join_skills;
use crate::core::{Entity, EntityKind, RequiredSkills};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// skill, course, standard or job (plurals accepted)
    pub kind: EntityKind,
}

#[derive(Serialize)]
struct ListOutput {
    kind: EntityKind,
    count: usize,
    items: Vec<Entity>,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let items = ctx.db.get_all(args.kind)?;

    if ctx.robot_mode {
        return super::emit_data(
            ctx,
            ListOutput {
                kind: args.kind,
                count: items.len(),
                items,
            },
        );
    }

    list_human(args.kind, &items);
    Ok(())
}

fn list_human(kind: EntityKind, items: &[Entity]) {
    if items.is_empty() {
        println!("{}", format!("No {kind}s found").dimmed());
        println!();
        println!("Load data with: currmap seed | currmap ingest <FILE>");
        return;
    }

    let label = if kind == EntityKind::Job { "TITLE" } else { "NAME" };
    println!("{:12} {:32} {}", "ID".bold(), label.bold(), "DETAIL".bold());
    println!("{}", "─".repeat(84).dimmed());
    for item in items {
        println!("{:12} {:32} {}", item.id(), item.label(), detail(item));
    }
    println!();
    println!("{} {} {kind}s", "Total:".dimmed(), items.len());
}

/// Short per-kind summary column.
pub(crate) fn detail(entity: &Entity) -> String {
    match entity {
        Entity::Skill(skill) => skill.description.clone(),
        Entity::Course(course) => format!(
            "{} objectives; skills: {}",
            course.objectives.len(),
            join_skills(&course.effective_skill_set())
        ),
        Entity::Standard(standard) => join_skills(&standard.skills),
        Entity::Job(job) => join_skills(&job.skills),
    }
}
