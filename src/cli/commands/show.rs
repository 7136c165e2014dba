//! currmap show - Show one entity with its skills

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::core::{Entity, EntityKind, SkillSet};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// skill, course, standard or job
    pub kind: EntityKind,

    /// Entity id
    pub id: String,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let entity = ctx.db.get(args.kind, &args.id)?;

    if ctx.robot_mode {
        return super::emit_data(ctx, entity);
    }

    show_human(ctx, &entity)
}

fn show_human(ctx: &AppContext, entity: &Entity) -> Result<()> {
    println!("{}", entity.label().bold());
    println!("{}", "═".repeat(entity.label().chars().count().max(3)));
    println!("{}: {}", "Kind".dimmed(), entity.kind());
    println!("{}: {}", "ID".dimmed(), entity.id());

    match entity {
        Entity::Skill(skill) => {
            if !skill.description.is_empty() {
                println!("{}: {}", "Description".dimmed(), skill.description);
            }
        }
        Entity::Standard(standard) => {
            if !standard.description.is_empty() {
                println!("{}: {}", "Description".dimmed(), standard.description);
            }
            print_skills(ctx, "Required skills", &standard.skills)?;
        }
        Entity::Job(job) => print_skills(ctx, "Required skills", &job.skills)?,
        Entity::Course(course) => {
            println!();
            println!("{}", "Objectives".bold());
            for objective in &course.objectives {
                let difficulty = objective
                    .difficulty
                    .map(|level| format!(" (difficulty {level})"))
                    .unwrap_or_default();
                println!("  {} {}{difficulty}", objective.id.cyan(), objective.description);
                for skill_id in &objective.skills {
                    println!("    - {}", skill_label(ctx, skill_id)?);
                }
            }
        }
    }
    Ok(())
}

fn print_skills(ctx: &AppContext, heading: &str, skills: &SkillSet) -> Result<()> {
    println!();
    println!("{}", heading.bold());
    if skills.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for skill_id in skills {
        println!("  - {}", skill_label(ctx, skill_id)?);
    }
    Ok(())
}

fn skill_label(ctx: &AppContext, skill_id: &str) -> Result<String> {
    Ok(match ctx.db.get_skill(skill_id)? {
        Some(skill) => format!("{skill_id} ({})", skill.name),
        None => skill_id.to_string(),
    })
}
