//! SQLite entity store

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{
    Course, Entity, EntityKind, IndustryStandard, JobRequirement, LearningObjective, Skill,
    SkillSet, normalize_keyword,
};
use crate::error::{CmError, Result};
use crate::storage::migrations;

/// What hydration does with a join row whose skill id has no `skills` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    /// Omit the id from the resolved set and record it.
    #[default]
    Lossy,
    /// Fail the read with [`CmError::DanglingReference`].
    Strict,
}

/// A skill reference that hydration dropped under [`ReferencePolicy::Lossy`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DroppedReference {
    pub kind: EntityKind,
    pub entity_id: String,
    /// Objective holding the reference when `kind` is a course.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective_id: Option<String>,
    pub skill_id: String,
}

impl std::fmt::Display for DroppedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.entity_id)?;
        if let Some(objective_id) = &self.objective_id {
            write!(f, " (objective {objective_id})")?;
        }
        write!(f, " references unknown skill {}", self.skill_id)
    }
}

/// Row counts per table family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoreCounts {
    pub skills: u64,
    pub courses: u64,
    pub objectives: u64,
    pub standards: u64,
    pub jobs: u64,
}

/// Outcome of folding the keyword tables into the skill-id schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct KeywordImport {
    /// Associations written to the skill-id join tables.
    pub imported: usize,
    /// Keyword rows left in place because their owner does not exist.
    pub skipped: usize,
    /// Vocabulary entries created for previously unknown keywords.
    pub skills_created: usize,
}

/// SQLite database wrapper for the curriculum store.
///
/// One connection, opened once and closed on drop. Every `put_*` runs in its
/// own transaction and is committed before returning.
pub struct Database {
    conn: Connection,
    schema_version: u32,
    reference_policy: ReferencePolicy,
    dropped: RefCell<BTreeSet<DroppedReference>>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("schema_version", &self.schema_version)
            .field("reference_policy", &self.reference_policy)
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Open database at the given path, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened store");
        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        Self::configure_pragmas(&conn)?;
        let schema_version = migrations::run_migrations(&conn)?;

        Ok(Self {
            conn,
            schema_version,
            reference_policy: ReferencePolicy::default(),
            dropped: RefCell::new(BTreeSet::new()),
        })
    }

    #[must_use]
    pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.reference_policy = policy;
        self
    }

    /// Get a reference to the connection
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Current schema version after migrations.
    pub const fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub const fn reference_policy(&self) -> ReferencePolicy {
        self.reference_policy
    }

    /// References dropped by lossy hydration since the store was opened.
    pub fn dropped_references(&self) -> Vec<DroppedReference> {
        self.dropped.borrow().iter().cloned().collect()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Persist or overwrite any entity together with its associations.
    pub fn put(&self, entity: &Entity) -> Result<()> {
        match entity {
            Entity::Skill(skill) => self.put_skill(skill),
            Entity::Course(course) => self.put_course(course),
            Entity::Standard(standard) => self.put_standard(standard),
            Entity::Job(job) => self.put_job(job),
        }
    }

    pub fn put_skill(&self, skill: &Skill) -> Result<()> {
        self.conn.execute(
            "INSERT INTO skills (id, name, description) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description",
            params![skill.id, skill.name, skill.description],
        )?;
        debug!(skill_id = %skill.id, "stored skill");
        Ok(())
    }

    /// Write a standard and replace its skill associations.
    pub fn put_standard(&self, standard: &IndustryStandard) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO industry_standards (id, name, description) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description",
            params![standard.id, standard.name, standard.description],
        )?;
        tx.execute(
            "DELETE FROM industry_standard_skills WHERE standard_id = ?1",
            [&standard.id],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO industry_standard_skills (standard_id, skill_id) VALUES (?1, ?2)",
            )?;
            for skill_id in &standard.skills {
                stmt.execute(params![standard.id, skill_id])?;
            }
        }
        tx.commit()?;
        debug!(standard_id = %standard.id, skills = standard.skills.len(), "stored standard");
        Ok(())
    }

    /// Write a job requirement and replace its skill associations.
    pub fn put_job(&self, job: &JobRequirement) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO job_requirements (id, job_title) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET job_title = excluded.job_title",
            params![job.id, job.title],
        )?;
        tx.execute(
            "DELETE FROM job_requirement_skills WHERE job_id = ?1",
            [&job.id],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO job_requirement_skills (job_id, skill_id) VALUES (?1, ?2)",
            )?;
            for skill_id in &job.skills {
                stmt.execute(params![job.id, skill_id])?;
            }
        }
        tx.commit()?;
        debug!(job_id = %job.id, skills = job.skills.len(), "stored job requirement");
        Ok(())
    }

    /// Write a course, replacing its whole objective set.
    ///
    /// Objectives the new value no longer lists are removed; an objective id
    /// that belonged to another course moves to this one.
    pub fn put_course(&self, course: &Course) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO courses (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            params![course.id, course.name],
        )?;
        tx.execute(
            "DELETE FROM learning_objective_skills WHERE objective_id IN
                (SELECT id FROM learning_objectives WHERE course_id = ?1)",
            [&course.id],
        )?;
        tx.execute(
            "DELETE FROM learning_objectives WHERE course_id = ?1",
            [&course.id],
        )?;
        {
            let mut clear_links =
                tx.prepare("DELETE FROM learning_objective_skills WHERE objective_id = ?1")?;
            let mut upsert_objective = tx.prepare(
                "INSERT INTO learning_objectives (id, course_id, position, description, difficulty)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                    course_id = excluded.course_id,
                    position = excluded.position,
                    description = excluded.description,
                    difficulty = excluded.difficulty",
            )?;
            let mut insert_link = tx.prepare(
                "INSERT OR IGNORE INTO learning_objective_skills (objective_id, skill_id) VALUES (?1, ?2)",
            )?;
            for (position, objective) in course.objectives.iter().enumerate() {
                clear_links.execute([&objective.id])?;
                #[allow(clippy::cast_possible_wrap)]
                let position = position as i64;
                upsert_objective.execute(params![
                    objective.id,
                    course.id,
                    position,
                    objective.description,
                    objective.difficulty,
                ])?;
                for skill_id in &objective.skills {
                    insert_link.execute(params![objective.id, skill_id])?;
                }
            }
        }
        tx.commit()?;
        debug!(
            course_id = %course.id,
            objectives = course.objectives.len(),
            "stored course"
        );
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Every persisted entity of `kind`, hydrated, in store order.
    pub fn get_all(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        Ok(match kind {
            EntityKind::Skill => self.list_skills()?.into_iter().map(Entity::Skill).collect(),
            EntityKind::Course => self.list_courses()?.into_iter().map(Entity::Course).collect(),
            EntityKind::Standard => self
                .list_standards()?
                .into_iter()
                .map(Entity::Standard)
                .collect(),
            EntityKind::Job => self.list_jobs()?.into_iter().map(Entity::Job).collect(),
        })
    }

    /// A single hydrated entity, or [`CmError::NotFound`].
    pub fn get(&self, kind: EntityKind, id: &str) -> Result<Entity> {
        let found = match kind {
            EntityKind::Skill => self.get_skill(id)?.map(Entity::Skill),
            EntityKind::Course => self.get_course(id)?.map(Entity::Course),
            EntityKind::Standard => self.get_standard(id)?.map(Entity::Standard),
            EntityKind::Job => self.get_job(id)?.map(Entity::Job),
        };
        found.ok_or_else(|| CmError::NotFound {
            kind,
            id: id.to_string(),
        })
    }

    pub fn get_skill(&self, id: &str) -> Result<Option<Skill>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, description FROM skills WHERE id = ?1",
                [id],
                skill_from_row,
            )
            .optional()?)
    }

    pub fn list_skills(&self) -> Result<Vec<Skill>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description FROM skills ORDER BY rowid")?;
        let rows = stmt.query_map([], skill_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_standard(&self, id: &str) -> Result<Option<IndustryStandard>> {
        let row: Option<(String, String, String)> = self
            .conn
            .query_row(
                "SELECT id, name, description FROM industry_standards WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        row.map(|(id, name, description)| self.hydrate_standard(id, name, description))
            .transpose()
    }

    pub fn list_standards(&self) -> Result<Vec<IndustryStandard>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description FROM industry_standards ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<rusqlite::Result<Vec<(String, String, String)>>>()?;
        rows.into_iter()
            .map(|(id, name, description)| self.hydrate_standard(id, name, description))
            .collect()
    }

    fn hydrate_standard(
        &self,
        id: String,
        name: String,
        description: String,
    ) -> Result<IndustryStandard> {
        let skills = self.resolve_skill_links(
            "SELECT j.skill_id, s.id IS NOT NULL FROM industry_standard_skills j
             LEFT JOIN skills s ON s.id = j.skill_id
             WHERE j.standard_id = ?1",
            EntityKind::Standard,
            &id,
            None,
        )?;
        Ok(IndustryStandard {
            id,
            name,
            description,
            skills,
        })
    }

    pub fn get_job(&self, id: &str) -> Result<Option<JobRequirement>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT id, job_title FROM job_requirements WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        row.map(|(id, title)| self.hydrate_job(id, title)).transpose()
    }

    pub fn list_jobs(&self) -> Result<Vec<JobRequirement>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, job_title FROM job_requirements ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(String, String)>>>()?;
        rows.into_iter()
            .map(|(id, title)| self.hydrate_job(id, title))
            .collect()
    }

    fn hydrate_job(&self, id: String, title: String) -> Result<JobRequirement> {
        let skills = self.resolve_skill_links(
            "SELECT j.skill_id, s.id IS NOT NULL FROM job_requirement_skills j
             LEFT JOIN skills s ON s.id = j.skill_id
             WHERE j.job_id = ?1",
            EntityKind::Job,
            &id,
            None,
        )?;
        Ok(JobRequirement { id, title, skills })
    }

    pub fn get_course(&self, id: &str) -> Result<Option<Course>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT id, name FROM courses WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        row.map(|(id, name)| self.hydrate_course(id, name)).transpose()
    }

    pub fn list_courses(&self) -> Result<Vec<Course>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM courses ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(String, String)>>>()?;
        rows.into_iter()
            .map(|(id, name)| self.hydrate_course(id, name))
            .collect()
    }

    fn hydrate_course(&self, id: String, name: String) -> Result<Course> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, difficulty FROM learning_objectives
             WHERE course_id = ?1 ORDER BY position, rowid",
        )?;
        let rows = stmt
            .query_map([&id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<rusqlite::Result<Vec<(String, String, Option<i64>)>>>()?;

        let mut objectives = Vec::with_capacity(rows.len());
        for (objective_id, description, difficulty) in rows {
            let skills = self.resolve_skill_links(
                "SELECT j.skill_id, s.id IS NOT NULL FROM learning_objective_skills j
                 LEFT JOIN skills s ON s.id = j.skill_id
                 WHERE j.objective_id = ?1",
                EntityKind::Course,
                &id,
                Some(objective_id.as_str()),
            )?;
            objectives.push(LearningObjective {
                id: objective_id,
                description,
                difficulty,
                skills,
            });
        }

        Ok(Course {
            id,
            name,
            objectives,
        })
    }

    /// Resolve one owner's join rows against the vocabulary.
    ///
    /// `sql` must select `(skill_id, resolved)` for owner `?1`, which is the
    /// objective id when one is given and `entity_id` otherwise.
    fn resolve_skill_links(
        &self,
        sql: &str,
        kind: EntityKind,
        entity_id: &str,
        objective_id: Option<&str>,
    ) -> Result<SkillSet> {
        let owner_id = objective_id.unwrap_or(entity_id);
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt
            .query_map([owner_id], |row| Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut skills = SkillSet::new();
        for (skill_id, resolved) in rows {
            if resolved {
                skills.insert(skill_id);
                continue;
            }
            match self.reference_policy {
                ReferencePolicy::Strict => {
                    return Err(CmError::DanglingReference {
                        kind,
                        id: entity_id.to_string(),
                        objective_id: objective_id.map(str::to_string),
                        skill_id,
                    });
                }
                ReferencePolicy::Lossy => {
                    warn!(
                        kind = %kind,
                        entity_id = %entity_id,
                        objective_id = ?objective_id,
                        skill_id = %skill_id,
                        "dropping reference to unknown skill"
                    );
                    self.dropped.borrow_mut().insert(DroppedReference {
                        kind,
                        entity_id: entity_id.to_string(),
                        objective_id: objective_id.map(str::to_string),
                        skill_id,
                    });
                }
            }
        }
        Ok(skills)
    }

    /// Row counts for each entity kind.
    pub fn counts(&self) -> Result<StoreCounts> {
        Ok(StoreCounts {
            skills: self.count_rows("skills")?,
            courses: self.count_rows("courses")?,
            objectives: self.count_rows("learning_objectives")?,
            standards: self.count_rows("industry_standards")?,
            jobs: self.count_rows("job_requirements")?,
        })
    }

    fn count_rows(&self, table: &str) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count.max(0).unsigned_abs())
    }

    // =========================================================================
    // Keyword schema
    // =========================================================================

    /// Fold rows of the keyword tables into the skill-id schema.
    ///
    /// Each keyword becomes a skill id via [`normalize_keyword`]; unknown ids
    /// get a vocabulary entry named after the keyword. Imported rows are
    /// removed from the keyword tables; rows whose owner is missing stay.
    pub fn import_keyword_tables(&self) -> Result<KeywordImport> {
        let tx = self.conn.unchecked_transaction()?;
        let mut report = KeywordImport::default();

        let sources = [
            (
                "SELECT k.objective_id, k.keyword, o.id IS NOT NULL FROM objective_keywords k
                 LEFT JOIN learning_objectives o ON o.id = k.objective_id",
                "INSERT OR IGNORE INTO learning_objective_skills (objective_id, skill_id) VALUES (?1, ?2)",
                "DELETE FROM objective_keywords WHERE objective_id = ?1 AND keyword = ?2",
            ),
            (
                "SELECT k.standard_id, k.keyword, s.id IS NOT NULL FROM standard_keywords k
                 LEFT JOIN industry_standards s ON s.id = k.standard_id",
                "INSERT OR IGNORE INTO industry_standard_skills (standard_id, skill_id) VALUES (?1, ?2)",
                "DELETE FROM standard_keywords WHERE standard_id = ?1 AND keyword = ?2",
            ),
            (
                "SELECT k.job_id, k.skill, j.id IS NOT NULL FROM job_skills k
                 LEFT JOIN job_requirements j ON j.id = k.job_id",
                "INSERT OR IGNORE INTO job_requirement_skills (job_id, skill_id) VALUES (?1, ?2)",
                "DELETE FROM job_skills WHERE job_id = ?1 AND skill = ?2",
            ),
        ];

        {
            let mut create_skill = tx.prepare(
                "INSERT OR IGNORE INTO skills (id, name, description) VALUES (?1, ?2, '')",
            )?;
            for (select_sql, link_sql, delete_sql) in sources {
                let rows = {
                    let mut stmt = tx.prepare(select_sql)?;
                    stmt.query_map([], |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, bool>(2)?,
                        ))
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?
                };
                let mut link = tx.prepare(link_sql)?;
                let mut delete = tx.prepare(delete_sql)?;
                for (owner_id, keyword, owner_exists) in rows {
                    if !owner_exists {
                        report.skipped += 1;
                        continue;
                    }
                    let skill_id = normalize_keyword(&keyword);
                    if skill_id.is_empty() {
                        delete.execute(params![owner_id, keyword])?;
                        continue;
                    }
                    report.skills_created += create_skill.execute(params![skill_id, keyword.trim()])?;
                    link.execute(params![owner_id, skill_id])?;
                    delete.execute(params![owner_id, keyword])?;
                    report.imported += 1;
                }
            }
        }

        tx.commit()?;
        info!(
            imported = report.imported,
            skipped = report.skipped,
            skills_created = report.skills_created,
            "imported keyword tables"
        );
        Ok(report)
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(())
    }
}

fn skill_from_row(row: &Row<'_>) -> rusqlite::Result<Skill> {
    Ok(Skill {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}
