//! SQLite-backed adapter

use crate::{EntitySnapshot, StoreError};
use ministerial_domain::{EntityStore, FamilyLink, Gender, Role, Student, StudentId};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite mirror of the `students` and `family_members` tables
///
/// Reads serve the pairing engine through [`EntityStore`]; the write helpers
/// exist so operators and tests can load data without the upstream service.
///
/// # Thread Safety
///
/// The connection sits behind a mutex, so one store can be shared across
/// tasks. Every operation holds the lock only for its own statements.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.lock()?.execute_batch(schema)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Insert or update a student
    pub fn upsert_student(&self, student: &Student) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::write_student(&conn, student)?;
        Ok(())
    }

    /// Insert a declared family link
    pub fn insert_family_link(&self, link: &FamilyLink) -> Result<(), StoreError> {
        let conn = self.lock()?;
        Self::write_family_link(&conn, link)?;
        Ok(())
    }

    /// Replace both tables with the contents of `snapshot`
    ///
    /// Runs in one transaction: readers never observe a half-imported state.
    pub fn replace_all(&self, snapshot: &EntitySnapshot) -> Result<(), StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM family_members", [])?;
        tx.execute("DELETE FROM students", [])?;

        for student in &snapshot.students {
            Self::write_student(&tx, student)?;
        }
        for link in &snapshot.family_links {
            Self::write_family_link(&tx, link)?;
        }

        tx.commit()?;

        tracing::info!(
            "Imported {} students and {} family links",
            snapshot.students.len(),
            snapshot.family_links.len()
        );
        Ok(())
    }

    fn write_student(conn: &Connection, student: &Student) -> Result<(), StoreError> {
        if student.id.is_blank() {
            return Err(StoreError::InvalidData(format!(
                "student '{}' has a blank id",
                student.name
            )));
        }
        conn.execute(
            "INSERT INTO students (id, name, gender, age, active, parent_id, email, role)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
             name = excluded.name, gender = excluded.gender, age = excluded.age,
             active = excluded.active, parent_id = excluded.parent_id,
             email = excluded.email, role = excluded.role",
            params![
                student.id.as_str(),
                &student.name,
                student.gender.as_str(),
                student.age,
                student.active,
                student.parent_id.as_ref().map(|id| id.as_str()),
                &student.email,
                student.role.as_str(),
            ],
        )?;
        Ok(())
    }

    fn write_family_link(conn: &Connection, link: &FamilyLink) -> Result<(), StoreError> {
        conn.execute(
            "INSERT INTO family_members (student_id, name, email, phone, gender, relation)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                link.student_id.as_ref().map(|id| id.as_str()),
                &link.name,
                &link.email,
                &link.phone,
                link.gender.map(|g| g.as_str()),
                &link.relation,
            ],
        )?;
        Ok(())
    }

    /// Read every student; rows with an unrecognised gender are skipped
    fn load_students(&self) -> Result<Vec<Student>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, gender, age, active, parent_id, email, role
             FROM students ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                let gender: String = row.get(2)?;
                Ok((Self::row_to_student(row)?, gender))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut students = Vec::with_capacity(rows.len());
        for (student, raw_gender) in rows {
            match student {
                Some(student) => students.push(student),
                None => tracing::warn!("Skipping student row with unknown gender '{}'", raw_gender),
            }
        }
        Ok(students)
    }

    fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Option<Student>> {
        let gender: String = row.get(2)?;
        let Some(gender) = Gender::parse(&gender) else {
            return Ok(None);
        };

        let id: String = row.get(0)?;
        let parent_id: Option<String> = row.get(5)?;
        let role: String = row.get(7)?;

        Ok(Some(Student {
            id: StudentId::new(id),
            name: row.get(1)?,
            gender,
            age: row.get(3)?,
            active: row.get(4)?,
            parent_id: parent_id.map(StudentId::new),
            email: row.get(6)?,
            role: Role::parse(&role).unwrap_or_default(),
        }))
    }

    /// Read every family link, malformed ones included
    fn load_family_links(&self) -> Result<Vec<FamilyLink>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT student_id, name, email, phone, gender, relation
             FROM family_members ORDER BY id",
        )?;

        let links = stmt
            .query_map([], |row| {
                let student_id: Option<String> = row.get(0)?;
                let gender: Option<String> = row.get(4)?;
                Ok(FamilyLink {
                    student_id: student_id.map(StudentId::new),
                    name: row.get(1)?,
                    email: row.get(2)?,
                    phone: row.get(3)?,
                    gender: gender.as_deref().and_then(Gender::parse),
                    relation: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(links)
    }
}

impl EntityStore for SqliteStore {
    type Error = StoreError;

    async fn fetch_all_students(&self) -> Result<Vec<Student>, Self::Error> {
        self.load_students()
    }

    async fn fetch_all_family_links(&self) -> Result<Vec<FamilyLink>, Self::Error> {
        self.load_family_links()
    }
}
