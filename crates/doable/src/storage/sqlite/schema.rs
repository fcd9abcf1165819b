//! SQLite schema definitions and SQL query constants.
//!
//! All fixed SQL statements used by the repository live here as pure data.
//! UPDATE statements are the one exception: their SET clauses are built at
//! runtime by `doable_core::storage::UpdateSet` from the sparse patch.

/// SQL statement to create all tables. Safe to run on every startup.
pub const CREATE_TABLES: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT,
    email TEXT NOT NULL,
    role TEXT NOT NULL,
    password TEXT NOT NULL,
    avatar TEXT,
    status TEXT NOT NULL,
    data TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Projects table
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    slug TEXT NOT NULL,
    description TEXT,
    owner_id INTEGER NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Tasks table
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    status INTEGER NOT NULL,
    project_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    data TEXT NOT NULL,
    attachments TEXT NOT NULL,
    comments TEXT NOT NULL,
    tags TEXT NOT NULL,
    labels TEXT NOT NULL,
    assignees TEXT NOT NULL,
    priority INTEGER NOT NULL,
    type TEXT NOT NULL,
    subtasks TEXT NOT NULL,
    due_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Sprints table
CREATE TABLE IF NOT EXISTS sprints (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    status INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    data TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Generic data records table
CREATE TABLE IF NOT EXISTS data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    data TEXT NOT NULL,
    status INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_data_name ON data(name);
"#;

// User queries. The password column is only ever selected by the
// credentials lookup; every other projection omits it.

pub const INSERT_USER: &str = r#"
INSERT INTO users (username, email, role, password, avatar, status, data, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub const SELECT_USERS: &str = r#"
SELECT id, username, email, role, avatar, status, data, created_at, updated_at
FROM users
ORDER BY created_at DESC
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, username, email, role, avatar, status, data, created_at, updated_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_CREDENTIALS_BY_EMAIL: &str = r#"
SELECT id, username, email, role, avatar, status, data, created_at, updated_at, password
FROM users
WHERE email = ?1
"#;

pub const COUNT_USERS: &str = r#"
SELECT COUNT(*) FROM users
"#;

// Project queries

pub const INSERT_PROJECT: &str = r#"
INSERT INTO projects (name, slug, description, owner_id, status, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_PROJECTS: &str = r#"
SELECT p.id, p.name, p.slug, p.description, p.owner_id, p.status,
       u.username AS owner_name, p.created_at, p.updated_at
FROM projects p
LEFT JOIN users u ON p.owner_id = u.id
ORDER BY p.created_at DESC
"#;

pub const SELECT_PROJECT_BY_ID: &str = r#"
SELECT p.id, p.name, p.slug, p.description, p.owner_id, p.status,
       u.username AS owner_name, p.created_at, p.updated_at
FROM projects p
LEFT JOIN users u ON p.owner_id = u.id
WHERE p.id = ?1
"#;

// Task queries

pub const INSERT_TASK: &str = r#"
INSERT INTO tasks (title, description, status, project_id, user_id, data, attachments, comments,
                   tags, labels, assignees, priority, type, subtasks, due_date, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
"#;

pub const SELECT_TASKS: &str = r#"
SELECT t.id, t.title, t.description, t.status, t.project_id, t.user_id,
       t.data, t.attachments, t.comments, t.tags, t.labels, t.assignees, t.subtasks,
       t.priority, t.type, t.due_date,
       p.name AS project_name, p.slug AS project_slug, u.username AS user_name,
       t.created_at, t.updated_at
FROM tasks t
LEFT JOIN projects p ON t.project_id = p.id
LEFT JOIN users u ON t.user_id = u.id
ORDER BY t.created_at DESC
"#;

pub const SELECT_TASK_BY_ID: &str = r#"
SELECT t.id, t.title, t.description, t.status, t.project_id, t.user_id,
       t.data, t.attachments, t.comments, t.tags, t.labels, t.assignees, t.subtasks,
       t.priority, t.type, t.due_date,
       p.name AS project_name, p.slug AS project_slug, u.username AS user_name,
       t.created_at, t.updated_at
FROM tasks t
LEFT JOIN projects p ON t.project_id = p.id
LEFT JOIN users u ON t.user_id = u.id
WHERE t.id = ?1
"#;

pub const SELECT_TASK_BY_ID_AND_PROJECT_SLUG: &str = r#"
SELECT t.id, t.title, t.description, t.status, t.project_id, t.user_id,
       t.data, t.attachments, t.comments, t.tags, t.labels, t.assignees, t.subtasks,
       t.priority, t.type, t.due_date,
       p.name AS project_name, p.slug AS project_slug, u.username AS user_name,
       t.created_at, t.updated_at
FROM tasks t
LEFT JOIN projects p ON t.project_id = p.id
LEFT JOIN users u ON t.user_id = u.id
WHERE t.id = ?1 AND p.slug = ?2
"#;

pub const DELETE_TASK: &str = r#"
DELETE FROM tasks
WHERE id = ?1
"#;

// Sprint queries

pub const INSERT_SPRINT: &str = r#"
INSERT INTO sprints (name, description, status, user_id, data, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_SPRINTS: &str = r#"
SELECT s.id, s.name, s.description, s.status, s.user_id, s.data,
       u.username AS user_name, s.created_at, s.updated_at
FROM sprints s
LEFT JOIN users u ON s.user_id = u.id
ORDER BY s.created_at DESC
"#;

pub const SELECT_SPRINT_BY_ID: &str = r#"
SELECT s.id, s.name, s.description, s.status, s.user_id, s.data,
       u.username AS user_name, s.created_at, s.updated_at
FROM sprints s
LEFT JOIN users u ON s.user_id = u.id
WHERE s.id = ?1
"#;

pub const DELETE_SPRINT: &str = r#"
DELETE FROM sprints
WHERE id = ?1
"#;

// Data record queries

pub const INSERT_DATA_RECORD: &str = r#"
INSERT INTO data (name, data, status, user_id, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_DATA_RECORDS: &str = r#"
SELECT d.id, d.name, d.data, d.status, d.user_id,
       u.username AS user_name, d.created_at, d.updated_at
FROM data d
LEFT JOIN users u ON d.user_id = u.id
ORDER BY d.created_at DESC
"#;

pub const SELECT_DATA_RECORD_BY_ID: &str = r#"
SELECT d.id, d.name, d.data, d.status, d.user_id,
       u.username AS user_name, d.created_at, d.updated_at
FROM data d
LEFT JOIN users u ON d.user_id = u.id
WHERE d.id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_covers_all_entities() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS projects"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS tasks"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS sprints"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS data"));
        assert!(CREATE_TABLES.contains("idx_data_name"));
    }

    #[test]
    fn test_data_name_is_unique() {
        assert!(CREATE_TABLES.contains("name TEXT NOT NULL UNIQUE"));
    }

    #[test]
    fn test_user_projections_omit_password() {
        for query in [SELECT_USERS, SELECT_USER_BY_ID] {
            assert!(!query.contains("password"));
        }
        assert!(SELECT_CREDENTIALS_BY_EMAIL.contains("password"));
    }

    #[test]
    fn test_list_queries_order_newest_first() {
        for query in [
            SELECT_USERS,
            SELECT_PROJECTS,
            SELECT_TASKS,
            SELECT_SPRINTS,
            SELECT_DATA_RECORDS,
        ] {
            assert!(query.contains("created_at DESC"));
        }
    }

    #[test]
    fn test_joined_reads_use_left_joins() {
        for query in [SELECT_TASKS, SELECT_PROJECTS, SELECT_SPRINTS, SELECT_DATA_RECORDS] {
            assert!(query.contains("LEFT JOIN users"));
        }
        assert!(SELECT_TASK_BY_ID_AND_PROJECT_SLUG.contains("p.slug = ?2"));
    }
}
