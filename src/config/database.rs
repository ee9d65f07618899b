use crate::domain::{
    activity::entity::activity,
    milestone::entity::{milestone, milestone_dependency},
    notification::entity::notification,
    project::entity::project,
    room::entity::{chat_message, room},
    sprint::entity::sprint,
    task::entity::{task, task_tag},
    user::entity::user,
    workspace::entity::{workspace, workspace_member},
};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement};
use tracing::info;

pub async fn establish_connection(
    database_url: &str,
    schema_update: bool,
) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!("Successfully connected to the database.");

    if schema_update {
        sync_schema(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

/// Create every table and composite index that does not exist yet.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    // Order matters for foreign keys! (Parent first, then Child)

    // 1. Independent Entities
    create_table_if_not_exists(db, &schema, user::Entity).await?;

    // 2. Workspace level
    create_table_if_not_exists(db, &schema, workspace::Entity).await?;
    create_table_if_not_exists(db, &schema, workspace_member::Entity).await?;
    create_table_if_not_exists(db, &schema, project::Entity).await?;

    // 3. Project level
    create_table_if_not_exists(db, &schema, sprint::Entity).await?;
    create_table_if_not_exists(db, &schema, task::Entity).await?;
    create_table_if_not_exists(db, &schema, milestone::Entity).await?;

    // 4. Join tables and logs
    create_table_if_not_exists(db, &schema, task_tag::Entity).await?;
    create_table_if_not_exists(db, &schema, milestone_dependency::Entity).await?;
    create_table_if_not_exists(db, &schema, activity::Entity).await?;
    create_table_if_not_exists(db, &schema, notification::Entity).await?;

    // 5. Collaboration rooms
    create_table_if_not_exists(db, &schema, room::Entity).await?;
    create_table_if_not_exists(db, &schema, chat_message::Entity).await?;

    create_unique_index_if_not_exists(
        db,
        "uq_workspace_member_workspace_user",
        "workspace_member",
        &["workspace_id", "user_id"],
    )
    .await?;
    create_unique_index_if_not_exists(db, "uq_task_tag_task_name", "task_tag", &["task_id", "name"])
        .await?;
    create_unique_index_if_not_exists(
        db,
        "uq_milestone_dependency_pair",
        "milestone_dependency",
        &["milestone_id", "depends_on_id"],
    )
    .await?;

    // Lookup indexes for the list endpoints
    create_index_if_not_exists(db, "idx_task_project_status", "task", &["project_id", "status"])
        .await?;
    create_index_if_not_exists(
        db,
        "idx_activity_project_created",
        "activity",
        &["project_id", "created_at"],
    )
    .await?;
    create_index_if_not_exists(
        db,
        "idx_notification_user_read",
        "notification",
        &["user_id", "is_read"],
    )
    .await?;
    create_index_if_not_exists(db, "idx_chat_message_room", "chat_message", &["room_id"]).await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

fn is_already_exists(err: &DbErr) -> bool {
    let err_str = err.to_string().to_lowercase();
    err_str.contains("duplicate") || err_str.contains("already exists")
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let sql = format!(
        "CREATE INDEX {} ON {} ({})",
        index_name,
        table_name,
        columns.join(", ")
    );
    match db.execute(Statement::from_string(backend, sql)).await {
        Ok(_) => Ok(()),
        Err(e) if is_already_exists(&e) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to create index {}: {}", index_name, e);
            Err(e)
        }
    }
}

async fn create_unique_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let sql = format!(
        "CREATE UNIQUE INDEX {} ON {} ({})",
        index_name,
        table_name,
        columns.join(", ")
    );
    match db.execute(Statement::from_string(backend, sql)).await {
        Ok(_) => Ok(()),
        // Ignore duplicate index errors for idempotency.
        Err(e) if is_already_exists(&e) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to create unique index {}: {}", index_name, e);
            Err(e)
        }
    }
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    db.execute(create_stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create table {}: {}", entity.table_name(), e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbBackend;

    fn mysql_create_table<E: sea_orm::EntityTrait>(entity: E) -> String {
        let backend = DbBackend::MySql;
        let schema = Schema::new(backend);
        backend
            .build(&schema.create_table_from_entity(entity))
            .to_string()
    }

    #[test]
    fn should_store_whiteboard_in_mediumtext_on_mysql() {
        let sql = mysql_create_table(room::Entity).to_uppercase();

        assert!(sql.contains("MEDIUMTEXT"), "{}", sql);
    }

    #[tokio::test]
    async fn should_sync_schema_twice_without_error() {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        sync_schema(&db).await.unwrap();
        sync_schema(&db).await.unwrap();
    }
}
