//! AI workflow records.

use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewWorkflow, Workflow, WorkflowUpdate};

const WORKFLOW_COLUMNS: &str = "id, user_id, name, status, last_updated, results";

/// Create a workflow record.
pub async fn create_workflow(pool: &SqlitePool, workflow: &NewWorkflow) -> Result<Workflow> {
    let query = format!(
        r#"
        INSERT INTO workflows (user_id, name, status, results)
        VALUES (?, ?, ?, ?)
        RETURNING {WORKFLOW_COLUMNS}
        "#
    );

    let created = sqlx::query_as::<_, Workflow>(&query)
        .bind(workflow.user_id)
        .bind(&workflow.name)
        .bind(workflow.status.unwrap_or_default())
        .bind(Json(&workflow.results))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            DatabaseError::from_write(
                e,
                "Workflow",
                &workflow.name,
                ("User", workflow.user_id.to_string()),
            )
        })?;

    tracing::debug!(
        workflow_id = created.id,
        name = %created.name,
        status = ?created.status,
        "Created workflow"
    );
    Ok(created)
}

/// Get a workflow by ID.
pub async fn get_workflow(pool: &SqlitePool, id: i64) -> Result<Workflow> {
    let query = format!("SELECT {WORKFLOW_COLUMNS} FROM workflows WHERE id = ?");

    sqlx::query_as::<_, Workflow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Workflow",
            id: id.to_string(),
        })
}

/// List a user's workflows, most recently updated first.
pub async fn list_workflows(pool: &SqlitePool, user_id: i64) -> Result<Vec<Workflow>> {
    let query = format!(
        r#"
        SELECT {WORKFLOW_COLUMNS}
        FROM workflows
        WHERE user_id = ?
        ORDER BY last_updated DESC, id DESC
        "#
    );

    let workflows = sqlx::query_as::<_, Workflow>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(workflows)
}

/// Merge fields into a workflow and refresh `last_updated`.
pub async fn update_workflow(
    pool: &SqlitePool,
    id: i64,
    update: &WorkflowUpdate,
) -> Result<Workflow> {
    let query = format!(
        r#"
        UPDATE workflows
        SET name = COALESCE(?, name),
            status = COALESCE(?, status),
            results = COALESCE(?, results),
            last_updated = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        RETURNING {WORKFLOW_COLUMNS}
        "#
    );

    let updated = sqlx::query_as::<_, Workflow>(&query)
        .bind(&update.name)
        .bind(update.status)
        .bind(update.results.as_ref().map(Json))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Workflow",
            id: id.to_string(),
        })?;

    tracing::debug!(workflow_id = id, status = ?updated.status, "Updated workflow");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkflowStatus;
    use crate::test_support::{test_db, test_user};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_defaults_to_queued() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;

        let workflow = create_workflow(
            db.pool(),
            &NewWorkflow {
                user_id: user.id,
                name: "Profile Analysis".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(workflow.status, WorkflowStatus::Queued);
        assert!(workflow.results.is_none());
        assert_eq!(get_workflow(db.pool(), workflow.id).await.unwrap(), workflow);
    }

    #[tokio::test]
    async fn test_update_stores_results_and_restamps() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;
        let workflow = create_workflow(
            db.pool(),
            &NewWorkflow {
                user_id: user.id,
                name: "Conversation Processing".to_string(),
                status: Some(WorkflowStatus::Running),
                results: None,
            },
        )
        .await
        .unwrap();

        let results = json!({ "profileScore": 85, "improvements": ["Add more photos"] });
        let updated = update_workflow(
            db.pool(),
            workflow.id,
            &WorkflowUpdate {
                status: Some(WorkflowStatus::Completed),
                results: Some(results.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.status, WorkflowStatus::Completed);
        assert_eq!(updated.results, Some(results));
        assert_eq!(updated.name, "Conversation Processing");
        assert!(updated.last_updated >= workflow.last_updated);

        let missing = update_workflow(db.pool(), 999, &WorkflowUpdate::default()).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound { entity: "Workflow", .. })));
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let db = test_db().await;
        let user = test_user(&db, "jordan").await;

        let mut ids = Vec::new();
        for name in ["a", "b"] {
            let workflow = create_workflow(
                db.pool(),
                &NewWorkflow {
                    user_id: user.id,
                    name: name.to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
            ids.push(workflow.id);
        }

        sqlx::query("UPDATE workflows SET last_updated = '2000-01-01T00:00:00.000Z' WHERE id = ?")
            .bind(ids[1])
            .execute(db.pool())
            .await
            .unwrap();

        let listed: Vec<i64> = list_workflows(db.pool(), user.id)
            .await
            .unwrap()
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(listed, vec![ids[0], ids[1]]);
    }
}
