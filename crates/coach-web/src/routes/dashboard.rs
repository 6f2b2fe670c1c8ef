//! Server-rendered dashboard.

use askama::Template;
use axum::extract::State;
use database::models::StatsUpdate;
use database::{CoachingTip, Conversation, LeadStatus, RelationshipStage, Stats, User};
use serde::Deserialize;

use crate::coaching::{self, LeadAdvice};
use crate::error::Result;
use crate::extract::ApiQuery;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: User,
    pub stats: Stats,
    /// Success score out of 10 with one decimal, e.g. "8.4".
    pub success_score: String,
    pub pipeline: Vec<PipelineColumn>,
    pub tips: Vec<CoachingTip>,
    pub workflows: Vec<WorkflowRow>,
    pub whatsapp_live: bool,
}

/// Leads in one pipeline column.
pub struct PipelineColumn {
    pub title: &'static str,
    pub leads: Vec<LeadCard>,
}

/// One lead as shown on the board.
pub struct LeadCard {
    pub id: i64,
    pub partner_name: String,
    pub last_message: String,
    pub last_active: String,
    pub personality: String,
    pub response_rate: i64,
    pub advice: LeadAdvice,
}

/// One workflow row.
pub struct WorkflowRow {
    pub name: String,
    pub status: &'static str,
    pub last_updated: String,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default = "default_user")]
    pub user: i64,
}

fn default_user() -> i64 {
    1
}

/// Render the dashboard of `?user=<id>` (the demo user by default).
pub async fn dashboard_page(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Result<DashboardTemplate> {
    let pool = state.db.pool();

    let user = database::user::get_user(pool, query.user).await?;
    let stats = match database::stats::get_stats(pool, user.id).await? {
        Some(stats) => stats,
        None => database::stats::upsert_stats(pool, user.id, &StatsUpdate::default()).await?,
    };
    let leads = database::conversation::list_conversations(pool, user.id).await?;
    let tips = database::coaching_tip::list_tips(pool, user.id).await?;
    let workflows = database::workflow::list_workflows(pool, user.id)
        .await?
        .into_iter()
        .map(|w| WorkflowRow {
            name: w.name,
            status: w.status.as_str(),
            last_updated: w.last_updated,
        })
        .collect();

    Ok(DashboardTemplate {
        user,
        success_score: format_score(stats.success_score),
        stats,
        pipeline: pipeline(&leads),
        tips,
        workflows,
        whatsapp_live: state.twilio.is_configured() && state.mistral.is_configured(),
    })
}

/// Group leads into Lust, Labor, Loyal and Dead columns, leaving out
/// channel threads.
fn pipeline(leads: &[Conversation]) -> Vec<PipelineColumn> {
    let mut columns: Vec<PipelineColumn> = ["Lust", "Labor", "Loyal", "Dead"]
        .into_iter()
        .map(|title| PipelineColumn {
            title,
            leads: Vec::new(),
        })
        .collect();

    for lead in leads.iter().filter(|lead| lead.is_lead()) {
        let index = match (lead.status, lead.relationship_stage) {
            (LeadStatus::DeadLead, _) => 3,
            (_, RelationshipStage::Lust) => 0,
            (_, RelationshipStage::Labor) => 1,
            (_, RelationshipStage::Loyal) => 2,
        };
        columns[index].leads.push(card(lead));
    }

    columns
}

/// Render a score stored in tenths (0 to 100) as "x.y".
fn format_score(tenths: i64) -> String {
    let tenths = tenths.clamp(0, 100);
    format!("{}.{}", tenths / 10, tenths % 10)
}

fn card(lead: &Conversation) -> LeadCard {
    let personality = [lead.star_sign.as_deref(), lead.mbti_type.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    LeadCard {
        id: lead.id,
        partner_name: lead.partner_name.clone(),
        last_message: lead.last_message.clone().unwrap_or_default(),
        last_active: lead.last_active.clone(),
        personality,
        response_rate: lead.response_rate,
        advice: coaching::lead_advice(lead),
    }
}
