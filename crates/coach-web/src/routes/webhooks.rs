//! Provider webhooks: inbound WhatsApp messages and delivery status callbacks.

use axum::extract::State;
use axum::http::StatusCode;
use coach_brain::HistoryTurn;
use database::models::{NewConversation, NewMessage, NewSmsLog, NewUser, SmsLogUpdate};
use database::{Conversation, DatabaseError, SmsStatus, SmsType, User};
use tracing::{debug, info, warn};
use twilio_client::{parse_incoming, DeliveryStatus, IncomingMessage, StatusCallback, WebhookPayload};

use crate::error::{ApiError, Result};
use crate::extract::ApiForm;
use crate::routes::whatsapp::{AURA_THREAD, WHATSAPP_CHANNEL};
use crate::state::AppState;

/// Earlier messages of the thread handed to the model as context.
const HISTORY_WINDOW: usize = 10;

/// Handle an inbound WhatsApp message and answer it as Aura.
///
/// The sender is registered on first contact. Writes made before a failure
/// are kept.
pub async fn whatsapp(
    State(state): State<AppState>,
    ApiForm(payload): ApiForm<WebhookPayload>,
) -> Result<(StatusCode, &'static str)> {
    let Some(incoming) = parse_incoming(&payload) else {
        warn!("Rejected WhatsApp webhook without sender or body");
        return Ok((StatusCode::BAD_REQUEST, "Invalid message format"));
    };

    info!(
        from = %incoming.from,
        sid = incoming.message_sid.as_deref().unwrap_or_default(),
        "Received WhatsApp message"
    );

    answer(&state, &incoming).await?;

    Ok((StatusCode::OK, "Message processed"))
}

async fn answer(state: &AppState, incoming: &IncomingMessage) -> Result<()> {
    let pool = state.db.pool();

    let user = find_or_create_user(state, &incoming.from).await?;
    let thread = find_or_create_thread(state, &user).await?;

    let inbound = database::message::create_message(
        pool,
        &NewMessage {
            conversation_id: thread.id,
            content: incoming.body.clone(),
            is_from_user: true,
            ai_suggested: false,
        },
    )
    .await?;

    // One extra row covers the inbound message, which is sent as the prompt.
    let recent =
        database::message::recent_messages(pool, thread.id, HISTORY_WINDOW as i64 + 1).await?;
    let mut history: Vec<HistoryTurn> = recent
        .into_iter()
        .filter(|m| m.id != inbound.id)
        .map(|m| HistoryTurn::new(m.is_from_user, m.content))
        .collect();
    if history.len() > HISTORY_WINDOW {
        history.drain(..history.len() - HISTORY_WINDOW);
    }

    let reply = state
        .mistral
        .generate_dating_advice(&incoming.body, &history)
        .await;

    database::message::create_message(
        pool,
        &NewMessage {
            conversation_id: thread.id,
            content: reply.clone(),
            is_from_user: false,
            ai_suggested: true,
        },
    )
    .await?;

    let outcome = state.twilio.send_whatsapp(&incoming.from, &reply).await;

    let log = database::sms_log::create_sms_log(
        pool,
        &NewSmsLog {
            user_id: user.id,
            message_type: SmsType::WhatsappChat,
            content: format!("User: {}\nAura: {}", incoming.body, reply),
            phone: incoming.from.clone(),
            status: if outcome.success {
                SmsStatus::Sent
            } else {
                SmsStatus::Failed
            },
            provider_sid: outcome.sid.clone(),
        },
    )
    .await?;

    info!(
        user_id = user.id,
        conversation_id = thread.id,
        log_id = log.id,
        history = history.len(),
        delivered = outcome.success,
        "Answered WhatsApp message"
    );

    Ok(())
}

/// The user registered under `phone`, created on first contact.
async fn find_or_create_user(state: &AppState, phone: &str) -> Result<User> {
    let pool = state.db.pool();

    match database::user::get_user_by_username(pool, phone).await {
        Ok(user) => return Ok(user),
        Err(DatabaseError::NotFound { .. }) => {}
        Err(err) => return Err(err.into()),
    }

    let draft = NewUser {
        username: phone.to_string(),
        password: database::password::random_password(),
        first_name: "WhatsApp".to_string(),
        last_name: "User".to_string(),
        phone: Some(phone.to_string()),
        sms_enabled: Some(true),
    };

    match database::user::create_user(pool, &draft, state.hash_cost).await {
        Ok(user) => {
            info!(user_id = user.id, phone, "Registered WhatsApp user");
            Ok(user)
        }
        // A concurrent webhook for the same number got there first.
        Err(DatabaseError::AlreadyExists { .. }) => {
            Ok(database::user::get_user_by_username(pool, phone).await?)
        }
        Err(err) => Err(err.into()),
    }
}

/// The user's single WhatsApp thread with Aura, created on first contact.
async fn find_or_create_thread(state: &AppState, user: &User) -> Result<Conversation> {
    let pool = state.db.pool();

    if let Some(thread) =
        database::conversation::find_by_channel(pool, user.id, WHATSAPP_CHANNEL).await?
    {
        return Ok(thread);
    }

    let draft = NewConversation {
        user_id: user.id,
        partner_name: AURA_THREAD.to_string(),
        channel: Some(WHATSAPP_CHANNEL.to_string()),
        ..Default::default()
    };

    match database::conversation::create_conversation(pool, &draft).await {
        Ok(thread) => {
            debug!(user_id = user.id, conversation_id = thread.id, "Created Aura thread");
            Ok(thread)
        }
        // A concurrent webhook for the same user created it first.
        Err(DatabaseError::AlreadyExists { .. }) => {
            database::conversation::find_by_channel(pool, user.id, WHATSAPP_CHANNEL)
                .await?
                .ok_or_else(|| ApiError::Internal("WhatsApp thread vanished".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Record a delivery status reported by the provider.
///
/// Unknown message ids are acknowledged so the provider does not retry.
pub async fn sms_status(
    State(state): State<AppState>,
    ApiForm(callback): ApiForm<StatusCallback>,
) -> Result<StatusCode> {
    let pool = state.db.pool();

    let Some(log) = database::sms_log::get_sms_log_by_provider_id(pool, &callback.message_sid).await?
    else {
        debug!(sid = %callback.message_sid, "Status callback for unknown message");
        return Ok(StatusCode::OK);
    };

    let status = match callback.delivery_status() {
        DeliveryStatus::Sent => SmsStatus::Sent,
        DeliveryStatus::Failed => SmsStatus::Failed,
        DeliveryStatus::Pending => return Ok(StatusCode::OK),
    };

    let updated = database::sms_log::update_sms_log(
        pool,
        log.id,
        &SmsLogUpdate {
            status: Some(status),
            provider_sid: None,
        },
    )
    .await?;
    info!(
        log_id = updated.id,
        sid = %callback.message_sid,
        status = ?updated.status,
        error_code = callback.error_code.as_deref().unwrap_or_default(),
        "Delivery status updated"
    );

    Ok(StatusCode::OK)
}
