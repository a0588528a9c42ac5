use chrono::Local;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use super::{profile_detail, tournament_detail};
use crate::{
    core::{
        error::{AppError, AppResult},
        utils::{non_blank, parse_date_opt},
    },
    model::{profile::ProfileFields, tournament_history::TournamentFields},
    repository::{
        profile::{get_profile, update_profile},
        tournament_history::{create_entry, delete_entry, get_entry, list_by_profile, update_entry},
    },
    schema::profile::{
        EditorMutationResponse, EditorResponse, ProfileUpdateRequest, TournamentRequest,
    },
};

pub fn profile_fields(req: ProfileUpdateRequest) -> AppResult<ProfileFields> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    let fields = ProfileFields {
        name: req.name,
        age: req.age,
        gender: req.gender,
        dominant_hand: req.dominant_hand,
        dupr_id: non_blank(req.dupr_id),
        bio: non_blank(req.bio),
        city: non_blank(req.city),
        state: non_blank(req.state),
        country: non_blank(req.country),
        has_sponsorship: req.has_sponsorship,
        sponsorship_details: non_blank(req.sponsorship_details),
        next_tournament: non_blank(req.next_tournament),
    };
    Ok(fields.normalized())
}

pub fn tournament_fields(req: TournamentRequest) -> AppResult<TournamentFields> {
    if req.tournament_name.trim().is_empty() {
        return Err(AppError::Validation(
            "tournament_name is required".to_string(),
        ));
    }
    Ok(TournamentFields {
        tournament_date: parse_date_opt(req.tournament_date.as_deref())?,
        tournament_name: req.tournament_name,
        location: non_blank(req.location),
        singles_result: non_blank(req.singles_result),
        doubles_result: non_blank(req.doubles_result),
        mixed_doubles_result: non_blank(req.mixed_doubles_result),
        notes: non_blank(req.notes),
    })
}

pub async fn build_editor(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
) -> AppResult<EditorResponse> {
    let profile = get_profile(tx, account_id).await?;
    let tournaments = list_by_profile(tx, account_id, None).await?;
    Ok(EditorResponse {
        profile: profile_detail(&profile),
        tournaments: tournaments.iter().map(tournament_detail).collect(),
    })
}

async fn mutation_response(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
    message: &str,
) -> AppResult<EditorMutationResponse> {
    let editor = build_editor(tx, account_id).await?;
    Ok(EditorMutationResponse {
        message: message.to_string(),
        editor,
    })
}

/// Fails unless the entry exists and belongs to the account.
async fn owned_entry(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
    entry_id: &Uuid,
) -> AppResult<()> {
    let entry = get_entry(tx, entry_id).await?;
    if entry.profile_id != *account_id {
        return Err(AppError::Forbidden(
            "tournament entry belongs to another player".to_string(),
        ));
    }
    Ok(())
}

pub async fn save_profile(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
    req: ProfileUpdateRequest,
) -> AppResult<EditorMutationResponse> {
    let fields = profile_fields(req)?;
    update_profile(tx, account_id, fields).await?;
    mutation_response(tx, account_id, "Profile saved successfully!").await
}

pub async fn add_tournament(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
    req: TournamentRequest,
) -> AppResult<EditorMutationResponse> {
    let fields = tournament_fields(req)?;
    let now = Local::now().fixed_offset();
    create_entry(tx, account_id, &fields, &now).await?;
    mutation_response(tx, account_id, "Tournament added successfully!").await
}

pub async fn edit_tournament(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
    entry_id: &Uuid,
    req: TournamentRequest,
) -> AppResult<EditorMutationResponse> {
    let fields = tournament_fields(req)?;
    owned_entry(tx, account_id, entry_id).await?;
    update_entry(tx, entry_id, &fields).await?;
    mutation_response(tx, account_id, "Tournament updated successfully!").await
}

/// Hard delete. `confirmed` must be set by the caller.
pub async fn remove_tournament(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
    entry_id: &Uuid,
    confirmed: bool,
) -> AppResult<EditorMutationResponse> {
    if !confirmed {
        return Err(AppError::Validation(
            "deleting a tournament entry requires confirm=true".to_string(),
        ));
    }
    owned_entry(tx, account_id, entry_id).await?;
    delete_entry(tx, entry_id).await?;
    mutation_response(tx, account_id, "Tournament entry deleted successfully!").await
}
