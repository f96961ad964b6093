//! Compensating actions for the two-step identity + profile writes.

use tracing::{error, warn};

use crate::{
    error::AppError,
    identity::IdentityError,
    store::{Collection, Document},
    state::AppState,
};

/// Profile write failed after the identity was created: remove the identity.
///
/// Returns `cause` when the rollback succeeds, `PartialFailure` otherwise.
pub(crate) async fn roll_back_identity(state: &AppState, uid: &str, cause: AppError) -> AppError {
    match state.identity.delete_identity(uid).await {
        Ok(()) => {
            warn!(%uid, error = %cause, "profile write failed; identity rolled back");
            cause
        }
        Err(e) => {
            error!(%uid, error = %e, cause = %cause, "identity rollback failed");
            AppError::PartialFailure(format!(
                "identity {uid} was created but its profile could not be stored ({cause}); \
                 removing the identity also failed ({e})"
            ))
        }
    }
}

/// Identity delete failed after the profile was removed: put the profile back.
///
/// Without a snapshot nothing was removed, so the identity error stands.
///
/// The restore writes the snapshot taken before the delete. A role update that
/// lands between that snapshot and the restore is overwritten.
pub(crate) async fn restore_profile(
    state: &AppState,
    uid: &str,
    snapshot: Option<Document>,
    cause: IdentityError,
) -> AppError {
    let Some(doc) = snapshot else {
        return cause.into();
    };
    match state.store.set(Collection::Users, uid, doc).await {
        Ok(()) => {
            warn!(%uid, error = %cause, "identity delete failed; profile restored");
            cause.into()
        }
        Err(e) => {
            error!(%uid, error = %e, cause = %cause, "profile restore failed");
            AppError::PartialFailure(format!(
                "profile {uid} was deleted but its identity could not be removed ({cause}); \
                 restoring the profile also failed ({e})"
            ))
        }
    }
}
