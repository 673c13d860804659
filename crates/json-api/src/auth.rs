//! Owner identification.
//!
//! Token verification happens upstream; by the time a request reaches this
//! service the verified user id arrives in a trusted header.

use salvo::prelude::*;
use uuid::Uuid;

/// Header carrying the authenticated user's UUID.
pub(crate) const USER_HEADER: &str = "x-user-uuid";

const OWNER_UUID_KEY: &str = "owner_uuid";

/// Depot accessors for the authenticated owner.
pub(crate) trait OwnerExt {
    fn insert_owner_uuid(&mut self, owner: Uuid);
    fn owner_uuid_or_400(&self) -> Result<Uuid, StatusError>;
}

impl OwnerExt for Depot {
    fn insert_owner_uuid(&mut self, owner: Uuid) {
        self.insert(OWNER_UUID_KEY, owner);
    }

    fn owner_uuid_or_400(&self) -> Result<Uuid, StatusError> {
        self.get::<Uuid>(OWNER_UUID_KEY)
            .map(|owner| *owner)
            .map_err(|_ignored| StatusError::bad_request().brief("User not found"))
    }
}

/// Require an identified owner on every route below this hoop.
#[salvo::handler]
pub(crate) async fn middleware(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let owner = req
        .header::<String>(USER_HEADER)
        .and_then(|value| value.parse::<Uuid>().ok());

    match owner {
        Some(owner) => {
            depot.insert_owner_uuid(owner);
            ctrl.call_next(req, depot, res).await;
        }
        None => {
            res.render(StatusError::bad_request().brief("User not found"));
            ctrl.skip_rest();
        }
    }
}
