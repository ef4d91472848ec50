use api_types::friend::{FriendRequest, FriendRequestStatus};
use api_types::profile::Profile;

/// A profile as seen from the acting user's friend list.
///
/// The acting user always appears in their own list with `is_me` set.
#[derive(Clone, Debug, PartialEq)]
pub struct Friend {
    pub profile: Profile,
    pub is_me: bool,
}

/// Pending edges touching the acting user, split by direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingRequests {
    /// Requests the acting user received and can accept.
    pub incoming: Vec<FriendRequest>,
    /// Requests the acting user sent and is waiting on.
    pub outgoing: Vec<FriendRequest>,
}

/// Canonical form used for email comparison and lookups.
///
/// Emails are unique case-insensitively, so they are lower-cased before
/// being sent to or compared against the backend.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Derives the friend list from the request edges touching the acting user.
///
/// The acting user comes first with `is_me = true`; every accepted edge in
/// either direction contributes its counterpart, resolved against the given
/// profile set. Counterparts with no loaded profile are skipped (the view
/// can only show profiles it has).
pub fn derive_friends(me: &Profile, profiles: &[Profile], requests: &[FriendRequest]) -> Vec<Friend> {
    let mut friends = vec![Friend {
        profile: me.clone(),
        is_me: true,
    }];

    for request in requests {
        if request.status != FriendRequestStatus::Accepted {
            continue;
        }
        let other_id = if request.sender_id == me.id {
            &request.receiver_id
        } else if request.receiver_id == me.id {
            &request.sender_id
        } else {
            continue;
        };
        if friends.iter().any(|friend| friend.profile.id == *other_id) {
            continue;
        }
        if let Some(profile) = profiles.iter().find(|profile| profile.id == *other_id) {
            friends.push(Friend {
                profile: profile.clone(),
                is_me: false,
            });
        }
    }

    friends
}

/// Splits the pending edges touching the acting user by direction.
pub fn pending_requests(user_id: &str, requests: &[FriendRequest]) -> PendingRequests {
    let mut pending = PendingRequests::default();
    for request in requests {
        if request.status != FriendRequestStatus::Pending {
            continue;
        }
        if request.receiver_id == user_id {
            pending.incoming.push(request.clone());
        } else if request.sender_id == user_id {
            pending.outgoing.push(request.clone());
        }
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            display_name: id.to_uppercase(),
            avatar: None,
            created_at: None,
        }
    }

    fn request(id: &str, sender: &str, receiver: &str, status: FriendRequestStatus) -> FriendRequest {
        FriendRequest {
            id: id.to_string(),
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            status,
            created_at: None,
        }
    }

    #[test]
    fn accepted_edges_in_either_direction_make_friends() {
        let me = profile("a");
        let profiles = vec![profile("a"), profile("b"), profile("c")];
        let requests = vec![
            request("r1", "a", "b", FriendRequestStatus::Accepted),
            request("r2", "c", "a", FriendRequestStatus::Accepted),
        ];

        let friends = derive_friends(&me, &profiles, &requests);
        assert_eq!(friends.len(), 3);
        assert!(friends[0].is_me);
        assert!(friends.iter().any(|f| f.profile.id == "b" && !f.is_me));
        assert!(friends.iter().any(|f| f.profile.id == "c" && !f.is_me));
    }

    #[test]
    fn pending_edges_do_not_make_friends() {
        let me = profile("a");
        let profiles = vec![profile("a"), profile("b")];
        let requests = vec![request("r1", "a", "b", FriendRequestStatus::Pending)];

        let friends = derive_friends(&me, &profiles, &requests);
        assert_eq!(friends.len(), 1);
        assert!(friends[0].is_me);
    }

    #[test]
    fn counterpart_without_profile_is_skipped() {
        let me = profile("a");
        let profiles = vec![profile("a")];
        let requests = vec![request("r1", "a", "b", FriendRequestStatus::Accepted)];

        let friends = derive_friends(&me, &profiles, &requests);
        assert_eq!(friends.len(), 1);
    }

    #[test]
    fn pending_requests_split_by_direction() {
        let requests = vec![
            request("r1", "b", "a", FriendRequestStatus::Pending),
            request("r2", "a", "c", FriendRequestStatus::Pending),
            request("r3", "a", "d", FriendRequestStatus::Accepted),
        ];

        let pending = pending_requests("a", &requests);
        assert_eq!(pending.incoming.len(), 1);
        assert_eq!(pending.incoming[0].id, "r1");
        assert_eq!(pending.outgoing.len(), 1);
        assert_eq!(pending.outgoing[0].id, "r2");
    }

    #[test]
    fn emails_normalize_case_insensitively() {
        assert_eq!(normalize_email(" Bob@Example.COM "), "bob@example.com");
    }
}
