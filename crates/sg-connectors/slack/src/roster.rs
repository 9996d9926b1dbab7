// roster.rs: Build the class roster from the workspace user directory.
//
// Two paginated listings: `users.list` for names and ids, then
// `conversations.list?types=im` to find each user's DM channel. A DM channel
// only exists once the user has interacted with the bot, so students
// without one are normal.

use serde::Deserialize;
use sg_ledger::{LedgerError, Roster, RosterProvider, Student};

use crate::client::{ResponseMetadata, SlackClient, PAGE_LIMIT};
use crate::error::SlackError;

#[derive(Debug, Deserialize)]
struct Member {
    id: String,
    name: String,
    #[serde(default)]
    deleted: bool,
}

#[derive(Debug, Deserialize)]
struct UsersPage {
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Debug, Deserialize)]
struct ImChannel {
    id: String,
    #[serde(default)]
    user: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImPage {
    #[serde(default)]
    channels: Vec<ImChannel>,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

/// [`RosterProvider`] backed by the Slack user directory.
pub struct SlackRoster {
    client: SlackClient,
}

impl SlackRoster {
    pub fn new(client: SlackClient) -> Self {
        Self { client }
    }

    fn list_users(&self) -> Result<Vec<Member>, SlackError> {
        let mut members = Vec::new();
        let mut cursor = String::new();
        loop {
            let mut query = vec![("limit", PAGE_LIMIT)];
            if !cursor.is_empty() {
                query.push(("cursor", cursor.as_str()));
            }
            let page: UsersPage = self.client.get("users.list", &query)?;
            members.extend(page.members);

            if page.response_metadata.next_cursor.is_empty() {
                break;
            }
            cursor = page.response_metadata.next_cursor;
        }
        Ok(members)
    }

    fn list_ims(&self) -> Result<Vec<ImChannel>, SlackError> {
        let mut channels = Vec::new();
        let mut cursor = String::new();
        loop {
            let mut query = vec![("types", "im"), ("limit", PAGE_LIMIT)];
            if !cursor.is_empty() {
                query.push(("cursor", cursor.as_str()));
            }
            let page: ImPage = self.client.get("conversations.list", &query)?;
            channels.extend(page.channels);

            if page.response_metadata.next_cursor.is_empty() {
                break;
            }
            cursor = page.response_metadata.next_cursor;
        }
        Ok(channels)
    }
}

/// Join user and IM listings into a roster. Deleted users are dropped; IM
/// channels for users not in the listing (bots, deactivated accounts) are
/// ignored.
fn assemble(members: Vec<Member>, ims: Vec<ImChannel>) -> Roster {
    let mut roster: Roster = members
        .into_iter()
        .filter(|m| !m.deleted)
        .map(|m| Student::new(m.name).with_external_id(m.id))
        .collect();

    for im in ims {
        let Some(user) = im.user else { continue };
        if !roster.attach_dm(&user, im.id.clone()) {
            tracing::warn!(user = %user, channel = %im.id, "DM channel for unknown user, ignoring");
        }
    }
    roster
}

impl RosterProvider for SlackRoster {
    fn fetch(&self) -> Result<Roster, LedgerError> {
        let members = self
            .list_users()
            .map_err(|e| LedgerError::Roster(e.to_string()))?;
        let ims = self
            .list_ims()
            .map_err(|e| LedgerError::Roster(e.to_string()))?;

        let roster = assemble(members, ims);
        tracing::info!(students = roster.len(), "fetched Slack roster");
        Ok(roster)
    }
}
